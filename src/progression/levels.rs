/// Minimum XP required for each level. Index 0 is level 1.
pub const LEVEL_THRESHOLDS: [u64; 8] = [0, 100, 500, 1000, 2000, 5000, 10000, 20000];

/// Rank titles, parallel to `LEVEL_THRESHOLDS`.
pub const RANKS: [&str; 8] = [
    "Novice Researcher",
    "Junior Scholar",
    "Researcher",
    "Senior Researcher",
    "Principal Investigator",
    "Associate Professor",
    "Distinguished Professor",
    "Academic Legend",
];

/// Returns the level reached with `experience` XP.
///
/// Walks the ascending threshold table and stops at the first tier that
/// has not been reached. Never returns less than 1.
pub fn level_for(experience: u64) -> u32 {
    let reached = LEVEL_THRESHOLDS
        .iter()
        .take_while(|&&threshold| experience >= threshold)
        .count();
    reached.max(1) as u32
}

/// Returns the rank title for a level, clamped to the last rank.
pub fn rank_for(level: u32) -> &'static str {
    let idx = (level.max(1) - 1) as usize;
    RANKS[idx.min(RANKS.len() - 1)]
}

/// Pure level/rank lookup for an XP total.
pub fn level_and_rank(experience: u64) -> (u32, &'static str) {
    let level = level_for(experience);
    (level, rank_for(level))
}

/// XP still needed to reach the next level, or `None` at the top tier.
pub fn xp_to_next_level(experience: u64) -> Option<u64> {
    LEVEL_THRESHOLDS
        .iter()
        .find(|&&threshold| threshold > experience)
        .map(|threshold| threshold - experience)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_xp_is_level_one() {
        assert_eq!(level_and_rank(0), (1, "Novice Researcher"));
    }

    #[test]
    fn seed_user_is_principal_investigator() {
        assert_eq!(level_and_rank(2500), (5, "Principal Investigator"));
    }

    #[test]
    fn exact_threshold_reaches_the_tier() {
        assert_eq!(level_for(99), 1);
        assert_eq!(level_for(100), 2);
        assert_eq!(level_for(4999), 5);
        assert_eq!(level_for(5000), 6);
    }

    #[test]
    fn level_is_monotonic_in_xp() {
        let mut previous = 0;
        for xp in (0..30_000).step_by(7) {
            let level = level_for(xp);
            assert!(level >= previous, "level dropped at xp {}", xp);
            previous = level;
        }
    }

    #[test]
    fn plateaus_beyond_last_threshold() {
        assert_eq!(level_and_rank(20_000), (8, "Academic Legend"));
        assert_eq!(level_and_rank(u64::MAX), (8, "Academic Legend"));
    }

    #[test]
    fn rank_clamps_past_table_end() {
        assert_eq!(rank_for(42), "Academic Legend");
        assert_eq!(rank_for(0), "Novice Researcher");
    }

    #[test]
    fn lookup_is_idempotent() {
        for xp in [0, 150, 999, 2500, 12_345] {
            assert_eq!(level_and_rank(xp), level_and_rank(xp));
        }
    }

    #[test]
    fn next_level_distance() {
        assert_eq!(xp_to_next_level(2500), Some(2500));
        assert_eq!(xp_to_next_level(0), Some(100));
        assert_eq!(xp_to_next_level(25_000), None);
    }
}
