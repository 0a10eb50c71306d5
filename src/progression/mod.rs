pub mod levels;
pub mod profiles;

use rand::Rng;
use serde::{Deserialize, Serialize};

use self::profiles::{LinkedProfiles, Platform, ProfileLink};

/// XP granted per h-index point gained.
pub const XP_PER_H_INDEX_POINT: u64 = 10;

/// Chance that a simulated profile fetch succeeds.
const FETCH_SUCCESS_RATE: f64 = 0.8;

// ── Progress record ─────────────────────────────────────────────────

/// Gamification state for the session user.
///
/// `level` and `rank` are always derived from `experience`; every operation
/// below returns a fresh record with all fields consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    pub experience: u64,
    pub credits: u64,
    pub level: u32,
    pub rank: String,
    pub h_index: u32,
    pub linked_profiles: LinkedProfiles,
}

impl UserProgress {
    pub fn new(experience: u64, credits: u64, h_index: u32) -> Self {
        let (level, rank) = levels::level_and_rank(experience);
        Self {
            experience,
            credits,
            level,
            rank: rank.to_string(),
            h_index,
            linked_profiles: LinkedProfiles::new(),
        }
    }

    /// The fixed record every session starts from.
    pub fn seed() -> Self {
        let mut progress = Self::new(2500, 150, 15);
        progress.linked_profiles.push_raw(ProfileLink::linked(
            Platform::Scopus,
            "123456789",
            Some(15),
        ));
        progress.linked_profiles.push_raw(ProfileLink {
            platform: Platform::GoogleScholar,
            external_id: "scholar_id_xyz".to_string(),
            linked: false,
            last_observed_h_index: None,
        });
        progress.linked_profiles.push_raw(ProfileLink::linked(
            Platform::Orcid,
            "0000-0001-2345-6789",
            Some(14),
        ));
        progress
    }

    fn with_experience(mut self, experience: u64) -> Self {
        let (level, rank) = levels::level_and_rank(experience);
        self.experience = experience;
        self.level = level;
        self.rank = rank.to_string();
        self
    }
}

fn offset_credits(credits: u64, amount: i64) -> u64 {
    if amount >= 0 {
        credits.saturating_add(amount as u64)
    } else {
        credits.saturating_sub(amount.unsigned_abs())
    }
}

// ── Operations ──────────────────────────────────────────────────────

/// Sets a new h-index and applies its rewards in one step.
///
/// Credits move by the signed difference (floored at 0). XP only grows, by
/// `XP_PER_H_INDEX_POINT` per point gained.
pub fn apply_h_index_change(current: &UserProgress, new_h_index: u32) -> UserProgress {
    let delta = i64::from(new_h_index) - i64::from(current.h_index);
    let credits = offset_credits(current.credits, delta);
    let experience = if delta > 0 {
        current
            .experience
            .saturating_add((delta as u64).saturating_mul(XP_PER_H_INDEX_POINT))
    } else {
        current.experience
    };

    let mut next = current.clone().with_experience(experience);
    next.credits = credits;
    next.h_index = new_h_index;
    next
}

/// Adds (or with a negative amount, spends) credits. Never below 0.
pub fn adjust_credits(current: &UserProgress, amount: i64) -> UserProgress {
    let mut next = current.clone();
    next.credits = offset_credits(current.credits, amount);
    next
}

/// Grants XP from a non-metric source such as a finished tutorial.
pub fn award_experience(current: &UserProgress, amount: u64) -> UserProgress {
    let experience = current.experience.saturating_add(amount);
    current.clone().with_experience(experience)
}

/// Links (or relinks) a platform profile.
///
/// A higher observed h-index replaces the user's h-index, but no credit or
/// XP reward is applied for that bump; only `apply_h_index_change` pays out.
pub fn link_external_profile(
    current: &UserProgress,
    platform: Platform,
    external_id: &str,
    observed_h_index: Option<u32>,
) -> UserProgress {
    let mut next = current.clone();
    next.linked_profiles
        .upsert_linked(platform, external_id, observed_h_index);
    if let Some(observed) = observed_h_index {
        next.h_index = next.h_index.max(observed);
    }
    next
}

/// Unlinks a platform profile. Metrics and balances are left alone.
pub fn unlink_profile(current: &UserProgress, platform: Platform) -> UserProgress {
    let mut next = current.clone();
    next.linked_profiles.mark_unlinked(platform);
    next
}

/// Stands in for querying a citation database.
///
/// Fails one time in five; otherwise reports the current h-index plus a
/// small random gain (0 to 4).
pub fn simulate_profile_fetch<R: Rng>(rng: &mut R, current_h_index: u32) -> Option<u32> {
    if rng.gen_bool(FETCH_SUCCESS_RATE) {
        Some(current_h_index.saturating_add(rng.gen_range(0..5)))
    } else {
        None
    }
}
