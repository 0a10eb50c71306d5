use std::collections::VecDeque;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::catalog::league::{seed_league, League};
use crate::catalog::marketplace::Marketplace;
use crate::catalog::notifications::{NotificationFeed, NotificationKind};
use crate::catalog::team::{Team, USER_TEAM_ID};
use crate::catalog::tutorials::{all_tutorials, TutorialProgress};
use crate::progression::profiles::Platform;
use crate::progression::{self, levels, UserProgress};
use crate::protocol::{
    LogCategory, LogEntry, PlatformInfo, SessionSnapshot, TutorialSnapshot, UserSnapshot,
};

/// Activity log entries kept for the client.
const MAX_LOG_ENTRIES: usize = 50;

/// Descriptive account data. Not touched by progression.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub institution: Option<String>,
    pub field_of_study: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub career_stage: String,
    pub citations: u32,
    pub research_credits: u32,
}

impl UserProfile {
    pub fn seed() -> Self {
        Self {
            id: "user123".to_string(),
            username: "DrResearch".to_string(),
            email: "dr.research@example.com".to_string(),
            institution: Some("University of Innovation".to_string()),
            field_of_study: Some("Computational Biology".to_string()),
            bio: Some("Passionate about advancing science through collaboration and gamification. Seeking to unravel the mysteries of the universe, one dataset at a time.".to_string()),
            avatar_url: Some("https://picsum.photos/seed/user123/200/200".to_string()),
            career_stage: "Established Researcher".to_string(),
            citations: 1200,
            research_credits: 75,
        }
    }
}

/// Everything one session knows, owned in one place.
///
/// The progress record is only ever replaced with the result of a
/// `progression` operation, so a snapshot never sees a half-applied change.
pub struct Session {
    pub profile: UserProfile,
    progress: UserProgress,
    league: League,
    tutorials: TutorialProgress,
    marketplace: Marketplace,
    notifications: NotificationFeed,
    log: VecDeque<LogEntry>,
    rng: StdRng,
}

impl Session {
    pub fn seed() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        let mut session = Self {
            profile: UserProfile::seed(),
            progress: UserProgress::seed(),
            league: seed_league(),
            tutorials: TutorialProgress::new(),
            marketplace: Marketplace::seed(),
            notifications: NotificationFeed::seed(Utc::now()),
            log: VecDeque::new(),
            rng,
        };
        session.log("Session started", LogCategory::System);
        session
    }

    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    pub fn user_team(&self) -> Option<&Team> {
        self.league.team(USER_TEAM_ID)
    }

    pub fn notifications(&self) -> &NotificationFeed {
        &self.notifications
    }

    fn log(&mut self, text: impl Into<String>, category: LogCategory) {
        let text = text.into();
        info!("[{:?}] {}", category, text);
        if self.log.len() == MAX_LOG_ENTRIES {
            self.log.pop_front();
        }
        self.log.push_back(LogEntry {
            at: Utc::now(),
            text,
            category,
        });
    }

    fn replace_progress(&mut self, next: UserProgress) {
        if next.level > self.progress.level {
            let text = format!("Level up! You are now level {} ({})", next.level, next.rank);
            self.notifications.push(text.clone(), NotificationKind::Success);
            self.log(text, LogCategory::Progression);
        }
        self.progress = next;
    }

    // ── Progression commands ────────────────────────────────────────

    pub fn update_h_index(&mut self, h_index: u32) {
        let before = self.progress.h_index;
        let next = progression::apply_h_index_change(&self.progress, h_index);
        self.log(
            format!(
                "H-index {} -> {} (credits {} -> {}, XP {} -> {})",
                before,
                h_index,
                self.progress.credits,
                next.credits,
                self.progress.experience,
                next.experience
            ),
            LogCategory::Progression,
        );
        self.replace_progress(next);
    }

    pub fn adjust_credits(&mut self, amount: i64) {
        let next = progression::adjust_credits(&self.progress, amount);
        self.log(
            format!("Credits {:+} (balance {})", amount, next.credits),
            LogCategory::Economy,
        );
        self.replace_progress(next);
    }

    pub fn link_profile(
        &mut self,
        platform: Platform,
        external_id: &str,
        observed_h_index: Option<u32>,
    ) -> Result<(), String> {
        let external_id = external_id.trim();
        if external_id.is_empty() {
            return Err(format!("{} profile id is required", platform));
        }
        let before = self.progress.h_index;
        let next =
            progression::link_external_profile(&self.progress, platform, external_id, observed_h_index);
        let after = next.h_index;
        self.replace_progress(next);

        self.log(format!("Linked {} profile {}", platform, external_id), LogCategory::Profiles);
        if after > before {
            self.notifications.push(
                format!("Your H-index was updated to {} from {}.", after, platform),
                NotificationKind::Success,
            );
        }
        Ok(())
    }

    /// Links a profile using a simulated lookup of its h-index.
    /// Returns the observed h-index on success.
    pub fn fetch_and_link_profile(
        &mut self,
        platform: Platform,
        external_id: &str,
    ) -> Result<u32, String> {
        if external_id.trim().is_empty() {
            return Err(format!("{} profile id is required", platform));
        }
        let observed = progression::simulate_profile_fetch(&mut self.rng, self.progress.h_index)
            .ok_or_else(|| {
                format!(
                    "Failed to link {} profile. Please check the ID and try again.",
                    platform
                )
            })?;
        self.link_profile(platform, external_id, Some(observed))?;
        Ok(observed)
    }

    pub fn unlink_profile(&mut self, platform: Platform) {
        let next = progression::unlink_profile(&self.progress, platform);
        self.replace_progress(next);
        self.log(format!("Unlinked {} profile", platform), LogCategory::Profiles);
    }

    // ── Catalog commands ────────────────────────────────────────────

    pub fn complete_tutorial(&mut self, tutorial_id: &str) -> Result<(), String> {
        let def = self.tutorials.complete(tutorial_id)?;
        let next = progression::award_experience(&self.progress, def.xp_reward);
        self.replace_progress(next);
        let text = format!("Completed \"{}\" (+{} XP)", def.title, def.xp_reward);
        self.notifications.push(text.clone(), NotificationKind::Success);
        self.log(text, LogCategory::Progression);
        Ok(())
    }

    pub fn hire_researcher(&mut self, listing_id: &str) -> Result<(), String> {
        // Nothing changes unless both the listing and the roster accept the hire
        let player = self
            .marketplace
            .quote(listing_id, self.progress.credits)?
            .to_player();
        self.league.sign_player(USER_TEAM_ID, player)?;
        let hired = self.marketplace.hire(listing_id, self.progress.credits)?;
        let next = progression::adjust_credits(&self.progress, -(hired.cost as i64));
        self.replace_progress(next);

        let text = format!("Hired {} for {} credits", hired.researcher_name, hired.cost);
        self.notifications.push(text.clone(), NotificationKind::Success);
        self.log(text, LogCategory::Economy);
        Ok(())
    }

    pub fn mark_notification_read(&mut self, id: &str) -> Result<(), String> {
        self.notifications.mark_read(id)
    }

    pub fn mark_all_notifications_read(&mut self) {
        self.notifications.mark_all_read();
    }

    pub fn note_assistant(&mut self, text: impl Into<String>) {
        self.log(text, LogCategory::Assistant);
    }

    // ── Snapshot ────────────────────────────────────────────────────

    pub fn snapshot(&self, assistant_online: bool) -> SessionSnapshot {
        let p = &self.profile;
        let user = UserSnapshot {
            id: p.id.clone(),
            username: p.username.clone(),
            email: p.email.clone(),
            institution: p.institution.clone(),
            field_of_study: p.field_of_study.clone(),
            bio: p.bio.clone(),
            avatar_url: p.avatar_url.clone(),
            career_stage: p.career_stage.clone(),
            citations: p.citations,
            research_credits: p.research_credits,
            credits: self.progress.credits,
            experience: self.progress.experience,
            level: self.progress.level,
            rank: self.progress.rank.clone(),
            xp_to_next_level: levels::xp_to_next_level(self.progress.experience),
            h_index: self.progress.h_index,
            linked_profiles: self.progress.linked_profiles.iter().cloned().collect(),
        };

        let tutorials = all_tutorials()
            .iter()
            .map(|t| TutorialSnapshot {
                id: t.id.to_string(),
                title: t.title.to_string(),
                description: t.description.to_string(),
                content_preview: t.content_preview.to_string(),
                difficulty: t.difficulty,
                duration: t.duration.to_string(),
                xp_reward: t.xp_reward,
                completed: self.tutorials.has(t.id),
            })
            .collect();

        let platforms = Platform::ALL
            .iter()
            .map(|&platform| PlatformInfo {
                platform,
                name: platform.display_name().to_string(),
                id_prefix: platform.id_prefix().to_string(),
                placeholder: platform.placeholder().to_string(),
            })
            .collect();

        SessionSnapshot {
            user,
            team: self.user_team().cloned(),
            league_name: self.league.name.clone(),
            leaderboard: self.league.leaderboard(),
            tutorials,
            marketplace: self.marketplace.listings.clone(),
            notifications: self.notifications.items().to_vec(),
            unread_notifications: self.notifications.unread_count(),
            platforms,
            assistant_online,
            log_entries: self.log.iter().cloned().collect(),
        }
    }
}
