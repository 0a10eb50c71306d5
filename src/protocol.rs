use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assistant::prompts::GrantSection;
use crate::assistant::AssistantPanel;
use crate::catalog::league::Standing;
use crate::catalog::marketplace::Listing;
use crate::catalog::notifications::Notification;
use crate::catalog::team::Team;
use crate::catalog::tutorials::Difficulty;
use crate::progression::profiles::{Platform, ProfileLink};

// ── User ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSnapshot {
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
    pub credits: u64,
    pub experience: u64,
    pub level: u32,
    pub rank: String,
    pub xp_to_next_level: Option<u64>,
    pub h_index: u32,
    pub linked_profiles: Vec<ProfileLink>,
}

// ── Catalog views ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorialSnapshot {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content_preview: String,
    pub difficulty: Difficulty,
    pub duration: String,
    pub xp_reward: u64,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub platform: Platform,
    pub name: String,
    pub id_prefix: String,
    pub placeholder: String,
}

// ── Activity log ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub text: String,
    pub category: LogCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogCategory {
    System,
    Progression,
    Economy,
    Profiles,
    Assistant,
}

// ── Full session state (Server → Client) ──────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub user: UserSnapshot,
    pub team: Option<Team>,
    pub league_name: String,
    pub leaderboard: Vec<Standing>,
    pub tutorials: Vec<TutorialSnapshot>,
    pub marketplace: Vec<Listing>,
    pub notifications: Vec<Notification>,
    pub unread_notifications: usize,
    pub platforms: Vec<PlatformInfo>,
    pub assistant_online: bool,
    pub log_entries: Vec<LogEntry>,
}

// ── Client → Server messages ───────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClientAction {
    RequestSnapshot,

    // Progression
    UpdateHIndex { h_index: u32 },
    AdjustCredits { amount: i64 },
    LinkProfile {
        platform: Platform,
        external_id: String,
        observed_h_index: Option<u32>,
    },
    /// Link after a simulated lookup of the platform's h-index.
    FetchAndLinkProfile { platform: Platform, external_id: String },
    UnlinkProfile { platform: Platform },

    // Catalog
    CompleteTutorial { tutorial_id: String },
    HireResearcher { listing_id: String },
    MarkNotificationRead { id: String },
    MarkAllNotificationsRead,

    // Research assistant
    GenerateIdea { prompt: String },
    GenerateGrantSnippet { topic: String, section: GrantSection },
    SetAssistantApiKey { key: String },
}

/// Server-to-client message wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServerMessage {
    /// Full state after any change.
    Snapshot(Box<SessionSnapshot>),
    /// A command was refused; state is unchanged.
    ActionRejected { reason: String },
    /// An assistant request was accepted and is in flight.
    AssistantPending { panel: AssistantPanel },
    /// Latest assistant text for a panel.
    AssistantResult { panel: AssistantPanel, text: String },
}
