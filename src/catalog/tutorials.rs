use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

// ── Tutorial definition ─────────────────────────────────────────────

#[derive(Debug)]
pub struct TutorialDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub content_preview: &'static str,
    pub difficulty: Difficulty,
    pub duration: &'static str,
    pub xp_reward: u64,
}

/// Returns the full tutorial catalogue.
pub fn all_tutorials() -> &'static [TutorialDef] {
    static TUTORIALS: &[TutorialDef] = &[
        TutorialDef {
            id: "tut1",
            title: "Understanding Your H-index",
            description: "Learn what the H-index means and how it impacts your academic career.",
            content_preview: "The h-index is a metric for evaluating the cumulative impact of an author's scholarly output...",
            difficulty: Difficulty::Beginner,
            duration: "20 mins",
            xp_reward: 50,
        },
        TutorialDef {
            id: "tut2",
            title: "Maximizing Research Impact",
            description: "Strategies to increase the visibility and impact of your research.",
            content_preview: "Effective dissemination strategies include open access publishing, presenting at conferences...",
            difficulty: Difficulty::Intermediate,
            duration: "45 mins",
            xp_reward: 100,
        },
        TutorialDef {
            id: "tut3",
            title: "Advanced Grant Proposal Writing",
            description: "Craft compelling grant proposals that get funded.",
            content_preview: "Key sections of a grant proposal include the abstract, specific aims, research strategy...",
            difficulty: Difficulty::Advanced,
            duration: "1 hour 30 mins",
            xp_reward: 200,
        },
    ];

    TUTORIALS
}

pub fn get_tutorial(id: &str) -> Option<&'static TutorialDef> {
    all_tutorials().iter().find(|t| t.id == id)
}

// ── Completion state ────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct TutorialProgress {
    pub completed: HashSet<&'static str>,
}

impl TutorialProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finished tutorial and returns its definition so the caller
    /// can pay out the reward. Each tutorial pays once.
    pub fn complete(&mut self, id: &str) -> Result<&'static TutorialDef, String> {
        let def = get_tutorial(id).ok_or_else(|| format!("unknown tutorial {}", id))?;
        if self.completed.contains(def.id) {
            return Err(format!("\"{}\" already completed", def.title));
        }
        self.completed.insert(def.id);
        Ok(def)
    }

    pub fn has(&self, id: &str) -> bool {
        self.completed.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completing_returns_reward() {
        let mut progress = TutorialProgress::new();
        let def = progress.complete("tut2").unwrap();
        assert_eq!(def.xp_reward, 100);
        assert!(progress.has("tut2"));
    }

    #[test]
    fn tutorial_pays_once() {
        let mut progress = TutorialProgress::new();
        progress.complete("tut1").unwrap();
        let err = progress.complete("tut1").unwrap_err();
        assert!(err.contains("already completed"));
    }

    #[test]
    fn unknown_tutorial_rejected() {
        let mut progress = TutorialProgress::new();
        assert!(progress.complete("tut99").is_err());
        assert!(progress.completed.is_empty());
    }
}
