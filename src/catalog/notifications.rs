use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Notifications kept in the feed; the oldest fall off first.
pub const MAX_NOTIFICATIONS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub text: String,
    pub kind: NotificationKind,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

/// Newest-first notification feed.
#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    items: Vec<Notification>,
    next_id: u64,
}

impl NotificationFeed {
    pub fn seed(now: DateTime<Utc>) -> Self {
        let seeded = |id: &str, text: &str, kind: NotificationKind, hours_ago: i64, read: bool| Notification {
            id: id.to_string(),
            text: text.to_string(),
            kind,
            timestamp: now - Duration::hours(hours_ago),
            read,
        };
        let items = vec![
            seeded(
                "notif1",
                "New Publication \"Quantum Entanglement in Bio-systems\" by Dr. Eva Core added!",
                NotificationKind::Info,
                1,
                false,
            ),
            seeded(
                "notif2",
                "Your H-index was updated to 16 from Scopus.",
                NotificationKind::Success,
                2,
                true,
            ),
            seeded(
                "notif3",
                "Team \"QuantumLeapers Lab\" is now ranked #1 in Innovators League!",
                NotificationKind::Success,
                3,
                false,
            ),
        ];
        Self {
            next_id: items.len() as u64 + 1,
            items,
        }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Prepends an unread notification and returns its id.
    pub fn push(&mut self, text: impl Into<String>, kind: NotificationKind) -> String {
        let id = format!("notif{}", self.next_id);
        self.next_id += 1;
        self.items.insert(
            0,
            Notification {
                id: id.clone(),
                text: text.into(),
                kind,
                timestamp: Utc::now(),
                read: false,
            },
        );
        self.items.truncate(MAX_NOTIFICATIONS);
        id
    }

    pub fn mark_read(&mut self, id: &str) -> Result<(), String> {
        let item = self
            .items
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| format!("unknown notification {}", id))?;
        item.read = true;
        Ok(())
    }

    pub fn mark_all_read(&mut self) {
        for item in &mut self.items {
            item.read = true;
        }
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_two_unread() {
        let feed = NotificationFeed::seed(Utc::now());
        assert_eq!(feed.items().len(), 3);
        assert_eq!(feed.unread_count(), 2);
    }

    #[test]
    fn mark_read_and_mark_all() {
        let mut feed = NotificationFeed::seed(Utc::now());
        feed.mark_read("notif1").unwrap();
        assert_eq!(feed.unread_count(), 1);
        assert!(feed.mark_read("notif42").is_err());
        feed.mark_all_read();
        assert_eq!(feed.unread_count(), 0);
    }

    #[test]
    fn pushed_notifications_come_first_with_fresh_ids() {
        let mut feed = NotificationFeed::seed(Utc::now());
        let id = feed.push("Hired Dr. A. Turing", NotificationKind::Success);
        assert_eq!(id, "notif4");
        assert_eq!(feed.items()[0].id, "notif4");
        assert!(!feed.items()[0].read);
        assert_eq!(feed.unread_count(), 3);
    }

    #[test]
    fn feed_drops_oldest_past_cap() {
        let mut feed = NotificationFeed::seed(Utc::now());
        for i in 0..(MAX_NOTIFICATIONS * 2) {
            feed.push(format!("H-index bump {}", i), NotificationKind::Success);
        }
        assert_eq!(feed.items().len(), MAX_NOTIFICATIONS);
        assert_eq!(feed.items()[0].text, format!("H-index bump {}", MAX_NOTIFICATIONS * 2 - 1));
        assert!(feed.items().iter().all(|n| n.id != "notif1"));
    }
}
