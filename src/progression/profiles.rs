use serde::{Deserialize, Serialize};

// ── Platforms ───────────────────────────────────────────────────────

/// Citation databases a researcher can link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Platform {
    Scopus,
    GoogleScholar,
    Orcid,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Scopus, Platform::GoogleScholar, Platform::Orcid];

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Scopus => "Scopus",
            Platform::GoogleScholar => "Google Scholar",
            Platform::Orcid => "ORCID",
        }
    }

    /// Label shown in front of the external id.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Platform::Scopus => "Author ID: ",
            Platform::GoogleScholar => "Profile URL: ",
            Platform::Orcid => "ORCID iD: ",
        }
    }

    /// Example input for the link dialog.
    pub fn placeholder(self) -> &'static str {
        match self {
            Platform::Scopus => "e.g., 12345678900",
            Platform::GoogleScholar => "e.g., https://scholar.google.com/citations?user=yourid",
            Platform::Orcid => "e.g., 0000-0001-2345-6789",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

// ── Linked profile record ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLink {
    pub platform: Platform,
    /// Empty while unlinked.
    pub external_id: String,
    pub linked: bool,
    pub last_observed_h_index: Option<u32>,
}

impl ProfileLink {
    pub fn linked(platform: Platform, external_id: &str, observed: Option<u32>) -> Self {
        Self {
            platform,
            external_id: external_id.to_string(),
            linked: true,
            last_observed_h_index: observed,
        }
    }
}

/// Linked profiles, unique per platform, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedProfiles {
    entries: Vec<ProfileLink>,
}

impl LinkedProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, platform: Platform) -> Option<&ProfileLink> {
        self.entries.iter().find(|p| p.platform == platform)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProfileLink> {
        self.entries.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Links `platform`, inserting a new entry if none exists. An absent
    /// `observed` h-index keeps whatever was stored before.
    pub fn upsert_linked(&mut self, platform: Platform, external_id: &str, observed: Option<u32>) {
        match self.entries.iter_mut().find(|p| p.platform == platform) {
            Some(entry) => {
                entry.external_id = external_id.to_string();
                entry.linked = true;
                if observed.is_some() {
                    entry.last_observed_h_index = observed;
                }
            }
            None => self.entries.push(ProfileLink::linked(platform, external_id, observed)),
        }
    }

    /// Marks `platform` unlinked and clears its id and observation.
    /// Returns `false` if the platform was never recorded.
    pub fn mark_unlinked(&mut self, platform: Platform) -> bool {
        match self.entries.iter_mut().find(|p| p.platform == platform) {
            Some(entry) => {
                entry.linked = false;
                entry.external_id.clear();
                entry.last_observed_h_index = None;
                true
            }
            None => false,
        }
    }

    pub(crate) fn push_raw(&mut self, link: ProfileLink) {
        if self.get(link.platform).is_none() {
            self.entries.push(link);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_keeps_one_entry_per_platform() {
        let mut links = LinkedProfiles::new();
        links.upsert_linked(Platform::Orcid, "a", Some(3));
        links.upsert_linked(Platform::Orcid, "b", None);
        assert_eq!(links.len(), 1);
        let orcid = links.get(Platform::Orcid).unwrap();
        assert_eq!(orcid.external_id, "b");
        // Missing observation keeps the previous one
        assert_eq!(orcid.last_observed_h_index, Some(3));
    }

    #[test]
    fn unlink_unknown_platform_is_noop() {
        let mut links = LinkedProfiles::new();
        assert!(!links.mark_unlinked(Platform::Scopus));
        assert!(links.is_empty());
    }

    #[test]
    fn display_names_match_ui_labels() {
        assert_eq!(Platform::GoogleScholar.to_string(), "Google Scholar");
        assert_eq!(Platform::Orcid.id_prefix(), "ORCID iD: ");
    }
}
