use serde::{Deserialize, Serialize};

use super::team::TeamPlayer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    OnLoan,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub researcher_name: String,
    pub specialization: String,
    pub h_index: u32,
    pub cost: u64,
    pub availability: Availability,
    pub avatar_url: String,
}

impl Listing {
    /// Roster entry for a hired researcher.
    pub fn to_player(&self) -> TeamPlayer {
        TeamPlayer {
            id: self.id.clone(),
            name: self.researcher_name.clone(),
            role: self.specialization.clone(),
            h_index: self.h_index,
            papers_published: 0,
            avatar_url: self.avatar_url.clone(),
            research_potential: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Marketplace {
    pub listings: Vec<Listing>,
}

impl Marketplace {
    pub fn seed() -> Self {
        let listing = |id: &str, name: &str, field: &str, h_index: u32, availability: Availability, seed: &str| Listing {
            id: id.to_string(),
            researcher_name: name.to_string(),
            specialization: field.to_string(),
            h_index,
            // Listing price tracks the researcher's h-index
            cost: u64::from(h_index),
            availability,
            avatar_url: format!("https://picsum.photos/seed/{}/100/100", seed),
        };
        Self {
            listings: vec![
                listing("market1", "Dr. C. Lorentz", "Theoretical Physics", 35, Availability::Available, "lorentz"),
                listing("market2", "Dr. A. Turing", "Computer Science", 40, Availability::Available, "turing"),
                listing("market3", "Dr. R. Franklin", "Molecular Biology", 28, Availability::OnLoan, "franklin"),
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// Checks that a listing can be hired with `credits` without changing
    /// anything. Returns `Err` with a human-readable reason on failure.
    pub fn quote(&self, id: &str, credits: u64) -> Result<&Listing, String> {
        let listing = self
            .get(id)
            .ok_or_else(|| format!("unknown listing {}", id))?;
        if listing.availability != Availability::Available {
            return Err(format!("{} is not available", listing.researcher_name));
        }
        if credits < listing.cost {
            return Err(format!(
                "not enough credits (need {}, have {})",
                listing.cost, credits
            ));
        }
        Ok(listing)
    }

    /// Takes a researcher off the market. The caller deducts `cost` from the
    /// user's credits.
    pub fn hire(&mut self, id: &str, credits: u64) -> Result<Listing, String> {
        self.quote(id, credits)?;
        let listing = self
            .listings
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| format!("unknown listing {}", id))?;
        listing.availability = Availability::Unavailable;
        Ok(listing.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hire_marks_listing_unavailable() {
        let mut market = Marketplace::seed();
        let hired = market.hire("market1", 150).unwrap();
        assert_eq!(hired.cost, 35);
        assert_eq!(market.get("market1").unwrap().availability, Availability::Unavailable);
        assert!(market.hire("market1", 150).is_err());
    }

    #[test]
    fn hire_requires_funds() {
        let mut market = Marketplace::seed();
        let err = market.hire("market2", 39).unwrap_err();
        assert!(err.contains("need 40, have 39"));
        assert_eq!(market.get("market2").unwrap().availability, Availability::Available);
        assert!(market.hire("market2", 40).is_ok());
    }

    #[test]
    fn quote_leaves_listing_untouched() {
        let market = Marketplace::seed();
        assert_eq!(market.quote("market1", 35).unwrap().cost, 35);
        assert!(market.quote("market1", 34).is_err());
        assert_eq!(market.get("market1").unwrap().availability, Availability::Available);
    }

    #[test]
    fn on_loan_cannot_be_hired() {
        let mut market = Marketplace::seed();
        assert!(market.hire("market3", 1000).is_err());
        assert!(market.hire("missing", 1000).is_err());
    }

    #[test]
    fn hired_researcher_becomes_player() {
        let market = Marketplace::seed();
        let player = market.get("market2").unwrap().to_player();
        assert_eq!(player.name, "Dr. A. Turing");
        assert_eq!(player.h_index, 40);
    }
}
