use serde::{Deserialize, Serialize};

/// Team id owned by the session user.
pub const USER_TEAM_ID: &str = "teamAFL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPlayer {
    pub id: String,
    pub name: String,
    pub role: String,
    pub h_index: u32,
    pub papers_published: u32,
    pub avatar_url: String,
    pub research_potential: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub manager_name: String,
    pub budget: u32,
    pub score: u32,
    pub players: Vec<TeamPlayer>,
    pub logo_url: Option<String>,
}

impl Team {
    pub fn has_player(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    /// Sum of the roster's h-indices.
    pub fn combined_h_index(&self) -> u32 {
        self.players.iter().map(|p| p.h_index).sum()
    }
}

fn avatar(seed: &str) -> String {
    format!("https://picsum.photos/seed/{}/100/100", seed)
}

fn logo(seed: &str) -> Option<String> {
    Some(format!("https://picsum.photos/seed/{}/150/150", seed))
}

fn player(
    id: &str,
    name: &str,
    role: &str,
    h_index: u32,
    papers_published: u32,
    avatar_seed: &str,
    research_potential: Option<u8>,
) -> TeamPlayer {
    TeamPlayer {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        h_index,
        papers_published,
        avatar_url: avatar(avatar_seed),
        research_potential,
    }
}

/// The session user's own lab.
pub fn seed_user_team() -> Team {
    Team {
        id: USER_TEAM_ID.to_string(),
        name: "QuantumLeapers Lab".to_string(),
        manager_name: "DrResearch".to_string(),
        budget: 50,
        score: 1250,
        players: vec![
            player("player1", "Dr. Eva Core", "Lead PI", 25, 60, "eva", Some(90)),
            player("player2", "Alex Byte", "Post-doc", 12, 20, "alex", Some(75)),
            player("player3", "Sam Query", "PhD Student", 5, 8, "sam", Some(80)),
        ],
        logo_url: logo("qllab"),
    }
}

/// Every team in the starting league, the user's lab first.
pub fn seed_league_teams() -> Vec<Team> {
    vec![
        seed_user_team(),
        Team {
            id: "teamB".to_string(),
            name: "BioInnovators".to_string(),
            manager_name: "Prof. Genesis".to_string(),
            budget: 60,
            score: 1100,
            players: vec![
                player("playerB1", "Dr. Helix", "Senior Researcher", 22, 55, "helix", None),
                player("playerB2", "Gene Script", "Lab Tech", 3, 5, "gene", None),
            ],
            logo_url: logo("bioinn"),
        },
        Team {
            id: "teamC".to_string(),
            name: "DataDiggers".to_string(),
            manager_name: "Dr. Stats".to_string(),
            budget: 45,
            score: 950,
            players: vec![player("playerC1", "Algo Rithm", "Data Scientist", 18, 30, "algo", None)],
            logo_url: logo("datadg"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_team_roster() {
        let team = seed_user_team();
        assert_eq!(team.players.len(), 3);
        assert!(team.has_player("player2"));
        assert_eq!(team.combined_h_index(), 42);
    }

    #[test]
    fn league_teams_lead_with_user_team() {
        let teams = seed_league_teams();
        assert_eq!(teams[0].id, USER_TEAM_ID);
        assert_eq!(teams.len(), 3);
    }
}
