use serde::{Deserialize, Serialize};

use super::team::{seed_league_teams, Team, TeamPlayer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeagueVisibility {
    Public,
    Private,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub id: String,
    pub name: String,
    pub description: String,
    pub visibility: LeagueVisibility,
    pub scoring_rules: String,
    pub teams: Vec<Team>,
}

/// One row of the league table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub position: u32,
    pub team_id: String,
    pub team_name: String,
    pub manager_name: String,
    pub score: u32,
    pub player_count: usize,
    pub combined_h_index: u32,
}

impl League {
    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    pub fn team_mut(&mut self, team_id: &str) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == team_id)
    }

    /// Adds a player to a team's roster. Fails if the team is unknown or
    /// the player is already on it.
    pub fn sign_player(&mut self, team_id: &str, player: TeamPlayer) -> Result<(), String> {
        let team = self
            .team_mut(team_id)
            .ok_or_else(|| format!("unknown team {}", team_id))?;
        if team.has_player(&player.id) {
            return Err(format!("{} is already on {}", player.name, team.name));
        }
        team.players.push(player);
        Ok(())
    }

    /// Teams ordered by score, highest first. Ties keep league order.
    pub fn leaderboard(&self) -> Vec<Standing> {
        let mut ranked: Vec<&Team> = self.teams.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
            .into_iter()
            .enumerate()
            .map(|(i, team)| Standing {
                position: i as u32 + 1,
                team_id: team.id.clone(),
                team_name: team.name.clone(),
                manager_name: team.manager_name.clone(),
                score: team.score,
                player_count: team.players.len(),
                combined_h_index: team.combined_h_index(),
            })
            .collect()
    }
}

pub fn seed_league() -> League {
    League {
        id: "leagueAlpha".to_string(),
        name: "Innovators League Season 1".to_string(),
        description: "Compete to be the most impactful research group of the season!".to_string(),
        visibility: LeagueVisibility::Public,
        scoring_rules: "Points for H-index growth, publications, and conference presentations."
            .to_string(),
        teams: seed_league_teams(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::team::USER_TEAM_ID;

    fn rookie(id: &str) -> TeamPlayer {
        TeamPlayer {
            id: id.to_string(),
            name: "Rookie".to_string(),
            role: "PhD Student".to_string(),
            h_index: 1,
            papers_published: 1,
            avatar_url: String::new(),
            research_potential: None,
        }
    }

    #[test]
    fn leaderboard_sorted_by_score() {
        let mut league = seed_league();
        league.teams[2].score = 2000;
        let table = league.leaderboard();
        assert_eq!(table[0].team_id, "teamC");
        assert_eq!(table[0].position, 1);
        assert_eq!(table[1].team_id, USER_TEAM_ID);
        assert_eq!(table[1].combined_h_index, 42);
        assert_eq!(table[2].position, 3);
    }

    #[test]
    fn ties_keep_league_order() {
        let mut league = seed_league();
        for team in &mut league.teams {
            team.score = 100;
        }
        let ids: Vec<_> = league.leaderboard().into_iter().map(|s| s.team_id).collect();
        assert_eq!(ids, vec![USER_TEAM_ID, "teamB", "teamC"]);
    }

    #[test]
    fn signing_twice_is_rejected() {
        let mut league = seed_league();
        league.sign_player(USER_TEAM_ID, rookie("r1")).unwrap();
        assert!(league.sign_player(USER_TEAM_ID, rookie("r1")).is_err());
        assert!(league.sign_player("nope", rookie("r2")).is_err());
        assert_eq!(league.team(USER_TEAM_ID).unwrap().players.len(), 4);
    }
}
