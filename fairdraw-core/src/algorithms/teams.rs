use super::shuffle::shuffled;
use crate::error::{DrawError, Result};
use crate::seed::seed_number;
use crate::types::Metadata;
use serde::{Deserialize, Serialize};

fn default_balance() -> bool {
    true
}

/// Split `players` into `team_count` teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamsConfig {
    pub players: Vec<String>,
    pub team_count: usize,
    /// Deal round-robin when set, otherwise contiguous chunks
    #[serde(default = "default_balance")]
    pub balance_teams: bool,
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl TeamsConfig {
    pub fn new(players: Vec<String>, team_count: usize, balance_teams: bool) -> Self {
        Self {
            players,
            team_count,
            balance_teams,
            metadata: Metadata::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.team_count < 2 {
            return Err(DrawError::invalid_input("at least 2 teams are required"));
        }
        if self.team_count > self.players.len() {
            return Err(DrawError::invalid_input(format!(
                "cannot split {} players into {} teams",
                self.players.len(),
                self.team_count
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub players: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamsResult {
    pub teams: Vec<Team>,
}

pub fn draw(config: &TeamsConfig, seed: &str) -> Result<TeamsResult> {
    config.validate()?;

    let players = shuffled(&config.players, seed_number(seed));
    let team_count = config.team_count;
    let mut rosters: Vec<Vec<String>> = vec![Vec::new(); team_count];

    if config.balance_teams {
        for (i, player) in players.into_iter().enumerate() {
            rosters[i % team_count].push(player);
        }
    } else {
        let chunk = players.len() / team_count;
        let mut players = players.into_iter();
        for roster in rosters.iter_mut() {
            roster.extend(players.by_ref().take(chunk));
        }
        // remainder goes to the last team
        if let Some(last) = rosters.last_mut() {
            last.extend(players);
        }
    }

    let teams = rosters
        .into_iter()
        .enumerate()
        .map(|(i, players)| Team {
            name: format!("Team {}", i + 1),
            players,
        })
        .collect();

    Ok(TeamsResult { teams })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn players(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("player{}", i)).collect()
    }

    fn assert_coverage(result: &TeamsResult, input: &[String]) {
        let mut seen = HashSet::new();
        for team in &result.teams {
            for player in &team.players {
                assert!(seen.insert(player.clone()), "{} placed twice", player);
            }
        }
        let expected: HashSet<String> = input.iter().cloned().collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_balanced_sizes() {
        let input = players(11);
        let result = draw(&TeamsConfig::new(input.clone(), 3, true), "teams-seed").unwrap();

        assert_coverage(&result, &input);
        let sizes: Vec<usize> = result.teams.iter().map(|t| t.players.len()).collect();
        assert_eq!(sizes, vec![4, 4, 3]);
        assert_eq!(result.teams[2].name, "Team 3");
    }

    #[test]
    fn test_unbalanced_remainder_on_last_team() {
        let input = players(11);
        let result = draw(&TeamsConfig::new(input.clone(), 3, false), "teams-seed").unwrap();

        assert_coverage(&result, &input);
        let sizes: Vec<usize> = result.teams.iter().map(|t| t.players.len()).collect();
        assert_eq!(sizes, vec![3, 3, 5]);
    }

    #[test]
    fn test_one_player_per_team() {
        let input = players(4);
        let result = draw(&TeamsConfig::new(input.clone(), 4, false), "s").unwrap();
        assert_coverage(&result, &input);
        assert!(result.teams.iter().all(|t| t.players.len() == 1));
    }

    #[test]
    fn test_invalid_team_counts() {
        assert!(matches!(
            draw(&TeamsConfig::new(players(5), 1, true), "s"),
            Err(DrawError::InvalidInput(_))
        ));
        assert!(matches!(
            draw(&TeamsConfig::new(players(3), 4, true), "s"),
            Err(DrawError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_balance_defaults_on() {
        let config: TeamsConfig =
            serde_json::from_str(r#"{"players":["a","b"],"teamCount":2}"#).unwrap();
        assert!(config.balance_teams);
    }
}
