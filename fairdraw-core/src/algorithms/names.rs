use crate::error::{DrawError, Result};
use crate::rng;
use crate::seed::seed_number;
use crate::types::Metadata;
use serde::{Deserialize, Serialize};

/// Pick `count` winners from `items` without replacement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamesConfig {
    pub items: Vec<String>,
    pub count: usize,
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl NamesConfig {
    pub fn new(items: Vec<String>, count: usize) -> Self {
        Self {
            items,
            count,
            metadata: Metadata::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(DrawError::invalid_input("names draw needs at least one item"));
        }
        if self.count == 0 {
            return Err(DrawError::invalid_input("names draw count must be at least 1"));
        }
        if self.count > self.items.len() {
            return Err(DrawError::invalid_input(format!(
                "cannot pick {} winners from {} items",
                self.count,
                self.items.len()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamesResult {
    /// Winners in the order they were drawn
    pub winners: Vec<String>,
}

pub fn draw(config: &NamesConfig, seed: &str) -> Result<NamesResult> {
    config.validate()?;

    let seed_number = seed_number(seed);
    let mut remaining = config.items.clone();
    let mut winners = Vec::with_capacity(config.count);

    for step in 0..config.count {
        let index = rng::index_at(seed_number, step, remaining.len());
        winners.push(remaining.remove(index));
    }

    Ok(NamesResult { winners })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn abc(count: usize) -> NamesConfig {
        NamesConfig::new(vec!["A".into(), "B".into(), "C".into()], count)
    }

    #[test]
    fn test_pick_two_of_three() {
        let first = draw(&abc(2), "X").unwrap();
        let second = draw(&abc(2), "X").unwrap();

        assert_eq!(first, second);
        assert_eq!(first.winners.len(), 2);
        let unique: HashSet<_> = first.winners.iter().collect();
        assert_eq!(unique.len(), 2);
        assert!(first.winners.iter().all(|w| ["A", "B", "C"].contains(&w.as_str())));
    }

    #[test]
    fn test_pick_all_is_permutation() {
        let items: Vec<String> = (0..20).map(|i| format!("p{}", i)).collect();
        let config = NamesConfig::new(items.clone(), items.len());
        let mut winners = draw(&config, "full-permutation").unwrap().winners;
        winners.sort();
        let mut expected = items;
        expected.sort();
        assert_eq!(winners, expected);
    }

    #[test]
    fn test_first_winner_matches_generator() {
        let seed = "Seed123";
        let index = rng::index_at(seed_number(seed), 0, 3);
        let result = draw(&abc(1), seed).unwrap();
        assert_eq!(result.winners, vec![["A", "B", "C"][index].to_string()]);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            draw(&NamesConfig::new(vec![], 1), "s"),
            Err(DrawError::InvalidInput(_))
        ));
        assert!(matches!(draw(&abc(4), "s"), Err(DrawError::InvalidInput(_))));
        assert!(matches!(draw(&abc(0), "s"), Err(DrawError::InvalidInput(_))));
    }
}
