use super::shuffle::shuffled;
use crate::error::{DrawError, Result};
use crate::seed::seed_number;
use crate::types::Metadata;
use serde::{Deserialize, Serialize};

/// Random running order for every item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfig {
    pub items: Vec<String>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl OrderConfig {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            metadata: Metadata::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(DrawError::invalid_input("order draw needs at least one item"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// 1-based
    pub position: usize,
    pub item: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    pub order: Vec<Placement>,
}

pub fn draw(config: &OrderConfig, seed: &str) -> Result<OrderResult> {
    config.validate()?;

    let order = shuffled(&config.items, seed_number(seed))
        .into_iter()
        .enumerate()
        .map(|(i, item)| Placement {
            position: i + 1,
            item,
        })
        .collect();

    Ok(OrderResult { order })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bijection_with_duplicates() {
        let items: Vec<String> = ["ann", "bob", "ann", "cy", "dee", "eve"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let result = draw(&OrderConfig::new(items.clone()), "order").unwrap();

        let positions: Vec<usize> = result.order.iter().map(|p| p.position).collect();
        assert_eq!(positions, (1..=items.len()).collect::<Vec<_>>());

        let mut drawn: Vec<String> = result.order.into_iter().map(|p| p.item).collect();
        drawn.sort();
        let mut expected = items;
        expected.sort();
        assert_eq!(drawn, expected);
    }

    #[test]
    fn test_single_item() {
        let result = draw(&OrderConfig::new(vec!["only".into()]), "s").unwrap();
        assert_eq!(
            result.order,
            vec![Placement {
                position: 1,
                item: "only".into()
            }]
        );
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            draw(&OrderConfig::new(vec![]), "s"),
            Err(DrawError::InvalidInput(_))
        ));
    }
}
