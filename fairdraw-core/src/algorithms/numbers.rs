use super::sampling::{range_size, sample_range, MAX_DRAW_COUNT};
use crate::error::{DrawError, Result};
use crate::seed::seed_number;
use crate::types::Metadata;
use serde::{Deserialize, Serialize};

/// Draw integers from the inclusive range `min..=max`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumbersConfig {
    pub min: i64,
    pub max: i64,
    pub count: usize,
    #[serde(default)]
    pub allow_repeats: bool,
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl NumbersConfig {
    pub fn new(min: i64, max: i64, count: usize, allow_repeats: bool) -> Self {
        Self {
            min,
            max,
            count,
            allow_repeats,
            metadata: Metadata::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let range = range_size(self.min, self.max).ok_or_else(|| {
            DrawError::invalid_input(format!(
                "min ({}) must not be greater than max ({})",
                self.min, self.max
            ))
        })?;

        if self.count == 0 {
            return Err(DrawError::invalid_input("numbers draw count must be at least 1"));
        }
        if self.count > MAX_DRAW_COUNT {
            return Err(DrawError::invalid_input(format!(
                "numbers draw count {} exceeds the limit of {}",
                self.count, MAX_DRAW_COUNT
            )));
        }
        if !self.allow_repeats && self.count as u128 > range {
            return Err(DrawError::invalid_input(format!(
                "cannot draw {} distinct numbers from a range of {}",
                self.count, range
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumbersResult {
    /// Drawn numbers, ascending
    pub numbers: Vec<i64>,
}

pub fn draw(config: &NumbersConfig, seed: &str) -> Result<NumbersResult> {
    config.validate()?;

    let mut numbers = sample_range(
        config.min,
        config.max,
        config.count,
        config.allow_repeats,
        seed_number(seed),
    )?;
    numbers.sort_unstable();

    Ok(NumbersResult { numbers })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_single_value_range() {
        let result = draw(&NumbersConfig::new(1, 1, 1, false), "any-seed").unwrap();
        assert_eq!(result.numbers, vec![1]);
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(matches!(
            draw(&NumbersConfig::new(5, 1, 1, false), "s"),
            Err(DrawError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_count_exceeds_range_without_repeats() {
        assert!(matches!(
            draw(&NumbersConfig::new(1, 5, 6, false), "s"),
            Err(DrawError::InvalidInput(_))
        ));
        // allowed once repeats are on
        assert_eq!(draw(&NumbersConfig::new(1, 5, 6, true), "s").unwrap().numbers.len(), 6);
    }

    #[test]
    fn test_count_limit() {
        assert!(NumbersConfig::new(1, 2, MAX_DRAW_COUNT, true).validate().is_ok());
        for allow_repeats in [true, false] {
            let config = NumbersConfig::new(i64::MIN, i64::MAX, MAX_DRAW_COUNT + 1, allow_repeats);
            assert!(matches!(config.validate(), Err(DrawError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_no_repeats_within_bounds() {
        for seed in ["alpha", "beta", "gamma", "delta"] {
            let result = draw(&NumbersConfig::new(-20, 40, 30, false), seed).unwrap();
            let unique: HashSet<_> = result.numbers.iter().collect();
            assert_eq!(unique.len(), 30);
            assert!(result.numbers.iter().all(|n| (-20..=40).contains(n)));
            assert!(result.numbers.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_deterministic() {
        let config = NumbersConfig::new(1, 1000, 10, false);
        assert_eq!(draw(&config, "Z9").unwrap(), draw(&config, "Z9").unwrap());
    }

    #[test]
    fn test_config_json_shape() {
        let config: NumbersConfig = serde_json::from_value(serde_json::json!({
            "min": 1, "max": 49, "count": 6, "allowRepeats": false, "title": "Lotto"
        }))
        .unwrap();
        assert!(!config.allow_repeats);
        assert_eq!(config.metadata["title"], "Lotto");

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["allowRepeats"], false);
        assert_eq!(value["title"], "Lotto");
    }
}
