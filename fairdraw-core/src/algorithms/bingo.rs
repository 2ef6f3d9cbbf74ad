use super::sampling::sample_range;
use crate::error::{DrawError, Result};
use crate::seed::seed_number;
use crate::types::Metadata;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const LETTERS: [char; 5] = ['B', 'I', 'N', 'G', 'O'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BingoVariant {
    #[serde(rename = "75")]
    Ball75,
    #[serde(rename = "90")]
    Ball90,
}

impl BingoVariant {
    pub fn max_ball(self) -> u32 {
        match self {
            BingoVariant::Ball75 => 75,
            BingoVariant::Ball90 => 90,
        }
    }

    /// Column letter for 75-ball calls
    pub fn letter(self, number: u32) -> Option<char> {
        match self {
            BingoVariant::Ball75 => number
                .checked_sub(1)
                .and_then(|n| LETTERS.get((n / 15) as usize).copied()),
            BingoVariant::Ball90 => None,
        }
    }
}

impl fmt::Display for BingoVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.max_ball())
    }
}

impl FromStr for BingoVariant {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "75" => Ok(BingoVariant::Ball75),
            "90" => Ok(BingoVariant::Ball90),
            other => Err(DrawError::invalid_input(format!(
                "unknown bingo type '{}', expected 75 or 90",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BingoConfig {
    #[serde(rename = "type")]
    pub variant: BingoVariant,
    pub count: usize,
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl BingoConfig {
    pub fn new(variant: BingoVariant, count: usize) -> Self {
        Self {
            variant,
            count,
            metadata: Metadata::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(DrawError::invalid_input("bingo draw count must be at least 1"));
        }
        if self.count > self.variant.max_ball() as usize {
            return Err(DrawError::invalid_input(format!(
                "cannot call {} balls in {}-ball bingo",
                self.count, self.variant
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BingoCall {
    pub number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter: Option<char>,
}

impl fmt::Display for BingoCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.letter {
            Some(letter) => write!(f, "{}-{}", letter, self.number),
            None => write!(f, "{}", self.number),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BingoResult {
    #[serde(rename = "type")]
    pub variant: BingoVariant,
    /// Calls sorted by number
    pub calls: Vec<BingoCall>,
}

pub fn draw(config: &BingoConfig, seed: &str) -> Result<BingoResult> {
    config.validate()?;

    let variant = config.variant;
    let mut numbers = sample_range(
        1,
        variant.max_ball() as i64,
        config.count,
        false,
        seed_number(seed),
    )?;
    numbers.sort_unstable();

    let calls = numbers
        .into_iter()
        .map(|n| {
            let number = n as u32;
            BingoCall {
                number,
                letter: variant.letter(number),
            }
        })
        .collect();

    Ok(BingoResult { variant, calls })
}
