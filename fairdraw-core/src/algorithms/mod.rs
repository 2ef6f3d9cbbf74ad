//! The five draw algorithms.
//!
//! Each one is a pure function of `(config, seed)`. Inputs are validated
//! before any randomness is drawn.

pub mod bingo;
pub mod names;
pub mod numbers;
pub mod order;
pub mod sampling;
pub mod shuffle;
pub mod teams;

pub use bingo::{BingoCall, BingoConfig, BingoResult, BingoVariant};
pub use names::{NamesConfig, NamesResult};
pub use numbers::{NumbersConfig, NumbersResult};
pub use order::{OrderConfig, OrderResult, Placement};
pub use shuffle::{shuffle, shuffled};
pub use teams::{Team, TeamsConfig, TeamsResult};

use crate::error::Result;
use crate::types::{DrawConfig, DrawResult};

/// Run the algorithm matching `config` with `seed`.
pub fn run(config: &DrawConfig, seed: &str) -> Result<DrawResult> {
    let result = match config {
        DrawConfig::Names(c) => DrawResult::Names(names::draw(c, seed)?),
        DrawConfig::Numbers(c) => DrawResult::Numbers(numbers::draw(c, seed)?),
        DrawConfig::Teams(c) => DrawResult::Teams(teams::draw(c, seed)?),
        DrawConfig::Order(c) => DrawResult::Order(order::draw(c, seed)?),
        DrawConfig::Bingo(c) => DrawResult::Bingo(bingo::draw(c, seed)?),
    };
    Ok(result)
}
