//! Value sampling over an inclusive integer range, shared by the numbers and
//! bingo draws.

use crate::error::{DrawError, Result};
use crate::rng;
use std::collections::HashSet;

/// Retry inputs `n` and `n + 1` produce outputs exactly `LCG_A / 2^32` apart,
/// so this many consecutive attempts sweep all of `[0, 1)`.
pub const LCG_CYCLE: u32 = 2581;

/// Upper bound on sweeps for very large ranges.
pub const MAX_SWEEPS: u128 = 64;

/// Most values a single numbers draw may produce.
pub const MAX_DRAW_COUNT: usize = 10_000;

/// Retry ceiling for a no-repeat draw over `range` values.
///
/// Depends on the range only, so a verifier replays the same bound. One
/// sweep reaches every free value of a range smaller than [`LCG_CYCLE`].
pub fn attempt_ceiling(range: u128) -> u32 {
    let sweeps = (range / LCG_CYCLE as u128 + 1).min(MAX_SWEEPS);
    LCG_CYCLE * sweeps as u32
}

fn value_in_range(min: i64, range: u128, random: f64) -> i64 {
    let offset = ((random * range as f64).floor() as u128).min(range - 1);
    (min as i128 + offset as i128) as i64
}

/// Draw `count` values from `min..=max`, in draw order.
///
/// Callers validate the bounds; `min <= max` is assumed.
pub fn sample_range(
    min: i64,
    max: i64,
    count: usize,
    allow_repeats: bool,
    seed_number: u32,
) -> Result<Vec<i64>> {
    let range = (max as i128 - min as i128 + 1) as u128;
    let ceiling = attempt_ceiling(range);
    let mut used = HashSet::new();
    let mut values = Vec::new();

    for step in 0..count {
        let mut attempt = 0u32;
        loop {
            let value = value_in_range(min, range, rng::value_at(seed_number, step, attempt));
            if allow_repeats || used.insert(value) {
                values.push(value);
                break;
            }

            attempt += 1;
            if attempt >= ceiling {
                return Err(DrawError::ExhaustedAttempts {
                    step,
                    attempts: attempt,
                });
            }
        }

        if attempt > 0 {
            tracing::debug!("Draw step {} needed {} retries", step, attempt);
        }
    }

    Ok(values)
}

/// Range size of `min..=max`, or `None` when `min > max`.
pub fn range_size(min: i64, max: i64) -> Option<u128> {
    (min <= max).then(|| (max as i128 - min as i128 + 1) as u128)
}
