//! Linear congruential generator used by every draw algorithm.
//!
//! Algorithms never keep generator state between steps. Each step seeds the
//! generator with `seed_number + step + attempt`, so any single output can be
//! recomputed without replaying the ones before it.

/// LCG multiplier.
pub const LCG_A: u32 = 1_664_525;
/// LCG increment.
pub const LCG_C: u32 = 1_013_904_223;
/// LCG modulus, 2^32.
pub const LCG_M: f64 = 4_294_967_296.0;

/// Advance the generator one step from `state`.
///
/// Returns the output in `[0, 1)` and the next state.
pub fn next(state: u32) -> (f64, u32) {
    let new_state = state.wrapping_mul(LCG_A).wrapping_add(LCG_C);
    (new_state as f64 / LCG_M, new_state)
}

/// Output of a single generator step seeded with `input`.
pub fn seeded_random(input: u32) -> f64 {
    next(input).0
}

/// Output for step `step` of a draw after `attempt` retries.
pub fn value_at(seed_number: u32, step: usize, attempt: u32) -> f64 {
    let input = seed_number
        .wrapping_add(step as u32)
        .wrapping_add(attempt);
    seeded_random(input)
}

/// Uniform index in `0..len` for `step`. `len` must be non-zero.
pub fn index_at(seed_number: u32, step: usize, len: usize) -> usize {
    let index = (value_at(seed_number, step, 0) * len as f64).floor() as usize;
    index.min(len - 1)
}
