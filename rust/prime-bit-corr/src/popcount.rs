//! Population count versus magnitude for primes and composites.

use serde::Serialize;

use crate::error::AnalysisError;
use crate::sieve::sieve;

/// Configuration for the population-count mode.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PopcountConfig {
    /// Sieve below `2^bits`.
    pub bits: u32,
}

impl Default for PopcountConfig {
    fn default() -> Self {
        Self { bits: 24 }
    }
}

/// (number, set-bit count) points for both sets.
#[derive(Debug, Clone)]
pub struct PopcountSeries {
    pub primes: Vec<(f64, f64)>,
    pub composites: Vec<(f64, f64)>,
}

/// Map each number to `(number, popcount(number))`.
pub fn popcount_points(numbers: &[u64]) -> Vec<(f64, f64)> {
    numbers
        .iter()
        .map(|&n| (n as f64, n.count_ones() as f64))
        .collect()
}

/// Sieve below `2^bits` and build both point series.
pub fn popcount_series(config: &PopcountConfig) -> Result<PopcountSeries, AnalysisError> {
    if config.bits >= u64::BITS {
        return Err(AnalysisError::BitWidthOutOfRange(config.bits));
    }
    let (primes, composites) = sieve(1u64 << config.bits).into_parts();
    Ok(PopcountSeries {
        primes: popcount_points(&primes),
        composites: popcount_points(&composites),
    })
}
