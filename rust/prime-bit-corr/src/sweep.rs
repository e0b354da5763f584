//! Gain sweep across bit widths.
//!
//! Each width runs sieve -> stats (primes, composites) -> gain on its own
//! data; nothing survives from one width to the next, so the widths can be
//! processed in any order or in parallel.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::AnalysisError;
use crate::gain::{compare_gain, GainPolicy, GainReport};
use crate::sieve::sieve;
use crate::stats::compute_stats;

/// Configuration for a gain sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepConfig {
    /// First width, inclusive.
    pub min_bits: u32,
    /// Last width, exclusive.
    pub max_bits: u32,
    pub policy: GainPolicy,
    /// Run widths on the rayon pool. Peak memory then grows with the number
    /// of widths in flight.
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_bits: 8,
            max_bits: 20,
            policy: GainPolicy::default(),
            parallel: false,
        }
    }
}

/// One point of the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GainSample {
    pub bits: u32,
    pub gain: f64,
    pub primes: usize,
    pub composites: usize,
    pub report: GainReport,
}

impl GainSample {
    pub fn point(&self) -> (f64, f64) {
        (self.bits as f64, self.gain)
    }
}

/// Run one width: sieve below `2^bits` and compare the two correlation
/// matrices at width `bits`.
pub fn sweep_width(bits: u32, policy: &GainPolicy) -> Result<GainSample, AnalysisError> {
    if bits >= u64::BITS {
        return Err(AnalysisError::BitWidthOutOfRange(bits));
    }
    let (primes, composites) = sieve(1u64 << bits).into_parts();

    let prime_stats = compute_stats(&primes, bits)?;
    let composite_stats = compute_stats(&composites, bits)?;
    let report = compare_gain(&prime_stats.corr, &composite_stats.corr, policy)?;

    if report.count == 0 {
        log::warn!("bits={}: no retained cells, gain is NaN", bits);
    }
    log::debug!(
        "bits={}: gain={:.6} (valid {}, degenerate {}, overflow {})",
        bits,
        report.gain,
        report.valid,
        report.degenerate,
        report.overflow
    );

    Ok(GainSample {
        bits,
        gain: report.gain,
        primes: primes.len(),
        composites: composites.len(),
        report,
    })
}

/// Run every width in `[min_bits, max_bits)` and return the samples in
/// ascending width order. An empty range yields no samples.
pub fn sweep(config: &SweepConfig) -> Result<Vec<GainSample>, AnalysisError> {
    let widths = config.min_bits..config.max_bits;

    if config.parallel {
        widths
            .into_par_iter()
            .map(|bits| sweep_width(bits, &config.policy))
            .collect()
    } else {
        widths.map(|bits| sweep_width(bits, &config.policy)).collect()
    }
}
