//! Per-bit statistics and the bit-by-bit Pearson correlation matrix.
//!
//! Each of the low `bit_width` bits of a number is treated as a 0/1 indicator
//! variable. Means, population standard deviations and correlations are all
//! computed in `f64` straight from the definitions, with no shortcut formulas.
//!
//! A bit that is constant across the set has zero variance. Its row and column
//! of the correlation matrix come out as IEEE NaN (0/0) rather than failing;
//! the gain comparison filters those cells explicitly.

use crate::error::AnalysisError;

/// Statistics of the low-order bits of a number set.
#[derive(Debug, Clone, PartialEq)]
pub struct BitVectorStats {
    pub bit_width: usize,
    /// Number of samples the statistics were computed from.
    pub samples: usize,
    /// Fraction of the set with bit i set.
    pub mean: Vec<f64>,
    /// Population standard deviation of the bit-i indicator, in [0, 0.5].
    pub stddev: Vec<f64>,
    /// `corr[i][ii]` is the Pearson correlation of bits i and ii.
    pub corr: Vec<Vec<f64>>,
}

impl BitVectorStats {
    /// Bit positions that are constant across the set.
    pub fn degenerate_bits(&self) -> Vec<usize> {
        self.stddev
            .iter()
            .enumerate()
            .filter(|(_, &s)| s == 0.0)
            .map(|(i, _)| i)
            .collect()
    }
}

#[inline]
fn bit(number: u64, i: usize) -> f64 {
    ((number >> i) & 1) as f64
}

/// Compute mean, standard deviation and correlation matrix of the low
/// `bit_width` bits over `numbers`.
///
/// Fails on an empty set, and on widths outside `1..=64`.
pub fn compute_stats(numbers: &[u64], bit_width: u32) -> Result<BitVectorStats, AnalysisError> {
    if bit_width == 0 || bit_width > u64::BITS {
        return Err(AnalysisError::BitWidthOutOfRange(bit_width));
    }
    if numbers.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let width = bit_width as usize;
    let n = numbers.len() as f64;

    let mut mean = vec![0.0f64; width];
    for &number in numbers {
        for (i, m) in mean.iter_mut().enumerate() {
            *m += bit(number, i);
        }
    }
    for m in mean.iter_mut() {
        *m /= n;
    }

    let mut stddev = vec![0.0f64; width];
    for &number in numbers {
        for (i, s) in stddev.iter_mut().enumerate() {
            let diff = mean[i] - bit(number, i);
            *s += diff * diff;
        }
    }
    for s in stddev.iter_mut() {
        *s = (*s / n).sqrt();
    }
    log::debug!("stddev over {} numbers: {:?}", numbers.len(), stddev);

    // Centered indicators are reused across every pair of the row.
    let mut centered = vec![0.0f64; width];
    let mut corr = vec![vec![0.0f64; width]; width];
    for &number in numbers {
        for (i, c) in centered.iter_mut().enumerate() {
            *c = bit(number, i) - mean[i];
        }
        for (i, row) in corr.iter_mut().enumerate() {
            let a = centered[i];
            for (ii, cell) in row.iter_mut().enumerate() {
                *cell += a * centered[ii];
            }
        }
    }
    for (i, row) in corr.iter_mut().enumerate() {
        for (ii, cell) in row.iter_mut().enumerate() {
            *cell /= n;
            *cell /= stddev[i] * stddev[ii];
        }
    }

    let stats = BitVectorStats {
        bit_width: width,
        samples: numbers.len(),
        mean,
        stddev,
        corr,
    };

    let degenerate = stats.degenerate_bits();
    if !degenerate.is_empty() {
        log::warn!(
            "zero-variance bits {:?} over {} numbers (width {})",
            degenerate,
            numbers.len(),
            width
        );
    }

    Ok(stats)
}
