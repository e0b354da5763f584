//! Cell-wise comparison of two correlation matrices.
//!
//! For every retained cell the ratio `|a / b|` is classified into a
//! [`ScaleCell`]; valid ratios are averaged into the gain. Cells in the low
//! exclusion band are skipped entirely.

use serde::Serialize;

use crate::error::AnalysisError;

/// Filtering policy for [`compare_gain`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GainPolicy {
    /// Rows and columns `0..excluded_low_bits` are skipped. Bit 0 is constant
    /// for odd primes and bit 1 carries little signal at small widths.
    pub excluded_low_bits: usize,
    /// Ratios above this are treated as outliers.
    pub ceiling: f64,
    /// Count rejected cells (degenerate or overflow) in the denominator
    /// even though they add nothing to the sum.
    pub count_rejected: bool,
}

impl Default for GainPolicy {
    fn default() -> Self {
        Self {
            excluded_low_bits: 2,
            ceiling: 20.0,
            count_rejected: false,
        }
    }
}

/// Classification of one cell ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleCell {
    Valid(f64),
    /// 0/0 somewhere upstream: a zero-variance bit or a zero/zero ratio.
    Degenerate,
    /// Infinite, or above the ceiling.
    Overflow(f64),
}

impl ScaleCell {
    /// Classify `|a / b|` against the ceiling.
    pub fn classify(a: f64, b: f64, ceiling: f64) -> Self {
        let scale = (a / b).abs();
        if scale.is_nan() {
            ScaleCell::Degenerate
        } else if scale.is_infinite() || scale > ceiling {
            ScaleCell::Overflow(scale)
        } else {
            ScaleCell::Valid(scale)
        }
    }
}

/// Outcome of comparing two matrices under a [`GainPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GainReport {
    /// `sum / count`; NaN when no cell was counted.
    pub gain: f64,
    pub sum: f64,
    /// Cells in the denominator.
    pub count: usize,
    pub valid: usize,
    pub degenerate: usize,
    pub overflow: usize,
}

impl GainReport {
    /// The gain, or [`AnalysisError::NoRetainedCells`] when nothing was counted.
    pub fn mean(&self) -> Result<f64, AnalysisError> {
        if self.count == 0 {
            Err(AnalysisError::NoRetainedCells)
        } else {
            Ok(self.gain)
        }
    }
}

/// Compare two square correlation matrices of equal width cell by cell.
///
/// `a` is the numerator (primes), `b` the denominator (composites).
pub fn compare_gain(
    a: &[Vec<f64>],
    b: &[Vec<f64>],
    policy: &GainPolicy,
) -> Result<GainReport, AnalysisError> {
    if a.len() != b.len() {
        return Err(AnalysisError::WidthMismatch(a.len(), b.len()));
    }

    let mut report = GainReport {
        gain: f64::NAN,
        sum: 0.0,
        count: 0,
        valid: 0,
        degenerate: 0,
        overflow: 0,
    };

    for (i, (row_a, row_b)) in a.iter().zip(b.iter()).enumerate() {
        if row_a.len() != a.len() || row_b.len() != b.len() {
            return Err(AnalysisError::WidthMismatch(row_a.len(), row_b.len()));
        }
        if i < policy.excluded_low_bits {
            continue;
        }
        for (ii, (&x, &y)) in row_a.iter().zip(row_b.iter()).enumerate() {
            if ii < policy.excluded_low_bits {
                continue;
            }
            let cell = ScaleCell::classify(x, y, policy.ceiling);
            log::trace!("cell ({}, {}): {:?}", i, ii, cell);
            match cell {
                ScaleCell::Valid(scale) => {
                    report.sum += scale;
                    report.count += 1;
                    report.valid += 1;
                }
                ScaleCell::Degenerate => {
                    report.degenerate += 1;
                    if policy.count_rejected {
                        report.count += 1;
                    }
                }
                ScaleCell::Overflow(_) => {
                    report.overflow += 1;
                    if policy.count_rejected {
                        report.count += 1;
                    }
                }
            }
        }
    }

    if report.count > 0 {
        report.gain = report.sum / report.count as f64;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::compute_stats;

    fn identity(width: usize) -> Vec<Vec<f64>> {
        (0..width)
            .map(|i| (0..width).map(|ii| if i == ii { 1.0 } else { 0.5 }).collect())
            .collect()
    }

    #[test]
    fn test_classify() {
        assert_eq!(ScaleCell::classify(0.5, -0.25, 20.0), ScaleCell::Valid(2.0));
        assert_eq!(ScaleCell::classify(0.0, 0.0, 20.0), ScaleCell::Degenerate);
        assert_eq!(ScaleCell::classify(f64::NAN, 0.3, 20.0), ScaleCell::Degenerate);
        assert!(matches!(ScaleCell::classify(0.3, 0.0, 20.0), ScaleCell::Overflow(s) if s.is_infinite()));
        assert!(matches!(ScaleCell::classify(0.5, 0.01, 20.0), ScaleCell::Overflow(s) if (s - 50.0).abs() < 1e-9));
        // The ceiling itself is still valid.
        assert_eq!(ScaleCell::classify(5.0, 0.25, 20.0), ScaleCell::Valid(20.0));
    }

    #[test]
    fn test_identical_matrices_give_unit_gain() {
        let m = identity(6);
        let report = compare_gain(&m, &m, &GainPolicy::default()).unwrap();
        assert_eq!(report.gain, 1.0);
        assert_eq!(report.count, 16);
        assert_eq!(report.degenerate + report.overflow, 0);
    }

    #[test]
    fn test_identical_real_stats_give_unit_gain() {
        let numbers: Vec<u64> = crate::sieve::sieve(256).primes;
        let stats = compute_stats(&numbers, 8).unwrap();
        let report = compare_gain(&stats.corr, &stats.corr, &GainPolicy::default()).unwrap();
        assert_eq!(report.mean().unwrap(), 1.0);
    }

    #[test]
    fn test_exclusion_band() {
        let a = identity(4);
        let mut b = identity(4);
        // Only the excluded band disagrees.
        b[0][3] = 0.05;
        b[1][1] = 0.0;
        let report = compare_gain(&a, &b, &GainPolicy::default()).unwrap();
        assert_eq!(report.gain, 1.0);
        assert_eq!(report.count, 4);

        let no_band = GainPolicy {
            excluded_low_bits: 0,
            ..GainPolicy::default()
        };
        let report = compare_gain(&a, &b, &no_band).unwrap();
        assert_eq!(report.overflow, 1);
        assert_eq!(report.valid, 15);
        // 0.5 / 0.05 = 10 stays under the ceiling.
        assert!((report.sum - (14.0 + 10.0)).abs() < 1e-12);
    }

    #[test]
    fn test_count_rejected_policy() {
        let a = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let b = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let base = GainPolicy {
            excluded_low_bits: 0,
            ..GainPolicy::default()
        };
        let skip = compare_gain(&a, &b, &base).unwrap();
        assert_eq!(skip.degenerate, 2);
        assert_eq!(skip.gain, 1.0);

        let counted = compare_gain(
            &a,
            &b,
            &GainPolicy {
                count_rejected: true,
                ..base
            },
        )
        .unwrap();
        assert_eq!(counted.count, 4);
        assert_eq!(counted.gain, 0.5);
    }

    #[test]
    fn test_no_retained_cells() {
        let nan = vec![vec![f64::NAN; 3]; 3];
        let report = compare_gain(&nan, &nan, &GainPolicy::default()).unwrap();
        assert!(report.gain.is_nan());
        assert!(matches!(report.mean(), Err(AnalysisError::NoRetainedCells)));
    }

    #[test]
    fn test_width_mismatch() {
        let err = compare_gain(&identity(3), &identity(4), &GainPolicy::default());
        assert!(matches!(err, Err(AnalysisError::WidthMismatch(3, 4))));
    }
}
