//! Bit-level correlation structure of primes versus composites.
//!
//! Sieves the integers below `2^bits` into primes and composites, builds a
//! Pearson correlation matrix over the low `bits` bit indicators of each set,
//! and reduces the cell-wise ratio of the two matrices to a scalar gain.
//! Sweeping the width gives a (bits, gain) series whose linear trend is the
//! quantity of interest.

pub mod error;
pub mod gain;
pub mod popcount;
pub mod report;
pub mod sieve;
pub mod stats;
pub mod sweep;

pub use error::{AnalysisError, ReportError};
pub use gain::{compare_gain, GainPolicy, GainReport, ScaleCell};
pub use popcount::{popcount_points, popcount_series, PopcountConfig, PopcountSeries};
pub use report::{finite_points, linear_regression, render_scatter, LinearFit, ScatterStyle};
pub use sieve::{sieve, SieveResult};
pub use stats::{compute_stats, BitVectorStats};
pub use sweep::{sweep, sweep_width, GainSample, SweepConfig};
