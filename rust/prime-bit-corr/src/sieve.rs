//! Incremental trial-division sieve.
//!
//! Every candidate is tested only against the primes discovered so far, up to
//! `floor(sqrt(i)) + 1`, and a newly found prime immediately becomes a divisor
//! for later candidates. The prime list is owned by the call and handed back
//! by value once the bound is reached.

/// Primes that seed the divisor list; 4 is the first candidate tested.
pub const SEED_PRIMES: [u64; 2] = [2, 3];

/// Primes and composites found below a bound, both strictly ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SieveResult {
    pub bound: u64,
    pub primes: Vec<u64>,
    pub composites: Vec<u64>,
}

impl SieveResult {
    /// Consume the result, yielding `(primes, composites)`.
    pub fn into_parts(self) -> (Vec<u64>, Vec<u64>) {
        (self.primes, self.composites)
    }
}

/// Classify every integer in `[4, bound)` as prime or composite.
///
/// The seed primes 2 and 3 are always returned, so `bound <= 4` yields
/// `[2, 3]` and no composites.
pub fn sieve(bound: u64) -> SieveResult {
    let mut primes: Vec<u64> = SEED_PRIMES.to_vec();
    let mut composites: Vec<u64> = Vec::new();

    'candidates: for i in 4..bound {
        let limit = (i as f64).sqrt() as u64 + 1;
        for &p in &primes {
            if p > limit {
                break;
            }
            if i % p == 0 {
                composites.push(i);
                continue 'candidates;
            }
        }
        primes.push(i);
    }

    log::debug!(
        "sieve below {}: {} primes, {} composites",
        bound,
        primes.len(),
        composites.len()
    );

    SieveResult {
        bound,
        primes,
        composites,
    }
}
