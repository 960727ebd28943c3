//! Seeded RNG construction and integer-unit weighted sampling.
//!
//! Weighted collections in this crate store raw integer units, so sampling
//! draws an integer threshold in `0..total` and walks the cumulative units.
//! No floating-point rounding is involved in the selection itself.
//!
//! # Reproducibility
//!
//! Use [`create_rng`] with a fixed seed. `SmallRng` is deterministic for a
//! given seed on the same platform.

use rand::Rng;

/// Creates a fast, seeded random number generator.
///
/// # Examples
/// ```
/// use u_collections::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(7);
/// let x: u32 = rng.random_range(0..10);
/// assert!(x < 10);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Picks an index with probability proportional to `units[i]`.
///
/// Zero entries are never selected.
///
/// # Complexity
/// Time: O(n) per sample
///
/// # Returns
/// - `None` if `units` is empty or sums to zero.
///
/// # Examples
/// ```
/// use u_collections::random::{choose_index, create_rng};
/// let mut rng = create_rng(42);
/// assert_eq!(choose_index(&[0, 0, 5], &mut rng), Some(2));
/// assert_eq!(choose_index(&[], &mut rng), None);
/// ```
pub fn choose_index<R: Rng>(units: &[u64], rng: &mut R) -> Option<usize> {
    let total: u128 = units.iter().map(|&u| u as u128).sum();
    if total == 0 {
        return None;
    }

    let threshold = rng.random_range(0..total);
    let mut cumulative = 0u128;
    for (i, &u) in units.iter().enumerate() {
        cumulative += u as u128;
        if cumulative > threshold {
            return Some(i);
        }
    }
    // Fallback (threshold is always below the total)
    units.len().checked_sub(1)
}

/// Precomputed cumulative unit table for O(log n) repeated sampling.
///
/// Build one with [`UnitSampler::new`] or
/// [`WeightedList::sampler`](crate::collections::WeightedList::sampler) when
/// drawing many samples from a list that no longer changes.
///
/// # Complexity
/// - Construction: O(n)
/// - Sampling: O(log n)
///
/// # Examples
/// ```
/// use u_collections::random::{create_rng, UnitSampler};
/// let sampler = UnitSampler::new(&[1, 2, 3, 4]).unwrap();
/// let mut rng = create_rng(42);
/// assert!(sampler.sample(&mut rng) < 4);
/// assert_eq!(sampler.total_units(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSampler {
    cumulative: Vec<u128>,
}

impl UnitSampler {
    /// Creates a sampler from raw units.
    ///
    /// # Returns
    /// - `None` if `units` is empty or sums to zero.
    pub fn new(units: &[u64]) -> Option<Self> {
        let mut cumulative = Vec::with_capacity(units.len());
        let mut total = 0u128;
        for &u in units {
            total += u as u128;
            cumulative.push(total);
        }
        if total == 0 {
            return None;
        }
        Some(Self { cumulative })
    }

    /// Samples an index according to the units.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        let threshold = rng.random_range(0..self.total_units());
        // First entry whose running total exceeds the threshold; zero-unit
        // entries share their predecessor's total and are skipped.
        self.cumulative.partition_point(|&c| c <= threshold)
    }

    /// Returns the number of categories.
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    /// Returns `true` if there are no categories.
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Returns the sum of all units.
    pub fn total_units(&self) -> u128 {
        self.cumulative.last().copied().unwrap_or(0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn choose_index_never_picks_zero_units(
            seed in 0_u64..10000,
            units in proptest::collection::vec(0_u64..5, 1..20),
        ) {
            let mut rng = create_rng(seed);
            match choose_index(&units, &mut rng) {
                Some(i) => prop_assert!(units[i] > 0),
                None => prop_assert!(units.iter().all(|&u| u == 0)),
            }
        }

        #[test]
        fn sampler_returns_positive_unit_index(
            seed in 0_u64..10000,
            units in proptest::collection::vec(0_u64..5, 1..20),
        ) {
            if let Some(sampler) = UnitSampler::new(&units) {
                let mut rng = create_rng(seed);
                let i = sampler.sample(&mut rng);
                prop_assert!(i < units.len());
                prop_assert!(units[i] > 0);
            }
        }
    }
}
