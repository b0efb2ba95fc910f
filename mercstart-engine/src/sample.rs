//! Pool sampling primitives: duplicate-and-shuffle draws plus exclusion
//! filtering. Pools are read-only inputs and are never mutated.

use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::hash::Hash;

/// Draw `count` items from `pool`.
///
/// The working copy is the whole pool repeated until it is at least `count`
/// long, then shuffled; the first `count` elements form the result. Whole-pool
/// duplication keeps oversized requests satisfiable and guarantees every
/// original element appears at least `count / pool.len()` times in the result.
///
/// A zero count or an empty pool yields an empty vec; neither is an error.
#[must_use]
pub fn sample_pool<T, R>(pool: &[T], count: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if count == 0 || pool.is_empty() {
        return Vec::new();
    }
    let mut working = pool.to_vec();
    while working.len() < count {
        working.extend_from_slice(pool);
    }
    working.shuffle(rng);
    working.truncate(count);
    working
}

/// Remove every element of `excluded` from `pool`, preserving relative order.
#[must_use]
pub fn exclude<T>(pool: &[T], excluded: &HashSet<T>) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    pool.iter()
        .filter(|item| !excluded.contains(*item))
        .cloned()
        .collect()
}
