//! Parent selection.
//!
//! Selection works on a slice of precomputed fitness values, where
//! **higher fitness is better**, and returns population indices.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::seq::index;
use rand::Rng;

/// Tournament selection without replacement.
///
/// Draws `size` distinct individuals uniformly at random and returns the
/// index of the fittest. `size` is clamped to `1..=fitness.len()`; ties go
/// to the contestant drawn first.
///
/// # Complexity
/// O(size) per selection
///
/// # Panics
/// Panics if `fitness` is empty.
pub fn tournament<R: Rng>(fitness: &[f64], size: usize, rng: &mut R) -> usize {
    assert!(!fitness.is_empty(), "cannot select from empty population");
    let n = fitness.len();
    let k = size.clamp(1, n);

    let contestants = index::sample(rng, n, k);
    let mut best_idx = contestants.index(0);
    for idx in contestants.iter().skip(1) {
        if fitness[idx] > fitness[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}

/// Picks two distinct indices uniformly from the first `pool` individuals.
///
/// Used with a population sorted best-first, this is truncation selection:
/// only the top `pool` individuals can become parents.
///
/// # Panics
/// Panics if `pool < 2`.
pub fn pair_from_pool<R: Rng>(pool: usize, rng: &mut R) -> (usize, usize) {
    assert!(pool >= 2, "parent pool must hold at least two individuals");
    let pair = index::sample(rng, pool, 2);
    (pair.index(0), pair.index(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_full_tournament_always_picks_best() {
        let fitness = [0.1, 0.5, 0.9, 0.3];
        let mut rng = create_rng(42);
        // Without replacement, a tournament over the whole population is
        // deterministic.
        for _ in 0..200 {
            assert_eq!(tournament(&fitness, 4, &mut rng), 2);
        }
    }

    #[test]
    fn test_tournament_favors_best() {
        let fitness = [0.1, 0.5, 0.9, 0.3];
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10_000;
        for _ in 0..n {
            counts[tournament(&fitness, 2, &mut rng)] += 1;
        }
        // Best wins every pair it appears in: P = 1/2.
        assert!(counts[2] > 4_000, "counts: {counts:?}");
        // Worst never wins a pair of distinct contestants.
        assert_eq!(counts[0], 0, "counts: {counts:?}");
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let fitness = [0.1, 0.5, 0.9, 0.3];
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            counts[tournament(&fitness, 1, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1_500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_oversized_tournament_is_clamped() {
        let fitness = [0.2, 0.8];
        let mut rng = create_rng(5);
        assert_eq!(tournament(&fitness, 10, &mut rng), 1);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let mut rng = create_rng(42);
        tournament(&[], 3, &mut rng);
    }

    #[test]
    fn test_pair_from_pool_distinct() {
        let mut rng = create_rng(9);
        for _ in 0..500 {
            let (a, b) = pair_from_pool(5, &mut rng);
            assert_ne!(a, b);
            assert!(a < 5 && b < 5);
        }
    }
}
