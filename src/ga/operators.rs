//! Recombination and mutation operators.
//!
//! Two chromosome families are supported:
//!
//! - **Fixed-length vectors** (boolean genomes): [`uniform_crossover`] and
//!   [`bit_flip_mutation`]. Any combination of alleles is a valid genome.
//! - **Permutations** of `0..n`: [`prefix_crossover`] and [`swap_mutation`].
//!   Both always return a permutation.
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

use rand::seq::index;
use rand::Rng;

// ============================================================================
// Fixed-length vectors
// ============================================================================

/// Uniform crossover: each position takes parent1's allele with
/// probability 0.5, otherwise parent2's.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn uniform_crossover<T: Copy, R: Rng>(parent1: &[T], parent2: &[T], rng: &mut R) -> Vec<T> {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );
    parent1
        .iter()
        .zip(parent2)
        .map(|(&a, &b)| if rng.random_bool(0.5) { a } else { b })
        .collect()
}

/// Flips each gene independently with probability `rate`.
///
/// Returns the number of flipped genes. `rate` is clamped to `[0, 1]`.
pub fn bit_flip_mutation<R: Rng>(genome: &mut [bool], rate: f64, rng: &mut R) -> usize {
    let rate = rate.clamp(0.0, 1.0);
    let mut flips = 0;
    for gene in genome.iter_mut() {
        if rng.random_bool(rate) {
            *gene = !*gene;
            flips += 1;
        }
    }
    flips
}

// ============================================================================
// Permutations
// ============================================================================

/// Prefix crossover for permutations.
///
/// Copies parent1 up to a random cut point in `1..n`, then appends the
/// genes of parent2 in their original order, skipping those already
/// present. The child is a permutation whenever both parents are.
///
/// # Panics
/// Panics if parents have different lengths or contain values `>= n`.
pub fn prefix_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    if n < 2 {
        return parent1.to_vec();
    }

    let cut = rng.random_range(1..n);
    let mut child = Vec::with_capacity(n);
    let mut seen = vec![false; n];

    for &gene in &parent1[..cut] {
        child.push(gene);
        seen[gene] = true;
    }
    for &gene in parent2 {
        if !seen[gene] {
            child.push(gene);
            seen[gene] = true;
        }
    }

    child
}

/// Swaps two distinct random positions.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let pair = index::sample(rng, n, 2);
    perm.swap(pair.index(0), pair.index(1));
}

/// Returns `true` if `perm` contains every value of `0..perm.len()` once.
pub fn is_permutation(perm: &[usize]) -> bool {
    let n = perm.len();
    let mut seen = vec![false; n];
    for &v in perm {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

// ============================================================================
// Tests
// ============================================================================
