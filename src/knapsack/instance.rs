//! Subset-sum knapsack instances and the fitness landscape over them.

use crate::error::{check_unit_interval, ConfigError};
use rand::seq::index;
use rand::Rng;
use std::ops::RangeInclusive;

/// A boolean genome: one selection flag per item.
pub type Genome = Vec<bool>;

/// An ordered list of positive item values and the sum to hit.
///
/// # Examples
///
/// ```
/// use u_combopt::knapsack::KnapsackInstance;
///
/// let instance = KnapsackInstance::new(vec![10, 20, 30, 40, 50], 60).unwrap();
/// assert_eq!(instance.subset_sum(&[true, false, false, false, true]), 60);
/// assert!((instance.fitness(&[true, false, false, false, true]) - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackInstance {
    values: Vec<u64>,
    target: u64,
}

impl KnapsackInstance {
    /// Creates an instance, rejecting empty item lists, zero values and
    /// item totals that do not fit in a `u64`.
    ///
    /// Every subset sum is bounded by the total, so a constructed instance
    /// never overflows during evaluation.
    pub fn new(values: Vec<u64>, target: u64) -> Result<Self, ConfigError> {
        if values.is_empty() {
            return Err(ConfigError::NoItems);
        }
        if let Some(index) = values.iter().position(|&v| v == 0) {
            return Err(ConfigError::ZeroValue { index });
        }
        if values.iter().try_fold(0u64, |acc, &v| acc.checked_add(v)).is_none() {
            return Err(ConfigError::invalid("values", "sum exceeds u64::MAX"));
        }
        Ok(Self { values, target })
    }

    /// Generates a random instance with distinct item values.
    ///
    /// Values are drawn without repetition from `value_range`. The target
    /// is the sum of `floor(num_items * target_fraction)` distinct items,
    /// so an exact solution always exists.
    pub fn random<R: Rng>(
        num_items: usize,
        value_range: RangeInclusive<u64>,
        target_fraction: f64,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        if num_items == 0 {
            return Err(ConfigError::NoItems);
        }
        check_unit_interval("target_fraction", target_fraction)?;
        let (lo, hi) = (*value_range.start(), *value_range.end());
        if lo == 0 || hi < lo {
            return Err(ConfigError::invalid(
                "value_range",
                format!("must be a non-empty range of positive values, got {lo}..={hi}"),
            ));
        }
        let span = usize::try_from(hi - lo).unwrap_or(usize::MAX).saturating_add(1);
        if span < num_items {
            return Err(ConfigError::invalid(
                "value_range",
                format!("holds {span} distinct values, {num_items} requested"),
            ));
        }

        let values: Vec<u64> = index::sample(rng, span, num_items)
            .into_iter()
            .map(|offset| lo + offset as u64)
            .collect();

        let subset_size = (num_items as f64 * target_fraction) as usize;
        let target = index::sample(rng, num_items, subset_size.min(num_items))
            .into_iter()
            .map(|i| values[i])
            .sum();

        Self::new(values, target)
    }

    /// Item values in input order.
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// The sum to hit.
    pub fn target(&self) -> u64 {
        self.target
    }

    /// Number of items (genome length).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false` for a validated instance.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all item values.
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }

    /// Sum of the values selected by `genome`.
    pub fn subset_sum(&self, genome: &[bool]) -> u64 {
        self.values
            .iter()
            .zip(genome)
            .filter(|&(_, &selected)| selected)
            .map(|(&v, _)| v)
            .sum()
    }

    /// Fitness of a subset sum. Higher is better, `1.0` at the target.
    ///
    /// With `diff = |sum - target|`:
    /// - `diff > target / 2`: `1 / (diff² + 1)`
    /// - otherwise: `1 / (diff + 1)`
    pub fn fitness_of_sum(&self, sum: u64) -> f64 {
        let diff = sum.abs_diff(self.target) as f64;
        if diff > self.target as f64 * 0.5 {
            1.0 / (diff * diff + 1.0)
        } else {
            1.0 / (diff + 1.0)
        }
    }

    /// Fitness of a genome.
    pub fn fitness(&self, genome: &[bool]) -> f64 {
        self.fitness_of_sum(self.subset_sum(genome))
    }
}
