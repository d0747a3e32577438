//! Knapsack GA configuration.
//!
//! [`KnapsackConfig`] holds every parameter of the generational loop.

use crate::error::{check_unit_interval, ConfigError};
use crate::ga::LinearDecay;

/// Configuration for [`KnapsackGa`](super::KnapsackGa).
///
/// # Defaults
///
/// ```
/// use u_combopt::knapsack::KnapsackConfig;
///
/// let config = KnapsackConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.elitism_count, 2);
/// assert_eq!(config.max_generations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_combopt::knapsack::KnapsackConfig;
///
/// let config = KnapsackConfig::default()
///     .with_population_size(20)
///     .with_tournament_size(4)
///     .with_max_generations(200)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackConfig {
    /// Number of genomes per generation. Must be at least
    /// `elitism_count + 2`.
    pub population_size: usize,

    /// Number of top genomes copied unchanged into the next generation.
    pub elitism_count: usize,

    /// Contestants per tournament, in `2..=population_size`.
    pub tournament_size: usize,

    /// Per-gene flip probability at generation 0.
    pub initial_mutation_rate: f64,

    /// Lower bound of the decaying mutation rate.
    pub min_mutation_rate: f64,

    /// Generation budget. Also the horizon of the mutation decay.
    pub max_generations: usize,

    /// Probability that a gene is selected in the initial population.
    pub selection_fraction: f64,

    /// Whether to evaluate fitness in parallel (requires the `parallel`
    /// feature; ignored otherwise).
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for KnapsackConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            elitism_count: 2,
            tournament_size: 3,
            initial_mutation_rate: 0.1,
            min_mutation_rate: 0.01,
            max_generations: 1000,
            selection_fraction: 0.7,
            parallel: false,
            seed: None,
        }
    }
}

impl KnapsackConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of elites carried over unchanged.
    pub fn with_elitism_count(mut self, n: usize) -> Self {
        self.elitism_count = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the initial and minimum mutation rates.
    pub fn with_mutation_rates(mut self, initial: f64, min: f64) -> Self {
        self.initial_mutation_rate = initial;
        self.min_mutation_rate = min;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the probability that an item starts selected.
    pub fn with_selection_fraction(mut self, fraction: f64) -> Self {
        self.selection_fraction = fraction;
        self
    }

    /// Enables parallel fitness evaluation (needs the `parallel` feature).
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The mutation schedule implied by this configuration.
    pub fn mutation_schedule(&self) -> LinearDecay {
        LinearDecay::new(
            self.initial_mutation_rate,
            self.min_mutation_rate,
            self.max_generations,
        )
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < self.elitism_count.saturating_add(2) {
            return Err(ConfigError::invalid(
                "population_size",
                format!(
                    "must be at least elitism_count + 2 = {}, got {}",
                    self.elitism_count.saturating_add(2),
                    self.population_size
                ),
            ));
        }
        if self.tournament_size < 2 || self.tournament_size > self.population_size {
            return Err(ConfigError::invalid(
                "tournament_size",
                format!(
                    "must be in 2..={}, got {}",
                    self.population_size, self.tournament_size
                ),
            ));
        }
        if self.max_generations == 0 {
            return Err(ConfigError::invalid(
                "max_generations",
                "must be at least 1",
            ));
        }
        check_unit_interval("initial_mutation_rate", self.initial_mutation_rate)?;
        check_unit_interval("min_mutation_rate", self.min_mutation_rate)?;
        check_unit_interval("selection_fraction", self.selection_fraction)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KnapsackConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.elitism_count, 2);
        assert_eq!(config.tournament_size, 3);
        assert!((config.initial_mutation_rate - 0.1).abs() < 1e-12);
        assert!((config.min_mutation_rate - 0.01).abs() < 1e-12);
        assert!((config.selection_fraction - 0.7).abs() < 1e-12);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = KnapsackConfig::default()
            .with_population_size(30)
            .with_elitism_count(4)
            .with_tournament_size(5)
            .with_mutation_rates(0.2, 0.02)
            .with_max_generations(10)
            .with_selection_fraction(0.5)
            .with_parallel(true)
            .with_seed(7);

        assert_eq!(config.population_size, 30);
        assert_eq!(config.elitism_count, 4);
        assert_eq!(config.tournament_size, 5);
        assert!((config.initial_mutation_rate - 0.2).abs() < 1e-12);
        assert!((config.min_mutation_rate - 0.02).abs() < 1e-12);
        assert_eq!(config.max_generations, 10);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validate_population_vs_elitism() {
        let config = KnapsackConfig::default()
            .with_population_size(5)
            .with_elitism_count(4)
            .with_tournament_size(2);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                parameter: "population_size",
                ..
            })
        ));

        let config = config.with_population_size(6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_tournament_bounds() {
        let base = KnapsackConfig::default().with_population_size(10);
        assert!(base.clone().with_tournament_size(1).validate().is_err());
        assert!(base.clone().with_tournament_size(11).validate().is_err());
        assert!(base.clone().with_tournament_size(10).validate().is_ok());
    }

    #[test]
    fn test_validate_rates() {
        let config = KnapsackConfig::default().with_mutation_rates(1.5, 0.01);
        assert!(config.validate().is_err());
        let config = KnapsackConfig::default().with_selection_fraction(-0.1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = KnapsackConfig::default().with_max_generations(0);
        assert!(config.validate().is_err());
    }
}
