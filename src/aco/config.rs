//! ACO configuration.

use crate::error::ConfigError;

/// Configuration for [`AntColony`](super::AntColony).
///
/// # Defaults
///
/// ```
/// use u_combopt::aco::AcoConfig;
///
/// let config = AcoConfig::default();
/// assert_eq!(config.num_ants, 50);
/// assert_eq!(config.max_iterations, 100);
/// assert!((config.beta - 2.0).abs() < 1e-12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_combopt::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_num_ants(10)
///     .with_evaporation_rate(0.2)
///     .with_max_iterations(50)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Tours constructed per iteration.
    pub num_ants: usize,

    /// Exponent on pheromone level. Higher = follow the trail more.
    pub alpha: f64,

    /// Exponent on inverse distance. Higher = greedier.
    pub beta: f64,

    /// Fraction of pheromone lost per iteration, in `(0, 1)`.
    pub evaporation_rate: f64,

    /// Pheromone deposited by a tour of length `L` is
    /// `deposit_factor / L` per edge.
    pub deposit_factor: f64,

    /// Iteration budget for [`run`](super::AntColony::run).
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_ants: 50,
            alpha: 1.0,
            beta: 2.0,
            evaporation_rate: 0.1,
            deposit_factor: 100.0,
            max_iterations: 100,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the number of ants per iteration.
    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    /// Sets the pheromone exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the visibility exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    /// Sets the deposit factor `Q`.
    pub fn with_deposit_factor(mut self, q: f64) -> Self {
        self.deposit_factor = q;
        self
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_ants == 0 {
            return Err(ConfigError::invalid("num_ants", "must be at least 1"));
        }
        if !(self.alpha >= 0.0 && self.alpha.is_finite()) {
            return Err(ConfigError::invalid(
                "alpha",
                format!("must be finite and non-negative, got {}", self.alpha),
            ));
        }
        if !(self.beta >= 0.0 && self.beta.is_finite()) {
            return Err(ConfigError::invalid(
                "beta",
                format!("must be finite and non-negative, got {}", self.beta),
            ));
        }
        if !(self.evaporation_rate > 0.0 && self.evaporation_rate < 1.0) {
            return Err(ConfigError::invalid(
                "evaporation_rate",
                format!("must be in (0, 1), got {}", self.evaporation_rate),
            ));
        }
        if !(self.deposit_factor > 0.0 && self.deposit_factor.is_finite()) {
            return Err(ConfigError::invalid(
                "deposit_factor",
                format!("must be positive, got {}", self.deposit_factor),
            ));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::invalid(
                "max_iterations",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AcoConfig::default();
        assert_eq!(config.num_ants, 50);
        assert!((config.alpha - 1.0).abs() < 1e-12);
        assert!((config.beta - 2.0).abs() < 1e-12);
        assert!((config.evaporation_rate - 0.1).abs() < 1e-12);
        assert!((config.deposit_factor - 100.0).abs() < 1e-12);
        assert_eq!(config.max_iterations, 100);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = AcoConfig::default()
            .with_num_ants(10)
            .with_alpha(0.5)
            .with_beta(3.0)
            .with_evaporation_rate(0.3)
            .with_deposit_factor(1.0)
            .with_max_iterations(20)
            .with_seed(9);
        assert_eq!(config.num_ants, 10);
        assert!((config.alpha - 0.5).abs() < 1e-12);
        assert!((config.beta - 3.0).abs() < 1e-12);
        assert!((config.evaporation_rate - 0.3).abs() < 1e-12);
        assert!((config.deposit_factor - 1.0).abs() < 1e-12);
        assert_eq!(config.max_iterations, 20);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_validate_rejects() {
        let bad = [
            AcoConfig::default().with_num_ants(0),
            AcoConfig::default().with_alpha(-1.0),
            AcoConfig::default().with_beta(f64::NAN),
            AcoConfig::default().with_evaporation_rate(0.0),
            AcoConfig::default().with_evaporation_rate(1.0),
            AcoConfig::default().with_deposit_factor(0.0),
            AcoConfig::default().with_max_iterations(0),
        ];
        for config in bad {
            assert!(config.validate().is_err(), "should reject {config:?}");
        }
    }
}
