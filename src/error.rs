//! Configuration errors shared by all engines.
//!
//! Every engine validates its instance and configuration at construction
//! time. Once an engine exists, its step functions cannot fail.

use thiserror::Error;

/// An invalid problem instance or engine parameter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// N-Queens board of size zero.
    #[error("board size must be positive")]
    EmptyBoard,

    /// Knapsack instance without items.
    #[error("knapsack instance has no items")]
    NoItems,

    /// Knapsack item whose value is zero.
    #[error("item {index} has a zero value")]
    ZeroValue {
        /// Position of the offending item.
        index: usize,
    },

    /// TSP instance without cities.
    #[error("tsp instance has no cities")]
    NoCities,

    /// City with a NaN or infinite coordinate.
    #[error("city {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Position of the offending city.
        index: usize,
    },

    /// A numeric engine parameter outside its valid range.
    #[error("invalid {parameter}: {reason}")]
    Invalid {
        /// Name of the configuration field.
        parameter: &'static str,
        /// Human-readable description of the constraint.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            parameter,
            reason: reason.into(),
        }
    }
}

/// Checks that a probability-like parameter lies in `[0, 1]`.
pub(crate) fn check_unit_interval(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            parameter,
            format!("must be in [0, 1], got {value}"),
        ))
    }
}
