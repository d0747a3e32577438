//! Subset-sum knapsack solved with a genetic algorithm.
//!
//! Given positive item values and a target sum, find a subset whose values
//! add up to the target exactly. Genomes are boolean vectors with one flag
//! per item.
//!
//! # Key Types
//!
//! - [`KnapsackInstance`]: item values and target sum
//! - [`KnapsackConfig`]: population, elitism, tournament and mutation parameters
//! - [`KnapsackGa`]: the generational step function
//! - [`KnapsackSearch`]: stateful wrapper implementing [`Search`](crate::search::Search)
//!
//! # Algorithm
//!
//! Each generation keeps the top `elitism_count` genomes and fills the rest
//! with tournament selection, uniform crossover and bit-flip mutation at a
//! linearly decaying rate. Fitness rewards closeness to the target and
//! penalises sums more than half the target away quadratically.

mod config;
mod engine;
mod instance;

pub use config::KnapsackConfig;
pub use engine::{GenerationReport, KnapsackGa, KnapsackResult, KnapsackSearch};
pub use instance::{Genome, KnapsackInstance};
