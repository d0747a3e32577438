//! Genetic algorithm building blocks.
//!
//! Operators, selection and mutation schedules shared by the knapsack GA
//! and the permutation-encoded N-Queens GA. Each engine owns its own
//! generational loop; this module only supplies the pieces.
//!
//! # Submodules
//!
//! - [`operators`]: uniform/prefix crossover, bit-flip/swap mutation
//! - [`selection`]: tournament and truncated-pool parent selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

pub mod operators;
mod schedule;
pub mod selection;

pub use schedule::LinearDecay;
