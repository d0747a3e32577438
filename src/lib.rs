//! Combinatorial search engines.
//!
//! Three independent engines, each solving one NP-hard problem:
//!
//! - **Backtracking** ([`queens`]): exhaustive depth-first N-Queens search,
//!   plus a permutation-encoded genetic alternative.
//! - **Genetic Algorithm** ([`knapsack`]): subset-sum knapsack over boolean
//!   genomes with elitism, tournament selection and decaying mutation.
//! - **Ant Colony Optimization** ([`aco`]): traveling salesman tours built
//!   from pheromone trails and inverse distances.
//!
//! # Architecture
//!
//! Every engine follows the same shape: validate an instance and a
//! configuration at construction, then iterate and report. Stochastic
//! engines implement [`search::Search`], so a caller can step them from its
//! own loop, [`drive`](search::drive) them with a cancellation flag, or
//! [`spawn`](search::spawn) them on a worker thread and consume snapshots
//! over a channel. Rendering and scheduling are left to the caller.
//!
//! All randomness comes from an RNG owned by the engine, seeded from the
//! configuration or injected through `with_rng`, so runs are reproducible.

pub mod aco;
pub mod error;
pub mod ga;
pub mod knapsack;
pub mod queens;
pub mod random;
pub mod search;

pub use error::ConfigError;
pub use search::Search;
