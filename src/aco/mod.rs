//! Ant Colony Optimization (ACO) for the traveling salesman problem.
//!
//! A colony of ants repeatedly builds closed tours over all cities. Each
//! ant picks its next city with probability weighted by the pheromone on
//! the connecting edge and by the inverse edge length. After every
//! iteration all trails evaporate and each ant reinforces the edges of its
//! tour in proportion to the tour's shortness.
//!
//! # Key Types
//!
//! - [`TspInstance`]: cities and their distance matrix
//! - [`AcoConfig`]: colony size, exponents, evaporation and deposit
//! - [`AntColony`]: the optimizer, steppable or run with a callback
//! - [`PheromoneMatrix`]: the colony's learned edge desirability
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod colony;
mod config;
mod instance;
mod pheromone;

pub use colony::{AcoResult, AntColony, IterationReport};
pub use config::AcoConfig;
pub use instance::{City, Tour, TspInstance};
pub use pheromone::PheromoneMatrix;
