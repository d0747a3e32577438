//! Permutation-encoded genetic search for N-Queens.
//!
//! Chromosomes are permutations of `0..n`, so column conflicts are
//! impossible and only diagonal attacks remain. Fitness is the number of
//! non-attacking pairs; a solution scores `n(n-1)/2`.

use super::board::{is_valid_placement, max_non_attacking_pairs, non_attacking_pairs, Placement};
use crate::error::{check_unit_interval, ConfigError};
use crate::ga::{operators, selection};
use crate::random::rng_from_seed;
use crate::search::{drive, Search};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{debug, info};

/// Configuration for [`QueensGa`].
///
/// ```
/// use u_combopt::queens::QueensGaConfig;
///
/// let config = QueensGaConfig::default().with_board_size(10).with_seed(1);
/// assert_eq!(config.population_size, 100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueensGaConfig {
    /// Board dimension, at least 2.
    pub board_size: usize,

    /// Chromosomes per generation.
    pub population_size: usize,

    /// Best chromosomes copied unchanged into the next generation.
    pub elite_count: usize,

    /// Parents are drawn from the top `parent_pool` chromosomes.
    pub parent_pool: usize,

    /// Probability that a child receives one swap mutation.
    pub mutation_rate: f64,

    /// Generation budget.
    pub max_generations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for QueensGaConfig {
    fn default() -> Self {
        Self {
            board_size: 8,
            population_size: 100,
            elite_count: 10,
            parent_pool: 50,
            mutation_rate: 0.1,
            max_generations: 1000,
            seed: None,
        }
    }
}

impl QueensGaConfig {
    /// Sets the board dimension.
    pub fn with_board_size(mut self, n: usize) -> Self {
        self.board_size = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets how many top chromosomes may become parents.
    pub fn with_parent_pool(mut self, n: usize) -> Self {
        self.parent_pool = n;
        self
    }

    /// Sets the swap mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.board_size < 2 {
            return Err(ConfigError::invalid(
                "board_size",
                "must be at least 2 for swap mutation",
            ));
        }
        if self.elite_count >= self.population_size {
            return Err(ConfigError::invalid(
                "elite_count",
                format!(
                    "must be below population_size ({}), got {}",
                    self.population_size, self.elite_count
                ),
            ));
        }
        if self.parent_pool < 2 || self.parent_pool > self.population_size {
            return Err(ConfigError::invalid(
                "parent_pool",
                format!(
                    "must be in 2..={}, got {}",
                    self.population_size, self.parent_pool
                ),
            ));
        }
        if self.max_generations == 0 {
            return Err(ConfigError::invalid(
                "max_generations",
                "must be at least 1",
            ));
        }
        check_unit_interval("mutation_rate", self.mutation_rate)
    }
}

/// Snapshot of one [`QueensGa`] generation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueensGenerationReport {
    /// 1-based index of the evaluated generation.
    pub generation: usize,
    /// Fittest chromosome of the generation.
    pub best: Placement,
    /// Non-attacking pairs of `best`.
    pub best_fitness: usize,
    /// Whether `best` is a complete solution.
    pub solved: bool,
}

/// Result of a complete [`QueensGa`] run.
#[derive(Debug, Clone)]
pub struct QueensGaResult {
    /// Fittest chromosome found.
    pub best: Placement,
    /// Non-attacking pairs of `best`.
    pub best_fitness: usize,
    /// Whether `best` is a complete solution.
    pub solved: bool,
    /// Generations evaluated.
    pub generations: usize,
    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

/// Genetic search for N-Queens placements.
pub struct QueensGa<R = StdRng> {
    config: QueensGaConfig,
    optimum: usize,
    rng: R,
    population: Vec<Placement>,
    generation: usize,
    best: Option<Placement>,
    best_fitness: usize,
}

impl QueensGa<StdRng> {
    /// Creates a search seeded from `config.seed`.
    pub fn new(config: QueensGaConfig) -> Result<Self, ConfigError> {
        let rng = rng_from_seed(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> QueensGa<R> {
    /// Creates a search drawing from an explicit random source.
    pub fn with_rng(config: QueensGaConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            optimum: max_non_attacking_pairs(config.board_size),
            config,
            rng,
            population: Vec::new(),
            generation: 0,
            best: None,
            best_fitness: 0,
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &QueensGaConfig {
        &self.config
    }

    /// Fitness of a complete solution.
    pub fn optimum(&self) -> usize {
        self.optimum
    }

    fn random_chromosome(&mut self) -> Placement {
        let mut perm: Placement = (0..self.config.board_size).collect();
        perm.shuffle(&mut self.rng);
        perm
    }

    /// Replaces `self.population` (sorted best-first) with its successor.
    fn breed(&mut self) {
        let size = self.config.population_size;
        let pool = self.config.parent_pool.min(self.population.len());

        let mut next: Vec<Placement> = self.population[..self.config.elite_count].to_vec();
        while next.len() < size {
            let (a, b) = selection::pair_from_pool(pool, &mut self.rng);
            let mut child =
                operators::prefix_crossover(&self.population[a], &self.population[b], &mut self.rng);
            if self.rng.random_bool(self.config.mutation_rate) {
                operators::swap_mutation(&mut child, &mut self.rng);
            }
            next.push(child);
        }
        self.population = next;
    }

    /// Runs until solved or out of generations.
    pub fn run(&mut self) -> QueensGaResult {
        self.run_with_cancel(None)
    }

    /// Runs with an optional cancellation token.
    pub fn run_with_cancel(&mut self, cancel: Option<Arc<AtomicBool>>) -> QueensGaResult {
        info!(
            n = self.config.board_size,
            population = self.config.population_size,
            "queens ga started"
        );
        let outcome = drive(&mut *self, cancel.as_deref(), |_| {});
        let best = self.best.clone().unwrap_or_default();
        let solved = !best.is_empty() && is_valid_placement(&best);

        info!(
            generations = self.generation,
            best_fitness = self.best_fitness,
            solved,
            "queens ga finished"
        );
        QueensGaResult {
            best,
            best_fitness: self.best_fitness,
            solved,
            generations: self.generation,
            cancelled: outcome.cancelled,
        }
    }
}

impl<R: Rng> Search for QueensGa<R> {
    type Candidate = Placement;
    type Report = QueensGenerationReport;

    fn step(&mut self) -> QueensGenerationReport {
        if self.population.is_empty() {
            self.population = (0..self.config.population_size)
                .map(|_| self.random_chromosome())
                .collect();
        } else {
            self.breed();
        }

        // Stable sort keeps earlier chromosomes ahead on ties.
        self.population
            .sort_by_cached_key(|c| std::cmp::Reverse(non_attacking_pairs(c)));
        self.generation += 1;

        let best = self.population[0].clone();
        let best_fitness = non_attacking_pairs(&best);
        if self.best.is_none() || best_fitness > self.best_fitness {
            self.best = Some(best.clone());
            self.best_fitness = best_fitness;
        }

        debug!(generation = self.generation, best_fitness, "queens generation");

        QueensGenerationReport {
            generation: self.generation,
            best,
            best_fitness,
            solved: best_fitness == self.optimum,
        }
    }

    fn iteration(&self) -> usize {
        self.generation
    }

    fn best(&self) -> Option<&Placement> {
        self.best.as_ref()
    }

    fn best_score(&self) -> Option<f64> {
        self.best.as_ref().map(|_| self.best_fitness as f64)
    }

    fn is_finished(&self) -> bool {
        (self.best.is_some() && self.best_fitness == self.optimum)
            || self.generation >= self.config.max_generations
    }
}
