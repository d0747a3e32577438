//! Generational loop for the subset-sum knapsack.
//!
//! [`KnapsackGa`] is stateless between generations: the caller passes the
//! current population to [`KnapsackGa::step`] and receives the next one.
//! [`KnapsackSearch`] wraps it with the population and generation counter
//! for use through the [`Search`] capability.

use super::config::KnapsackConfig;
use super::instance::{Genome, KnapsackInstance};
use crate::error::ConfigError;
use crate::ga::{operators, selection, LinearDecay};
use crate::random::rng_from_seed;
use crate::search::{drive, Search};
use rand::rngs::StdRng;
use rand::Rng;
use std::cmp::Ordering;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{debug, info};

/// Snapshot produced by one call to [`KnapsackGa::step`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationReport {
    /// Index of the evaluated generation.
    pub generation: usize,

    /// The next generation, elites first.
    pub population: Vec<Genome>,

    /// Fittest genome of the evaluated generation.
    pub best: Genome,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Subset sum of `best`.
    pub best_sum: u64,
}

/// Result of a complete knapsack GA run.
#[derive(Debug, Clone)]
pub struct KnapsackResult {
    /// Fittest genome seen during the run.
    pub best: Genome,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Subset sum of `best`.
    pub best_sum: u64,

    /// Number of generations evaluated.
    pub generations: usize,

    /// Whether `best_sum` equals the target.
    pub reached_target: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best fitness of each evaluated generation.
    pub fitness_history: Vec<f64>,
}

/// Genetic algorithm over boolean genomes for the subset-sum knapsack.
///
/// # Usage
///
/// ```
/// use u_combopt::knapsack::{KnapsackConfig, KnapsackGa, KnapsackInstance};
///
/// let instance = KnapsackInstance::new(vec![10, 20, 30, 40, 50], 60).unwrap();
/// let config = KnapsackConfig::default()
///     .with_population_size(20)
///     .with_max_generations(200)
///     .with_seed(42);
/// let mut ga = KnapsackGa::new(instance, config).unwrap();
///
/// let mut population = None;
/// for generation in 0..200 {
///     let report = ga.step(generation, population.take());
///     if report.best_sum == 60 {
///         break;
///     }
///     population = Some(report.population);
/// }
/// ```
pub struct KnapsackGa<R = StdRng> {
    instance: KnapsackInstance,
    config: KnapsackConfig,
    schedule: LinearDecay,
    rng: R,
}

impl KnapsackGa<StdRng> {
    /// Creates an engine seeded from `config.seed`.
    pub fn new(instance: KnapsackInstance, config: KnapsackConfig) -> Result<Self, ConfigError> {
        let rng = rng_from_seed(config.seed);
        Self::with_rng(instance, config, rng)
    }
}

impl<R: Rng> KnapsackGa<R> {
    /// Creates an engine drawing from an explicit random source.
    ///
    /// `config.seed` is ignored.
    pub fn with_rng(
        instance: KnapsackInstance,
        config: KnapsackConfig,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if instance.is_empty() {
            return Err(ConfigError::NoItems);
        }
        let schedule = config.mutation_schedule();
        Ok(Self {
            instance,
            config,
            schedule,
            rng,
        })
    }

    /// The problem instance.
    pub fn instance(&self) -> &KnapsackInstance {
        &self.instance
    }

    /// The validated configuration.
    pub fn config(&self) -> &KnapsackConfig {
        &self.config
    }

    /// Fitness of a genome (higher is better, `1.0` at the target).
    pub fn fitness(&self, genome: &[bool]) -> f64 {
        self.instance.fitness(genome)
    }

    /// Per-gene mutation probability at `generation`.
    pub fn mutation_rate(&self, generation: usize) -> f64 {
        self.schedule.rate(generation)
    }

    /// Creates `population_size` random genomes.
    pub fn initial_population(&mut self) -> Vec<Genome> {
        let n = self.instance.len();
        let p = self.config.selection_fraction;
        (0..self.config.population_size)
            .map(|_| (0..n).map(|_| self.rng.random_bool(p)).collect())
            .collect()
    }

    /// Evaluates every genome of `population`.
    pub fn evaluate(&self, population: &[Genome]) -> Vec<f64> {
        let instance = &self.instance;

        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                use rayon::prelude::*;
                return population
                    .par_iter()
                    .map(|genome| instance.fitness(genome))
                    .collect();
            }
        }

        population
            .iter()
            .map(|genome| instance.fitness(genome))
            .collect()
    }

    /// Uniform crossover of two parents.
    pub fn crossover(&mut self, parent1: &[bool], parent2: &[bool]) -> Genome {
        operators::uniform_crossover(parent1, parent2, &mut self.rng)
    }

    /// Flips genes of `genome` at the rate scheduled for `generation`.
    pub fn mutate(&mut self, genome: &mut [bool], generation: usize) {
        let rate = self.mutation_rate(generation);
        operators::bit_flip_mutation(genome, rate, &mut self.rng);
    }

    /// Builds the generation following `population`.
    ///
    /// `fitness[i]` must be the fitness of `population[i]`. The top
    /// `elitism_count` genomes (stable, by descending fitness) come first,
    /// the rest are tournament-selected, recombined and mutated offspring.
    pub fn next_generation(
        &mut self,
        population: &[Genome],
        fitness: &[f64],
        generation: usize,
    ) -> Vec<Genome> {
        debug_assert_eq!(population.len(), fitness.len());
        let size = self.config.population_size;

        let order = rank_descending(fitness);
        let elites = self.config.elitism_count.min(population.len());

        let mut next: Vec<Genome> = Vec::with_capacity(size);
        next.extend(order[..elites].iter().map(|&i| population[i].clone()));

        while next.len() < size {
            let p1 = selection::tournament(fitness, self.config.tournament_size, &mut self.rng);
            let p2 = selection::tournament(fitness, self.config.tournament_size, &mut self.rng);
            let mut child = self.crossover(&population[p1], &population[p2]);
            self.mutate(&mut child, generation);
            next.push(child);
        }

        next
    }

    /// Advances one generation.
    ///
    /// Evaluates `population` (creating the initial population when it is
    /// `None` or empty), reports its best genome, and returns the next
    /// generation in the report. Never blocks; stopping is up to the
    /// caller.
    ///
    /// # Panics
    /// Panics if a genome of `population` does not have one gene per item.
    pub fn step(&mut self, generation: usize, population: Option<Vec<Genome>>) -> GenerationReport {
        let population = match population {
            Some(pop) if !pop.is_empty() => pop,
            _ => self.initial_population(),
        };
        let items = self.instance.len();
        if let Some(pos) = population.iter().position(|g| g.len() != items) {
            panic!(
                "genome {pos} has {} genes, instance has {items} items",
                population[pos].len()
            );
        }

        let fitness = self.evaluate(&population);
        let best_idx = best_index(&fitness);
        let best = population[best_idx].clone();
        let best_fitness = fitness[best_idx];
        let best_sum = self.instance.subset_sum(&best);

        debug!(
            generation,
            best_fitness,
            best_sum,
            target = self.instance.target(),
            "knapsack generation"
        );

        let next = self.next_generation(&population, &fitness, generation);

        GenerationReport {
            generation,
            population: next,
            best,
            best_fitness,
            best_sum,
        }
    }

    /// Wraps the engine into a stateful [`KnapsackSearch`].
    pub fn into_search(self) -> KnapsackSearch<R> {
        KnapsackSearch::new(self)
    }
}

/// Stateful knapsack search: holds the current population between steps.
///
/// Finished when the best genome hits the target exactly or
/// `max_generations` generations have been evaluated.
pub struct KnapsackSearch<R = StdRng> {
    ga: KnapsackGa<R>,
    population: Option<Vec<Genome>>,
    generation: usize,
    best: Option<Genome>,
    best_fitness: f64,
    best_sum: u64,
    reached_target: bool,
}

impl<R: Rng> KnapsackSearch<R> {
    pub fn new(ga: KnapsackGa<R>) -> Self {
        Self {
            ga,
            population: None,
            generation: 0,
            best: None,
            best_fitness: f64::NEG_INFINITY,
            best_sum: 0,
            reached_target: false,
        }
    }

    pub fn engine(&self) -> &KnapsackGa<R> {
        &self.ga
    }

    /// The population the next step will evaluate, if one exists yet.
    pub fn population(&self) -> Option<&[Genome]> {
        self.population.as_deref()
    }

    /// Runs to completion.
    pub fn run(&mut self) -> KnapsackResult {
        self.run_with_cancel(None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the search
    /// stops before the next generation and returns the best genome found
    /// so far.
    pub fn run_with_cancel(&mut self, cancel: Option<Arc<AtomicBool>>) -> KnapsackResult {
        info!(
            items = self.ga.instance.len(),
            target = self.ga.instance.target(),
            population = self.ga.config.population_size,
            "knapsack ga started"
        );

        let mut fitness_history = Vec::new();
        let outcome = drive(&mut *self, cancel.as_deref(), |report: &GenerationReport| {
            fitness_history.push(report.best_fitness);
        });

        let result = KnapsackResult {
            best: self.best.clone().unwrap_or_default(),
            best_fitness: self.best_fitness,
            best_sum: self.best_sum,
            generations: self.generation,
            reached_target: self.reached_target,
            cancelled: outcome.cancelled,
            fitness_history,
        };

        info!(
            generations = result.generations,
            best_sum = result.best_sum,
            reached_target = result.reached_target,
            cancelled = result.cancelled,
            "knapsack ga finished"
        );
        result
    }
}

impl<R: Rng> Search for KnapsackSearch<R> {
    type Candidate = Genome;
    type Report = GenerationReport;

    fn step(&mut self) -> GenerationReport {
        let report = self.ga.step(self.generation, self.population.take());
        self.population = Some(report.population.clone());
        self.generation += 1;

        if self.best.is_none() || report.best_fitness > self.best_fitness {
            self.best = Some(report.best.clone());
            self.best_fitness = report.best_fitness;
            self.best_sum = report.best_sum;
        }
        if report.best_sum == self.ga.instance.target() {
            self.reached_target = true;
        }

        report
    }

    fn iteration(&self) -> usize {
        self.generation
    }

    fn best(&self) -> Option<&Genome> {
        self.best.as_ref()
    }

    fn best_score(&self) -> Option<f64> {
        self.best.as_ref().map(|_| self.best_fitness)
    }

    fn is_finished(&self) -> bool {
        self.reached_target || self.generation >= self.ga.config.max_generations
    }
}

/// Index of the first maximum.
fn best_index(fitness: &[f64]) -> usize {
    let mut best = 0;
    for (i, &f) in fitness.iter().enumerate().skip(1) {
        if f > fitness[best] {
            best = i;
        }
    }
    best
}

/// Indices sorted by descending fitness; equal fitness keeps input order.
fn rank_descending(fitness: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| {
        fitness[b]
            .partial_cmp(&fitness[a])
            .unwrap_or(Ordering::Equal)
    });
    order
}

// ============================================================================
// Tests
// ============================================================================
