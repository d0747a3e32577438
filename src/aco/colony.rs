//! Ant colony loop: tour construction, pheromone update, best tracking.

use super::config::AcoConfig;
use super::instance::{Tour, TspInstance};
use super::pheromone::PheromoneMatrix;
use crate::error::ConfigError;
use crate::random::rng_from_seed;
use crate::search::{drive, Search};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{debug, info};

/// Stand-in for `1 / distance` between cities at the same coordinates.
const COINCIDENT_PROXIMITY: f64 = 1e10;

/// Initial value of every pheromone entry.
const INITIAL_PHEROMONE: f64 = 1.0;

/// Snapshot produced by one [`AntColony::step`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationReport {
    /// 1-based index of the completed iteration.
    pub iteration: usize,

    /// Shortest tour found so far.
    pub best_path: Tour,

    /// Length of `best_path`.
    pub best_distance: f64,

    /// Shortest tour length among this iteration's ants.
    pub iteration_best_distance: f64,
}

/// Result of [`AntColony::run`].
#[derive(Debug, Clone)]
pub struct AcoResult {
    /// Shortest tour found.
    pub best_path: Tour,

    /// Length of `best_path`.
    pub best_distance: f64,

    /// Total iterations completed by the colony.
    pub iterations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best-so-far distance after each iteration of this run.
    pub distance_history: Vec<f64>,
}

/// Ant colony optimizer for the symmetric Euclidean TSP.
///
/// # Usage
///
/// ```
/// use u_combopt::aco::{AcoConfig, AntColony, City, TspInstance};
///
/// let instance = TspInstance::new(vec![
///     City::new(0.0, 0.0),
///     City::new(1.0, 0.0),
///     City::new(1.0, 1.0),
///     City::new(0.0, 1.0),
/// ])
/// .unwrap();
/// let config = AcoConfig::default().with_num_ants(10).with_max_iterations(50).with_seed(42);
/// let mut colony = AntColony::new(instance, config).unwrap();
///
/// let result = colony.run(|report| {
///     // Hand the snapshot to a renderer; the colony itself is not reachable here.
///     let _ = (report.iteration, report.best_distance);
/// });
/// assert!((result.best_distance - 4.0).abs() < 1e-9);
/// ```
pub struct AntColony<R = StdRng> {
    instance: TspInstance,
    config: AcoConfig,
    pheromone: PheromoneMatrix,
    /// Row-major `(1 / d)^beta`.
    visibility: Vec<f64>,
    rng: R,
    iteration: usize,
    best_path: Option<Tour>,
    best_distance: f64,
}

impl AntColony<StdRng> {
    /// Creates a colony seeded from `config.seed`.
    pub fn new(instance: TspInstance, config: AcoConfig) -> Result<Self, ConfigError> {
        let rng = rng_from_seed(config.seed);
        Self::with_rng(instance, config, rng)
    }
}

impl<R: Rng> AntColony<R> {
    /// Creates a colony drawing from an explicit random source.
    ///
    /// `config.seed` is ignored.
    pub fn with_rng(instance: TspInstance, config: AcoConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        if instance.is_empty() {
            return Err(ConfigError::NoCities);
        }

        let n = instance.len();
        let mut visibility = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                let d = instance.distance(i, j);
                let proximity = if d > 0.0 { 1.0 / d } else { COINCIDENT_PROXIMITY };
                visibility[i * n + j] = proximity.powf(config.beta);
            }
        }

        Ok(Self {
            pheromone: PheromoneMatrix::new(n, INITIAL_PHEROMONE),
            instance,
            config,
            visibility,
            rng,
            iteration: 0,
            best_path: None,
            best_distance: f64::INFINITY,
        })
    }

    /// The problem instance.
    pub fn instance(&self) -> &TspInstance {
        &self.instance
    }

    /// The validated configuration.
    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Current pheromone trails.
    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    /// Length of the best tour so far (`INFINITY` before the first step).
    pub fn best_distance(&self) -> f64 {
        self.best_distance
    }

    pub fn best_path(&self) -> Option<&[usize]> {
        self.best_path.as_deref()
    }

    /// Builds one ant's tour from a uniformly random start city.
    ///
    /// Each next city is drawn from the unvisited set with probability
    /// proportional to `pheromone^alpha * (1 / distance)^beta`.
    pub fn construct_path(&mut self) -> Tour {
        let n = self.instance.len();
        let mut unvisited: Vec<usize> = (0..n).collect();
        let mut tour = Vec::with_capacity(n);

        let start = unvisited.swap_remove(self.rng.random_range(0..n));
        tour.push(start);

        let mut weights = Vec::with_capacity(n);
        let mut current = start;
        while !unvisited.is_empty() {
            weights.clear();
            weights.extend(unvisited.iter().map(|&city| self.attractiveness(current, city)));
            let pick = roulette(&weights, &mut self.rng);
            current = unvisited.swap_remove(pick);
            tour.push(current);
        }

        tour
    }

    fn attractiveness(&self, from: usize, to: usize) -> f64 {
        let n = self.instance.len();
        self.pheromone.get(from, to).powf(self.config.alpha) * self.visibility[from * n + to]
    }

    /// Evaporates all trails, then lets every ant deposit on its tour.
    fn update_pheromones(&mut self, tours: &[(Tour, f64)]) {
        self.pheromone.evaporate(self.config.evaporation_rate);
        for (tour, length) in tours {
            // A tour over coincident cities has no meaningful length to reward.
            if *length > 0.0 && length.is_finite() {
                self.pheromone
                    .deposit_tour(tour, self.config.deposit_factor / length);
            }
        }
    }

    /// Runs until `max_iterations` total iterations have completed.
    ///
    /// `on_iteration` receives every report and cannot reach the colony.
    pub fn run<F>(&mut self, on_iteration: F) -> AcoResult
    where
        F: FnMut(&IterationReport),
    {
        self.run_with_cancel(None, on_iteration)
    }

    /// Runs with an optional cancellation token checked between iterations.
    pub fn run_with_cancel<F>(
        &mut self,
        cancel: Option<Arc<AtomicBool>>,
        mut on_iteration: F,
    ) -> AcoResult
    where
        F: FnMut(&IterationReport),
    {
        info!(
            cities = self.instance.len(),
            ants = self.config.num_ants,
            max_iterations = self.config.max_iterations,
            "ant colony started"
        );

        let mut distance_history = Vec::new();
        let outcome = drive(&mut *self, cancel.as_deref(), |report: &IterationReport| {
            distance_history.push(report.best_distance);
            on_iteration(report);
        });

        info!(
            iterations = self.iteration,
            best_distance = self.best_distance,
            cancelled = outcome.cancelled,
            "ant colony finished"
        );

        AcoResult {
            best_path: self.best_path.clone().unwrap_or_default(),
            best_distance: self.best_distance,
            iterations: self.iteration,
            cancelled: outcome.cancelled,
            distance_history,
        }
    }
}

impl<R: Rng> Search for AntColony<R> {
    type Candidate = Tour;
    type Report = IterationReport;

    /// One iteration: every ant builds a tour, trails are updated, and the
    /// best-so-far tour is refreshed. Ties keep the earlier tour.
    fn step(&mut self) -> IterationReport {
        let tours: Vec<(Tour, f64)> = (0..self.config.num_ants)
            .map(|_| {
                let tour = self.construct_path();
                let length = self.instance.tour_length(&tour);
                (tour, length)
            })
            .collect();

        self.update_pheromones(&tours);

        let mut iteration_best_distance = f64::INFINITY;
        for (tour, length) in &tours {
            iteration_best_distance = iteration_best_distance.min(*length);
            if *length < self.best_distance {
                self.best_distance = *length;
                self.best_path = Some(tour.clone());
            }
        }
        self.iteration += 1;

        if self.iteration % 10 == 0 {
            debug!(
                iteration = self.iteration,
                best_distance = self.best_distance,
                iteration_best_distance,
                "ant colony iteration"
            );
        }

        IterationReport {
            iteration: self.iteration,
            best_path: self.best_path.clone().unwrap_or_default(),
            best_distance: self.best_distance,
            iteration_best_distance,
        }
    }

    fn iteration(&self) -> usize {
        self.iteration
    }

    fn best(&self) -> Option<&Tour> {
        self.best_path.as_ref()
    }

    fn best_score(&self) -> Option<f64> {
        self.best_path.as_ref().map(|_| self.best_distance)
    }

    fn is_finished(&self) -> bool {
        self.iteration >= self.config.max_iterations
    }
}

/// Roulette-wheel choice over non-negative weights.
///
/// Weights are divided by the largest one before summing, so finite
/// weights whose raw sum would overflow still select proportionally.
/// Degenerate wheels fall back to a uniform choice: among infinite weights
/// when any exist, otherwise among all entries.
fn roulette<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let n = weights.len();
    debug_assert!(n > 0);

    let max = weights.iter().copied().fold(0.0_f64, f64::max);
    if max.is_finite() && max > 0.0 {
        let total: f64 = weights.iter().map(|&w| w / max).sum();
        let threshold = rng.random_range(0.0..total);
        let mut cumulative = 0.0;
        for (i, &w) in weights.iter().enumerate() {
            cumulative += w / max;
            if cumulative > threshold {
                return i;
            }
        }
        // floating-point fallback: last entry with positive weight
        return weights.iter().rposition(|&w| w > 0.0).unwrap_or(n - 1);
    }

    let saturated: Vec<usize> = (0..n).filter(|&i| weights[i] == f64::INFINITY).collect();
    if saturated.is_empty() {
        rng.random_range(0..n)
    } else {
        saturated[rng.random_range(0..saturated.len())]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aco::City;
    use crate::ga::operators::is_permutation;
    use crate::random::create_rng;
    use proptest::prelude::*;
    use std::sync::atomic::Ordering;

    fn unit_square() -> TspInstance {
        TspInstance::new(vec![
            City::new(0.0, 0.0),
            City::new(1.0, 0.0),
            City::new(1.0, 1.0),
            City::new(0.0, 1.0),
        ])
        .unwrap()
    }

    fn random_instance(n: usize, seed: u64) -> TspInstance {
        TspInstance::random(n, 100.0, 100.0, &mut create_rng(seed)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = AcoConfig::default().with_evaporation_rate(1.5);
        assert!(AntColony::new(unit_square(), config).is_err());
    }

    #[test]
    fn test_pheromone_starts_at_one() {
        let colony = AntColony::new(unit_square(), AcoConfig::default().with_seed(1)).unwrap();
        assert_eq!(colony.pheromone().size(), 4);
        assert!(colony.pheromone().as_slice().iter().all(|&v| v == 1.0));
        assert!(colony.best_path().is_none());
        assert_eq!(colony.best_distance(), f64::INFINITY);
    }

    #[test]
    fn test_unit_square_converges() {
        let config = AcoConfig::default()
            .with_num_ants(10)
            .with_max_iterations(50)
            .with_seed(42);
        let mut colony = AntColony::new(unit_square(), config).unwrap();
        let mut calls = 0;
        let result = colony.run(|_| calls += 1);

        assert_eq!(calls, 50);
        assert_eq!(result.iterations, 50);
        assert!(
            (result.best_distance - 4.0).abs() < 1e-9,
            "expected perimeter 4, got {}",
            result.best_distance
        );
        // Consecutive cities (including wrap-around) are square neighbours.
        let tour = &result.best_path;
        assert!(is_permutation(tour));
        for k in 0..4 {
            let step = (tour[(k + 1) % 4] + 4 - tour[k]) % 4;
            assert!(step == 1 || step == 3, "tour {tour:?} crosses the square");
        }
    }

    #[test]
    fn test_history_non_increasing() {
        let config = AcoConfig::default()
            .with_num_ants(8)
            .with_max_iterations(30)
            .with_seed(7);
        let mut colony = AntColony::new(random_instance(15, 3), config).unwrap();
        let result = colony.run(|_| {});

        assert_eq!(result.distance_history.len(), 30);
        for w in result.distance_history.windows(2) {
            assert!(w[1] <= w[0], "best distance increased: {w:?}");
        }
        let recomputed = colony.instance().tour_length(&result.best_path);
        assert!((recomputed - result.best_distance).abs() < 1e-9);
    }

    #[test]
    fn test_step_report_matches_state() {
        let config = AcoConfig::default().with_num_ants(5).with_seed(11);
        let mut colony = AntColony::new(random_instance(8, 1), config).unwrap();
        let report = colony.step();
        assert_eq!(report.iteration, 1);
        assert_eq!(colony.iteration(), 1);
        assert_eq!(Some(report.best_path.as_slice()), colony.best_path());
        assert_eq!(report.best_distance, colony.best_distance());
        assert!(report.best_distance <= report.iteration_best_distance);
        assert_eq!(colony.best_score(), Some(report.best_distance));
    }

    #[test]
    fn test_single_and_two_city_instances() {
        let one = TspInstance::new(vec![City::new(2.0, 2.0)]).unwrap();
        let mut colony = AntColony::new(one, AcoConfig::default().with_seed(1)).unwrap();
        let report = colony.step();
        assert_eq!(report.best_path, vec![0]);
        assert_eq!(report.best_distance, 0.0);
        assert!(colony.pheromone().as_slice().iter().all(|v| v.is_finite()));

        let two = TspInstance::new(vec![City::new(0.0, 0.0), City::new(0.0, 3.0)]).unwrap();
        let mut colony = AntColony::new(two, AcoConfig::default().with_seed(1)).unwrap();
        let report = colony.step();
        assert!((report.best_distance - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_coordinates_are_finite() {
        let inst = TspInstance::new(vec![
            City::new(5.0, 5.0),
            City::new(5.0, 5.0),
            City::new(5.0, 5.0),
            City::new(9.0, 5.0),
        ])
        .unwrap();
        let config = AcoConfig::default().with_num_ants(10).with_max_iterations(20).with_seed(3);
        let mut colony = AntColony::new(inst, config).unwrap();
        let result = colony.run(|_| {});

        assert!(result.best_distance.is_finite());
        assert!((result.best_distance - 8.0).abs() < 1e-9);
        assert!(is_permutation(&result.best_path));
        assert!(colony.pheromone().is_symmetric());
    }

    #[test]
    fn test_all_cities_coincident() {
        let inst = TspInstance::new(vec![City::new(1.0, 1.0); 5]).unwrap();
        let config = AcoConfig::default().with_num_ants(4).with_max_iterations(5).with_seed(2);
        let mut colony = AntColony::new(inst, config).unwrap();
        let result = colony.run(|_| {});
        assert_eq!(result.best_distance, 0.0);
        assert!(is_permutation(&result.best_path));
        assert!(colony.pheromone().as_slice().iter().all(|v| v.is_finite() && *v >= 0.0));
    }

    #[test]
    fn test_cancellation() {
        let config = AcoConfig::default().with_num_ants(5).with_seed(1);
        let mut colony = AntColony::new(random_instance(10, 9), config).unwrap();
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);

        let result = colony.run_with_cancel(Some(cancel), |report| {
            if report.iteration == 3 {
                flag.store(true, Ordering::Relaxed);
            }
        });
        assert!(result.cancelled);
        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn test_worker_thread_handoff() {
        let config = AcoConfig::default().with_num_ants(5).with_max_iterations(12).with_seed(8);
        let colony = AntColony::new(random_instance(10, 2), config).unwrap();
        let handle = crate::search::spawn(colony);

        let reports: Vec<IterationReport> = handle.reports.iter().collect();
        assert_eq!(reports.len(), 12);
        assert_eq!(reports.last().map(|r| r.iteration), Some(12));

        let (colony, outcome) = handle.join().expect("worker panicked");
        assert!(!outcome.cancelled);
        assert_eq!(colony.best_distance(), reports[11].best_distance);
    }

    #[test]
    fn test_injected_rng_is_deterministic() {
        let run = |seed| {
            let config = AcoConfig::default().with_num_ants(6).with_max_iterations(10);
            let mut colony =
                AntColony::with_rng(random_instance(12, 4), config, create_rng(seed)).unwrap();
            colony.run(|_| {}).best_path
        };
        assert_eq!(run(5), run(5));
    }

    #[test]
    fn test_roulette_degenerate_weights() {
        let mut rng = create_rng(1);
        for _ in 0..100 {
            assert!(roulette(&[0.0, 0.0, 0.0], &mut rng) < 3);
            assert_eq!(roulette(&[1.0, f64::INFINITY, 2.0], &mut rng), 1);
            assert_eq!(roulette(&[0.0, 5.0, 0.0], &mut rng), 1);
        }
    }

    #[test]
    fn test_roulette_stays_proportional_when_sum_overflows() {
        let mut rng = create_rng(9);
        let weights = [f64::MAX, f64::MAX / 3.0, f64::MAX / 1e6];
        assert!(weights.iter().sum::<f64>().is_infinite());

        let mut counts = [0usize; 3];
        for _ in 0..4000 {
            counts[roulette(&weights, &mut rng)] += 1;
        }
        // Expected shares are roughly 75% / 25% / 0%.
        assert!(counts[0] > 2700 && counts[0] < 3300, "counts: {counts:?}");
        assert!(counts[1] > 700 && counts[1] < 1300, "counts: {counts:?}");
        assert!(counts[2] < 5, "counts: {counts:?}");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_pheromone_symmetric_and_non_negative(
            n in 1usize..12,
            seed in any::<u64>(),
            steps in 1usize..6,
        ) {
            let config = AcoConfig::default().with_num_ants(4).with_seed(seed);
            let mut colony = AntColony::new(random_instance(n, seed), config).unwrap();
            for _ in 0..steps {
                colony.step();
                prop_assert!(colony.pheromone().is_symmetric());
                prop_assert!(colony.pheromone().min().unwrap() >= 0.0);
            }
        }

        #[test]
        fn prop_constructed_paths_are_permutations(n in 1usize..30, seed in any::<u64>()) {
            let config = AcoConfig::default().with_seed(seed);
            let mut colony = AntColony::new(random_instance(n, seed), config).unwrap();
            for _ in 0..5 {
                let tour = colony.construct_path();
                prop_assert_eq!(tour.len(), n);
                prop_assert!(is_permutation(&tour));
            }
        }
    }
}
