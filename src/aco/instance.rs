//! TSP instances: city coordinates and their Euclidean distance matrix.

use crate::error::ConfigError;
use rand::Rng;

/// A tour: permutation of city indices, closed implicitly from last to first.
pub type Tour = Vec<usize>;

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An immutable list of cities with precomputed pairwise distances.
///
/// ```
/// use u_combopt::aco::{City, TspInstance};
///
/// let square = TspInstance::new(vec![
///     City::new(0.0, 0.0),
///     City::new(1.0, 0.0),
///     City::new(1.0, 1.0),
///     City::new(0.0, 1.0),
/// ])
/// .unwrap();
/// assert!((square.tour_length(&[0, 1, 2, 3]) - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TspInstance {
    cities: Vec<City>,
    /// Row-major `n × n`.
    distances: Vec<f64>,
}

impl TspInstance {
    /// Creates an instance, rejecting empty lists and non-finite coordinates.
    pub fn new(cities: Vec<City>) -> Result<Self, ConfigError> {
        if cities.is_empty() {
            return Err(ConfigError::NoCities);
        }
        if let Some(index) = cities
            .iter()
            .position(|c| !c.x.is_finite() || !c.y.is_finite())
        {
            return Err(ConfigError::NonFiniteCoordinate { index });
        }

        let n = cities.len();
        let mut distances = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].distance(&cities[j]);
                distances[i * n + j] = d;
                distances[j * n + i] = d;
            }
        }

        Ok(Self { cities, distances })
    }

    /// Places `num_cities` cities uniformly in `[0, width) × [0, height)`.
    pub fn random<R: Rng>(
        num_cities: usize,
        width: f64,
        height: f64,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        if !(width > 0.0 && width.is_finite()) {
            return Err(ConfigError::invalid("width", format!("must be positive, got {width}")));
        }
        if !(height > 0.0 && height.is_finite()) {
            return Err(ConfigError::invalid(
                "height",
                format!("must be positive, got {height}"),
            ));
        }
        let cities = (0..num_cities)
            .map(|_| City::new(rng.random_range(0.0..width), rng.random_range(0.0..height)))
            .collect();
        Self::new(cities)
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always `false` for a validated instance.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Distance between cities `i` and `j`.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[i * self.cities.len() + j]
    }

    /// Length of the closed tour, including the edge back to the start.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        let n = tour.len();
        (0..n)
            .map(|k| self.distance(tour[k], tour[(k + 1) % n]))
            .sum()
    }
}
