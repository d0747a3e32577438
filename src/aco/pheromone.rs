//! Symmetric pheromone trail matrix.

/// Pheromone levels on city pairs.
///
/// Square, symmetric and entrywise non-negative: every mutation touches
/// both `(i, j)` and `(j, i)` and uses non-negative factors.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    n: usize,
    /// Row-major `n × n`.
    values: Vec<f64>,
}

impl PheromoneMatrix {
    /// Creates an `n × n` matrix with every entry set to `initial`.
    pub fn new(n: usize, initial: f64) -> Self {
        Self {
            n,
            values: vec![initial.max(0.0); n * n],
        }
    }

    /// Matrix dimension (number of cities).
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    /// Multiplies every entry by `1 - rate`.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = (1.0 - rate).clamp(0.0, 1.0);
        for v in &mut self.values {
            *v *= keep;
        }
    }

    /// Adds `amount` to both directions of edge `(i, j)`.
    ///
    /// A self-loop `(i, i)` receives `amount` twice.
    pub fn deposit(&mut self, i: usize, j: usize, amount: f64) {
        let amount = amount.max(0.0);
        self.values[i * self.n + j] += amount;
        self.values[j * self.n + i] += amount;
    }

    /// Deposits `amount` on every edge of a closed tour.
    pub fn deposit_tour(&mut self, tour: &[usize], amount: f64) {
        let n = tour.len();
        for k in 0..n {
            self.deposit(tour[k], tour[(k + 1) % n], amount);
        }
    }

    /// Row-major entries.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| ((i + 1)..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Smallest entry, or `None` for an empty matrix.
    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }
}
