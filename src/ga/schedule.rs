//! Mutation rate schedules.

/// Linearly decaying mutation rate with a floor.
///
/// `rate(g) = max(floor, initial * (1 - g / horizon))`
///
/// The rate starts at `initial`, falls linearly to zero over `horizon`
/// generations and never drops below `floor`. It is non-increasing in `g`.
///
/// ```
/// use u_combopt::ga::LinearDecay;
///
/// let schedule = LinearDecay::new(0.1, 0.01, 100);
/// assert!((schedule.rate(0) - 0.1).abs() < 1e-12);
/// assert!((schedule.rate(50) - 0.05).abs() < 1e-12);
/// assert!((schedule.rate(100) - 0.01).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearDecay {
    /// Rate at generation 0.
    pub initial: f64,
    /// Lower bound.
    pub floor: f64,
    /// Generation at which the linear term reaches zero.
    pub horizon: usize,
}

impl LinearDecay {
    pub fn new(initial: f64, floor: f64, horizon: usize) -> Self {
        Self {
            initial,
            floor,
            horizon,
        }
    }

    /// Mutation rate for `generation`.
    pub fn rate(&self, generation: usize) -> f64 {
        if self.horizon == 0 {
            return self.floor;
        }
        let progress = generation as f64 / self.horizon as f64;
        (self.initial * (1.0 - progress)).max(self.floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_floor_after_horizon() {
        let schedule = LinearDecay::new(0.2, 0.05, 10);
        assert!((schedule.rate(10) - 0.05).abs() < 1e-12);
        assert!((schedule.rate(500) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_zero_horizon() {
        let schedule = LinearDecay::new(0.2, 0.05, 0);
        assert!((schedule.rate(0) - 0.05).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_non_increasing_and_floored(
            initial in 0.0f64..=1.0,
            floor in 0.0f64..=1.0,
            horizon in 1usize..2_000,
            g in 0usize..4_000,
        ) {
            let schedule = LinearDecay::new(initial, floor, horizon);
            prop_assert!(schedule.rate(g + 1) <= schedule.rate(g));
            prop_assert!(schedule.rate(g) >= floor);
        }
    }
}
