//! The single seeded RNG source shared by every stochastic decision in a run.

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Wraps a [`StdRng`] so callers draw from one shared, seeded source instead of
/// constructing their own. Cloning a `SimRng` is intentionally not `Clone`:
/// there must be exactly one draw sequence per run.
#[derive(Resource)]
pub struct SimRng {
    inner: StdRng,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws `true` with probability `p`, clamped to `[0.0, 1.0]`.
    pub fn roll(&mut self, p: f64) -> bool {
        self.inner.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Draws a uniform integer in `[low, high]` inclusive.
    pub fn uniform_range(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.inner.gen_range(low..=high)
    }

    /// Weighted choice among `options`, using relative (not necessarily normalized) weights.
    /// Returns the last option if all weights are zero or the slice is non-empty degenerate input.
    pub fn weighted_choice<'a, T>(&mut self, options: &'a [(T, f64)]) -> &'a T {
        let total: f64 = options.iter().map(|(_, w)| w).sum();
        let mut draw = self.inner.gen_range(0.0..total.max(f64::MIN_POSITIVE));
        for (value, weight) in options {
            if draw < *weight {
                return value;
            }
            draw -= weight;
        }
        &options.last().expect("weighted_choice called with no options").0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_yields_same_sequence() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..20 {
            assert_eq!(a.roll(0.5), b.roll(0.5));
        }
    }

    #[test]
    fn weighted_choice_picks_among_given_options() {
        let mut rng = SimRng::new(7);
        let options = vec![("a", 1.0), ("b", 0.0)];
        for _ in 0..10 {
            assert_eq!(*rng.weighted_choice(&options), "a");
        }
    }
}
