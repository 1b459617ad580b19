//! Injected simulated time: a monotonic clock advancing by a fixed per-tick
//! delta, so window expiry and determinism are reproducible independent of
//! wall-clock speed.

use bevy_ecs::prelude::Resource;

/// Hours advanced by a single [`SimTime::advance`] call. The source material
/// drives its dispatch loop off an unbounded wall clock; a fixed delta is the
/// simplest way to keep zone time windows (specified in hours) meaningful
/// against a deterministic tick count.
pub const HOURS_PER_TICK: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Resource)]
pub struct SimTime {
    hours: f64,
}

impl SimTime {
    pub fn new() -> Self {
        Self { hours: 0.0 }
    }

    pub fn hours(&self) -> f64 {
        self.hours
    }

    pub fn advance(&mut self) {
        self.hours += HOURS_PER_TICK;
    }
}

impl Default for SimTime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_by_fixed_delta() {
        let mut clock = SimTime::new();
        assert_eq!(clock.hours(), 0.0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.hours(), 2.0 * HOURS_PER_TICK);
    }
}
