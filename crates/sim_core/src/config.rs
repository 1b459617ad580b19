//! Runtime configuration for a simulation run, with builder-style setters
//! mirroring how scenario parameters are assembled, and one-shot validation
//! at startup.

use crate::error::ConfigError;

/// Recognized configuration options (see the external interfaces contract).
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub num_cycles: u32,
    pub spawn_prob_event: f64,
    pub weather_tick_period: u32,
    pub refuel_trigger_fraction: f64,
    pub refuel_safety_fraction: f64,
    pub fuel_safety_margin: f64,
    pub event_failure_prob: f64,
    pub max_distance_km: f64,
    pub selector_trials: u32,
    pub selector_weights: (f64, f64, f64),
    pub rng_seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_cycles: 1,
            spawn_prob_event: 0.3,
            weather_tick_period: 5,
            refuel_trigger_fraction: 0.6,
            refuel_safety_fraction: 0.9,
            fuel_safety_margin: 1.1,
            event_failure_prob: 0.1,
            max_distance_km: 300.0,
            selector_trials: 5,
            selector_weights: (0.2, 0.4, 0.4),
            rng_seed: 0,
        }
    }
}

impl SimConfig {
    pub fn with_num_cycles(mut self, num_cycles: u32) -> Self {
        self.num_cycles = num_cycles;
        self
    }

    pub fn with_spawn_prob_event(mut self, prob: f64) -> Self {
        self.spawn_prob_event = prob;
        self
    }

    pub fn with_weather_tick_period(mut self, period: u32) -> Self {
        self.weather_tick_period = period;
        self
    }

    pub fn with_refuel_fractions(mut self, trigger: f64, safety: f64) -> Self {
        self.refuel_trigger_fraction = trigger;
        self.refuel_safety_fraction = safety;
        self
    }

    pub fn with_fuel_safety_margin(mut self, margin: f64) -> Self {
        self.fuel_safety_margin = margin;
        self
    }

    pub fn with_event_failure_prob(mut self, prob: f64) -> Self {
        self.event_failure_prob = prob;
        self
    }

    pub fn with_max_distance_km(mut self, km: f64) -> Self {
        self.max_distance_km = km;
        self
    }

    pub fn with_selector(mut self, trials: u32, weights: (f64, f64, f64)) -> Self {
        self.selector_trials = trials;
        self.selector_weights = weights;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Validates the recognized options. Called once at startup; never re-checked mid-run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_cycles == 0 {
            return Err(ConfigError::NonPositiveCycles(self.num_cycles as i64));
        }
        for (field, value) in [
            ("spawn_prob_event", self.spawn_prob_event),
            ("refuel_trigger_fraction", self.refuel_trigger_fraction),
            ("refuel_safety_fraction", self.refuel_safety_fraction),
            ("event_failure_prob", self.event_failure_prob),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { field, value });
            }
        }
        if self.fuel_safety_margin <= 0.0 {
            return Err(ConfigError::NonPositiveValue {
                field: "fuel_safety_margin",
                value: self.fuel_safety_margin,
            });
        }
        if self.max_distance_km <= 0.0 {
            return Err(ConfigError::NonPositiveValue {
                field: "max_distance_km",
                value: self.max_distance_km,
            });
        }
        if self.selector_trials == 0 {
            return Err(ConfigError::NonPositiveSelectorTrials(
                self.selector_trials as i64,
            ));
        }
        let (a, b, c) = self.selector_weights;
        let sum = a + b + c;
        if !(0.99..=1.01).contains(&sum) {
            return Err(ConfigError::SelectorWeightsInvalid(sum));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_cycles_is_fatal() {
        let config = SimConfig::default().with_num_cycles(0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveCycles(0))
        );
    }

    #[test]
    fn out_of_range_probability_is_fatal() {
        let config = SimConfig::default().with_spawn_prob_event(1.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange { field: "spawn_prob_event", .. })
        ));
    }

    #[test]
    fn bad_selector_weights_are_fatal() {
        let config = SimConfig::default().with_selector(5, (0.1, 0.1, 0.1));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SelectorWeightsInvalid(_))
        ));
    }
}
