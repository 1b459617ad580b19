//! Failure causes surfaced by dispatch (non-fatal, counted) and configuration
//! errors (fatal, reported once at startup).

use thiserror::Error;

/// Why a single dispatch attempt (Target Scorer -> Pathfinder -> Executor) did not
/// end in a delivery. All variants are non-fatal: the caller tries the next
/// candidate zone or defers to the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchFailure {
    NoRouteFound,
    InsufficientFuel,
    TerrainIncompatible,
    OutsideWindow,
    DynamicEventFailure,
    AdverseWeather,
}

impl DispatchFailure {
    pub fn all() -> [DispatchFailure; 6] {
        [
            DispatchFailure::NoRouteFound,
            DispatchFailure::InsufficientFuel,
            DispatchFailure::TerrainIncompatible,
            DispatchFailure::OutsideWindow,
            DispatchFailure::DynamicEventFailure,
            DispatchFailure::AdverseWeather,
        ]
    }
}

impl std::fmt::Display for DispatchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DispatchFailure::NoRouteFound => "no_route_found",
            DispatchFailure::InsufficientFuel => "insufficient_fuel",
            DispatchFailure::TerrainIncompatible => "terrain_incompatible",
            DispatchFailure::OutsideWindow => "outside_window",
            DispatchFailure::DynamicEventFailure => "dynamic_event_failure",
            DispatchFailure::AdverseWeather => "adverse_weather",
        };
        f.write_str(label)
    }
}

/// Fatal configuration problems, reported once before the first cycle runs.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("num_cycles must be positive, got {0}")]
    NonPositiveCycles(i64),
    #[error("{field} must be in [0, 1], got {value}")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },
    #[error("selector_weights must sum to 1.0 (within tolerance), got {0}")]
    SelectorWeightsInvalid(f64),
    #[error("selector_trials must be positive, got {0}")]
    NonPositiveSelectorTrials(i64),
    #[error("world graph has no base nodes")]
    NoBaseNodes,
    #[error("world graph has no delivery nodes")]
    NoDeliveryNodes,
    #[error("{field} must be positive, got {value}")]
    NonPositiveValue { field: &'static str, value: f64 },
}
