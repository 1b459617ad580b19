//! The statistics ledger: every counter the simulator accumulates over a run,
//! mutated only by the Cycle Driver as it processes each vehicle's outcome.

use std::collections::HashMap;

use bevy_ecs::prelude::Resource;

use crate::error::DispatchFailure;
use crate::graph::{RegionTag, Terrain, WorldGraph};
use crate::vehicle::VehicleKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct VehicleKindOutcomes {
    pub successes: u32,
    pub failures: u32,
}

/// Accumulated counts and running means for a completed (or in-progress) run.
#[derive(Debug, Clone, Default, Resource)]
pub struct StatsLedger {
    pub deliveries: u32,
    pub failures_by_cause: HashMap<DispatchFailure, u32>,
    /// One-time snapshot of how many nodes carry each terrain, taken at
    /// construction -- not a per-tick count.
    pub terrain_distribution: HashMap<Terrain, u32>,
    /// How many times a vehicle occupied a node of each terrain during a tick.
    pub terrain_access: HashMap<Terrain, u32>,
    pub per_vehicle_kind: HashMap<VehicleKind, VehicleKindOutcomes>,
    pub refuels_by_region: HashMap<RegionTag, u32>,
    pub fuel_refueled: f64,
    pub critical_window_events: u32,
    window_remaining_sum: f64,
    window_remaining_samples: u32,
    delivery_time_sum: f64,
    delivery_time_samples: u32,
}

impl StatsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts nodes by terrain once, at simulator construction.
    pub fn seed_terrain_distribution(&mut self, graph: &WorldGraph) {
        for key in graph.keys().map(|k| k.to_string()).collect::<Vec<_>>() {
            if let Some(terrain) = graph.node(&key).and_then(|n| n.terrain) {
                *self.terrain_distribution.entry(terrain).or_insert(0) += 1;
            }
        }
    }

    pub fn record_terrain_access(&mut self, terrain: Terrain) {
        *self.terrain_access.entry(terrain).or_insert(0) += 1;
    }

    pub fn record_delivery(
        &mut self,
        kind: VehicleKind,
        delivery_time_hours: f64,
        window_remaining_hours: f64,
        critical: bool,
    ) {
        self.deliveries += 1;
        self.per_vehicle_kind.entry(kind).or_default().successes += 1;
        self.delivery_time_sum += delivery_time_hours;
        self.delivery_time_samples += 1;
        self.window_remaining_sum += window_remaining_hours;
        self.window_remaining_samples += 1;
        if critical {
            self.critical_window_events += 1;
        }
    }

    pub fn record_failure(&mut self, kind: VehicleKind, cause: DispatchFailure) {
        *self.failures_by_cause.entry(cause).or_insert(0) += 1;
        self.per_vehicle_kind.entry(kind).or_default().failures += 1;
    }

    pub fn record_refuel(&mut self, region: RegionTag, fuel_gained: f64) {
        *self.refuels_by_region.entry(region).or_insert(0) += 1;
        self.fuel_refueled += fuel_gained;
    }

    pub fn total_failures(&self) -> u32 {
        self.failures_by_cause.values().sum()
    }

    pub fn mean_delivery_time_hours(&self) -> f64 {
        if self.delivery_time_samples == 0 {
            0.0
        } else {
            self.delivery_time_sum / self.delivery_time_samples as f64
        }
    }

    pub fn average_remaining_window_hours(&self) -> f64 {
        if self.window_remaining_samples == 0 {
            0.0
        } else {
            self.window_remaining_sum / self.window_remaining_samples as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::VehicleKind;

    #[test]
    fn records_deliveries_and_means() {
        let mut stats = StatsLedger::new();
        stats.record_delivery(VehicleKind::Truck, 2.0, 3.0, false);
        stats.record_delivery(VehicleKind::Truck, 4.0, 1.0, true);
        assert_eq!(stats.deliveries, 2);
        assert_eq!(stats.critical_window_events, 1);
        assert_eq!(stats.mean_delivery_time_hours(), 3.0);
        assert_eq!(stats.average_remaining_window_hours(), 2.0);
    }

    #[test]
    fn records_failures_by_cause_and_vehicle_kind() {
        let mut stats = StatsLedger::new();
        stats.record_failure(VehicleKind::Drone, DispatchFailure::NoRouteFound);
        stats.record_failure(VehicleKind::Drone, DispatchFailure::NoRouteFound);
        assert_eq!(
            stats.failures_by_cause[&DispatchFailure::NoRouteFound],
            2
        );
        assert_eq!(stats.per_vehicle_kind[&VehicleKind::Drone].failures, 2);
        assert_eq!(stats.total_failures(), 2);
    }

    #[test]
    fn records_refuels_by_region_and_fuel_total() {
        let mut stats = StatsLedger::new();
        stats.record_refuel("Lisboa".to_string(), 40.0);
        stats.record_refuel("Lisboa".to_string(), 10.0);
        assert_eq!(stats.refuels_by_region["Lisboa"], 2);
        assert_eq!(stats.fuel_refueled, 50.0);
    }
}
