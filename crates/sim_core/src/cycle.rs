//! Cycle Driver (C12): orchestrates one tick -- weather step, event step,
//! then per-vehicle dispatch in ascending vehicle-id order -- and folds every
//! outcome into the statistics ledger.
//!
//! Takes every manager as an explicit parameter rather than reaching back
//! into a shared simulator handle: the harness that owns the `World` (see
//! [`crate::simulation`]) is responsible for wiring these together each
//! tick, so this function stays a plain, independently testable unit.

use crate::access;
use crate::config::SimConfig;
use crate::dispatch;
use crate::error::DispatchFailure;
use crate::events::EventManager;
use crate::graph::WorldGraph;
use crate::pathfinding::PathStrategy;
use crate::refuel;
use crate::rng::SimRng;
use crate::scoring;
use crate::stats::StatsLedger;
use crate::vehicle::{Vehicle, VehicleKind};
use crate::weather::{WeatherManager, WeatherState};
use crate::zone::AffectedZone;

/// Weather states in which air vehicles are grounded before a route is even
/// attempted -- the optional `AdverseWeather` precomputed rejection. Checked
/// deterministically, pre-routing, against the vehicle's *current* region
/// only, so it never draws from the shared RNG and never perturbs the
/// documented draw order.
fn grounded_by_weather(kind: VehicleKind, state: WeatherState) -> bool {
    matches!(kind, VehicleKind::Drone | VehicleKind::Helicopter)
        && matches!(
            state,
            WeatherState::Storm | WeatherState::HeavyRain | WeatherState::Snow
        )
}

fn region_of(graph: &WorldGraph, node_key: &str) -> String {
    graph
        .node(node_key)
        .map(|n| n.region.clone())
        .unwrap_or_default()
}

/// Runs a single tick against every passed-in manager and mutates `stats`
/// with the outcome of each vehicle's attempt. `tick` is the zero-based tick
/// index; weather only transitions when `tick % config.weather_tick_period == 0`.
#[allow(clippy::too_many_arguments)]
pub fn run_cycle(
    tick: u32,
    now_hours: f64,
    graph: &mut WorldGraph,
    weather: &mut WeatherManager,
    events: &mut EventManager,
    zones: &mut [AffectedZone],
    vehicles: &mut [Vehicle],
    strategy: &dyn PathStrategy,
    config: &SimConfig,
    rng: &mut SimRng,
    stats: &mut StatsLedger,
) {
    if tick % config.weather_tick_period.max(1) == 0 {
        weather.step(rng);
    }
    weather.apply_overlay(graph, rng);
    events.step(graph, config.spawn_prob_event, rng);

    let mut order: Vec<usize> = (0..vehicles.len()).collect();
    order.sort_by_key(|&i| vehicles[i].id);

    for idx in order {
        let vehicle = &mut vehicles[idx];

        if let Some(terrain) = graph.node(&vehicle.location).and_then(|n| n.terrain) {
            stats.record_terrain_access(terrain);
        }

        if vehicle.is_low_fuel(config.refuel_trigger_fraction) {
            dispatch_refuel(graph, events, config, rng, stats, vehicle);
            continue;
        }

        let region = region_of(graph, &vehicle.location);
        if grounded_by_weather(vehicle.kind, weather.state_of(&region)) {
            stats.record_failure(vehicle.kind, DispatchFailure::AdverseWeather);
            continue;
        }

        dispatch_to_best_zone(
            graph, events, config, rng, stats, strategy, zones, vehicle, now_hours,
        );
    }
}

fn dispatch_refuel(
    graph: &WorldGraph,
    events: &EventManager,
    config: &SimConfig,
    rng: &mut SimRng,
    stats: &mut StatsLedger,
    vehicle: &mut Vehicle,
) {
    match refuel::plan_refuel(graph, vehicle, config.refuel_safety_fraction) {
        Some(plan) => {
            match dispatch::execute(
                graph, events, config, rng, vehicle, None, &plan.path, 0.0,
            ) {
                Ok(receipt) => {
                    for (region, fuel_gained) in receipt.refuels {
                        stats.record_refuel(region, fuel_gained);
                    }
                }
                Err(cause) => stats.record_failure(vehicle.kind, cause),
            }
        }
        None => stats.record_failure(vehicle.kind, DispatchFailure::NoRouteFound),
    }
}

#[allow(clippy::too_many_arguments)]
fn dispatch_to_best_zone(
    graph: &WorldGraph,
    events: &EventManager,
    config: &SimConfig,
    rng: &mut SimRng,
    stats: &mut StatsLedger,
    strategy: &dyn PathStrategy,
    zones: &mut [AffectedZone],
    vehicle: &mut Vehicle,
    now_hours: f64,
) {
    let candidate_keys: Vec<String> = scoring::rank_candidates(
        graph,
        vehicle,
        zones,
        now_hours,
        config.max_distance_km,
    )
    .into_iter()
    .map(|c| c.zone.node_key.clone())
    .collect();

    let avoid = access::avoid_set(vehicle.kind);

    for zone_key in candidate_keys {
        let Some(path) = strategy.find_path(graph, &vehicle.location, &zone_key, &avoid) else {
            stats.record_failure(vehicle.kind, DispatchFailure::NoRouteFound);
            continue;
        };

        let Some(zone_idx) = zones.iter().position(|z| z.node_key == zone_key) else {
            continue;
        };
        let window_remaining = zones[zone_idx].window.remaining(now_hours);
        let critical = zones[zone_idx].window.is_critical(now_hours);

        match dispatch::execute(
            graph,
            events,
            config,
            rng,
            vehicle,
            Some(&mut zones[zone_idx]),
            &path,
            now_hours,
        ) {
            Ok(receipt) => {
                for (region, fuel_gained) in receipt.refuels {
                    stats.record_refuel(region, fuel_gained);
                }
                if receipt.delivered {
                    stats.record_delivery(
                        vehicle.kind,
                        receipt.total_time_hours,
                        window_remaining,
                        critical,
                    );
                }
                return;
            }
            Err(cause) => stats.record_failure(vehicle.kind, cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Density, Edge, Node, Terrain};
    use crate::pathfinding::{build_strategy, StrategyKind};
    use crate::vehicle::VehicleKind;
    use crate::zone::TimeWindow;
    use std::collections::HashMap;

    fn small_world() -> (WorldGraph, Vec<Vehicle>, Vec<AffectedZone>) {
        let mut g = WorldGraph::new();
        g.add_node(Node::base("B", (38.72, -9.14), "Lisboa"));
        g.add_node(Node::hub(
            "H",
            (38.73, -9.12),
            "Lisboa",
            Terrain::Urban,
            Density::Normal,
        ));
        g.add_node(Node::delivery(
            "D",
            (38.75, -9.10),
            "Lisboa",
            Terrain::Urban,
            Density::Normal,
        ));
        g.add_edge("B", "H", Edge::new(10.0, 0.2)).unwrap();
        g.add_edge("H", "D", Edge::new(10.0, 0.2)).unwrap();

        let vehicles = vec![Vehicle::new(1, VehicleKind::Truck, "B", 500.0, 500.0, 100.0)];

        let mut needs = HashMap::new();
        needs.insert("food".to_string(), 10);
        let zones = vec![AffectedZone::new(
            "D",
            needs,
            100,
            3,
            TimeWindow::new(0.0, 8.0, 3),
        )];

        (g, vehicles, zones)
    }

    /// Weather transitions only on ticks where `tick % weather_tick_period == 0`
    /// and event spawning is itself a roll; a large period plus zero spawn
    /// probability keeps these tests deterministic (pure Normal weather, no
    /// obstacles/events) without needing to hand-compute an RNG sequence.
    fn deterministic_config() -> SimConfig {
        SimConfig::default()
            .with_weather_tick_period(1_000)
            .with_spawn_prob_event(0.0)
    }

    #[test]
    fn one_tick_delivers_the_only_zone_to_the_only_vehicle() {
        let (mut g, mut vehicles, mut zones) = small_world();
        let mut weather = WeatherManager::new(g.regions());
        let mut events = EventManager::new();
        let mut rng = SimRng::new(1);
        let mut stats = StatsLedger::new();
        let config = deterministic_config();
        let strategy = build_strategy(StrategyKind::AStar);

        run_cycle(
            1, 1.0, &mut g, &mut weather, &mut events, &mut zones, &mut vehicles,
            strategy.as_ref(), &config, &mut rng, &mut stats,
        );

        assert_eq!(stats.deliveries, 1);
        assert!(zones[0].supplied);
        assert_eq!(vehicles[0].location, "D");
    }

    #[test]
    fn low_fuel_vehicle_refuels_instead_of_dispatching() {
        let (mut g, mut vehicles, mut zones) = small_world();
        g.add_node(Node::refuel_station("P", (38.72, -9.13), "Lisboa"));
        g.add_edge("B", "P", Edge::new(2.0, 0.05)).unwrap();
        vehicles[0].fuel = vehicles[0].range * 0.5;
        let mut weather = WeatherManager::new(g.regions());
        let mut events = EventManager::new();
        let mut rng = SimRng::new(1);
        let mut stats = StatsLedger::new();
        let config = deterministic_config();
        let strategy = build_strategy(StrategyKind::AStar);

        run_cycle(
            1, 1.0, &mut g, &mut weather, &mut events, &mut zones, &mut vehicles,
            strategy.as_ref(), &config, &mut rng, &mut stats,
        );

        assert_eq!(stats.deliveries, 0);
        assert_eq!(vehicles[0].location, "P");
        assert_eq!(vehicles[0].fuel, vehicles[0].range);
    }
}
