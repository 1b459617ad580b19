//! Dispatch & Delivery Executor (C11): splits a planned route into legs at
//! refuel stations and validates each leg in turn -- cost/time, fuel,
//! terrain, window (terminal leg only), then the dynamic-event roll last, so
//! a deterministic rejection never touches the shared RNG. A failing leg
//! aborts the remaining ones, but mutations already applied by prior legs
//! stay applied: the vehicle has physically moved and does not snap back.

use crate::access;
use crate::config::SimConfig;
use crate::error::DispatchFailure;
use crate::events::EventManager;
use crate::graph::{NodeKind, RegionTag, WorldGraph};
use crate::rng::SimRng;
use crate::vehicle::Vehicle;
use crate::zone::AffectedZone;

/// What the caller needs to update statistics after a dispatch attempt.
#[derive(Debug, Clone, Default)]
pub struct ExecutionReceipt {
    pub legs_completed: usize,
    pub total_time_hours: f64,
    pub refuels: Vec<(RegionTag, f64)>,
    pub delivered: bool,
}

/// Splits `path` into legs at every RefuelStation node it passes through. A
/// refuel station ends one leg and starts the next; the final leg carries
/// whatever remains after the last station.
fn split_into_legs(graph: &WorldGraph, path: &[String]) -> Vec<Vec<String>> {
    let mut legs = Vec::new();
    let mut current = vec![path[0].clone()];
    for window in path.windows(2) {
        current.push(window[1].clone());
        let is_refuel = graph
            .node(&window[1])
            .map(|n| n.kind == NodeKind::RefuelStation)
            .unwrap_or(false);
        if is_refuel {
            legs.push(std::mem::take(&mut current));
            current = vec![window[1].clone()];
        }
    }
    if current.len() > 1 {
        legs.push(current);
    }
    legs
}

fn leg_cost_time(graph: &WorldGraph, leg: &[String]) -> (f64, f64) {
    let mut cost = 0.0;
    let mut time = 0.0;
    for window in leg.windows(2) {
        if let Some(idx) = graph.edge_between(&window[0], &window[1]) {
            let edge = graph.edge(idx);
            cost += edge.cost;
            time += edge.time;
        }
    }
    (cost, time)
}

/// Executes a path already chosen by the Pathfinder for `vehicle`, optionally
/// ending at a delivery `zone` (absent for a pure refuel trip). See module
/// docs for the validation order and atomicity contract.
pub fn execute(
    graph: &WorldGraph,
    events: &EventManager,
    config: &SimConfig,
    rng: &mut SimRng,
    vehicle: &mut Vehicle,
    zone: Option<&mut AffectedZone>,
    path: &[String],
    now_hours: f64,
) -> Result<ExecutionReceipt, DispatchFailure> {
    if path.len() < 2 {
        return Ok(ExecutionReceipt::default());
    }

    let legs = split_into_legs(graph, path);
    let mut receipt = ExecutionReceipt::default();

    for (leg_idx, leg) in legs.iter().enumerate() {
        let is_terminal = leg_idx + 1 == legs.len();
        let (raw_cost, raw_time) = leg_cost_time(graph, leg);
        let (cost_impact, time_impact) = events.impact_of_path(graph, leg);
        let leg_cost = raw_cost * cost_impact;
        let leg_time = raw_time * time_impact;

        if config.fuel_safety_margin * leg_cost > vehicle.fuel {
            return Err(DispatchFailure::InsufficientFuel);
        }

        for node_key in leg {
            if let Some(node) = graph.node(node_key) {
                if !access::admits(vehicle.kind, node) {
                    return Err(DispatchFailure::TerrainIncompatible);
                }
            }
        }

        if is_terminal {
            if let Some(z) = zone.as_deref() {
                if !z.window.accessible(now_hours) {
                    return Err(DispatchFailure::OutsideWindow);
                }
            }
        }

        let mut event_failure = false;
        for window in leg.windows(2) {
            if let Some(idx) = graph.edge_between(&window[0], &window[1]) {
                if events.event_on(idx).is_some() && rng.roll(config.event_failure_prob) {
                    event_failure = true;
                }
            }
        }
        if event_failure {
            return Err(DispatchFailure::DynamicEventFailure);
        }

        let end_key = leg.last().expect("leg is non-empty").clone();
        let ends_at_refuel = graph
            .node(&end_key)
            .map(|n| n.kind == NodeKind::RefuelStation)
            .unwrap_or(false);

        if ends_at_refuel {
            let fuel_on_arrival = vehicle.fuel - leg_cost;
            let fuel_gained = vehicle.range - fuel_on_arrival;
            vehicle.fuel = vehicle.range;
            let region = graph
                .node(&end_key)
                .map(|n| n.region.clone())
                .unwrap_or_default();
            receipt.refuels.push((region, fuel_gained));
        } else {
            vehicle.fuel -= leg_cost;
        }
        vehicle.location = end_key;
        receipt.total_time_hours += leg_time;
        receipt.legs_completed += 1;
    }

    if let Some(z) = zone {
        z.supplied = true;
        receipt.delivered = true;
    }

    Ok(receipt)
}
