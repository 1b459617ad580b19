//! Refuel Planner (C10): finds the cheapest refuel station a low-fuel vehicle
//! can safely reach and plans a concrete route to it.

use crate::access;
use crate::graph::WorldGraph;
use crate::heuristic::HeuristicOracle;
use crate::pathfinding::{AStarStrategy, PathStrategy};
use crate::vehicle::Vehicle;

#[derive(Debug, Clone)]
pub struct RefuelPlan {
    pub station: String,
    pub path: Vec<String>,
}

/// Ranks every refuel station by shortest-path cost from `vehicle.location`
/// (the Heuristic Oracle's Dijkstra cost doubles as a cheap ranking filter
/// here, since it is exactly the quantity that matters: cost to reach, not
/// distance), keeps only those the vehicle's current fuel can reach with
/// `safety_fraction` headroom, and plans an actual route (via A*, so the
/// route itself respects blocked edges and access policy) to the cheapest
/// reachable one. Returns `None` if none qualify.
pub fn plan_refuel(
    graph: &WorldGraph,
    vehicle: &Vehicle,
    safety_fraction: f64,
) -> Option<RefuelPlan> {
    let mut ranked: Vec<(String, f64)> = graph
        .refuel_stations()
        .into_iter()
        .map(|key| {
            let oracle = HeuristicOracle::for_goal(graph, key);
            (key.to_string(), oracle.h(&vehicle.location))
        })
        .filter(|(_, cost)| cost.is_finite())
        .filter(|(_, cost)| *cost <= safety_fraction * vehicle.fuel)
        .collect();

    ranked.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let avoid = access::avoid_set(vehicle.kind);
    for (station, _) in ranked {
        if let Some(path) = AStarStrategy.find_path(graph, &vehicle.location, &station, &avoid) {
            return Some(RefuelPlan { station, path });
        }
    }
    None
}
