//! Target Scorer (C9): ranks candidate delivery zones for a dispatching
//! vehicle by emergency score, proximity, and regional affinity.

use crate::graph::{haversine_km, WorldGraph};
use crate::vehicle::Vehicle;
use crate::zone::AffectedZone;

#[derive(Debug, Clone, Copy)]
pub struct ScoredZone<'a> {
    pub zone: &'a AffectedZone,
    pub total: f64,
}

fn emergency_score(zone: &AffectedZone, now_hours: f64) -> f64 {
    2.0 * zone.priority as f64
        + zone.population as f64 / 1000.0
        + zone.total_needs() / 300.0
        + 2.0 * zone.window.criticality(now_hours)
}

fn distance_score(distance_km: f64, max_distance_km: f64) -> f64 {
    1.0 - (distance_km / max_distance_km).min(1.0)
}

fn total_score(
    graph: &WorldGraph,
    from_key: &str,
    zone: &AffectedZone,
    now_hours: f64,
    max_distance_km: f64,
) -> Option<f64> {
    let from_node = graph.node(from_key)?;
    let zone_node = graph.node(&zone.node_key)?;
    let distance_km = haversine_km(from_node.coord, zone_node.coord);
    let region_bonus = if from_node.region == zone_node.region {
        0.1
    } else {
        0.0
    };
    let total = 0.5 * emergency_score(zone, now_hours)
        + 0.4 * distance_score(distance_km, max_distance_km)
        + 0.1 * region_bonus;
    Some(total)
}

/// Candidate zones for `vehicle`, sorted by descending total score then
/// ascending zone id. Only zones with an accessible window, not yet
/// supplied, and within the vehicle's payload capacity are included.
pub fn rank_candidates<'a>(
    graph: &WorldGraph,
    vehicle: &Vehicle,
    zones: &'a [AffectedZone],
    now_hours: f64,
    max_distance_km: f64,
) -> Vec<ScoredZone<'a>> {
    let mut scored: Vec<ScoredZone<'a>> = zones
        .iter()
        .filter(|z| z.window.accessible(now_hours))
        .filter(|z| !z.supplied)
        .filter(|z| vehicle.can_carry(z.total_needs()))
        .filter_map(|z| {
            total_score(graph, &vehicle.location, z, now_hours, max_distance_km)
                .map(|total| ScoredZone { zone: z, total })
        })
        .collect();

    scored.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.zone.node_key.cmp(&b.zone.node_key))
    });
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Density, Edge, Node, Terrain};
    use crate::vehicle::VehicleKind;
    use crate::zone::TimeWindow;
    use std::collections::HashMap;

    fn graph_with_two_zones() -> WorldGraph {
        let mut g = WorldGraph::new();
        g.add_node(Node::base("B", (38.72, -9.14), "Lisboa"));
        g.add_node(Node::delivery(
            "Near",
            (38.73, -9.13),
            "Lisboa",
            Terrain::Urban,
            Density::Normal,
        ));
        g.add_node(Node::delivery(
            "Far",
            (41.15, -8.03),
            "Porto",
            Terrain::Urban,
            Density::Normal,
        ));
        g.add_edge("B", "Near", Edge::new(1.0, 1.0)).unwrap();
        g.add_edge("B", "Far", Edge::new(1.0, 1.0)).unwrap();
        g
    }

    fn zone(node_key: &str, priority: u8) -> AffectedZone {
        let mut needs = HashMap::new();
        needs.insert("food".to_string(), 50);
        AffectedZone::new(
            node_key,
            needs,
            800,
            priority,
            TimeWindow::new(0.0, 8.0, priority),
        )
    }

    #[test]
    fn nearer_zone_outranks_farther_for_equal_priority() {
        let g = graph_with_two_zones();
        let vehicle = Vehicle::new(1, VehicleKind::Truck, "B", 500.0, 500.0, 100.0);
        let zones = vec![zone("Near", 3), zone("Far", 3)];
        let ranked = rank_candidates(&g, &vehicle, &zones, 0.0, 300.0);
        assert_eq!(ranked[0].zone.node_key, "Near");
    }

    #[test]
    fn supplied_zones_are_excluded() {
        let g = graph_with_two_zones();
        let vehicle = Vehicle::new(1, VehicleKind::Truck, "B", 500.0, 500.0, 100.0);
        let mut z = zone("Near", 3);
        z.supplied = true;
        let ranked = rank_candidates(&g, &vehicle, &[z], 0.0, 300.0);
        assert!(ranked.is_empty());
    }

    #[test]
    fn insufficient_capacity_excludes_zone() {
        let g = graph_with_two_zones();
        let vehicle = Vehicle::new(1, VehicleKind::Drone, "B", 10.0, 10.0, 100.0);
        let ranked = rank_candidates(&g, &vehicle, &[zone("Near", 3)], 0.0, 300.0);
        assert!(ranked.is_empty());
    }
}
