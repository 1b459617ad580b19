//! Demo world construction. Building a graph from real operational data is
//! explicitly out of scope for the simulator itself (see the external
//! interfaces contract); this module exists purely as a fixture shared by the
//! CLI's `run` command and the crate's integration tests.

use std::collections::HashMap;

use crate::config::SimConfig;
use crate::graph::{Density, Edge, Node, Terrain, WorldGraph};
use crate::vehicle::{Vehicle, VehicleKind};
use crate::zone::{AffectedZone, TimeWindow};

fn zone_with_needs(
    node_key: &str,
    needs: &[(&str, u32)],
    population: u32,
    priority: u8,
    window: TimeWindow,
) -> AffectedZone {
    let needs = needs
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect::<HashMap<_, _>>();
    AffectedZone::new(node_key, needs, population, priority, window)
}

/// Minimal Base -> Hub -> Delivery fixture: one vehicle, one zone, one path.
pub fn scenario_a_world() -> (WorldGraph, Vehicle, AffectedZone) {
    let mut graph = WorldGraph::new();
    graph.add_node(Node::base("base", (38.7223, -9.1393), "Lisboa"));
    graph.add_node(Node::hub(
        "hub",
        (38.73, -9.12),
        "Lisboa",
        Terrain::Urban,
        Density::Normal,
    ));
    graph.add_node(Node::delivery(
        "delivery",
        (38.75, -9.10),
        "Lisboa",
        Terrain::Urban,
        Density::Normal,
    ));
    graph.add_edge("base", "hub", Edge::new(8.0, 0.3)).unwrap();
    graph
        .add_edge("hub", "delivery", Edge::new(6.0, 0.25))
        .unwrap();

    let vehicle = Vehicle::new(1, VehicleKind::Truck, "base", 500.0, 500.0, 120.0);
    let zone = zone_with_needs(
        "delivery",
        &[("water", 40), ("medical", 10)],
        250,
        4,
        TimeWindow::new(0.0, 12.0, 4),
    );
    (graph, vehicle, zone)
}

/// A two-region demo world (Lisboa / Porto) with a small mixed fleet and
/// several delivery zones of varying terrain, used by the CLI's `run`
/// command.
pub fn demo_world() -> (WorldGraph, Vec<Vehicle>, Vec<AffectedZone>) {
    let mut graph = WorldGraph::new();

    graph.add_node(Node::base("lisboa_base", (38.7223, -9.1393), "Lisboa"));
    graph.add_node(Node::hub(
        "lisboa_hub",
        (38.74, -9.15),
        "Lisboa",
        Terrain::Urban,
        Density::High,
    ));
    graph.add_node(Node::refuel_station(
        "lisboa_fuel",
        (38.71, -9.20),
        "Lisboa",
    ));
    graph.add_node(Node::delivery(
        "alfama",
        (38.71, -9.13),
        "Lisboa",
        Terrain::Urban,
        Density::High,
    ));
    graph.add_node(Node::delivery(
        "sintra",
        (38.80, -9.38),
        "Lisboa",
        Terrain::Forest,
        Density::Low,
    ));
    graph.add_node(Node::delivery(
        "cascais",
        (38.70, -9.42),
        "Lisboa",
        Terrain::Coastal,
        Density::Normal,
    ));

    graph.add_node(Node::base("porto_base", (41.1579, -8.6291), "Porto"));
    graph.add_node(Node::hub(
        "porto_hub",
        (41.16, -8.60),
        "Porto",
        Terrain::Urban,
        Density::Normal,
    ));
    graph.add_node(Node::refuel_station("porto_fuel", (41.17, -8.58), "Porto"));
    graph.add_node(Node::delivery(
        "gaia",
        (41.13, -8.61),
        "Porto",
        Terrain::Urban,
        Density::Normal,
    ));
    graph.add_node(Node::delivery(
        "serra",
        (41.20, -7.85),
        "Porto",
        Terrain::Mountain,
        Density::Low,
    ));

    let edges: &[(&str, &str, f64, f64)] = &[
        ("lisboa_base", "lisboa_hub", 12.0, 0.4),
        ("lisboa_hub", "alfama", 6.0, 0.2),
        ("lisboa_hub", "lisboa_fuel", 9.0, 0.3),
        ("lisboa_fuel", "sintra", 28.0, 0.8),
        ("lisboa_hub", "cascais", 20.0, 0.6),
        ("lisboa_base", "porto_base", 95.0, 2.5),
        ("porto_base", "porto_hub", 10.0, 0.3),
        ("porto_hub", "gaia", 5.0, 0.2),
        ("porto_hub", "porto_fuel", 8.0, 0.25),
        ("porto_fuel", "serra", 55.0, 1.6),
    ];
    for (from, to, cost, time) in edges {
        graph.add_edge(from, to, Edge::new(*cost, *time)).unwrap();
    }

    let vehicles = vec![
        Vehicle::new(1, VehicleKind::Truck, "lisboa_base", 800.0, 600.0, 150.0),
        Vehicle::new(2, VehicleKind::Van, "lisboa_base", 300.0, 250.0, 90.0),
        Vehicle::new(3, VehicleKind::Drone, "lisboa_hub", 15.0, 5.0, 35.0),
        Vehicle::new(4, VehicleKind::Truck, "porto_base", 800.0, 600.0, 150.0),
    ];

    let zones = vec![
        zone_with_needs(
            "alfama",
            &[("water", 100), ("food", 60)],
            900,
            3,
            TimeWindow::new(0.0, 10.0, 3),
        ),
        zone_with_needs(
            "sintra",
            &[("medical", 20), ("water", 50)],
            300,
            5,
            TimeWindow::new(0.0, 6.0, 5),
        ),
        zone_with_needs(
            "cascais",
            &[("food", 80)],
            450,
            2,
            TimeWindow::new(0.0, 18.0, 2),
        ),
        zone_with_needs(
            "gaia",
            &[("water", 70), ("medical", 15)],
            600,
            4,
            TimeWindow::new(0.0, 9.0, 4),
        ),
        zone_with_needs(
            "serra",
            &[("food", 40), ("medical", 10)],
            150,
            5,
            TimeWindow::new(0.0, 14.0, 5),
        ),
    ];

    (graph, vehicles, zones)
}

/// A reasonable default run configuration for the demo world: a handful of
/// cycles, everything else left at [`SimConfig::default`].
pub fn default_config() -> SimConfig {
    SimConfig::default().with_num_cycles(10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_a_has_one_vehicle_one_zone_and_a_connected_path() {
        let (graph, vehicle, zone) = scenario_a_world();
        assert_eq!(vehicle.location, "base");
        assert_eq!(zone.node_key, "delivery");
        assert!(graph.edge_between("base", "hub").is_some());
        assert!(graph.edge_between("hub", "delivery").is_some());
    }

    #[test]
    fn demo_world_has_bases_in_both_regions_and_a_mixed_fleet() {
        let (graph, vehicles, zones) = demo_world();
        assert_eq!(graph.bases().len(), 2);
        assert_eq!(vehicles.len(), 4);
        assert_eq!(zones.len(), 5);
        assert!(vehicles.iter().any(|v| v.kind == VehicleKind::Drone));
    }
}
