//! Access Policy (C5): a fixed vehicle-kind x terrain-kind admissibility relation.

use crate::graph::{Node, NodeKind, Terrain};
use crate::pathfinding::AvoidSet;
use crate::vehicle::VehicleKind;

fn forbidden_terrains(kind: VehicleKind) -> &'static [Terrain] {
    match kind {
        VehicleKind::Truck => &[Terrain::Mountain, Terrain::Forest, Terrain::Coastal],
        VehicleKind::Van => &[Terrain::Mountain, Terrain::Coastal],
        VehicleKind::Boat => &[
            Terrain::Urban,
            Terrain::Mountain,
            Terrain::Forest,
            Terrain::Rural,
        ],
        VehicleKind::Drone => &[],
        VehicleKind::Helicopter => &[Terrain::Coastal],
    }
}

/// `node is Base or RefuelStation, or terrain(node) not in forbidden(vehicle)`.
pub fn admits(vehicle_kind: VehicleKind, node: &Node) -> bool {
    if matches!(node.kind, NodeKind::Base | NodeKind::RefuelStation) {
        return true;
    }
    match node.terrain {
        Some(terrain) => !forbidden_terrains(vehicle_kind).contains(&terrain),
        None => true,
    }
}

/// `forbidden_terrains(vehicle_kind)` as the set the Pathfinder (C7) treats as
/// impassable for intermediate hops.
pub fn avoid_set(vehicle_kind: VehicleKind) -> AvoidSet {
    forbidden_terrains(vehicle_kind).iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Density;

    #[test]
    fn drone_admits_every_terrain() {
        for terrain in [
            Terrain::Urban,
            Terrain::Rural,
            Terrain::Mountain,
            Terrain::Forest,
            Terrain::Coastal,
        ] {
            let node = Node::delivery("D", (0.0, 0.0), "Lisboa", terrain, Density::Normal);
            assert!(admits(VehicleKind::Drone, &node));
        }
    }

    #[test]
    fn truck_forbids_mountain() {
        let node = Node::delivery("D", (0.0, 0.0), "Lisboa", Terrain::Mountain, Density::Normal);
        assert!(!admits(VehicleKind::Truck, &node));
    }

    #[test]
    fn base_and_refuel_station_always_admitted() {
        let base = Node::base("B", (0.0, 0.0), "Lisboa");
        let refuel = Node::refuel_station("P", (0.0, 0.0), "Lisboa");
        for kind in [
            VehicleKind::Truck,
            VehicleKind::Van,
            VehicleKind::Boat,
            VehicleKind::Drone,
            VehicleKind::Helicopter,
        ] {
            assert!(admits(kind, &base));
            assert!(admits(kind, &refuel));
        }
    }
}
