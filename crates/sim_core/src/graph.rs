//! The World Graph (C1): typed nodes and weighted directed edges, with a
//! transient overlay recomputed every cycle on top of immutable base weights.
//!
//! The simulator never mutates `base_cost`/`base_time` and never adds or
//! removes nodes or edges after construction; only [`Edge::cost`],
//! [`Edge::time`] and [`Edge::blocked`] change, and only via [`WorldGraph::reset_overlay`]
//! plus the weather/event managers.

use std::collections::HashMap;

use bevy_ecs::prelude::Resource;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

pub type RegionTag = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Base,
    Hub,
    RefuelStation,
    Delivery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Urban,
    Rural,
    Mountain,
    Forest,
    Coastal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Density {
    High,
    Normal,
    Low,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub key: String,
    pub kind: NodeKind,
    pub coord: (f64, f64),
    pub region: RegionTag,
    /// `None` for Base and RefuelStation nodes.
    pub terrain: Option<Terrain>,
    pub density: Option<Density>,
}

impl Node {
    pub fn base(key: impl Into<String>, coord: (f64, f64), region: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: NodeKind::Base,
            coord,
            region: region.into(),
            terrain: None,
            density: None,
        }
    }

    pub fn refuel_station(
        key: impl Into<String>,
        coord: (f64, f64),
        region: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            kind: NodeKind::RefuelStation,
            coord,
            region: region.into(),
            terrain: None,
            density: None,
        }
    }

    pub fn hub(
        key: impl Into<String>,
        coord: (f64, f64),
        region: impl Into<String>,
        terrain: Terrain,
        density: Density,
    ) -> Self {
        Self {
            key: key.into(),
            kind: NodeKind::Hub,
            coord,
            region: region.into(),
            terrain: Some(terrain),
            density: Some(density),
        }
    }

    pub fn delivery(
        key: impl Into<String>,
        coord: (f64, f64),
        region: impl Into<String>,
        terrain: Terrain,
        density: Density,
    ) -> Self {
        Self {
            key: key.into(),
            kind: NodeKind::Delivery,
            coord,
            region: region.into(),
            terrain: Some(terrain),
            density: Some(density),
        }
    }
}

/// Directed edge with immutable base weights and a transient overlay.
#[derive(Debug, Clone)]
pub struct Edge {
    pub base_cost: f64,
    pub base_time: f64,
    pub cost: f64,
    pub time: f64,
    pub blocked: bool,
}

impl Edge {
    pub fn new(base_cost: f64, base_time: f64) -> Self {
        Self {
            base_cost,
            base_time,
            cost: base_cost,
            time: base_time,
            blocked: false,
        }
    }

    fn reset(&mut self) {
        self.cost = self.base_cost;
        self.time = self.base_time;
        self.blocked = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    UnknownNode,
}

/// Owns the typed node/edge graph. Stored as an ECS [`Resource`] so the cycle
/// driver and dispatch systems can reach it through the world.
#[derive(Resource)]
pub struct WorldGraph {
    graph: DiGraph<Node, Edge>,
    index: HashMap<String, NodeIndex>,
}

impl WorldGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        let key = node.key.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(key, idx);
        idx
    }

    pub fn add_edge(&mut self, from: &str, to: &str, edge: Edge) -> Result<EdgeIndex, GraphError> {
        let from_idx = self.node_index(from).ok_or(GraphError::UnknownNode)?;
        let to_idx = self.node_index(to).ok_or(GraphError::UnknownNode)?;
        Ok(self.graph.add_edge(from_idx, to_idx, edge))
    }

    pub fn node_index(&self, key: &str) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    pub fn node(&self, key: &str) -> Option<&Node> {
        self.node_index(key).map(|idx| &self.graph[idx])
    }

    pub fn node_at(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    pub fn edge(&self, idx: EdgeIndex) -> &Edge {
        &self.graph[idx]
    }

    pub fn edge_mut(&mut self, idx: EdgeIndex) -> &mut Edge {
        &mut self.graph[idx]
    }

    pub fn edge_endpoints(&self, idx: EdgeIndex) -> (NodeIndex, NodeIndex) {
        self.graph.edge_endpoints(idx).expect("edge endpoints")
    }

    pub fn edge_between(&self, from: &str, to: &str) -> Option<EdgeIndex> {
        let from_idx = self.node_index(from)?;
        let to_idx = self.node_index(to)?;
        self.graph.find_edge(from_idx, to_idx)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(|s| s.as_str())
    }

    /// Outgoing neighbors of `key`, sorted lexicographically by node key for
    /// deterministic search expansion order.
    pub fn successors_sorted(&self, key: &str) -> Vec<(String, EdgeIndex)> {
        let Some(idx) = self.node_index(key) else {
            return Vec::new();
        };
        let mut out: Vec<(String, EdgeIndex)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge_ref| {
                let to_key = self.graph[edge_ref.target()].key.clone();
                (to_key, edge_ref.id())
            })
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// All edge indices in deterministic `(from_key, to_key)` order.
    pub fn edges_sorted(&self) -> Vec<EdgeIndex> {
        let mut out: Vec<(String, String, EdgeIndex)> = self
            .graph
            .edge_indices()
            .map(|idx| {
                let (from, to) = self.graph.edge_endpoints(idx).expect("edge endpoints");
                (
                    self.graph[from].key.clone(),
                    self.graph[to].key.clone(),
                    idx,
                )
            })
            .collect();
        out.sort_by(|a, b| (a.0.as_str(), a.1.as_str()).cmp(&(b.0.as_str(), b.1.as_str())));
        out.into_iter().map(|(_, _, idx)| idx).collect()
    }

    /// Resets every edge's overlay to its base weights and clears blocking.
    /// Owned by the Weather Manager, which calls this at the start of every tick
    /// before reapplying multipliers.
    pub fn reset_overlay(&mut self) {
        for edge in self.graph.edge_weights_mut() {
            edge.reset();
        }
    }

    pub fn bases(&self) -> Vec<&str> {
        self.nodes_of_kind(NodeKind::Base)
    }

    pub fn delivery_nodes(&self) -> Vec<&str> {
        self.nodes_of_kind(NodeKind::Delivery)
    }

    pub fn refuel_stations(&self) -> Vec<&str> {
        self.nodes_of_kind(NodeKind::RefuelStation)
    }

    fn nodes_of_kind(&self, kind: NodeKind) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .graph
            .node_weights()
            .filter(|n| n.kind == kind)
            .map(|n| n.key.as_str())
            .collect();
        out.sort_unstable();
        out
    }

    /// Shortest-path cost from every reachable node to `goal_key` over the
    /// current overlay, via Dijkstra on the reversed graph. Nodes with no
    /// entry in the result are unreachable (treat as `+inf`).
    pub fn dijkstra_to(&self, goal_key: &str) -> HashMap<String, f64> {
        use petgraph::visit::Reversed;
        let Some(goal_idx) = self.node_index(goal_key) else {
            return HashMap::new();
        };
        let costs = petgraph::algo::dijkstra(Reversed(&self.graph), goal_idx, None, |e| {
            e.weight().cost
        });
        costs
            .into_iter()
            .map(|(idx, cost)| (self.graph[idx].key.clone(), cost))
            .collect()
    }

    pub fn regions(&self) -> Vec<RegionTag> {
        let mut regions: Vec<RegionTag> = self
            .graph
            .node_weights()
            .map(|n| n.region.clone())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        regions.sort();
        regions
    }
}

impl Default for WorldGraph {
    fn default() -> Self {
        Self::new()
    }
}

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two `(lat, lon)` coordinate pairs in degrees.
pub fn haversine_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lon1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lon2) = (b.0.to_radians(), b.1.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_graph() -> WorldGraph {
        let mut g = WorldGraph::new();
        g.add_node(Node::base("B", (0.0, 0.0), "Lisboa"));
        g.add_node(Node::hub(
            "H",
            (0.0, 0.0),
            "Lisboa",
            Terrain::Urban,
            Density::Normal,
        ));
        g.add_node(Node::delivery(
            "D",
            (0.0, 0.0),
            "Lisboa",
            Terrain::Urban,
            Density::Normal,
        ));
        g.add_edge("B", "H", Edge::new(10.0, 0.2)).unwrap();
        g.add_edge("H", "D", Edge::new(10.0, 0.2)).unwrap();
        g
    }

    #[test]
    fn successors_are_lexicographically_sorted() {
        let mut g = small_graph();
        g.add_edge("H", "B", Edge::new(1.0, 1.0)).unwrap();
        let succ = g.successors_sorted("H");
        let keys: Vec<&str> = succ.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["B", "D"]);
    }

    #[test]
    fn reset_overlay_restores_base_weights() {
        let mut g = small_graph();
        let edge_idx = g.edge_between("B", "H").unwrap();
        g.edge_mut(edge_idx).cost = 999.0;
        g.edge_mut(edge_idx).blocked = true;
        g.reset_overlay();
        let edge = g.edge(edge_idx);
        assert_eq!(edge.cost, edge.base_cost);
        assert!(!edge.blocked);
    }

    #[test]
    fn nodes_of_kind_are_sorted() {
        let g = small_graph();
        assert_eq!(g.bases(), vec!["B"]);
        assert_eq!(g.delivery_nodes(), vec!["D"]);
    }

    #[test]
    fn haversine_of_identical_points_is_zero() {
        assert_eq!(haversine_km((38.72, -9.14), (38.72, -9.14)), 0.0);
    }

    #[test]
    fn haversine_matches_known_scale() {
        // Lisbon to Porto is roughly 275 km as the crow flies.
        let km = haversine_km((38.7223, -9.1393), (41.1579, -8.0291));
        assert!((250.0..300.0).contains(&km));
    }
}
