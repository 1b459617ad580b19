//! Pathfinder (C7): four interchangeable search strategies over the live
//! overlay, dispatched once per run through the strategy chosen by the
//! Algorithm Selector (C8).

mod astar;
mod bfs;
mod dfs;
mod greedy;

pub use astar::AStarStrategy;
pub use bfs::BfsStrategy;
pub use dfs::DfsStrategy;
pub use greedy::GreedyStrategy;

use std::collections::HashSet;

use bevy_ecs::prelude::Resource;

use crate::graph::{NodeKind, Terrain, WorldGraph};

pub type AvoidSet = HashSet<Terrain>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Bfs,
    Dfs,
    Greedy,
    AStar,
}

impl StrategyKind {
    pub fn all() -> [StrategyKind; 4] {
        [
            StrategyKind::Bfs,
            StrategyKind::Dfs,
            StrategyKind::Greedy,
            StrategyKind::AStar,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::Bfs => "bfs",
            StrategyKind::Dfs => "dfs",
            StrategyKind::Greedy => "greedy",
            StrategyKind::AStar => "a_star",
        }
    }
}

/// Shared contract for the four search strategies: `(graph, start, goal,
/// avoid) -> optional<path>`. Implementations must treat `blocked = true`
/// edges as a hard cut and must be deterministic for identical inputs.
pub trait PathStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn find_path(
        &self,
        graph: &WorldGraph,
        start: &str,
        goal: &str,
        avoid: &AvoidSet,
    ) -> Option<Vec<String>>;
}

/// ECS resource wrapping the strategy selected for the remainder of the run.
#[derive(Resource)]
pub struct PathStrategyResource(pub Box<dyn PathStrategy>);

pub fn build_strategy(kind: StrategyKind) -> Box<dyn PathStrategy> {
    match kind {
        StrategyKind::Bfs => Box::new(BfsStrategy),
        StrategyKind::Dfs => Box::new(DfsStrategy),
        StrategyKind::Greedy => Box::new(GreedyStrategy),
        StrategyKind::AStar => Box::new(AStarStrategy),
    }
}

/// Whether `node_key` may appear as an intermediate hop: bases and refuel
/// stations are always passable; everything else is gated by `avoid`.
fn node_passable(graph: &WorldGraph, node_key: &str, avoid: &AvoidSet) -> bool {
    let Some(node) = graph.node(node_key) else {
        return false;
    };
    if matches!(node.kind, NodeKind::Base | NodeKind::RefuelStation) {
        return true;
    }
    match node.terrain {
        Some(terrain) => !avoid.contains(&terrain),
        None => true,
    }
}

fn reconstruct_path(parents: &std::collections::HashMap<String, String>, goal: &str) -> Vec<String> {
    let mut path = vec![goal.to_string()];
    let mut current = goal.to_string();
    while let Some(parent) = parents.get(&current) {
        path.push(parent.clone());
        current = parent.clone();
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Density, Edge, Node};

    pub(super) fn line_graph_with_blocked_shortcut() -> WorldGraph {
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
        g.add_edge("B", "H", Edge::new(10.0, 1.0)).unwrap();
        g.add_edge("H", "D", Edge::new(5.0, 1.0)).unwrap();
        // Direct shortcut, but blocked.
        let shortcut = g.add_edge("B", "D", Edge::new(1.0, 1.0)).unwrap();
        g.edge_mut(shortcut).blocked = true;
        g
    }

    #[test]
    fn all_strategies_skip_blocked_shortcut() {
        let g = line_graph_with_blocked_shortcut();
        for kind in StrategyKind::all() {
            let strategy = build_strategy(kind);
            let path = strategy
                .find_path(&g, "B", "D", &AvoidSet::new())
                .unwrap_or_else(|| panic!("{:?} found no path", kind));
            assert_eq!(path, vec!["B".to_string(), "H".to_string(), "D".to_string()]);
        }
    }
}
