//! Heuristic Oracle (C6): shortest-path-to-goal cost estimates over the
//! current overlay, used by Greedy-Best-First and A*.

use std::collections::HashMap;

use crate::graph::WorldGraph;

/// `node -> h(node)`, the Dijkstra shortest-path cost from `node` to `goal`
/// over the live overlay. Re-derived per goal; cached only for the duration
/// of a single dispatch call by the caller (the oracle itself holds no state
/// across dispatches since the overlay may change tick to tick).
pub struct HeuristicOracle {
    goal: String,
    costs: HashMap<String, f64>,
}

impl HeuristicOracle {
    pub fn for_goal(graph: &WorldGraph, goal: &str) -> Self {
        Self {
            goal: goal.to_string(),
            costs: graph.dijkstra_to(goal),
        }
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn h(&self, node_key: &str) -> f64 {
        if node_key == self.goal {
            return 0.0;
        }
        *self.costs.get(node_key).unwrap_or(&f64::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Density, Edge, Node, Terrain};

    fn line_graph() -> WorldGraph {
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
        g
    }

    #[test]
    fn goal_has_zero_heuristic() {
        let g = line_graph();
        let oracle = HeuristicOracle::for_goal(&g, "D");
        assert_eq!(oracle.h("D"), 0.0);
    }

    #[test]
    fn heuristic_sums_along_shortest_path() {
        let g = line_graph();
        let oracle = HeuristicOracle::for_goal(&g, "D");
        assert_eq!(oracle.h("H"), 5.0);
        assert_eq!(oracle.h("B"), 15.0);
    }

    #[test]
    fn unreachable_node_is_infinite() {
        let mut g = line_graph();
        g.add_node(Node::base("Isolated", (0.0, 0.0), "Lisboa"));
        let oracle = HeuristicOracle::for_goal(&g, "D");
        assert_eq!(oracle.h("Isolated"), f64::INFINITY);
    }
}
