use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::{node_passable, reconstruct_path, AvoidSet, PathStrategy, StrategyKind};
use crate::graph::WorldGraph;
use crate::heuristic::HeuristicOracle;

/// Orders by ascending `f = g + h` (min-heap via `BinaryHeap`), tie-broken by
/// ascending node key.
struct Scored {
    f: f64,
    node: String,
}

impl PartialEq for Scored {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.node == other.node
    }
}
impl Eq for Scored {}

impl PartialOrd for Scored {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scored {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.f.partial_cmp(&self.f) {
            Some(Ordering::Equal) | None => other.node.cmp(&self.node),
            Some(order) => order,
        }
    }
}

pub struct AStarStrategy;

impl PathStrategy for AStarStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::AStar
    }

    fn find_path(
        &self,
        graph: &WorldGraph,
        start: &str,
        goal: &str,
        avoid: &AvoidSet,
    ) -> Option<Vec<String>> {
        if start == goal {
            return Some(vec![start.to_string()]);
        }

        let oracle = HeuristicOracle::for_goal(graph, goal);
        let mut g_score: HashMap<String, f64> = HashMap::new();
        g_score.insert(start.to_string(), 0.0);
        let mut came_from: HashMap<String, String> = HashMap::new();
        let mut closed: HashSet<String> = HashSet::new();

        let mut heap = BinaryHeap::new();
        heap.push(Scored {
            f: oracle.h(start),
            node: start.to_string(),
        });

        while let Some(Scored { node: current, .. }) = heap.pop() {
            if current == goal {
                return Some(reconstruct_path(&came_from, goal));
            }
            if closed.contains(&current) {
                continue;
            }
            closed.insert(current.clone());
            let current_g = g_score[&current];

            for (neighbor, edge_idx) in graph.successors_sorted(&current) {
                let edge = graph.edge(edge_idx);
                if edge.blocked {
                    continue;
                }
                if neighbor != goal && !node_passable(graph, &neighbor, avoid) {
                    continue;
                }
                let tentative_g = current_g + edge.cost;
                let is_better = match g_score.get(&neighbor) {
                    Some(existing) => tentative_g < *existing,
                    None => true,
                };
                if is_better {
                    g_score.insert(neighbor.clone(), tentative_g);
                    came_from.insert(neighbor.clone(), current.clone());
                    // A strictly smaller g reopens a previously closed node.
                    closed.remove(&neighbor);
                    heap.push(Scored {
                        f: tentative_g + oracle.h(&neighbor),
                        node: neighbor,
                    });
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::tests::line_graph_with_blocked_shortcut;

    #[test]
    fn finds_unblocked_path() {
        let g = line_graph_with_blocked_shortcut();
        let path = AStarStrategy
            .find_path(&g, "B", "D", &AvoidSet::new())
            .unwrap();
        assert_eq!(path, vec!["B".to_string(), "H".to_string(), "D".to_string()]);
    }

    #[test]
    fn prefers_cheaper_route() {
        let mut g = line_graph_with_blocked_shortcut();
        // Add a more expensive alternative route that should not be chosen.
        g.add_node(crate::graph::Node::hub(
            "Detour",
            (0.0, 0.0),
            "Lisboa",
            crate::graph::Terrain::Urban,
            crate::graph::Density::Normal,
        ));
        g.add_edge("B", "Detour", crate::graph::Edge::new(50.0, 1.0))
            .unwrap();
        g.add_edge("Detour", "D", crate::graph::Edge::new(50.0, 1.0))
            .unwrap();
        let path = AStarStrategy
            .find_path(&g, "B", "D", &AvoidSet::new())
            .unwrap();
        assert_eq!(path, vec!["B".to_string(), "H".to_string(), "D".to_string()]);
    }
}
