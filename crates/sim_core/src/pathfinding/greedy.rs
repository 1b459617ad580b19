use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use super::{node_passable, AvoidSet, PathStrategy, StrategyKind};
use crate::graph::WorldGraph;
use crate::heuristic::HeuristicOracle;

/// Orders by ascending `score` (min-heap via `BinaryHeap`), tie-broken by
/// ascending node key.
struct Scored {
    score: f64,
    node: String,
    path: Vec<String>,
}

impl PartialEq for Scored {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.node == other.node
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
        match other.score.partial_cmp(&self.score) {
            Some(Ordering::Equal) | None => other.node.cmp(&self.node),
            Some(order) => order,
        }
    }
}

pub struct GreedyStrategy;

impl PathStrategy for GreedyStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Greedy
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
        let mut heap = BinaryHeap::new();
        heap.push(Scored {
            score: oracle.h(start),
            node: start.to_string(),
            path: vec![start.to_string()],
        });

        let mut visited: HashSet<String> = HashSet::new();

        while let Some(Scored { node: current, path, .. }) = heap.pop() {
            if current == goal {
                return Some(path);
            }
            if visited.contains(&current) {
                continue;
            }
            visited.insert(current.clone());

            for (neighbor, edge_idx) in graph.successors_sorted(&current) {
                let edge = graph.edge(edge_idx);
                if edge.blocked || visited.contains(&neighbor) {
                    continue;
                }
                if neighbor != goal && !node_passable(graph, &neighbor, avoid) {
                    continue;
                }
                let mut next_path = path.clone();
                next_path.push(neighbor.clone());
                heap.push(Scored {
                    score: oracle.h(&neighbor),
                    node: neighbor,
                    path: next_path,
                });
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
        let path = GreedyStrategy
            .find_path(&g, "B", "D", &AvoidSet::new())
            .unwrap();
        assert_eq!(path, vec!["B".to_string(), "H".to_string(), "D".to_string()]);
    }
}
