use std::collections::HashSet;

use super::{node_passable, AvoidSet, PathStrategy, StrategyKind};
use crate::graph::WorldGraph;

pub struct DfsStrategy;

impl PathStrategy for DfsStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Dfs
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

        let mut stack: Vec<Vec<String>> = vec![vec![start.to_string()]];

        let mut explored: HashSet<(String, String)> = HashSet::new();
        explored.insert((start.to_string(), String::new()));

        while let Some(path) = stack.pop() {
            let current = path.last().expect("path is never empty").clone();
            let mut neighbors = graph.successors_sorted(&current);
            neighbors.reverse();
            for (neighbor, edge_idx) in neighbors {
                let edge = graph.edge(edge_idx);
                if edge.blocked {
                    continue;
                }
                if neighbor != goal && !node_passable(graph, &neighbor, avoid) {
                    continue;
                }
                let key = (neighbor.clone(), current.clone());
                if explored.contains(&key) {
                    continue;
                }
                explored.insert(key);

                let mut next_path = path.clone();
                next_path.push(neighbor.clone());
                if neighbor == goal {
                    return Some(next_path);
                }
                stack.push(next_path);
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
        let path = DfsStrategy.find_path(&g, "B", "D", &AvoidSet::new()).unwrap();
        assert_eq!(path, vec!["B".to_string(), "H".to_string(), "D".to_string()]);
    }
}
