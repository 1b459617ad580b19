use std::collections::{HashSet, VecDeque};

use super::{node_passable, AvoidSet, PathStrategy, StrategyKind};
use crate::graph::WorldGraph;

pub struct BfsStrategy;

impl PathStrategy for BfsStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Bfs
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

        let mut queue: VecDeque<Vec<String>> = VecDeque::new();
        queue.push_back(vec![start.to_string()]);

        let mut explored: HashSet<(String, String)> = HashSet::new();
        explored.insert((start.to_string(), String::new()));

        while let Some(path) = queue.pop_front() {
            let current = path.last().expect("path is never empty").clone();
            for (neighbor, edge_idx) in graph.successors_sorted(&current) {
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
                queue.push_back(next_path);
            }
        }
        None
    }
}
