//! Algorithm Selector (C8): one-shot calibration at simulator construction
//! that benchmarks the four search strategies and picks the remainder-of-run
//! winner by a weighted composite score.

use std::collections::HashMap;
use std::time::Instant;

use crate::config::SimConfig;
use crate::graph::WorldGraph;
use crate::pathfinding::{build_strategy, AvoidSet, StrategyKind};

struct Metrics {
    t_exec: f64,
    t_route: f64,
    c_route: f64,
}

fn route_time_cost(graph: &WorldGraph, path: &[String]) -> (f64, f64) {
    let mut time = 0.0;
    let mut cost = 0.0;
    for window in path.windows(2) {
        if let Some(idx) = graph.edge_between(&window[0], &window[1]) {
            let edge = graph.edge(idx);
            time += edge.time;
            cost += edge.cost;
        }
    }
    (time, cost)
}

/// Runs each strategy `config.selector_trials` times on a fixed (base, goal)
/// pair, picks the minimum weighted composite score among those that
/// returned a path. Defaults to A* if none did.
pub fn select_strategy(graph: &WorldGraph, config: &SimConfig) -> StrategyKind {
    let Some(start) = graph.bases().first().map(|s| s.to_string()) else {
        tracing::warn!("algorithm selector: no base node in graph, defaulting to a_star");
        return StrategyKind::AStar;
    };
    let Some(goal) = graph.delivery_nodes().first().map(|s| s.to_string()) else {
        tracing::warn!("algorithm selector: no delivery node in graph, defaulting to a_star");
        return StrategyKind::AStar;
    };

    let mut metrics: HashMap<StrategyKind, Metrics> = HashMap::new();

    for kind in StrategyKind::all() {
        let strategy = build_strategy(kind);
        let trials = config.selector_trials.max(1) as usize;
        let mut durations = Vec::with_capacity(trials);
        let mut found_path: Option<Vec<String>> = None;
        for _ in 0..trials {
            let started = Instant::now();
            let path = strategy.find_path(graph, &start, &goal, &AvoidSet::new());
            durations.push(started.elapsed().as_secs_f64());
            if found_path.is_none() {
                found_path = path;
            }
        }
        let Some(path) = found_path else {
            continue;
        };
        durations.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let t_exec = durations[durations.len() / 2];
        let (t_route, c_route) = route_time_cost(graph, &path);
        metrics.insert(
            kind,
            Metrics {
                t_exec,
                t_route,
                c_route,
            },
        );
    }

    if metrics.is_empty() {
        tracing::warn!("algorithm selector: no strategy found a path, defaulting to a_star");
        return StrategyKind::AStar;
    }

    let max_t_exec = metrics.values().map(|m| m.t_exec).fold(0.0_f64, f64::max).max(f64::MIN_POSITIVE);
    let max_t_route = metrics.values().map(|m| m.t_route).fold(0.0_f64, f64::max).max(f64::MIN_POSITIVE);
    let max_c_route = metrics.values().map(|m| m.c_route).fold(0.0_f64, f64::max).max(f64::MIN_POSITIVE);
    let (w_exec, w_route, w_cost) = config.selector_weights;

    let mut kinds: Vec<StrategyKind> = metrics.keys().copied().collect();
    kinds.sort_by_key(|k| k.label());

    let mut best: Option<(StrategyKind, f64)> = None;
    for kind in kinds {
        let m = &metrics[&kind];
        let score = w_exec * (m.t_exec / max_t_exec)
            + w_route * (m.t_route / max_t_route)
            + w_cost * (m.c_route / max_c_route);
        let replace = match &best {
            Some((_, best_score)) => score < *best_score,
            None => true,
        };
        if replace {
            best = Some((kind, score));
        }
    }

    let chosen = best.map(|(kind, _)| kind).unwrap_or(StrategyKind::AStar);
    tracing::info!(strategy = chosen.label(), "algorithm selector chose strategy");
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Density, Edge, Node, Terrain};

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
    fn selects_some_strategy_on_a_solvable_graph() {
        let g = small_graph();
        let config = SimConfig::default();
        let chosen = select_strategy(&g, &config);
        assert!(StrategyKind::all().contains(&chosen));
    }

    #[test]
    fn defaults_to_a_star_without_delivery_nodes() {
        let mut g = WorldGraph::new();
        g.add_node(Node::base("B", (0.0, 0.0), "Lisboa"));
        let config = SimConfig::default();
        assert_eq!(select_strategy(&g, &config), StrategyKind::AStar);
    }
}
