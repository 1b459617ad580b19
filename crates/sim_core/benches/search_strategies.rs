//! Compares the four pathfinding strategies (C7) on a fixed, moderately sized
//! graph -- the same shape of comparison the Algorithm Selector (C8) performs
//! once per run, here run repeatedly under criterion for wall-clock numbers.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sim_core::graph::{Density, Edge, Node, Terrain, WorldGraph};
use sim_core::pathfinding::{build_strategy, AvoidSet, PathStrategy, StrategyKind};

/// A `width x height` grid of hub nodes, fully connected to its 4-neighbors,
/// with a base at one corner and a delivery node at the opposite corner.
fn grid_graph(width: u32, height: u32) -> WorldGraph {
    let mut graph = WorldGraph::new();
    for y in 0..height {
        for x in 0..width {
            let key = format!("n_{x}_{y}");
            if x == 0 && y == 0 {
                graph.add_node(Node::base(key, (x as f64, y as f64), "Lisboa"));
            } else if x == width - 1 && y == height - 1 {
                graph.add_node(Node::delivery(
                    key,
                    (x as f64, y as f64),
                    "Lisboa",
                    Terrain::Urban,
                    Density::Normal,
                ));
            } else {
                graph.add_node(Node::hub(
                    key,
                    (x as f64, y as f64),
                    "Lisboa",
                    Terrain::Urban,
                    Density::Normal,
                ));
            }
        }
    }
    for y in 0..height {
        for x in 0..width {
            let from = format!("n_{x}_{y}");
            if x + 1 < width {
                let to = format!("n_{}_{y}", x + 1);
                graph.add_edge(&from, &to, Edge::new(1.0, 1.0)).unwrap();
                graph.add_edge(&to, &from, Edge::new(1.0, 1.0)).unwrap();
            }
            if y + 1 < height {
                let to = format!("n_{x}_{}", y + 1);
                graph.add_edge(&from, &to, Edge::new(1.0, 1.0)).unwrap();
                graph.add_edge(&to, &from, Edge::new(1.0, 1.0)).unwrap();
            }
        }
    }
    graph
}

fn bench_strategies(c: &mut Criterion) {
    let graph = grid_graph(12, 12);
    let avoid = AvoidSet::new();
    let start = "n_0_0";
    let goal = "n_11_11";

    let mut group = c.benchmark_group("search_strategies_12x12");
    for kind in StrategyKind::all() {
        let strategy: Box<dyn PathStrategy> = build_strategy(kind);
        group.bench_function(kind.label(), |b| {
            b.iter(|| {
                let path = strategy.find_path(
                    black_box(&graph),
                    black_box(start),
                    black_box(goal),
                    black_box(&avoid),
                );
                black_box(path)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
