//! Event Manager (C3): node obstacles and edge dynamic events, layered on top
//! of the weather overlay every tick.

use std::collections::HashMap;

use bevy_ecs::prelude::Resource;
use petgraph::graph::EdgeIndex;

use crate::graph::{Density, WorldGraph};
use crate::rng::SimRng;

const IMPACT_COST_CEILING: f64 = 1.5;
const IMPACT_TIME_CEILING: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Flood,
    Landslide,
    FallenTrees,
    Erosion,
    Collapse,
}

impl ObstacleKind {
    const ALL: [ObstacleKind; 5] = [
        ObstacleKind::Flood,
        ObstacleKind::Landslide,
        ObstacleKind::FallenTrees,
        ObstacleKind::Erosion,
        ObstacleKind::Collapse,
    ];

    fn effect(self) -> Effect {
        match self {
            ObstacleKind::Flood => Effect {
                cost_mult: 2.5,
                time_mult: 3.0,
                duration_range: (72, 240),
                removal_prob: 0.05,
            },
            ObstacleKind::Landslide => Effect {
                cost_mult: 3.0,
                time_mult: 3.5,
                duration_range: (48, 168),
                removal_prob: 0.03,
            },
            ObstacleKind::FallenTrees => Effect {
                cost_mult: 1.8,
                time_mult: 2.2,
                duration_range: (24, 72),
                removal_prob: 0.20,
            },
            ObstacleKind::Erosion => Effect {
                cost_mult: 2.2,
                time_mult: 2.7,
                duration_range: (36, 120),
                removal_prob: 0.10,
            },
            ObstacleKind::Collapse => Effect {
                cost_mult: 3.5,
                time_mult: 4.0,
                duration_range: (72, 240),
                removal_prob: 0.02,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DynamicEventKind {
    CommsFailure,
    Evacuation,
    RescueInProgress,
    EmergencyWorks,
    StructuralFailure,
}

impl DynamicEventKind {
    const ALL: [DynamicEventKind; 5] = [
        DynamicEventKind::CommsFailure,
        DynamicEventKind::Evacuation,
        DynamicEventKind::RescueInProgress,
        DynamicEventKind::EmergencyWorks,
        DynamicEventKind::StructuralFailure,
    ];

    fn effect(self) -> Effect {
        match self {
            DynamicEventKind::CommsFailure => Effect {
                cost_mult: 2.0,
                time_mult: 2.5,
                duration_range: (6, 24),
                removal_prob: 0.10,
            },
            DynamicEventKind::Evacuation => Effect {
                cost_mult: 2.8,
                time_mult: 3.0,
                duration_range: (12, 36),
                removal_prob: 0.05,
            },
            DynamicEventKind::RescueInProgress => Effect {
                cost_mult: 3.0,
                time_mult: 3.5,
                duration_range: (6, 24),
                removal_prob: 0.10,
            },
            DynamicEventKind::EmergencyWorks => Effect {
                cost_mult: 2.2,
                time_mult: 2.8,
                duration_range: (12, 48),
                removal_prob: 0.20,
            },
            DynamicEventKind::StructuralFailure => Effect {
                cost_mult: 3.5,
                time_mult: 4.0,
                duration_range: (48, 120),
                removal_prob: 0.05,
            },
        }
    }
}

struct Effect {
    cost_mult: f64,
    time_mult: f64,
    duration_range: (u32, u32),
    removal_prob: f64,
}

fn density_multiplier(density: Density) -> (f64, f64) {
    match density {
        Density::High => (1.3, 1.2),
        Density::Normal => (1.0, 1.0),
        Density::Low => (0.8, 0.9),
    }
}

struct Countdown<K> {
    kind: K,
    ticks_remaining: u32,
}

/// Tracks node obstacles and edge events, their countdowns, and applies their
/// cumulative multiplicative effects on top of the weather overlay each tick.
#[derive(Resource)]
pub struct EventManager {
    obstacles: HashMap<String, Countdown<ObstacleKind>>,
    edge_events: HashMap<EdgeIndex, Countdown<DynamicEventKind>>,
}

impl EventManager {
    pub fn new() -> Self {
        Self {
            obstacles: HashMap::new(),
            edge_events: HashMap::new(),
        }
    }

    pub fn obstacle_at(&self, node_key: &str) -> Option<ObstacleKind> {
        self.obstacles.get(node_key).map(|c| c.kind)
    }

    pub fn event_on(&self, edge_idx: EdgeIndex) -> Option<DynamicEventKind> {
        self.edge_events.get(&edge_idx).map(|c| c.kind)
    }

    /// One tick: decrement countdowns, remove expired items probabilistically,
    /// spawn new ones, then apply cumulative multiplicative effects.
    pub fn step(&mut self, graph: &mut WorldGraph, spawn_prob: f64, rng: &mut SimRng) {
        self.decrement_and_maybe_remove(graph, rng);
        self.spawn_new(graph, spawn_prob, rng);
        self.apply_effects(graph);
    }

    /// Counters that hit zero without being removed stay at zero: removal is
    /// re-rolled every subsequent tick rather than the hazard getting a fresh
    /// full-duration lease.
    fn decrement_and_maybe_remove(&mut self, graph: &WorldGraph, rng: &mut SimRng) {
        let mut node_keys: Vec<String> = self.obstacles.keys().cloned().collect();
        node_keys.sort();
        let mut to_remove_nodes = Vec::new();
        for key in node_keys {
            let countdown = self.obstacles.get_mut(&key).expect("present");
            countdown.ticks_remaining = countdown.ticks_remaining.saturating_sub(1);
            if countdown.ticks_remaining == 0 {
                let removal_prob = countdown.kind.effect().removal_prob;
                if rng.roll(removal_prob) {
                    to_remove_nodes.push(key);
                }
            }
        }
        for key in to_remove_nodes {
            self.obstacles.remove(&key);
        }

        let edge_keys: Vec<EdgeIndex> = graph
            .edges_sorted()
            .into_iter()
            .filter(|idx| self.edge_events.contains_key(idx))
            .collect();
        let mut to_remove_edges = Vec::new();
        for idx in edge_keys {
            let countdown = self.edge_events.get_mut(&idx).expect("present");
            countdown.ticks_remaining = countdown.ticks_remaining.saturating_sub(1);
            if countdown.ticks_remaining == 0 {
                let removal_prob = countdown.kind.effect().removal_prob;
                if rng.roll(removal_prob) {
                    to_remove_edges.push(idx);
                }
            }
        }
        for idx in to_remove_edges {
            self.edge_events.remove(&idx);
        }
    }

    fn spawn_new(&mut self, graph: &mut WorldGraph, spawn_prob: f64, rng: &mut SimRng) {
        let mut node_keys: Vec<String> = graph.keys().map(|k| k.to_string()).collect();
        node_keys.sort();
        for key in node_keys {
            if self.obstacles.contains_key(&key) {
                continue;
            }
            let Some(node) = graph.node(&key) else {
                continue;
            };
            if node.kind == crate::graph::NodeKind::Base {
                continue;
            }
            if rng.roll(spawn_prob) {
                let kind = *rng.weighted_choice(
                    &ObstacleKind::ALL
                        .iter()
                        .map(|k| (*k, 1.0))
                        .collect::<Vec<_>>(),
                );
                let (min, max) = kind.effect().duration_range;
                let ticks = rng.uniform_range(min, max);
                self.obstacles.insert(
                    key,
                    Countdown {
                        kind,
                        ticks_remaining: ticks,
                    },
                );
            }
        }

        for idx in graph.edges_sorted() {
            if self.edge_events.contains_key(&idx) {
                continue;
            }
            if rng.roll(spawn_prob) {
                let kind = *rng.weighted_choice(
                    &DynamicEventKind::ALL
                        .iter()
                        .map(|k| (*k, 1.0))
                        .collect::<Vec<_>>(),
                );
                let (min, max) = kind.effect().duration_range;
                let ticks = rng.uniform_range(min, max);
                self.edge_events.insert(
                    idx,
                    Countdown {
                        kind,
                        ticks_remaining: ticks,
                    },
                );
            }
        }
    }

    fn apply_effects(&self, graph: &mut WorldGraph) {
        let mut node_keys: Vec<String> = self.obstacles.keys().cloned().collect();
        node_keys.sort();
        for key in node_keys {
            let kind = self.obstacles[&key].kind;
            let effect = kind.effect();
            let density = graph.node(&key).and_then(|n| n.density).unwrap_or(Density::Normal);
            let (density_cost, density_time) = density_multiplier(density);
            let incident: Vec<EdgeIndex> = graph
                .edges_sorted()
                .into_iter()
                .filter(|idx| {
                    let (from, _) = graph.edge_endpoints(*idx);
                    graph.node_at(from).key == key
                })
                .collect();
            for idx in incident {
                let edge = graph.edge_mut(idx);
                edge.cost *= density_cost * effect.cost_mult;
                edge.time *= density_time * effect.time_mult;
            }
        }

        let edge_keys: Vec<EdgeIndex> = graph
            .edges_sorted()
            .into_iter()
            .filter(|idx| self.edge_events.contains_key(idx))
            .collect();
        for idx in edge_keys {
            let effect = self.edge_events[&idx].kind.effect();
            let edge = graph.edge_mut(idx);
            edge.cost *= effect.cost_mult;
            edge.time *= effect.time_mult;
        }
    }

    /// Product of obstacle multipliers for nodes on `path` and event multipliers
    /// for edges on `path`, clamped to documented ceilings.
    pub fn impact_of_path(&self, graph: &WorldGraph, path: &[String]) -> (f64, f64) {
        if path.is_empty() {
            return (1.0, 1.0);
        }
        let mut cost_impact = 1.0;
        let mut time_impact = 1.0;
        for node_key in path {
            if let Some(kind) = self.obstacle_at(node_key) {
                let effect = kind.effect();
                cost_impact *= effect.cost_mult;
                time_impact *= effect.time_mult;
            }
        }
        for window in path.windows(2) {
            if let Some(idx) = graph.edge_between(&window[0], &window[1]) {
                if let Some(kind) = self.event_on(idx) {
                    let effect = kind.effect();
                    cost_impact *= effect.cost_mult;
                    time_impact *= effect.time_mult;
                }
            }
        }
        (
            cost_impact.min(IMPACT_COST_CEILING),
            time_impact.min(IMPACT_TIME_CEILING),
        )
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}
