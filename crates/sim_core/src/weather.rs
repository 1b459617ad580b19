//! Weather Manager (C2): per-region weather state machine, owning the
//! base-weight snapshot reset at the start of every tick.

use std::collections::HashMap;

use bevy_ecs::prelude::Resource;

use crate::graph::{RegionTag, WorldGraph};
use crate::rng::SimRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherState {
    Normal,
    LightRain,
    HeavyRain,
    Fog,
    Storm,
    Snow,
}

struct Multiplier {
    cost_mult: f64,
    time_mult: f64,
    block_prob: f64,
}

fn multiplier(state: WeatherState) -> Multiplier {
    match state {
        WeatherState::Normal => Multiplier {
            cost_mult: 1.0,
            time_mult: 1.0,
            block_prob: 0.0,
        },
        WeatherState::LightRain => Multiplier {
            cost_mult: 1.1,
            time_mult: 1.1,
            block_prob: 0.05,
        },
        WeatherState::HeavyRain => Multiplier {
            cost_mult: 1.1,
            time_mult: 1.3,
            block_prob: 0.15,
        },
        WeatherState::Fog => Multiplier {
            cost_mult: 1.3,
            time_mult: 1.8,
            block_prob: 0.10,
        },
        WeatherState::Storm => Multiplier {
            cost_mult: 1.7,
            time_mult: 2.0,
            block_prob: 0.25,
        },
        WeatherState::Snow => Multiplier {
            cost_mult: 1.8,
            time_mult: 1.8,
            block_prob: 0.20,
        },
    }
}

/// Relative (unnormalized) transition weights out of `state`.
fn transition_table(state: WeatherState) -> &'static [(WeatherState, f64)] {
    match state {
        WeatherState::Normal => &[
            (WeatherState::Normal, 0.5),
            (WeatherState::LightRain, 0.3),
            (WeatherState::Fog, 0.2),
        ],
        WeatherState::LightRain => &[
            (WeatherState::Normal, 0.2),
            (WeatherState::LightRain, 0.3),
            (WeatherState::HeavyRain, 0.3),
            (WeatherState::Fog, 0.2),
        ],
        WeatherState::HeavyRain => &[
            (WeatherState::LightRain, 0.3),
            (WeatherState::HeavyRain, 0.3),
            (WeatherState::Storm, 0.4),
        ],
        WeatherState::Storm => &[
            (WeatherState::HeavyRain, 0.4),
            (WeatherState::Storm, 0.4),
            (WeatherState::Normal, 0.2),
        ],
        WeatherState::Fog => &[
            (WeatherState::Fog, 0.4),
            (WeatherState::Normal, 0.4),
            (WeatherState::LightRain, 0.2),
        ],
        // The source never defines a transition out of Snow; this shape mirrors
        // the other severe states (stays or decays toward milder conditions).
        WeatherState::Snow => &[
            (WeatherState::Snow, 0.5),
            (WeatherState::LightRain, 0.3),
            (WeatherState::Normal, 0.2),
        ],
    }
}

/// Owns per-region weather state and is the single source of truth for
/// resetting the graph overlay at tick start.
#[derive(Resource)]
pub struct WeatherManager {
    states: HashMap<RegionTag, WeatherState>,
}

impl WeatherManager {
    pub fn new(regions: impl IntoIterator<Item = RegionTag>) -> Self {
        let states = regions
            .into_iter()
            .map(|region| (region, WeatherState::Normal))
            .collect();
        Self { states }
    }

    pub fn state_of(&self, region: &str) -> WeatherState {
        *self.states.get(region).unwrap_or(&WeatherState::Normal)
    }

    /// Transitions every region's state, in region-key ascending order. Called
    /// only on ticks where `tick % weather_tick_period == 0`.
    pub fn step(&mut self, rng: &mut SimRng) {
        let mut regions: Vec<RegionTag> = self.states.keys().cloned().collect();
        regions.sort();
        for region in regions {
            let current = self.states[&region];
            let next = *rng.weighted_choice(transition_table(current));
            self.states.insert(region, next);
        }
    }

    /// Resets the graph overlay to base weights, then applies the current
    /// weather multiplier per edge (keyed by the `from` endpoint's region) and
    /// rolls blocking. Runs every tick, independent of whether `step` ran.
    pub fn apply_overlay(&self, graph: &mut WorldGraph, rng: &mut SimRng) {
        graph.reset_overlay();
        for edge_idx in graph.edges_sorted() {
            let region = {
                let (from_idx, _) = graph.edge_endpoints(edge_idx);
                graph.node_at(from_idx).region.clone()
            };
            let mult = multiplier(self.state_of(&region));
            let edge = graph.edge_mut(edge_idx);
            edge.cost *= mult.cost_mult;
            edge.time *= mult.time_mult;
            if rng.roll(mult.block_prob) {
                edge.blocked = true;
                edge.cost = f64::INFINITY;
                edge.time = f64::INFINITY;
            }
        }
    }
}
