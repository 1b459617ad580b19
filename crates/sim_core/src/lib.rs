//! # Disaster Relief Dispatch Simulation Core
//!
//! A discrete-tick simulation engine for modeling disaster relief logistics:
//! a fleet of vehicles routing supplies to affected zones across a graph of
//! bases, hubs, refuel stations and delivery nodes, under weather, dynamic
//! events, fuel limits, access policy and time-critical delivery windows.
//!
//! ## Overview
//!
//! - **World Graph**: typed nodes and weighted directed edges, with a
//!   transient overlay recomputed every tick on top of immutable base weights
//! - **Weather Manager**: per-region weather state machine driving cost/time
//!   multipliers and block probability
//! - **Event Manager**: node obstacles and edge dynamic events with
//!   countdown/decay/removal/spawn semantics
//! - **Pathfinder**: four interchangeable search strategies (BFS, DFS,
//!   Greedy-Best-First, A*), calibrated once per run by the Algorithm
//!   Selector
//! - **Dispatch & Delivery Executor**: splits a planned route into legs at
//!   refuel stations and validates each leg in a fixed order before mutating
//!   vehicle state
//! - **Cycle Driver**: orchestrates one tick end to end and folds every
//!   outcome into the statistics ledger
//!
//! ## Key Concepts
//!
//! - **Deterministic**: every stochastic decision draws from one seeded RNG,
//!   in a documented order, so identical seeds reproduce identical runs
//! - **Tick-driven**: simulated time advances by a fixed per-tick delta, not
//!   wall-clock time
//! - **Resource-bagged ECS**: the `World` holds every manager as a typed
//!   resource; nothing is modeled as an entity or component
//!
//! ## Example
//!
//! ```rust,no_run
//! use sim_core::scenario;
//! use sim_core::simulation::Simulation;
//!
//! let (graph, vehicles, zones) = scenario::demo_world();
//! let config = scenario::default_config();
//! let mut sim = Simulation::new(graph, vehicles, zones, config).unwrap();
//! sim.run();
//! println!("deliveries: {}", sim.stats().deliveries);
//! ```

pub mod access;
pub mod clock;
pub mod config;
pub mod cycle;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod graph;
pub mod heuristic;
pub mod pathfinding;
pub mod refuel;
pub mod rng;
pub mod scenario;
pub mod scoring;
pub mod selector;
pub mod simulation;
pub mod stats;
pub mod vehicle;
pub mod weather;
pub mod zone;
