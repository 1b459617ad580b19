//! The simulation harness: owns the ECS [`World`] as a typed resource bag and
//! wires the Cycle Driver (C12) together once per tick.
//!
//! Vehicles and zones are plain data the rest of the simulator indexes by
//! position, not ECS entities -- there is no per-vehicle query the Cycle
//! Driver needs that a `Vec` doesn't already give it -- so [`FleetRegistry`]
//! and [`ZoneRegistry`] simply wrap them for storage in the `World`.
//! `SimConfig` stays outside the `World` entirely: it is read-only for the
//! life of a run, so it never needs to be split across simultaneous borrows.

use bevy_ecs::prelude::{Resource, World};

use crate::clock::SimTime;
use crate::config::SimConfig;
use crate::cycle;
use crate::error::ConfigError;
use crate::events::EventManager;
use crate::graph::WorldGraph;
use crate::pathfinding::{build_strategy, PathStrategyResource};
use crate::rng::SimRng;
use crate::selector;
use crate::stats::StatsLedger;
use crate::vehicle::Vehicle;
use crate::weather::WeatherManager;
use crate::zone::AffectedZone;

#[derive(Resource)]
pub struct FleetRegistry(pub Vec<Vehicle>);

#[derive(Resource)]
pub struct ZoneRegistry(pub Vec<AffectedZone>);

/// One simulation run. Construction validates the configuration and graph
/// once; every subsequent tick reuses the world built at that point.
pub struct Simulation {
    world: World,
    config: SimConfig,
    tick: u32,
}

impl Simulation {
    pub fn new(
        graph: WorldGraph,
        vehicles: Vec<Vehicle>,
        zones: Vec<AffectedZone>,
        config: SimConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if graph.bases().is_empty() {
            return Err(ConfigError::NoBaseNodes);
        }
        if graph.delivery_nodes().is_empty() {
            return Err(ConfigError::NoDeliveryNodes);
        }

        let strategy_kind = selector::select_strategy(&graph, &config);
        let weather = WeatherManager::new(graph.regions());

        let mut stats = StatsLedger::new();
        stats.seed_terrain_distribution(&graph);

        let mut world = World::new();
        world.insert_resource(graph);
        world.insert_resource(weather);
        world.insert_resource(EventManager::new());
        world.insert_resource(SimRng::new(config.rng_seed));
        world.insert_resource(stats);
        world.insert_resource(SimTime::new());
        world.insert_resource(PathStrategyResource(build_strategy(strategy_kind)));
        world.insert_resource(FleetRegistry(vehicles));
        world.insert_resource(ZoneRegistry(zones));

        Ok(Self {
            world,
            config,
            tick: 0,
        })
    }

    /// Runs a single tick. Every resource the Cycle Driver needs simultaneous
    /// mutable access to is pulled out of the world as an owned value, handed
    /// to [`cycle::run_cycle`] as a plain function call, then reinserted --
    /// simpler and less error-prone to hand-author than nested
    /// `World::resource_scope` closures for nine resources at once.
    pub fn run_cycle(&mut self) {
        let mut graph = self.world.remove_resource::<WorldGraph>().expect("graph");
        let mut weather = self
            .world
            .remove_resource::<WeatherManager>()
            .expect("weather manager");
        let mut events = self
            .world
            .remove_resource::<EventManager>()
            .expect("event manager");
        let mut rng = self.world.remove_resource::<SimRng>().expect("rng");
        let mut stats = self
            .world
            .remove_resource::<StatsLedger>()
            .expect("stats ledger");
        let mut clock = self.world.remove_resource::<SimTime>().expect("clock");
        let strategy = self
            .world
            .remove_resource::<PathStrategyResource>()
            .expect("path strategy");
        let mut fleet = self
            .world
            .remove_resource::<FleetRegistry>()
            .expect("fleet registry");
        let mut zone_registry = self
            .world
            .remove_resource::<ZoneRegistry>()
            .expect("zone registry");

        let now_hours = clock.hours();
        cycle::run_cycle(
            self.tick,
            now_hours,
            &mut graph,
            &mut weather,
            &mut events,
            &mut zone_registry.0,
            &mut fleet.0,
            strategy.0.as_ref(),
            &self.config,
            &mut rng,
            &mut stats,
        );
        clock.advance();
        self.tick += 1;

        self.world.insert_resource(graph);
        self.world.insert_resource(weather);
        self.world.insert_resource(events);
        self.world.insert_resource(rng);
        self.world.insert_resource(stats);
        self.world.insert_resource(clock);
        self.world.insert_resource(strategy);
        self.world.insert_resource(fleet);
        self.world.insert_resource(zone_registry);
    }

    /// Runs `config.num_cycles` ticks in sequence.
    pub fn run(&mut self) {
        for _ in 0..self.config.num_cycles {
            self.run_cycle();
        }
    }

    pub fn stats(&self) -> &StatsLedger {
        self.world.resource::<StatsLedger>()
    }

    pub fn graph(&self) -> &WorldGraph {
        self.world.resource::<WorldGraph>()
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.world.resource::<FleetRegistry>().0
    }

    pub fn zones(&self) -> &[AffectedZone] {
        &self.world.resource::<ZoneRegistry>().0
    }

    pub fn now_hours(&self) -> f64 {
        self.world.resource::<SimTime>().hours()
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }
}
