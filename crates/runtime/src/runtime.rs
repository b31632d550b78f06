//! High-level runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the simulation.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use mud_content::{ActorProfile, Content, ItemCatalog, ProductionCatalog, RoomGraph};
use mud_core::{GameConfig, World};

use crate::api::{FightHook, FightScript, Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{
    Command, Oracles, Schedule, ScriptWorker, SimulationWorker, spawn_profile,
};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// How often elapsed actions are resolved.
    pub tick_interval: Duration,
    /// How often located actors regain health and stamina.
    pub regen_interval: Duration,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
    /// Pending fight hooks before new ones are dropped.
    pub hook_buffer_size: usize,
    /// Seed for every roll made in this world.
    pub game_seed: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            regen_interval: Duration::from_secs(10),
            command_buffer_size: 32,
            event_buffer_size: 100,
            hook_buffer_size: 16,
            game_seed: rand::random(),
        }
    }
}

/// Main runtime that orchestrates the simulation
///
/// Runtime owns workers; [`RuntimeHandle`] provides a cloneable façade for
/// clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
    script_worker_handle: Option<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events of one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        // The worker may already be gone; joining below reports the real cause.
        if let Err(error) = self.handle.shutdown().await {
            tracing::debug!(%error, "shutdown command not delivered");
        }
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        if let Some(script_handle) = self.script_worker_handle {
            script_handle.await.map_err(RuntimeError::WorkerJoin)?;
        }

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    game_config: GameConfig,
    rooms: RoomGraph,
    items: ItemCatalog,
    productions: ProductionCatalog,
    roster: Vec<ActorProfile>,
    script: Option<Box<dyn FightScript>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            game_config: GameConfig::default(),
            rooms: RoomGraph::default(),
            items: ItemCatalog::default(),
            productions: ProductionCatalog::default(),
            roster: Vec::new(),
            script: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed for the world's dice
    pub fn game_seed(mut self, seed: u64) -> Self {
        self.config.game_seed = seed;
        self
    }

    /// Use everything a content directory provides, replacing earlier settings
    pub fn content(mut self, content: Content) -> Self {
        self.game_config = content.config;
        self.rooms = content.rooms;
        self.items = content.items;
        self.productions = content.productions;
        self.roster = content.actors;
        self
    }

    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.game_config = game_config;
        self
    }

    pub fn rooms(mut self, rooms: RoomGraph) -> Self {
        self.rooms = rooms;
        self
    }

    pub fn items(mut self, items: ItemCatalog) -> Self {
        self.items = items;
        self
    }

    pub fn productions(mut self, productions: ProductionCatalog) -> Self {
        self.productions = productions;
        self
    }

    /// Add an actor to spawn when the runtime starts
    pub fn actor(mut self, profile: ActorProfile) -> Self {
        self.roster.push(profile);
        self
    }

    /// Attach a script that reacts to mobiles fighting
    pub fn script(mut self, script: impl FightScript + 'static) -> Self {
        self.script = Some(Box::new(script));
        self
    }

    /// Build the runtime and start its workers
    pub async fn build(self) -> Result<Runtime> {
        let mut world = World::new(self.config.game_seed);
        for profile in &self.roster {
            spawn_profile(&mut world, &self.items, profile)?;
        }

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let (hook_tx, script_worker) = match self.script {
            Some(script) => {
                let (hook_tx, hook_rx) =
                    mpsc::channel::<FightHook>(self.config.hook_buffer_size);
                let worker = ScriptWorker::new(script, hook_rx, handle.clone());
                (Some(hook_tx), Some(worker))
            }
            None => (None, None),
        };

        let oracles = Oracles::new(self.rooms, self.productions, self.game_config, self.items);
        let schedule = Schedule {
            tick_interval: self.config.tick_interval,
            regen_interval: self.config.regen_interval,
        };
        let sim_worker =
            SimulationWorker::new(world, oracles, schedule, command_rx, event_bus, hook_tx);

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });
        let script_worker_handle = script_worker.map(|worker| {
            tokio::spawn(async move {
                worker.run().await;
            })
        });

        tracing::info!(seed = self.config.game_seed, "runtime started");
        Ok(Runtime {
            handle,
            sim_worker_handle,
            script_worker_handle,
        })
    }
}
