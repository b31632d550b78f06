//! Simulation worker that owns the authoritative [`mud_core::World`].
//!
//! Receives commands from [`crate::RuntimeHandle`], drives the engine on a
//! fixed tick, and publishes the resulting events to the [`EventBus`].

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use mud_content::{ActorProfile, ItemCatalog, ProductionCatalog, RoomGraph};
use mud_core::{
    ActionKind, ActorKind, EngineError, EntityId, Env, GameConfig, GameEngine, GameEnv, GameEvent,
    PcgRng, World,
};

use crate::api::{FightHook, Result, RuntimeError, WorldSnapshot};
use crate::events::{Event, EventBus};

/// Commands that can be sent to the simulation worker
pub enum Command {
    Spawn {
        profile: ActorProfile,
        reply: oneshot::Sender<Result<EntityId>>,
    },
    Issue {
        actor: EntityId,
        kind: ActionKind,
        reply: oneshot::Sender<Result<Option<String>>>,
    },
    Engage {
        actor: EntityId,
        target: EntityId,
        reply: oneshot::Sender<Result<Option<String>>>,
    },
    Stop {
        actor: EntityId,
        reply: oneshot::Sender<Result<String>>,
    },
    Snapshot {
        reply: oneshot::Sender<WorldSnapshot>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Static content the engine consults through its oracles.
pub struct Oracles {
    pub rooms: RoomGraph,
    pub productions: ProductionCatalog,
    pub config: GameConfig,
    pub items: ItemCatalog,
    rng: PcgRng,
}

impl Oracles {
    pub fn new(
        rooms: RoomGraph,
        productions: ProductionCatalog,
        config: GameConfig,
        items: ItemCatalog,
    ) -> Self {
        Self {
            rooms,
            productions,
            config,
            items,
            rng: PcgRng,
        }
    }

    pub fn as_game_env(&self) -> GameEnv<'_> {
        Env::with_all(&self.rooms, &self.productions, &self.config, &self.rng).as_game_env()
    }
}

/// Creates an actor from a profile and hands it its items.
///
/// Items that cannot be equipped stay in the inventory.
pub fn spawn_profile(
    world: &mut World,
    items: &ItemCatalog,
    profile: &ActorProfile,
) -> Result<EntityId> {
    let spec = profile
        .spec()
        .map_err(|e| RuntimeError::InvalidProfile(format!("{e:#}")))?;
    if let Some(missing) = profile.item_names().find(|name| items.get(name).is_none()) {
        return Err(RuntimeError::UnknownItem {
            actor: profile.name.clone(),
            item: missing.to_owned(),
        });
    }

    let id = world.spawn_actor(spec);
    for name in &profile.inventory {
        if let Some(template) = items.get(name) {
            let item = world.create_item(template, 1);
            world.give(id, item)?;
        }
    }
    for (slot, name) in &profile.equipment {
        if let Some(template) = items.get(name) {
            let item = world.create_item(template, 1);
            world.give(id, item)?;
            if let Err(error) = world.equip(id, item, *slot) {
                warn!(actor = %id, item = %name, %error, "cannot equip starting item");
            }
        }
    }

    debug!(actor = %id, name = %profile.name, "actor spawned");
    Ok(id)
}

/// Timing knobs for the worker loop.
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    pub tick_interval: Duration,
    pub regen_interval: Duration,
}

/// Background task that processes gameplay commands and ticks.
pub struct SimulationWorker {
    world: World,
    oracles: Oracles,
    schedule: Schedule,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    hook_tx: Option<mpsc::Sender<FightHook>>,
}

impl SimulationWorker {
    pub fn new(
        world: World,
        oracles: Oracles,
        schedule: Schedule,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        hook_tx: Option<mpsc::Sender<FightHook>>,
    ) -> Self {
        info!(
            actors = world.actors().count(),
            rooms = oracles.rooms.len(),
            "SimulationWorker initialized"
        );

        Self {
            world,
            oracles,
            schedule,
            command_rx,
            event_bus,
            hook_tx,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let mut ticks = time::interval(self.schedule.tick_interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut regen = time::interval_at(
            time::Instant::now() + self.schedule.regen_interval,
            self.schedule.regen_interval,
        );
        regen.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(Command::Shutdown { reply }) => {
                        if reply.send(()).is_err() {
                            debug!("Shutdown reply channel closed (caller dropped)");
                        }
                        break;
                    }
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                _ = ticks.tick() => self.tick(),
                _ = regen.tick() => self.regenerate(),
            }
        }

        info!("SimulationWorker stopped");
    }

    fn now() -> std::time::Instant {
        time::Instant::now().into_std()
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Spawn { profile, reply } => {
                let result = spawn_profile(&mut self.world, &self.oracles.items, &profile);
                if let Err(error) = &result {
                    warn!(name = %profile.name, %error, "spawn rejected");
                }
                if reply.send(result).is_err() {
                    debug!("Spawn reply channel closed (caller dropped)");
                }
            }
            Command::Issue { actor, kind, reply } => {
                let result = self.with_engine(|engine| engine.issue(actor, kind, Self::now()));
                if reply.send(result).is_err() {
                    debug!("Issue reply channel closed (caller dropped)");
                }
            }
            Command::Engage {
                actor,
                target,
                reply,
            } => {
                let result =
                    self.with_engine(|engine| engine.engage(actor, target, Self::now()));
                if reply.send(result).is_err() {
                    debug!("Engage reply channel closed (caller dropped)");
                }
            }
            Command::Stop { actor, reply } => {
                let result = self.with_engine(|engine| engine.stop(actor));
                if reply.send(result).is_err() {
                    debug!("Stop reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(WorldSnapshot::of(&self.world)).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown { reply } => {
                // handled by the loop; answer anyway if it ever gets here
                if reply.send(()).is_err() {
                    debug!("Shutdown reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Runs one engine call, then publishes whatever it emitted.
    fn with_engine<T>(
        &mut self,
        call: impl FnOnce(&mut GameEngine<'_>) -> std::result::Result<T, EngineError>,
    ) -> Result<T> {
        let mut engine = GameEngine::new(&mut self.world, self.oracles.as_game_env());
        let result = call(&mut engine);
        let events = engine.take_events();
        drop(engine);

        self.publish(events);
        result.map_err(|error| {
            warn!(%error, "command rejected");
            RuntimeError::Engine(error)
        })
    }

    fn tick(&mut self) {
        let mut engine = GameEngine::new(&mut self.world, self.oracles.as_game_env());
        let summary = engine.tick_all(Self::now());
        let events = engine.take_events();
        drop(engine);

        if summary.performed > 0 {
            tracing::trace!(
                performed = summary.performed,
                finished = summary.finished,
                failed = summary.failed,
                "tick"
            );
        }
        self.publish(events);
    }

    fn regenerate(&mut self) {
        let mut engine = GameEngine::new(&mut self.world, self.oracles.as_game_env());
        engine.regenerate_all();
        tracing::trace!("regeneration pass");
    }

    fn publish(&self, events: Vec<GameEvent>) {
        for event in events {
            if let GameEvent::Fight { actor, opponent } = event {
                self.forward_fight(actor, opponent);
            } else if let Some(event) = Event::from_game(event) {
                self.event_bus.publish(event);
            }
        }
    }

    fn forward_fight(&self, actor: EntityId, opponent: EntityId) {
        let Some(hook_tx) = &self.hook_tx else {
            return;
        };
        let scripted = self
            .world
            .actor(actor)
            .is_some_and(|state| state.kind == ActorKind::Mobile);
        if !scripted {
            return;
        }
        if let Err(error) = hook_tx.try_send(FightHook { actor, opponent }) {
            debug!(actor = %actor, %error, "fight hook dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use mud_content::Room;
    use mud_core::{Direction, EquipmentSlot, ItemKind, ItemTemplate, RoomId, WeaponProfile};

    use super::*;

    fn items() -> ItemCatalog {
        ItemCatalog::new([
            ItemTemplate::new("club", 2, ItemKind::Weapon(WeaponProfile::melee(1, 6))),
            ItemTemplate::new("rope", 1, ItemKind::Misc),
        ])
    }

    fn profile(text: &str) -> ActorProfile {
        mud_content::ActorLoader::parse(text).unwrap().remove(0)
    }

    #[test]
    fn spawn_profile_equips_and_carries() {
        let mut world = World::new(7);
        let ogre = profile(
            r#"(actors: [(name: "ogre", room: Some(1), inventory: ["rope"],
                equipment: [(RightHand, "club")])])"#,
        );

        let id = spawn_profile(&mut world, &items(), &ogre).unwrap();
        let state = world.actor(id).unwrap();
        assert_eq!(state.inventory.len(), 1);
        assert!(state.equipment.get(EquipmentSlot::RightHand).is_some());
    }

    #[test]
    fn unknown_item_spawns_nothing() {
        let mut world = World::new(7);
        let ogre = profile(r#"(actors: [(name: "ogre", inventory: ["boulder"])])"#);

        let err = spawn_profile(&mut world, &items(), &ogre).unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownItem { .. }));
        assert_eq!(world.actors().count(), 0);
    }

    #[test]
    fn misfitting_equipment_stays_in_inventory() {
        let mut world = World::new(7);
        let ogre = profile(r#"(actors: [(name: "ogre", equipment: [(Head, "rope")])])"#);

        let id = spawn_profile(&mut world, &items(), &ogre).unwrap();
        let state = world.actor(id).unwrap();
        assert_eq!(state.inventory.len(), 1);
        assert!(state.equipment.get(EquipmentSlot::Head).is_none());
    }

    #[test]
    fn oracles_answer_through_the_env() {
        let oracles = Oracles::new(
            RoomGraph::new([Room::new(RoomId(1), "hall").exit(Direction::Up, RoomId(1))]),
            ProductionCatalog::default(),
            GameConfig::default(),
            items(),
        );
        let env = oracles.as_game_env();
        assert_eq!(
            env.map().unwrap().exit(RoomId(1), Direction::Up),
            Some(RoomId(1))
        );
        assert!(env.config().is_ok());
        assert!(env.rng().is_ok());
    }
}
