//! Real-time action and combat core for a text-based multi-user world.
//!
//! `mud-core` owns the rules: derived stats, opponent lists, timed actions
//! and the combat resolver. It is synchronous and performs no I/O. Rooms,
//! item definitions, productions and randomness are reached through the
//! oracle traits in [`env`]; everything the rules want to tell players is
//! emitted as [`event::GameEvent`]s. All action state flows through
//! [`engine::GameEngine`].
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod state;
pub mod stats;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{
    Action, ActionBehavior, ActionError, ActionFailure, ActionKind, ActionPhase, ActionStatus,
    ActionType, BuildAction, CombatAction, CombatMove, CraftAction, MoveAction, Outcome,
    ReloadAction, ScoutAction, WaitAction,
};
pub use combat::{CombatOutcome, Opponent, OpponentList};
pub use config::GameConfig;
pub use engine::{EngineError, GameEngine, TickSummary};
pub use env::{
    Building, BuildingId, ConfigOracle, Dice, Env, GameEnv, MapOracle, OracleError, PcgRng,
    Production, ProductionId, ProductionOracle, Profession, Requirements, RngOracle,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use event::{ActionEvent, CombatEvent, GameEvent, Outbox};
pub use state::{
    Abilities, Ability, ActorKind, ActorSpec, ActorState, AmmoKind, Direction, EntityId,
    EquipmentSlot, ItemFlags, ItemId, ItemKind, ItemState, ItemTemplate, Posture, Relocation,
    ResourceKind, RoomId, StatusEffectKind, ToolKind, WeaponProfile, World, WorldError,
};
pub use stats::{HealthCondition, StatBlock};
