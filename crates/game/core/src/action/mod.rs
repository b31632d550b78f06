//! Timed actions.
//!
//! Every actor holds exactly one [`Action`]: a kind, a cooldown deadline and
//! a status. An order is validated with `check` before the action is
//! installed, and validated again by `perform` once the deadline elapses,
//! since the world can change while the actor waits.
//!
//! ```text
//! issue ──check──▶ Running ──deadline──▶ perform ─┬─▶ Finished ──▶ Wait
//!                     ▲                           ├─▶ Error    ──▶ Wait
//!                     └────── combat requeue ─────┘
//! ```
//!
//! `Wait` is the idle action; it never elapses. `stop` replaces any action
//! with `Wait` and yields the kind's interruption message.
mod build;
mod combat;
mod craft;
mod error;
mod materials;
mod movement;
mod reload;
mod scout;

pub use build::BuildAction;
pub use combat::{CombatAction, CombatMove};
pub use craft::CraftAction;
pub use error::{ActionError, ActionFailure, ActionPhase};
pub use movement::MoveAction;
pub use reload::ReloadAction;
pub use scout::ScoutAction;

use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::event::Outbox;
use crate::state::{ActorState, Direction, EntityId, ItemId, RoomId, World};
use crate::stats::{LoadProfile, StatBlock, stamina_cost};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionStatus {
    #[default]
    Running,
    Finished,
    Error,
}

/// Kind of an action without its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionType {
    Waiting,
    Moving,
    Crafting,
    Building,
    Scouting,
    Reloading,
    Fighting,
}

impl ActionType {
    /// Lower-case activity shown when describing what an actor is doing.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Moving => "moving",
            Self::Crafting => "crafting",
            Self::Building => "building",
            Self::Scouting => "scouting",
            Self::Reloading => "reloading",
            Self::Fighting => "fighting",
        }
    }
}

/// Result of running an elapsed action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Finished,
    /// Stay installed and run again after `cooldown` seconds.
    Again { cooldown: u32 },
}

/// Behaviour shared by every action kind.
pub trait ActionBehavior {
    fn action_type(&self) -> ActionType;

    /// Validates the order against the current world.
    fn check(&self, world: &World, env: &GameEnv<'_>, actor: EntityId) -> Result<(), ActionError>;

    /// Seconds between issuing the order and its effect.
    fn cooldown(&self, world: &World, env: &GameEnv<'_>, actor: EntityId)
    -> Result<u32, ActionError>;

    /// Notification sent when the action is installed.
    fn start_message(&self, _world: &World, _env: &GameEnv<'_>) -> Option<String> {
        None
    }

    /// Notification sent when the action is interrupted.
    fn stop_message(&self, env: &GameEnv<'_>) -> String;

    /// Applies the effect. Only called once the deadline elapsed.
    fn perform(
        &mut self,
        world: &mut World,
        env: &GameEnv<'_>,
        actor: EntityId,
        now: Instant,
        outbox: &mut Outbox,
    ) -> Result<Outcome, ActionError>;
}

/// The idle action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WaitAction;

impl ActionBehavior for WaitAction {
    fn action_type(&self) -> ActionType {
        ActionType::Waiting
    }

    fn check(&self, _world: &World, _env: &GameEnv<'_>, _actor: EntityId) -> Result<(), ActionError> {
        Ok(())
    }

    fn cooldown(
        &self,
        _world: &World,
        _env: &GameEnv<'_>,
        _actor: EntityId,
    ) -> Result<u32, ActionError> {
        Ok(0)
    }

    fn stop_message(&self, _env: &GameEnv<'_>) -> String {
        "Excuse me sir, but you are doing nothing.".to_owned()
    }

    fn perform(
        &mut self,
        _world: &mut World,
        _env: &GameEnv<'_>,
        _actor: EntityId,
        _now: Instant,
        _outbox: &mut Outbox,
    ) -> Result<Outcome, ActionError> {
        Ok(Outcome::Finished)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Wait(WaitAction),
    Move(MoveAction),
    Craft(CraftAction),
    Build(BuildAction),
    Scout(ScoutAction),
    Reload(ReloadAction),
    Combat(CombatAction),
}

impl ActionKind {
    pub fn wait() -> Self {
        Self::Wait(WaitAction)
    }

    pub fn go(direction: Direction) -> Self {
        Self::Move(MoveAction::new(direction))
    }

    pub fn scout() -> Self {
        Self::Scout(ScoutAction)
    }

    pub fn reload(weapon: ItemId, magazine: ItemId) -> Self {
        Self::Reload(ReloadAction::new(weapon, magazine))
    }

    pub fn basic_attack() -> Self {
        Self::Combat(CombatAction::new(CombatMove::BasicAttack))
    }

    pub fn flee() -> Self {
        Self::Combat(CombatAction::new(CombatMove::Flee))
    }

    pub fn is_wait(&self) -> bool {
        matches!(self, Self::Wait(_))
    }

    pub fn is_combat(&self) -> bool {
        matches!(self, Self::Combat(_))
    }

    pub fn describe(&self) -> &'static str {
        self.action_type().description()
    }

    fn behavior(&self) -> &dyn ActionBehavior {
        match self {
            Self::Wait(action) => action,
            Self::Move(action) => action,
            Self::Craft(action) => action,
            Self::Build(action) => action,
            Self::Scout(action) => action,
            Self::Reload(action) => action,
            Self::Combat(action) => action,
        }
    }

    fn behavior_mut(&mut self) -> &mut dyn ActionBehavior {
        match self {
            Self::Wait(action) => action,
            Self::Move(action) => action,
            Self::Craft(action) => action,
            Self::Build(action) => action,
            Self::Scout(action) => action,
            Self::Reload(action) => action,
            Self::Combat(action) => action,
        }
    }
}

impl ActionBehavior for ActionKind {
    fn action_type(&self) -> ActionType {
        self.behavior().action_type()
    }

    fn check(&self, world: &World, env: &GameEnv<'_>, actor: EntityId) -> Result<(), ActionError> {
        self.behavior().check(world, env, actor)
    }

    fn cooldown(
        &self,
        world: &World,
        env: &GameEnv<'_>,
        actor: EntityId,
    ) -> Result<u32, ActionError> {
        self.behavior().cooldown(world, env, actor)
    }

    fn start_message(&self, world: &World, env: &GameEnv<'_>) -> Option<String> {
        self.behavior().start_message(world, env)
    }

    fn stop_message(&self, env: &GameEnv<'_>) -> String {
        self.behavior().stop_message(env)
    }

    fn perform(
        &mut self,
        world: &mut World,
        env: &GameEnv<'_>,
        actor: EntityId,
        now: Instant,
        outbox: &mut Outbox,
    ) -> Result<Outcome, ActionError> {
        self.behavior_mut().perform(world, env, actor, now, outbox)
    }
}

/// An installed action.
#[derive(Clone, Debug)]
pub struct Action {
    kind: ActionKind,
    deadline: Instant,
    status: ActionStatus,
}

impl Action {
    pub fn new(kind: ActionKind, deadline: Instant) -> Self {
        Self {
            kind,
            deadline,
            status: ActionStatus::Running,
        }
    }

    pub fn idle() -> Self {
        Self::new(ActionKind::wait(), Instant::now())
    }

    /// Installs `kind` with a deadline `cooldown` seconds after `now`.
    pub fn scheduled(kind: ActionKind, now: Instant, cooldown: u32) -> Self {
        Self::new(kind, now + seconds(cooldown))
    }

    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    pub fn action_type(&self) -> ActionType {
        self.kind.action_type()
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn status(&self) -> ActionStatus {
        self.status
    }

    pub fn is_idle(&self) -> bool {
        self.kind.is_wait()
    }

    pub fn check_elapsed(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Runs the action if its deadline elapsed.
    ///
    /// Before the deadline, and always for `Wait`, this returns `Running`
    /// without touching the world.
    pub fn perform(
        &mut self,
        world: &mut World,
        env: &GameEnv<'_>,
        actor: EntityId,
        now: Instant,
        outbox: &mut Outbox,
    ) -> Result<ActionStatus, ActionError> {
        if self.is_idle() || !self.check_elapsed(now) {
            return Ok(ActionStatus::Running);
        }
        match self.kind.perform(world, env, actor, now, outbox) {
            Ok(Outcome::Finished) => self.status = ActionStatus::Finished,
            Ok(Outcome::Again { cooldown }) => {
                self.deadline = now + seconds(cooldown);
                self.status = ActionStatus::Running;
            }
            Err(error) => {
                self.status = ActionStatus::Error;
                return Err(error);
            }
        }
        Ok(self.status)
    }

    /// Message for interrupting this action.
    pub fn stop_message(&self, env: &GameEnv<'_>) -> String {
        self.kind.stop_message(env)
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::idle()
    }
}

pub(crate) fn seconds(value: u32) -> Duration {
    Duration::from_secs(u64::from(value))
}

pub(crate) fn game_config<'a>(env: &GameEnv<'a>) -> Result<&'a GameConfig, ActionError> {
    Ok(env.config()?.game_config())
}

pub(crate) fn acting<'w>(world: &'w World, actor: EntityId) -> Result<&'w ActorState, ActionError> {
    world.actor(actor).ok_or(ActionError::Nowhere)
}

pub(crate) fn current_room(actor: &ActorState) -> Result<RoomId, ActionError> {
    actor.location.ok_or(ActionError::Nowhere)
}

/// Stamina cost of a non-combat action.
pub(crate) fn base_stamina_cost(world: &World, actor: &ActorState) -> u32 {
    let block = StatBlock::of(world, actor);
    stamina_cost(&LoadProfile::of(actor, &block), None)
}

pub(crate) fn ensure_stamina(
    actor: &ActorState,
    cost: u32,
    activity: &'static str,
) -> Result<(), ActionError> {
    if actor.stamina() < cost {
        return Err(ActionError::TooTired(activity));
    }
    Ok(())
}
