//! Action scheduling facade.
//!
//! The [`GameEngine`] is the only entry point that installs, interrupts and
//! resolves actions. It borrows the [`World`] and the oracles for one call
//! sequence, collects every emitted event in an [`Outbox`], and leaves
//! delivery to the caller via [`GameEngine::take_events`].
//!
//! Actions resolve once per `tick`. The engine checks the deadline before
//! taking an action out of its actor, so a tick before the cooldown elapses
//! leaves the world untouched.

mod errors;

pub use errors::EngineError;

use std::time::Instant;

use crate::action::{
    Action, ActionBehavior, ActionError, ActionFailure, ActionKind, ActionPhase, ActionStatus,
};
use crate::combat::default_aggro;
use crate::env::GameEnv;
use crate::error::ErrorContext;
use crate::event::{ActionEvent, GameEvent, Outbox};
use crate::state::{EntityId, World};

/// Tally of one [`GameEngine::tick_all`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Actions whose deadline elapsed and that ran.
    pub performed: usize,
    pub finished: usize,
    pub failed: usize,
}

pub struct GameEngine<'a> {
    world: &'a mut World,
    env: GameEnv<'a>,
    outbox: Outbox,
}

impl<'a> GameEngine<'a> {
    pub fn new(world: &'a mut World, env: GameEnv<'a>) -> Self {
        Self {
            world,
            env,
            outbox: Outbox::default(),
        }
    }

    pub fn world(&self) -> &World {
        self.world
    }

    /// Validates an order and installs it as the actor's action.
    ///
    /// A rejected order is reported to the actor and leaves the current
    /// action in place. On success the start notification, if the kind has
    /// one, is queued and also returned.
    pub fn issue(
        &mut self,
        actor: EntityId,
        kind: ActionKind,
        now: Instant,
    ) -> Result<Option<String>, EngineError> {
        if self.world.actor(actor).is_none() {
            return Err(EngineError::UnknownActor(actor));
        }

        let validated = kind
            .check(self.world, &self.env, actor)
            .and_then(|()| kind.cooldown(self.world, &self.env, actor));
        let cooldown = match validated {
            Ok(cooldown) => cooldown,
            Err(error) => return Err(self.reject(actor, error)),
        };
        let start = kind.start_message(self.world, &self.env);
        let action_type = kind.action_type();

        let Some(state) = self.world.actor_mut(actor) else {
            return Err(EngineError::UnknownActor(actor));
        };
        let previous = std::mem::replace(
            &mut state.action,
            Action::scheduled(kind, now, cooldown),
        );
        if !previous.is_idle() {
            self.outbox.action(ActionEvent::Stopped {
                actor,
                kind: previous.action_type(),
            });
        }

        if let Some(text) = &start {
            self.outbox.notify(actor, text.clone());
        }
        self.outbox.action(ActionEvent::Started {
            actor,
            kind: action_type,
        });
        tracing::debug!(actor = %actor, kind = %action_type, cooldown, "action installed");
        Ok(start)
    }

    /// Starts a fight between `actor` and `target`.
    ///
    /// Both must stand in the same room. Each joins the other's opponent
    /// list and `target` becomes the actor's top aggressor. An actor already
    /// fighting just switches targets.
    pub fn engage(
        &mut self,
        actor: EntityId,
        target: EntityId,
        now: Instant,
    ) -> Result<Option<String>, EngineError> {
        let Some(attacker) = self.world.actor(actor) else {
            return Err(EngineError::UnknownActor(actor));
        };
        let Some(room) = attacker.location else {
            return Err(self.reject(actor, ActionError::Nowhere));
        };
        let level = attacker.level;
        let defender = self
            .world
            .actor(target)
            .filter(|defender| defender.id != actor && defender.location == Some(room));
        let Some(target_level) = defender.map(|defender| defender.level) else {
            return Err(self.reject(actor, ActionError::InvalidTarget(target)));
        };

        self.world.add_opponent(target, actor, None);
        let already_fighting = match self.world.actor_mut(actor) {
            Some(state) => {
                state
                    .opponents
                    .move_to_top(target, default_aggro(level, target_level));
                state.action.kind().is_combat()
            }
            None => return Err(EngineError::UnknownActor(actor)),
        };
        tracing::debug!(actor = %actor, target = %target, already_fighting, "engaged");

        if already_fighting {
            return Ok(None);
        }
        self.issue(actor, ActionKind::basic_attack(), now)
    }

    /// Interrupts the actor's action and installs `Wait`.
    ///
    /// Returns the interruption message, which is also queued for the actor.
    pub fn stop(&mut self, actor: EntityId) -> Result<String, EngineError> {
        let Some(state) = self.world.actor_mut(actor) else {
            return Err(EngineError::UnknownActor(actor));
        };
        let previous = std::mem::take(&mut state.action);
        let message = previous.stop_message(&self.env);

        if !previous.is_idle() {
            self.outbox.action(ActionEvent::Stopped {
                actor,
                kind: previous.action_type(),
            });
            tracing::debug!(actor = %actor, kind = %previous.action_type(), "action stopped");
        }
        self.outbox.notify(actor, message.clone());
        Ok(message)
    }

    /// Resolves the actor's action if its cooldown elapsed.
    ///
    /// Finished and failed actions revert the actor to `Wait`. A failure is
    /// reported to the actor and returned as [`EngineError::Failed`].
    pub fn tick(&mut self, actor: EntityId, now: Instant) -> Result<ActionStatus, EngineError> {
        let Some(state) = self.world.actor_mut(actor) else {
            return Err(EngineError::UnknownActor(actor));
        };
        state.effects.prune(now);
        if state.action.is_idle() || !state.action.check_elapsed(now) {
            return Ok(ActionStatus::Running);
        }

        let mut action = std::mem::take(&mut state.action);
        let kind = action.action_type();
        let result = action.perform(self.world, &self.env, actor, now, &mut self.outbox);

        match result {
            Ok(ActionStatus::Running) => {
                if let Some(state) = self.world.actor_mut(actor) {
                    state.action = action;
                }
                Ok(ActionStatus::Running)
            }
            Ok(status) => {
                self.outbox.action(ActionEvent::Finished { actor, kind });
                tracing::debug!(actor = %actor, kind = %kind, "action finished");
                Ok(status)
            }
            Err(error) => {
                let failure = self.failure(actor, ActionPhase::Perform, error);
                let reason = failure.message();
                self.outbox.notify(actor, reason.clone());
                self.outbox.action(ActionEvent::Failed {
                    actor,
                    kind,
                    reason,
                });
                tracing::debug!(actor = %actor, kind = %kind, error = %failure, "action failed");
                Err(EngineError::Failed(failure))
            }
        }
    }

    /// Ticks every actor with a pending action, in ascending id order.
    pub fn tick_all(&mut self, now: Instant) -> TickSummary {
        let mut summary = TickSummary::default();
        for actor in self.world.actor_ids() {
            let pending = self
                .world
                .actor(actor)
                .is_some_and(|state| !state.action.is_idle() && state.action.check_elapsed(now));
            if !pending {
                if let Some(state) = self.world.actor_mut(actor) {
                    state.effects.prune(now);
                }
                continue;
            }

            summary.performed += 1;
            match self.tick(actor, now) {
                Ok(ActionStatus::Running) => {}
                Ok(_) => summary.finished += 1,
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Applies one regeneration step to every actor still in the world.
    pub fn regenerate_all(&mut self) {
        for state in self.world.actors_mut().filter(|state| state.is_located()) {
            state.regenerate();
        }
    }

    /// What the actor is currently doing, e.g. "fighting".
    pub fn describe(&self, actor: EntityId) -> Option<&'static str> {
        self.world
            .actor(actor)
            .map(|state| state.action.kind().describe())
    }

    /// Drains every event emitted since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.outbox.drain()
    }

    fn failure(&self, actor: EntityId, phase: ActionPhase, error: ActionError) -> ActionFailure {
        let mut context = ErrorContext::new(self.world.nonce()).with_actor(actor);
        if let Some(room) = self.world.location_of(actor) {
            context = context.with_room(room);
        }
        ActionFailure::new(phase, error, context)
    }

    fn reject(&mut self, actor: EntityId, error: ActionError) -> EngineError {
        let failure = self.failure(actor, ActionPhase::Check, error);
        self.outbox.notify(actor, failure.message());
        tracing::debug!(actor = %actor, error = %failure, "order rejected");
        EngineError::Rejected(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::action::ActionType;
    use crate::event::CombatEvent;
    use crate::state::{Direction, EquipmentSlot, Posture, RoomId};
    use crate::testing::{Fixture, sword};

    fn engine(fixture: &mut Fixture) -> GameEngine<'_> {
        let env = GameEnv::with_all(
            &fixture.map,
            &fixture.recipes,
            &fixture.config,
            fixture.rng.as_ref(),
        );
        GameEngine::new(&mut fixture.world, env)
    }

    #[test]
    fn issue_installs_and_tick_resolves() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let now = Instant::now();
        let mut engine = engine(&mut fixture);

        assert_eq!(engine.issue(hero, ActionKind::go(Direction::East), now), Ok(None));
        assert_eq!(engine.describe(hero), Some("moving"));

        assert_eq!(engine.tick(hero, now), Ok(ActionStatus::Running));
        assert_eq!(engine.world().location_of(hero), Some(Fixture::START));

        let later = now + Duration::from_secs(1);
        assert_eq!(engine.tick(hero, later), Ok(ActionStatus::Finished));
        assert_eq!(engine.world().location_of(hero), Some(RoomId(5)));
        assert_eq!(engine.describe(hero), Some("waiting"));

        let events = engine.take_events();
        assert!(events.contains(&GameEvent::Action(ActionEvent::Started {
            actor: hero,
            kind: ActionType::Moving,
        })));
        assert!(events.contains(&GameEvent::Action(ActionEvent::Finished {
            actor: hero,
            kind: ActionType::Moving,
        })));
    }

    #[test]
    fn rejected_order_keeps_the_current_action() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let now = Instant::now();
        let mut engine = engine(&mut fixture);
        engine.issue(hero, ActionKind::scout(), now).unwrap();

        let result = engine.issue(hero, ActionKind::go(Direction::West), now);

        let Err(EngineError::Rejected(failure)) = result else {
            panic!("expected a rejection, got {result:?}");
        };
        assert_eq!(failure.phase, ActionPhase::Check);
        assert_eq!(failure.error, ActionError::NoExit);
        assert_eq!(engine.describe(hero), Some("scouting"));
    }

    #[test]
    fn failure_at_execution_reverts_to_wait() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let now = Instant::now();
        let mut engine = engine(&mut fixture);
        engine.issue(hero, ActionKind::go(Direction::East), now).unwrap();
        engine.world.actor_mut(hero).unwrap().posture = Posture::Sleep;

        let result = engine.tick(hero, now + Duration::from_secs(5));

        assert!(matches!(result, Err(EngineError::Failed(ref f)) if f.error == ActionError::MustWakeUp));
        assert_eq!(engine.describe(hero), Some("waiting"));
        assert_eq!(engine.world().location_of(hero), Some(Fixture::START));
        let events = engine.take_events();
        assert!(events.contains(&GameEvent::Notify {
            actor: hero,
            text: "You first need to wake up.".into(),
        }));
    }

    #[test]
    fn stop_returns_the_interruption_message() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let mut engine = engine(&mut fixture);

        assert_eq!(
            engine.stop(hero).as_deref(),
            Ok("Excuse me sir, but you are doing nothing.")
        );
        engine.issue(hero, ActionKind::scout(), Instant::now()).unwrap();
        assert_eq!(engine.stop(hero).as_deref(), Ok("You stop scouting the area."));
        assert_eq!(engine.describe(hero), Some("waiting"));
    }

    #[test]
    fn engage_requires_a_target_in_the_room() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let rat = fixture.spawn("rat");
        fixture.actor_mut(rat).location = Some(RoomId(5));
        let mut engine = engine(&mut fixture);

        let result = engine.engage(hero, rat, Instant::now());
        assert!(matches!(
            result,
            Err(EngineError::Rejected(ref f)) if f.error == ActionError::InvalidTarget(rat)
        ));
        assert_eq!(
            engine.engage(hero, hero, Instant::now()).map_err(|e| e.message()),
            Err(Some("You cannot attack that.".into()))
        );
    }

    #[test]
    fn engage_puts_the_target_on_top_and_starts_fighting() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let rat = fixture.spawn("rat");
        let wolf = fixture.spawn("wolf");
        fixture.world.add_opponent(hero, wolf, Some(9));
        let mut engine = engine(&mut fixture);

        engine.engage(hero, rat, Instant::now()).unwrap();

        let state = engine.world().actor(hero).unwrap();
        assert_eq!(state.opponents.top_aggro().map(|top| top.aggressor), Some(rat));
        assert_eq!(state.opponents.aggro_of(rat), Some(10));
        assert!(state.action.kind().is_combat());
        assert!(engine.world().actor(rat).unwrap().opponents.has_opponent(hero));
    }

    #[test]
    fn tick_all_runs_a_fight_to_the_death() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let rat = fixture.spawn("rat");
        fixture.wield(hero, &sword(), EquipmentSlot::RightHand);
        fixture.actor_mut(rat).set_health(3);
        fixture.rolls([15, 6]);
        let now = Instant::now();
        let mut engine = engine(&mut fixture);

        engine.engage(hero, rat, now).unwrap();
        let summary = engine.tick_all(now + Duration::from_secs(60));

        assert_eq!(
            summary,
            TickSummary {
                performed: 1,
                finished: 1,
                failed: 0,
            }
        );
        assert_eq!(engine.world().location_of(rat), None);
        assert!(engine.take_events().iter().any(|event| matches!(
            event,
            GameEvent::Combat(CombatEvent::Death { victim, killer: Some(killer), .. })
                if *victim == rat && *killer == hero
        )));
        assert_eq!(engine.describe(hero), Some("waiting"));
    }

    #[test]
    fn regeneration_skips_the_dead() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let ghost = fixture.spawn("ghost");
        fixture.actor_mut(hero).set_health(10);
        fixture.actor_mut(ghost).set_health(10);
        fixture.actor_mut(ghost).location = None;
        let mut engine = engine(&mut fixture);

        engine.regenerate_all();

        assert!(engine.world().actor(hero).unwrap().health() > 10);
        assert_eq!(engine.world().actor(ghost).unwrap().health(), 10);
    }

    #[test]
    fn unknown_actors_are_reported() {
        let mut fixture = Fixture::new();
        let mut engine = engine(&mut fixture);
        let ghost = EntityId(42);

        assert_eq!(
            engine.tick(ghost, Instant::now()),
            Err(EngineError::UnknownActor(ghost))
        );
        assert_eq!(engine.stop(ghost), Err(EngineError::UnknownActor(ghost)));
    }
}
