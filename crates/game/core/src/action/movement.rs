//! Walking through an exit.

use std::time::Instant;

use crate::env::GameEnv;
use crate::event::Outbox;
use crate::state::{ActorState, Direction, EntityId, Posture, Relocation, RoomId, World};

use super::{
    ActionBehavior, ActionError, ActionType, Outcome, acting, base_stamina_cost, current_room,
    ensure_stamina, game_config,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveAction {
    pub direction: Direction,
}

impl MoveAction {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }

    /// Validates the step and returns the destination and its stamina cost.
    fn plan(
        &self,
        world: &World,
        env: &GameEnv<'_>,
        actor: &ActorState,
    ) -> Result<(RoomId, u32), ActionError> {
        let room = current_room(actor)?;
        match actor.posture {
            Posture::Sit | Posture::Rest => return Err(ActionError::MustStandUp),
            Posture::Sleep => return Err(ActionError::MustWakeUp),
            _ => {}
        }
        let destination = env
            .map()?
            .exit(room, self.direction)
            .ok_or(ActionError::NoExit)?;

        let engaged_here = actor
            .opponents
            .iter()
            .any(|opponent| world.location_of(opponent.aggressor) == Some(room));
        if engaged_here {
            return Err(ActionError::InCloseCombat);
        }

        let cost = move_stamina_cost(world, actor);
        ensure_stamina(actor, cost, "to move")?;
        Ok((destination, cost))
    }
}

/// Base stamina cost scaled by posture.
fn move_stamina_cost(world: &World, actor: &ActorState) -> u32 {
    let base = f64::from(base_stamina_cost(world, actor));
    (base * actor.posture.move_stamina_factor()).floor() as u32
}

impl ActionBehavior for MoveAction {
    fn action_type(&self) -> ActionType {
        ActionType::Moving
    }

    fn check(&self, world: &World, env: &GameEnv<'_>, actor: EntityId) -> Result<(), ActionError> {
        self.plan(world, env, acting(world, actor)?).map(|_| ())
    }

    fn cooldown(
        &self,
        world: &World,
        env: &GameEnv<'_>,
        actor: EntityId,
    ) -> Result<u32, ActionError> {
        let posture = acting(world, actor)?.posture;
        Ok(game_config(env)?.move_cooldown(posture))
    }

    fn stop_message(&self, _env: &GameEnv<'_>) -> String {
        "You stop moving.".to_owned()
    }

    fn perform(
        &mut self,
        world: &mut World,
        env: &GameEnv<'_>,
        actor: EntityId,
        _now: Instant,
        outbox: &mut Outbox,
    ) -> Result<Outcome, ActionError> {
        let state = acting(world, actor)?;
        let (destination, cost) = self.plan(world, env, state)?;
        let name = state.name.clone();

        if let Some(state) = world.actor_mut(actor) {
            state.rem_stamina(cost, true);
        }
        let direction = self.direction;
        world
            .relocate(
                actor,
                destination,
                Relocation {
                    depart: format!("{name} goes {direction}."),
                    arrive: format!("{name} arrives from {}.", direction.arrival_phrase()),
                    self_message: format!("You go {direction}."),
                },
                outbox,
            )
            .map_err(|_| ActionError::Nowhere)?;
        Ok(Outcome::Finished)
    }
}
