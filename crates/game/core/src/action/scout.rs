//! Looking for other actors nearby.

use std::time::{Duration, Instant};

use crate::env::GameEnv;
use crate::event::Outbox;
use crate::state::{Ability, EntityId, StatusEffectKind, World};
use crate::stats::{ability_log, ability_modifier, view_distance};

use super::{
    ActionBehavior, ActionError, ActionType, Outcome, acting, base_stamina_cost, current_room,
    ensure_stamina,
};

const BASE_SCOUT_COOLDOWN: u32 = 3;
const BASE_CLEAR_TARGETS_SECONDS: u32 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoutAction;

impl ScoutAction {
    /// Names of located actors within view distance, excluding the scout.
    fn sighted(
        world: &World,
        env: &GameEnv<'_>,
        actor: EntityId,
    ) -> Result<Vec<String>, ActionError> {
        let scout = acting(world, actor)?;
        let origin = current_room(scout)?;
        let reach = view_distance(scout.ability(Ability::Perception));
        let map = env.map()?;

        Ok(world
            .actors()
            .filter(|other| other.id != actor)
            .filter_map(|other| other.location.map(|room| (other, room)))
            .filter(|(_, room)| map.is_at_range(origin, *room, reach))
            .map(|(other, _)| other.name.clone())
            .collect())
    }
}

impl ActionBehavior for ScoutAction {
    fn action_type(&self) -> ActionType {
        ActionType::Scouting
    }

    fn check(&self, world: &World, _env: &GameEnv<'_>, actor: EntityId) -> Result<(), ActionError> {
        let scout = acting(world, actor)?;
        current_room(scout)?;
        ensure_stamina(scout, base_stamina_cost(world, scout), "to scout the area")
    }

    fn cooldown(
        &self,
        world: &World,
        _env: &GameEnv<'_>,
        actor: EntityId,
    ) -> Result<u32, ActionError> {
        let perception = acting(world, actor)?.ability(Ability::Perception);
        Ok(BASE_SCOUT_COOLDOWN.saturating_sub(ability_log(perception, 0, 1)))
    }

    fn start_message(&self, _world: &World, _env: &GameEnv<'_>) -> Option<String> {
        Some("You start scouting the area...".to_owned())
    }

    fn stop_message(&self, _env: &GameEnv<'_>) -> String {
        "You stop scouting the area.".to_owned()
    }

    fn perform(
        &mut self,
        world: &mut World,
        env: &GameEnv<'_>,
        actor: EntityId,
        now: Instant,
        outbox: &mut Outbox,
    ) -> Result<Outcome, ActionError> {
        self.check(world, env, actor)?;
        let sighted = Self::sighted(world, env, actor)?;
        if sighted.is_empty() {
            return Err(ActionError::FoundNothing);
        }

        let scout = acting(world, actor)?;
        let cost = base_stamina_cost(world, scout);
        let focus = BASE_CLEAR_TARGETS_SECONDS
            .saturating_add(ability_modifier(scout.ability(Ability::Perception)));
        if let Some(scout) = world.actor_mut(actor) {
            scout.rem_stamina(cost, true);
            scout.effects.apply(
                StatusEffectKind::ClearTargets,
                now + Duration::from_secs(u64::from(focus)),
            );
        }

        let mut text = String::from("Nearby you can see...");
        for name in &sighted {
            text.push_str("\n    ");
            text.push_str(name);
        }
        outbox.notify(actor, text);
        Ok(Outcome::Finished)
    }
}
