//! Crafting items from a production recipe.

use std::time::Instant;

use crate::env::{GameEnv, Production, ProductionId};
use crate::event::Outbox;
use crate::state::{EntityId, ItemId, World};
use crate::stats::StatBlock;

use super::{
    ActionBehavior, ActionError, ActionType, Outcome, acting, base_stamina_cost, current_room,
    ensure_stamina, materials,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CraftAction {
    pub production: ProductionId,
    pub tools: Vec<ItemId>,
    pub ingredients: Vec<ItemId>,
}

impl CraftAction {
    pub fn new(production: ProductionId, tools: Vec<ItemId>, ingredients: Vec<ItemId>) -> Self {
        Self {
            production,
            tools,
            ingredients,
        }
    }

    fn recipe<'a>(&self, env: &GameEnv<'a>) -> Result<&'a Production, ActionError> {
        env.productions()?
            .production(self.production)
            .ok_or(ActionError::UnknownProduction)
    }
}

impl ActionBehavior for CraftAction {
    fn action_type(&self) -> ActionType {
        ActionType::Crafting
    }

    fn check(&self, world: &World, env: &GameEnv<'_>, actor: EntityId) -> Result<(), ActionError> {
        let recipe = self.recipe(env)?;
        let crafter = acting(world, actor)?;
        current_room(crafter)?;
        materials::validate(
            world,
            crafter,
            &recipe.requirements,
            &self.tools,
            &self.ingredients,
        )?;
        ensure_stamina(crafter, base_stamina_cost(world, crafter), "to work")
    }

    fn cooldown(
        &self,
        _world: &World,
        env: &GameEnv<'_>,
        _actor: EntityId,
    ) -> Result<u32, ActionError> {
        Ok(self.recipe(env)?.time)
    }

    fn start_message(&self, _world: &World, env: &GameEnv<'_>) -> Option<String> {
        let recipe = self.recipe(env).ok()?;
        Some(format!("{} {}.", recipe.profession.start, recipe.outcome.name))
    }

    fn stop_message(&self, env: &GameEnv<'_>) -> String {
        self.recipe(env)
            .map(|recipe| recipe.profession.interrupt.clone())
            .unwrap_or_else(|_| "You stop crafting.".to_owned())
    }

    fn perform(
        &mut self,
        world: &mut World,
        env: &GameEnv<'_>,
        actor: EntityId,
        _now: Instant,
        outbox: &mut Outbox,
    ) -> Result<Outcome, ActionError> {
        self.check(world, env, actor)?;
        let recipe = self.recipe(env)?;
        let crafter = acting(world, actor)?;
        let cost = base_stamina_cost(world, crafter);
        let room = current_room(crafter)?;

        if let Some(crafter) = world.actor_mut(actor) {
            crafter.rem_stamina(cost, true);
        }
        materials::consume(world, actor, &recipe.requirements, &self.ingredients);

        let mut dropped = false;
        for _ in 0..recipe.quantity {
            let item = world.create_item(&recipe.outcome, 1);
            let weight = world.item_weight(item);
            let fits = world
                .actor(actor)
                .is_some_and(|crafter| StatBlock::of(world, crafter).can_carry(weight));
            if fits && world.give(actor, item).is_ok() {
                continue;
            }
            world.put_on_ground(room, item);
            dropped = true;
        }
        materials::wear_tools(world, actor, &self.tools, outbox);

        outbox.notify(
            actor,
            format!(
                "{} {} {}.",
                recipe.profession.finish, recipe.quantity, recipe.outcome.name
            ),
        );
        if dropped {
            outbox.notify(
                actor,
                "Since you cannot carry them, some of the items have been placed on the ground.",
            );
        }
        Ok(Outcome::Finished)
    }
}
