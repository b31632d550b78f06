//! Raising a building in the current room.

use std::time::Instant;

use crate::env::{Building, BuildingId, GameEnv};
use crate::event::Outbox;
use crate::state::{EntityId, ItemId, ItemKind, World};

use super::{
    ActionBehavior, ActionError, ActionType, Outcome, acting, base_stamina_cost, current_room,
    ensure_stamina, materials,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildAction {
    pub building: BuildingId,
    /// The building kit carried in the inventory.
    pub item: ItemId,
    pub tools: Vec<ItemId>,
    pub ingredients: Vec<ItemId>,
}

impl BuildAction {
    pub fn new(
        building: BuildingId,
        item: ItemId,
        tools: Vec<ItemId>,
        ingredients: Vec<ItemId>,
    ) -> Self {
        Self {
            building,
            item,
            tools,
            ingredients,
        }
    }

    fn schematic<'a>(&self, env: &GameEnv<'a>) -> Result<&'a Building, ActionError> {
        env.productions()?
            .building(self.building)
            .ok_or(ActionError::UnknownBuilding)
    }
}

impl ActionBehavior for BuildAction {
    fn action_type(&self) -> ActionType {
        ActionType::Building
    }

    fn check(&self, world: &World, env: &GameEnv<'_>, actor: EntityId) -> Result<(), ActionError> {
        let schematic = self.schematic(env)?;
        let builder = acting(world, actor)?;
        current_room(builder)?;

        let has_kit = builder.inventory.contains(&self.item)
            && world
                .item(self.item)
                .is_some_and(|item| item.kind == ItemKind::Building);
        if !has_kit {
            return Err(ActionError::NoBuildingItem);
        }
        if self.tools.is_empty() {
            return Err(ActionError::MissingTools);
        }
        materials::validate(
            world,
            builder,
            &schematic.requirements,
            &self.tools,
            &self.ingredients,
        )?;
        ensure_stamina(builder, base_stamina_cost(world, builder), "to build")
    }

    fn cooldown(
        &self,
        _world: &World,
        env: &GameEnv<'_>,
        _actor: EntityId,
    ) -> Result<u32, ActionError> {
        Ok(self.schematic(env)?.time)
    }

    fn start_message(&self, _world: &World, env: &GameEnv<'_>) -> Option<String> {
        let schematic = self.schematic(env).ok()?;
        Some(format!("You start building {}.", schematic.name))
    }

    fn stop_message(&self, _env: &GameEnv<'_>) -> String {
        "You stop building.".to_owned()
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
        let schematic = self.schematic(env)?;
        let builder = acting(world, actor)?;
        let cost = base_stamina_cost(world, builder);
        let room = current_room(builder)?;

        if let Some(builder) = world.actor_mut(actor) {
            builder.rem_stamina(cost, true);
            builder.release(self.item);
        }
        materials::consume(world, actor, &schematic.requirements, &self.ingredients);
        materials::wear_tools(world, actor, &self.tools, outbox);
        world.put_on_ground(room, self.item);

        outbox.notify(actor, format!("You have finished building {}.", schematic.name));
        Ok(Outcome::Finished)
    }
}
