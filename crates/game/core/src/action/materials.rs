//! Tool and ingredient handling shared by crafting and building.

use crate::env::Requirements;
use crate::event::Outbox;
use crate::state::{ActorState, EntityId, ItemId, World};

use super::ActionError;

/// Checks that the chosen tools and ingredients cover the requirements.
pub(crate) fn validate(
    world: &World,
    actor: &ActorState,
    requirements: &Requirements,
    tools: &[ItemId],
    ingredients: &[ItemId],
) -> Result<(), ActionError> {
    for tool in tools {
        let usable = actor.holds(*tool)
            && world
                .item(*tool)
                .is_some_and(|item| item.tool_kind().is_some());
        if !usable {
            return Err(ActionError::MissingItem(*tool));
        }
    }
    for ingredient in ingredients {
        let usable = actor.inventory.contains(ingredient)
            && world
                .item(*ingredient)
                .is_some_and(|item| item.resource_kind().is_some());
        if !usable {
            return Err(ActionError::MissingItem(*ingredient));
        }
    }

    for needed in &requirements.tools {
        let covered = tools
            .iter()
            .filter_map(|tool| world.item(*tool))
            .any(|item| item.tool_kind() == Some(*needed));
        if !covered {
            return Err(ActionError::MissingTools);
        }
    }
    for (kind, quantity) in &requirements.ingredients {
        let available = ingredients
            .iter()
            .filter_map(|ingredient| world.item(*ingredient))
            .filter(|item| item.resource_kind() == Some(*kind))
            .fold(0u32, |total, item| total.saturating_add(item.quantity));
        if available < *quantity {
            return Err(ActionError::NotEnough(*kind));
        }
    }
    Ok(())
}

/// Takes the required quantities out of the ingredient stacks, destroying
/// stacks that run empty. Call [`validate`] first.
pub(crate) fn consume(
    world: &mut World,
    actor: EntityId,
    requirements: &Requirements,
    ingredients: &[ItemId],
) {
    for (kind, quantity) in &requirements.ingredients {
        let mut needed = *quantity;
        for ingredient in ingredients {
            if needed == 0 {
                break;
            }
            let Some(item) = world.item_mut(*ingredient) else {
                continue;
            };
            if item.resource_kind() != Some(*kind) {
                continue;
            }
            let taken = item.quantity.min(needed);
            item.quantity -= taken;
            needed -= taken;
            if item.quantity == 0 {
                if let Some(state) = world.actor_mut(actor) {
                    state.release(*ingredient);
                }
                world.destroy_item(*ingredient);
            }
        }
    }
}

/// Wears every tool down by one point; broken tools are destroyed.
pub(crate) fn wear_tools(world: &mut World, actor: EntityId, tools: &[ItemId], outbox: &mut Outbox) {
    for tool in tools {
        let Some(item) = world.item_mut(*tool) else {
            continue;
        };
        if !item.decay() {
            continue;
        }
        let name = item.name.clone();
        if let Some(state) = world.actor_mut(actor) {
            state.release(*tool);
        }
        world.destroy_item(*tool);
        outbox.notify(actor, format!("Your {name} breaks."));
    }
}
