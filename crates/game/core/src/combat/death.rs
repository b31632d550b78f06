//! Death handling.

use crate::action::Action;
use crate::config::GameConfig;
use crate::event::{CombatEvent, Outbox};
use crate::state::{EntityId, ItemFlags, ItemId, ItemKind, ItemTemplate, World};

/// Turns `victim` into a corpse lying in its room.
///
/// The corpse holds everything the victim carried and wore. The victim is
/// dropped from every opponent list, loses its own, reverts to waiting and
/// is taken out of its room. It stays in the arena so handles to it keep
/// resolving to "not located" instead of dangling.
///
/// Returns the corpse, or `None` if the victim was already gone.
pub fn kill(
    world: &mut World,
    config: &GameConfig,
    victim: EntityId,
    killer: Option<EntityId>,
    outbox: &mut Outbox,
) -> Option<ItemId> {
    let (name, weight, room) = {
        let state = world.actor(victim)?;
        (state.name.clone(), state.weight, state.location?)
    };

    let template = ItemTemplate::new(config.corpse_name_for(&name), weight, ItemKind::Corpse)
        .with_flags(ItemFlags::CONTAINER);
    let corpse = world.create_item(&template, 1);

    let mut belongings = Vec::new();
    if let Some(state) = world.actor_mut(victim) {
        belongings.append(&mut state.inventory);
        belongings.extend(state.equipment.clear());
        state.opponents.reset_list();
        state.action = Action::idle();
        state.location = None;
    }
    if let Some(item) = world.item_mut(corpse) {
        item.contents = belongings;
    }
    world.forget_opponent(victim);
    world.put_on_ground(room, corpse);

    outbox.broadcast(room, format!("{name} screams in pain and then dies!"), [victim]);
    outbox.combat(CombatEvent::Death {
        victim,
        killer,
        corpse,
    });
    tracing::info!(
        victim = %victim,
        killer = ?killer,
        room = %room,
        corpse = %corpse,
        "actor died"
    );
    Some(corpse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EquipmentSlot;
    use crate::testing::{Fixture, dagger, sword};

    #[test]
    fn corpse_carries_inventory_and_equipment() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let rat = fixture.spawn("rat");
        let blade = fixture.wield(rat, &sword(), EquipmentSlot::RightHand);
        let spare = fixture.give(rat, &dagger(), 1);
        fixture.engage(hero, rat);

        let corpse = kill(
            &mut fixture.world,
            &fixture.config,
            rat,
            Some(hero),
            &mut fixture.outbox,
        )
        .unwrap();

        let item = fixture.world.item(corpse).unwrap();
        assert_eq!(item.name, "the corpse of rat");
        assert_eq!(item.kind, ItemKind::Corpse);
        assert_eq!(item.contents, vec![spare, blade]);
        assert_eq!(fixture.world.ground(Fixture::START), &[corpse]);

        let dead = fixture.actor(rat);
        assert_eq!(dead.location, None);
        assert!(dead.inventory.is_empty());
        assert!(dead.equipment.is_empty());
        assert!(!dead.opponents.has_opponents());
        assert!(!fixture.actor(hero).opponents.has_opponent(rat));
    }

    #[test]
    fn room_hears_the_death_scream() {
        let mut fixture = Fixture::new();
        let rat = fixture.spawn("rat");

        kill(&mut fixture.world, &fixture.config, rat, None, &mut fixture.outbox);

        let events = fixture.outbox.drain();
        assert!(events.iter().any(|event| matches!(
            event,
            crate::event::GameEvent::Broadcast { text, except, .. }
                if text == "rat screams in pain and then dies!" && except == &vec![rat]
        )));
        assert!(events.iter().any(|event| matches!(
            event,
            crate::event::GameEvent::Combat(CombatEvent::Death { victim, killer: None, .. })
                if *victim == rat
        )));
    }

    #[test]
    fn killing_the_dead_is_a_no_op() {
        let mut fixture = Fixture::new();
        let rat = fixture.spawn("rat");
        kill(&mut fixture.world, &fixture.config, rat, None, &mut fixture.outbox);
        fixture.outbox.drain();

        assert_eq!(
            kill(&mut fixture.world, &fixture.config, rat, None, &mut fixture.outbox),
            None
        );
        assert!(fixture.outbox.is_empty());
    }
}
