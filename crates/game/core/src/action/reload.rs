//! Loading a magazine into a ranged weapon.

use std::time::Instant;

use crate::env::GameEnv;
use crate::event::Outbox;
use crate::state::{Ability, ActorState, EntityId, EquipmentSlot, ItemId, ItemKind, World};
use crate::stats::ability_log;

use super::{ActionBehavior, ActionError, ActionType, Outcome, acting, game_config};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReloadAction {
    /// Ranged weapon wielded in a hand.
    pub weapon: ItemId,
    /// Magazine carried in the inventory.
    pub magazine: ItemId,
}

impl ReloadAction {
    pub fn new(weapon: ItemId, magazine: ItemId) -> Self {
        Self { weapon, magazine }
    }

    fn validate(&self, world: &World, actor: &ActorState) -> Result<(), ActionError> {
        let wielded = EquipmentSlot::HANDS
            .iter()
            .any(|slot| actor.equipment.get(*slot) == Some(self.weapon));
        let weapon = world
            .item(self.weapon)
            .filter(|_| wielded)
            .ok_or(ActionError::NotReloadable)?;
        let ammo = weapon
            .weapon()
            .and_then(|profile| profile.ammo)
            .ok_or(ActionError::NotReloadable)?;

        if !actor.inventory.contains(&self.magazine) {
            return Err(ActionError::NoMagazine);
        }
        let magazine = world.item(self.magazine).ok_or(ActionError::NoMagazine)?;
        match magazine.kind {
            ItemKind::Magazine { ammo: loaded, .. } if loaded == ammo => Ok(()),
            _ => Err(ActionError::IncompatibleMagazine {
                magazine: magazine.name.clone(),
                weapon: weapon.name.clone(),
            }),
        }
    }
}

impl ActionBehavior for ReloadAction {
    fn action_type(&self) -> ActionType {
        ActionType::Reloading
    }

    fn check(&self, world: &World, _env: &GameEnv<'_>, actor: EntityId) -> Result<(), ActionError> {
        self.validate(world, acting(world, actor)?)
    }

    fn cooldown(
        &self,
        world: &World,
        env: &GameEnv<'_>,
        actor: EntityId,
    ) -> Result<u32, ActionError> {
        let agility = acting(world, actor)?.ability(Ability::Agility);
        let base = game_config(env)?.reload_base_cooldown;
        Ok(base.saturating_sub(ability_log(agility, 0, 1)).max(1))
    }

    fn start_message(&self, world: &World, _env: &GameEnv<'_>) -> Option<String> {
        let weapon = world.item(self.weapon)?;
        Some(format!("You start reloading {}.", weapon.name))
    }

    fn stop_message(&self, _env: &GameEnv<'_>) -> String {
        "You stop reloading.".to_owned()
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

        let (previous, name) = match world.item_mut(self.weapon) {
            Some(weapon) => (std::mem::take(&mut weapon.contents), weapon.name.clone()),
            None => return Err(ActionError::NotReloadable),
        };
        if let Some(state) = world.actor_mut(actor) {
            state.inventory.retain(|held| *held != self.magazine);
            state.inventory.extend(previous);
        }
        if let Some(weapon) = world.item_mut(self.weapon) {
            weapon.contents.push(self.magazine);
        }

        outbox.notify(actor, format!("You have reloaded {name}."));
        Ok(Outcome::Finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Abilities, AmmoKind, ItemTemplate};
    use crate::testing::{Fixture, bow, quiver, sword};

    #[test]
    fn reload_swaps_the_loaded_magazine() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let weapon = fixture.wield(hero, &bow(), EquipmentSlot::RightHand);
        let empty = fixture.give(hero, &quiver(0), 1);
        let full = fixture.give(hero, &quiver(12), 1);

        fixture
            .run(&mut ReloadAction::new(weapon, empty), hero, Instant::now())
            .unwrap();
        let result = fixture.run(&mut ReloadAction::new(weapon, full), hero, Instant::now());

        assert_eq!(result, Ok(Outcome::Finished));
        assert_eq!(fixture.world.item(weapon).map(|w| w.contents.clone()), Some(vec![full]));
        let inventory = &fixture.actor(hero).inventory;
        assert!(inventory.contains(&empty));
        assert!(!inventory.contains(&full));
        assert_eq!(fixture.notes(hero).last(), Some(&"You have reloaded a bow."));
    }

    #[test]
    fn melee_weapons_cannot_be_reloaded() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let blade = fixture.wield(hero, &sword(), EquipmentSlot::RightHand);
        let arrows = fixture.give(hero, &quiver(5), 1);

        let reload = ReloadAction::new(blade, arrows);
        assert_eq!(
            reload.check(&fixture.world, &fixture.env(), hero),
            Err(ActionError::NotReloadable)
        );
    }

    #[test]
    fn weapon_must_be_wielded() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let weapon = fixture.give(hero, &bow(), 1);
        let arrows = fixture.give(hero, &quiver(5), 1);

        let reload = ReloadAction::new(weapon, arrows);
        assert_eq!(
            reload.check(&fixture.world, &fixture.env(), hero),
            Err(ActionError::NotReloadable)
        );
    }

    #[test]
    fn ammunition_must_match() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let weapon = fixture.wield(hero, &bow(), EquipmentSlot::RightHand);
        let bolts = fixture.give(
            hero,
            &ItemTemplate::new(
                "a bolt case",
                1,
                ItemKind::Magazine {
                    ammo: AmmoKind::Bolt,
                    rounds: 6,
                    capacity: 6,
                },
            ),
            1,
        );

        let reload = ReloadAction::new(weapon, bolts);
        assert_eq!(
            reload.check(&fixture.world, &fixture.env(), hero),
            Err(ActionError::IncompatibleMagazine {
                magazine: "a bolt case".into(),
                weapon: "a bow".into(),
            })
        );
    }

    #[test]
    fn agility_shortens_reloading_but_not_below_one_second() {
        let mut fixture = Fixture::new();
        let clumsy = fixture.spawn("clumsy");
        let nimble = fixture.spawn_with("nimble", Abilities::new(10, 60, 10, 10, 10).unwrap());
        let reload = ReloadAction::new(ItemId(1), ItemId(2));

        assert_eq!(reload.cooldown(&fixture.world, &fixture.env(), clumsy), Ok(3));
        assert_eq!(reload.cooldown(&fixture.world, &fixture.env(), nimble), Ok(2));

        fixture.config.reload_base_cooldown = 1;
        assert_eq!(reload.cooldown(&fixture.world, &fixture.env(), nimble), Ok(1));
    }
}
