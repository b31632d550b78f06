//! Actor state.
//!
//! An actor owns its abilities, resource meters, inventory and equipment
//! handles, its [`OpponentList`] and its current [`Action`]. Health and
//! stamina are private so every mutation goes through the saturating
//! helpers below and `health <= max_health`, `stamina <= max_stamina` hold at
//! all times.

pub mod equipment;

pub use equipment::{Equipment, EquipmentSlot};

use super::{Abilities, Ability, AbilityError, EntityId, ItemId, Posture, RoomId, StatusEffects};
use crate::action::Action;
use crate::combat::OpponentList;
use crate::stats;

/// Who drives the actor. Mobiles receive `onFight` hooks for scripting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    #[default]
    Player,
    Mobile,
}

/// Parameters for spawning an actor into the world.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: ActorKind,
    pub level: u32,
    pub abilities: Abilities,
    pub weight: u32,
    pub location: Option<RoomId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub posture: Posture,
}

impl ActorSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ActorKind::Player,
            level: 1,
            abilities: Abilities::default(),
            weight: 70,
            location: None,
            posture: Posture::Stand,
        }
    }

    #[must_use]
    pub fn mobile(mut self) -> Self {
        self.kind = ActorKind::Mobile;
        self
    }

    #[must_use]
    pub fn level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn abilities(mut self, abilities: Abilities) -> Self {
        self.abilities = abilities;
        self
    }

    #[must_use]
    pub fn weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn at(mut self, room: RoomId) -> Self {
        self.location = Some(room);
        self
    }

    #[must_use]
    pub fn posture(mut self, posture: Posture) -> Self {
        self.posture = posture;
        self
    }
}

#[derive(Clone, Debug)]
pub struct ActorState {
    pub id: EntityId,
    pub name: String,
    pub kind: ActorKind,
    pub level: u32,
    pub weight: u32,
    pub posture: Posture,
    /// Room the actor stands in. `None` once it has died or left the world.
    pub location: Option<RoomId>,
    pub inventory: Vec<ItemId>,
    pub equipment: Equipment,
    pub opponents: OpponentList,
    pub action: Action,
    pub effects: StatusEffects,
    abilities: Abilities,
    health: u32,
    stamina: u32,
}

impl ActorState {
    /// Creates an actor at full health and stamina.
    pub fn new(id: EntityId, spec: ActorSpec) -> Self {
        let mut actor = Self {
            id,
            name: spec.name,
            kind: spec.kind,
            level: spec.level,
            weight: spec.weight,
            posture: spec.posture,
            location: spec.location,
            inventory: Vec::new(),
            equipment: Equipment::default(),
            opponents: OpponentList::default(),
            action: Action::idle(),
            effects: StatusEffects::default(),
            abilities: spec.abilities,
            health: 0,
            stamina: 0,
        };
        actor.health = actor.max_health();
        actor.stamina = actor.max_stamina();
        actor
    }

    pub fn abilities(&self) -> &Abilities {
        &self.abilities
    }

    pub fn ability(&self, ability: Ability) -> u32 {
        self.abilities.get(ability)
    }

    /// Changes an ability score, re-clamping the meters it bounds.
    pub fn set_ability(&mut self, ability: Ability, value: u32) -> Result<(), AbilityError> {
        self.abilities.set(ability, value)?;
        self.health = self.health.min(self.max_health());
        self.stamina = self.stamina.min(self.max_stamina());
        Ok(())
    }

    pub fn is_located(&self) -> bool {
        self.location.is_some()
    }

    pub fn holds(&self, item: ItemId) -> bool {
        self.inventory.contains(&item) || self.equipment.contains(item)
    }

    /// Takes an item out of the inventory or the equipment.
    pub fn release(&mut self, item: ItemId) -> bool {
        if let Some(index) = self.inventory.iter().position(|held| *held == item) {
            self.inventory.remove(index);
            return true;
        }
        match self.equipment.slot_of(item) {
            Some(slot) => self.equipment.remove(slot).is_some(),
            None => false,
        }
    }

    // ===== health =====

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        stats::max_health(self.ability(Ability::Constitution))
    }

    /// Adds health. Without `force`, refuses (returns false) when the result
    /// would exceed the maximum; with `force`, clamps to the maximum.
    pub fn add_health(&mut self, amount: u32, force: bool) -> bool {
        let max = self.max_health();
        add_bounded(&mut self.health, amount, max, force)
    }

    /// Removes health. Without `force`, refuses (returns false) when there is
    /// not enough; with `force`, saturates at zero.
    pub fn rem_health(&mut self, amount: u32, force: bool) -> bool {
        rem_bounded(&mut self.health, amount, force)
    }

    pub fn set_health(&mut self, value: u32) {
        self.health = value.min(self.max_health());
    }

    /// Coarse description of the health meter shown to other players.
    pub fn condition(&self) -> stats::HealthCondition {
        stats::HealthCondition::from_meter(self.health, self.max_health())
    }

    // ===== stamina =====

    pub fn stamina(&self) -> u32 {
        self.stamina
    }

    pub fn max_stamina(&self) -> u32 {
        stats::max_stamina(self.ability(Ability::Constitution))
    }

    pub fn add_stamina(&mut self, amount: u32, force: bool) -> bool {
        let max = self.max_stamina();
        add_bounded(&mut self.stamina, amount, max, force)
    }

    pub fn rem_stamina(&mut self, amount: u32, force: bool) -> bool {
        rem_bounded(&mut self.stamina, amount, force)
    }

    pub fn set_stamina(&mut self, value: u32) {
        self.stamina = value.min(self.max_stamina());
    }

    /// Applies one regeneration step for health and stamina.
    pub fn regenerate(&mut self) {
        let con = self.ability(Ability::Constitution);
        let health = stats::health_regen(con, self.posture);
        let stamina = stats::stamina_regen(con, self.posture);
        self.add_health(health, true);
        self.add_stamina(stamina, true);
    }
}

fn add_bounded(meter: &mut u32, amount: u32, max: u32, force: bool) -> bool {
    let result = meter.saturating_add(amount);
    if result > max {
        if !force {
            return false;
        }
        *meter = max;
    } else {
        *meter = result;
    }
    true
}

fn rem_bounded(meter: &mut u32, amount: u32, force: bool) -> bool {
    match meter.checked_sub(amount) {
        Some(result) => *meter = result,
        None if force => *meter = 0,
        None => return false,
    }
    true
}
