//! Authoritative world arena.
//!
//! Actors and items live in id-keyed maps and reference each other only by
//! handle. A handle that no longer resolves, or resolves to an actor without
//! a location, is treated as gone; opponent lists prune such entries instead
//! of holding dangling references.
pub mod error;
pub mod types;

use std::collections::BTreeMap;

pub use error::WorldError;
pub use types::{
    Abilities, Ability, AbilityError, ActorKind, ActorSpec, ActorState, AmmoKind, Direction,
    EntityId, Equipment, EquipmentSlot, ItemFlags, ItemId, ItemKind, ItemState, ItemTemplate,
    Posture, ResourceKind, RoomId, StatusEffect, StatusEffectKind, StatusEffects, ToolKind,
    WeaponProfile,
};

use crate::combat::opponents;
use crate::event::Outbox;

/// Messages shown when an actor changes rooms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relocation {
    /// Broadcast to the room being left.
    pub depart: String,
    /// Broadcast to the room being entered.
    pub arrive: String,
    /// Sent to the moving actor.
    pub self_message: String,
}

#[derive(Clone, Debug)]
pub struct World {
    /// RNG seed for deterministic rolls. Set once at creation.
    pub game_seed: u64,
    /// Incremented for every resolved action so each one rolls fresh dice.
    nonce: u64,
    next_actor_id: u32,
    next_item_id: u32,
    actors: BTreeMap<EntityId, ActorState>,
    items: BTreeMap<ItemId, ItemState>,
    ground: BTreeMap<RoomId, Vec<ItemId>>,
}

impl World {
    pub fn new(game_seed: u64) -> Self {
        Self {
            game_seed,
            nonce: 0,
            next_actor_id: 1,
            next_item_id: 1,
            actors: BTreeMap::new(),
            items: BTreeMap::new(),
            ground: BTreeMap::new(),
        }
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Returns the current nonce and advances it.
    pub fn next_nonce(&mut self) -> u64 {
        let nonce = self.nonce;
        self.nonce = self.nonce.wrapping_add(1);
        nonce
    }

    // ===== actors =====

    pub fn spawn_actor(&mut self, spec: ActorSpec) -> EntityId {
        let id = EntityId(self.next_actor_id);
        self.next_actor_id = self.next_actor_id.wrapping_add(1);
        self.actors.insert(id, ActorState::new(id, spec));
        id
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.actors.get_mut(&id)
    }

    pub fn try_actor(&self, id: EntityId) -> Result<&ActorState, WorldError> {
        self.actor(id).ok_or(WorldError::UnknownActor(id))
    }

    pub fn try_actor_mut(&mut self, id: EntityId) -> Result<&mut ActorState, WorldError> {
        self.actor_mut(id).ok_or(WorldError::UnknownActor(id))
    }

    pub fn actors(&self) -> impl Iterator<Item = &ActorState> {
        self.actors.values()
    }

    pub fn actors_mut(&mut self) -> impl Iterator<Item = &mut ActorState> {
        self.actors.values_mut()
    }

    /// Actor ids in ascending order.
    pub fn actor_ids(&self) -> Vec<EntityId> {
        self.actors.keys().copied().collect()
    }

    pub fn location_of(&self, id: EntityId) -> Option<RoomId> {
        self.actor(id).and_then(|actor| actor.location)
    }

    /// Whether a handle still names an actor that is somewhere in the world.
    pub fn is_resolvable(&self, id: EntityId) -> bool {
        self.location_of(id).is_some()
    }

    pub fn actors_in_room(&self, room: RoomId) -> impl Iterator<Item = &ActorState> {
        self.actors
            .values()
            .filter(move |actor| actor.location == Some(room))
    }

    /// Adds `who` to `owner`'s opponents, defaulting the aggression to the
    /// level difference between the two.
    pub fn add_opponent(&mut self, owner: EntityId, who: EntityId, initial: Option<u32>) -> bool {
        let Some(who_level) = self.actor(who).map(|actor| actor.level) else {
            return false;
        };
        let Some(owner) = self.actor_mut(owner) else {
            return false;
        };
        let aggro = initial.unwrap_or_else(|| opponents::default_aggro(owner.level, who_level));
        owner.opponents.add_opponent(who, aggro)
    }

    /// Removes `who` from every opponent list in the world.
    pub fn forget_opponent(&mut self, who: EntityId) {
        for actor in self.actors.values_mut() {
            actor.opponents.remove_opponent(who);
        }
    }

    /// Drops every opponent of `owner` that no longer resolves.
    pub fn prune_opponents(&mut self, owner: EntityId) -> usize {
        let stale: Vec<EntityId> = match self.actor(owner) {
            Some(actor) => actor
                .opponents
                .iter()
                .map(|entry| entry.aggressor)
                .filter(|aggressor| !self.is_resolvable(*aggressor))
                .collect(),
            None => return 0,
        };
        match self.actors.get_mut(&owner) {
            Some(actor) => actor.opponents.check_list(|id| !stale.contains(&id)),
            None => 0,
        }
    }

    /// Moves an actor to another room, broadcasting the relocation messages.
    ///
    /// Returns the room that was left.
    pub fn relocate(
        &mut self,
        actor: EntityId,
        destination: RoomId,
        messages: Relocation,
        outbox: &mut Outbox,
    ) -> Result<RoomId, WorldError> {
        let state = self.try_actor_mut(actor)?;
        let origin = state.location.ok_or(WorldError::Nowhere(actor))?;
        state.location = Some(destination);

        outbox.broadcast(origin, messages.depart, [actor]);
        outbox.broadcast(destination, messages.arrive, [actor]);
        outbox.notify(actor, messages.self_message);
        Ok(origin)
    }

    // ===== items =====

    pub fn create_item(&mut self, template: &ItemTemplate, quantity: u32) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id = self.next_item_id.wrapping_add(1);
        self.items
            .insert(id, ItemState::from_template(id, template, quantity));
        id
    }

    pub fn item(&self, id: ItemId) -> Option<&ItemState> {
        self.items.get(&id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut ItemState> {
        self.items.get_mut(&id)
    }

    /// Removes an item and everything inside it from the arena.
    ///
    /// Callers detach the item from its holder first.
    pub fn destroy_item(&mut self, id: ItemId) -> Option<ItemState> {
        let item = self.items.remove(&id)?;
        for inner in &item.contents {
            self.destroy_item(*inner);
        }
        Some(item)
    }

    /// Weight of an item stack including everything inside it.
    pub fn item_weight(&self, id: ItemId) -> u32 {
        self.item(id).map_or(0, |item| {
            item.contents
                .iter()
                .fold(item.own_weight(), |total, inner| {
                    total.saturating_add(self.item_weight(*inner))
                })
        })
    }

    pub fn carried_weight(&self, actor: &ActorState) -> u32 {
        actor
            .inventory
            .iter()
            .copied()
            .chain(actor.equipment.items())
            .fold(0u32, |total, item| total.saturating_add(self.item_weight(item)))
    }

    pub fn ground(&self, room: RoomId) -> &[ItemId] {
        self.ground.get(&room).map_or(&[], Vec::as_slice)
    }

    pub fn put_on_ground(&mut self, room: RoomId, item: ItemId) {
        self.ground.entry(room).or_default().push(item);
    }

    pub fn take_from_ground(&mut self, room: RoomId, item: ItemId) -> bool {
        let Some(items) = self.ground.get_mut(&room) else {
            return false;
        };
        match items.iter().position(|held| *held == item) {
            Some(index) => {
                items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Puts an item into an actor's inventory.
    pub fn give(&mut self, actor: EntityId, item: ItemId) -> Result<(), WorldError> {
        if !self.items.contains_key(&item) {
            return Err(WorldError::UnknownItem(item));
        }
        self.try_actor_mut(actor)?.inventory.push(item);
        Ok(())
    }

    /// Moves an item from the inventory into an equipment slot.
    pub fn equip(
        &mut self,
        actor: EntityId,
        item: ItemId,
        slot: EquipmentSlot,
    ) -> Result<(), WorldError> {
        let state = self.actors.get(&actor).ok_or(WorldError::UnknownActor(actor))?;
        let data = self.items.get(&item).ok_or(WorldError::UnknownItem(item))?;

        if !state.inventory.contains(&item) {
            return Err(WorldError::NotCarried { actor, item });
        }
        let fits = match data.kind {
            ItemKind::Weapon(_) | ItemKind::Shield { .. } | ItemKind::Tool(_) => slot.is_hand(),
            ItemKind::Armor { .. } => !slot.is_hand(),
            _ => false,
        };
        if !fits {
            return Err(WorldError::WrongSlot { item, slot });
        }
        if state.equipment.get(slot).is_some() {
            return Err(WorldError::SlotOccupied { actor, slot });
        }
        if data.is_two_handed()
            && (slot != EquipmentSlot::RightHand
                || state.equipment.get(EquipmentSlot::LeftHand).is_some())
        {
            return Err(WorldError::HandsOccupied { actor, item });
        }
        let right_is_two_handed = state
            .equipment
            .get(EquipmentSlot::RightHand)
            .and_then(|held| self.item(held))
            .is_some_and(ItemState::is_two_handed);
        if slot == EquipmentSlot::LeftHand && right_is_two_handed {
            return Err(WorldError::HandsOccupied { actor, item });
        }

        let state = self.try_actor_mut(actor)?;
        state.inventory.retain(|held| *held != item);
        state.equipment.set(slot, item);
        Ok(())
    }

    /// Moves whatever is in `slot` back to the inventory.
    pub fn unequip(&mut self, actor: EntityId, slot: EquipmentSlot) -> Option<ItemId> {
        let state = self.actor_mut(actor)?;
        let item = state.equipment.remove(slot)?;
        state.inventory.push(item);
        Some(item)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(0)
    }
}
