//! Domain events produced while resolving actions.
//!
//! The engine never formats or delivers text itself. It appends events to an
//! [`Outbox`]; the caller drains the outbox after each call and routes the
//! events to the messaging layer, the event bus and scripting hooks.

use crate::action::ActionType;
use crate::state::{Direction, EntityId, ItemId, RoomId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// Text for a single actor.
    Notify { actor: EntityId, text: String },
    /// Text for everyone in a room except the listed actors.
    Broadcast {
        room: RoomId,
        text: String,
        except: Vec<EntityId>,
    },
    Combat(CombatEvent),
    Action(ActionEvent),
    /// `actor` just attacked `opponent`; scripted mobiles react to this.
    Fight { actor: EntityId, opponent: EntityId },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    Damage {
        attacker: EntityId,
        target: EntityId,
        weapon: Option<ItemId>,
        amount: u32,
        critical: bool,
    },
    Miss {
        attacker: EntityId,
        target: EntityId,
        weapon: Option<ItemId>,
    },
    Death {
        victim: EntityId,
        killer: Option<EntityId>,
        corpse: ItemId,
    },
    Fled {
        actor: EntityId,
        from: RoomId,
        to: RoomId,
        direction: Direction,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionEvent {
    Started { actor: EntityId, kind: ActionType },
    Finished { actor: EntityId, kind: ActionType },
    Failed {
        actor: EntityId,
        kind: ActionType,
        reason: String,
    },
    Stopped { actor: EntityId, kind: ActionType },
}

/// Ordered buffer of events emitted during one engine call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outbox {
    events: Vec<GameEvent>,
}

impl Outbox {
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn notify(&mut self, actor: EntityId, text: impl Into<String>) {
        self.push(GameEvent::Notify {
            actor,
            text: text.into(),
        });
    }

    pub fn broadcast(
        &mut self,
        room: RoomId,
        text: impl Into<String>,
        except: impl IntoIterator<Item = EntityId>,
    ) {
        self.push(GameEvent::Broadcast {
            room,
            text: text.into(),
            except: except.into_iter().collect(),
        });
    }

    pub fn combat(&mut self, event: CombatEvent) {
        self.push(GameEvent::Combat(event));
    }

    pub fn action(&mut self, event: ActionEvent) {
        self.push(GameEvent::Action(event));
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// Texts notified to `actor`, in order.
    pub fn notifications_for(&self, actor: EntityId) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                GameEvent::Notify { actor: to, text } if *to == actor => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
