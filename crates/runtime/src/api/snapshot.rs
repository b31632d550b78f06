//! Read-only views of the world handed out to clients.

use serde::{Deserialize, Serialize};

use mud_core::{
    ActorKind, ActorState, ActionType, EntityId, HealthCondition, Posture, RoomId, World,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub id: EntityId,
    pub name: String,
    pub kind: ActorKind,
    pub location: Option<RoomId>,
    pub posture: Posture,
    pub health: u32,
    pub max_health: u32,
    pub condition: HealthCondition,
    pub stamina: u32,
    pub max_stamina: u32,
    pub action: ActionType,
    /// Opponents in list order, highest aggression first.
    pub opponents: Vec<EntityId>,
}

impl ActorSnapshot {
    pub fn of(actor: &ActorState) -> Self {
        Self {
            id: actor.id,
            name: actor.name.clone(),
            kind: actor.kind,
            location: actor.location,
            posture: actor.posture,
            health: actor.health(),
            max_health: actor.max_health(),
            condition: actor.condition(),
            stamina: actor.stamina(),
            max_stamina: actor.max_stamina(),
            action: actor.action.action_type(),
            opponents: actor.opponents.iter().map(|o| o.aggressor).collect(),
        }
    }

    pub fn is_fighting(&self) -> bool {
        self.action == ActionType::Fighting
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub actors: Vec<ActorSnapshot>,
}

impl WorldSnapshot {
    pub fn of(world: &World) -> Self {
        Self {
            actors: world.actors().map(ActorSnapshot::of).collect(),
        }
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorSnapshot> {
        self.actors.iter().find(|actor| actor.id == id)
    }

    pub fn in_room(&self, room: RoomId) -> impl Iterator<Item = &ActorSnapshot> {
        self.actors
            .iter()
            .filter(move |actor| actor.location == Some(room))
    }
}
