//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use mud_core::{ActionEvent, CombatEvent, EntityId, GameEvent, RoomId};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Text for actors and rooms
    Messages,
    /// Hits, misses, deaths and flights
    Combat,
    /// Action lifecycle: started, finished, failed, stopped
    Actions,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Messages, Topic::Combat, Topic::Actions];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Notify {
        actor: EntityId,
        text: String,
    },
    Broadcast {
        room: RoomId,
        text: String,
        except: Vec<EntityId>,
    },
    Combat(CombatEvent),
    Action(ActionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Notify { .. } | Event::Broadcast { .. } => Topic::Messages,
            Event::Combat(_) => Topic::Combat,
            Event::Action(_) => Topic::Actions,
        }
    }

    /// Bus form of an engine event. Fight hooks go to scripts, not the bus.
    pub fn from_game(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::Notify { actor, text } => Some(Event::Notify { actor, text }),
            GameEvent::Broadcast { room, text, except } => {
                Some(Event::Broadcast { room, text, except })
            }
            GameEvent::Combat(event) => Some(Event::Combat(event)),
            GameEvent::Action(event) => Some(Event::Action(event)),
            GameEvent::Fight { .. } => None,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; slow subscribers lag.
#[derive(Clone)]
pub struct EventBus {
    messages: broadcast::Sender<Event>,
    combat: broadcast::Sender<Event>,
    actions: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: broadcast::channel(capacity).0,
            combat: broadcast::channel(capacity).0,
            actions: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Messages => &self.messages,
            Topic::Combat => &self.combat,
            Topic::Actions => &self.actions,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.sender(topic).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
