//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! ordering actors around or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use mud_content::ActorProfile;
use mud_core::{ActionKind, EntityId};

use super::errors::{Result, RuntimeError};
use super::snapshot::WorldSnapshot;
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Spawn an actor and give it the items its profile names.
    pub async fn spawn(&self, profile: ActorProfile) -> Result<EntityId> {
        self.request(|reply| Command::Spawn { profile, reply })
            .await?
    }

    /// Validate and install an action; returns the start notification.
    pub async fn issue(&self, actor: EntityId, kind: ActionKind) -> Result<Option<String>> {
        self.request(|reply| Command::Issue { actor, kind, reply })
            .await?
    }

    /// Start (or redirect) a fight against `target`.
    pub async fn engage(&self, actor: EntityId, target: EntityId) -> Result<Option<String>> {
        self.request(|reply| Command::Engage {
            actor,
            target,
            reply,
        })
        .await?
    }

    /// Interrupt the current action; returns the stop notification.
    pub async fn stop(&self, actor: EntityId) -> Result<String> {
        self.request(|reply| Command::Stop { actor, reply }).await?
    }

    /// Query the current world (read-only snapshot)
    pub async fn snapshot(&self) -> Result<WorldSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Messages` - Notifications and room broadcasts
    /// - `Topic::Combat` - Hits, misses, deaths and flights
    /// - `Topic::Actions` - Action lifecycle
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use mud_runtime::Topic;
    ///
    /// let mut combat_rx = handle.subscribe(Topic::Combat);
    /// while let Ok(event) = combat_rx.recv().await {
    ///     // Handle combat events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Ask the simulation worker to stop after the current command.
    pub(crate) async fn shutdown(&self) -> Result<()> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
