//! Asynchronous scripting hooks for non-player actors.
//!
//! After a mobile swings at someone the simulation worker queues a
//! [`FightHook`]. Hooks are delivered with `try_send`, so a slow script loses
//! hooks instead of stalling the simulation. Scripts react by sending
//! ordinary commands through the [`RuntimeHandle`] they are given.
use async_trait::async_trait;
use mud_core::EntityId;

use super::errors::Result;
use super::handle::RuntimeHandle;

/// `actor` attacked `opponent` during the last tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FightHook {
    pub actor: EntityId,
    pub opponent: EntityId,
}

/// Behaviour attached to fighting mobiles.
#[async_trait]
pub trait FightScript: Send + Sync {
    async fn on_fight(&self, hook: FightHook, handle: &RuntimeHandle) -> Result<()>;
}

/// A script that does nothing.
/// Useful for testing or as a fallback.
pub struct IdleScript;

#[async_trait]
impl FightScript for IdleScript {
    async fn on_fight(&self, _hook: FightHook, _handle: &RuntimeHandle) -> Result<()> {
        Ok(())
    }
}

/// Mobiles that flee once their health drops to a fraction of the maximum.
pub struct CowardScript {
    /// Percentage of max health at or below which the mobile runs.
    pub threshold_percent: u32,
}

#[async_trait]
impl FightScript for CowardScript {
    async fn on_fight(&self, hook: FightHook, handle: &RuntimeHandle) -> Result<()> {
        let snapshot = handle.snapshot().await?;
        let Some(actor) = snapshot.actor(hook.actor) else {
            return Ok(());
        };
        if actor.health * 100 <= actor.max_health * self.threshold_percent {
            tracing::debug!(actor = %hook.actor, health = actor.health, "script orders flee");
            handle.issue(hook.actor, mud_core::ActionKind::flee()).await?;
        }
        Ok(())
    }
}
