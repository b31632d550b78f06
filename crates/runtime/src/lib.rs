//! Runtime orchestration for the real-time simulation.
//!
//! This crate wires the engine, the content oracles and worker tasks into a
//! cohesive runtime API. Consumers embed [`Runtime`] to advance actions on a
//! fixed tick, subscribe to events, and order actors around through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`telemetry`] installs the log subscriber
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;
pub mod telemetry;

mod workers;

pub use api::{
    ActorSnapshot, CowardScript, FightHook, FightScript, IdleScript, Result, RuntimeError,
    RuntimeHandle, WorldSnapshot,
};
pub use events::{Event, EventBus, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
