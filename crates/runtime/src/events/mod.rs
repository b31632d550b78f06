//! Topic-based event bus for runtime events.
//!
//! Engine events are published to specific topics, and consumers can
//! subscribe only to the topics they need.

mod bus;

pub use bus::{Event, EventBus, Topic};
