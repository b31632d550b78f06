//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON/TOML file into the in-memory structure the
//! runtime hands to the engine. Loaders expose `parse` for text and `load`
//! for paths; the factory wires them to a data directory.

pub mod actors;
pub mod config;
pub mod factory;
pub mod item;
pub mod production;
pub mod rooms;

pub use actors::{ActorLoader, ActorProfile};
pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use item::ItemLoader;
pub use production::ProductionLoader;
pub use rooms::RoomLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
