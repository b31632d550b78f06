//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Room graphs that answer exit and range queries
//! - Item catalogs and production/building recipes
//! - Starting actor rosters
//! - Game configuration
//!
//! Content is consumed by the runtime as oracles and never appears in world state.

pub mod catalog;
pub mod rooms;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{ItemCatalog, ProductionCatalog};
pub use rooms::{Room, RoomGraph};

#[cfg(feature = "loaders")]
pub use loaders::{
    ActorLoader, ActorProfile, ConfigLoader, Content, ContentFactory, ItemLoader, LoadResult,
    ProductionLoader, RoomLoader,
};
