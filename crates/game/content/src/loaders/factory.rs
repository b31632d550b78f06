//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use mud_core::GameConfig;

use crate::catalog::{ItemCatalog, ProductionCatalog};
use crate::loaders::rooms::ensure_closed;
use crate::loaders::{
    ActorLoader, ActorProfile, ConfigLoader, ItemLoader, LoadResult, ProductionLoader, RoomLoader,
};
use crate::rooms::RoomGraph;

/// Everything a world needs to start.
#[derive(Clone, Debug)]
pub struct Content {
    pub config: GameConfig,
    pub items: ItemCatalog,
    pub productions: ProductionCatalog,
    pub rooms: RoomGraph,
    pub actors: Vec<ActorProfile>,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// ├── productions.ron
/// ├── actors.ron
/// └── areas/
///     ├── village.ron
///     └── mines.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load recipes from `productions.ron`.
    pub fn load_productions(&self) -> LoadResult<ProductionCatalog> {
        ProductionLoader::load(&self.data_dir.join("productions.ron"))
    }

    /// Load the starting roster from `actors.ron`.
    pub fn load_actors(&self) -> LoadResult<Vec<ActorProfile>> {
        ActorLoader::load(&self.data_dir.join("actors.ron"))
    }

    /// Load a single area from `areas/{area}.ron`.
    pub fn load_area(&self, area: &str) -> LoadResult<RoomGraph> {
        let path = self.data_dir.join("areas").join(format!("{}.ron", area));
        RoomLoader::load(&path)
    }

    /// Merge every `areas/*.ron` file into one graph, in file name order.
    pub fn load_rooms(&self) -> LoadResult<RoomGraph> {
        let dir = self.data_dir.join("areas");
        let mut paths = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
            .collect::<Vec<_>>();
        paths.sort();

        let mut rooms = Vec::new();
        for path in &paths {
            rooms.extend(RoomLoader::load_rooms(path)?);
        }

        let mut seen = std::collections::BTreeSet::new();
        for room in &rooms {
            anyhow::ensure!(
                seen.insert(room.id),
                "Room id {} is defined by more than one area",
                room.id.0
            );
        }

        let graph = RoomGraph::new(rooms);
        ensure_closed(&graph)?;
        tracing::info!(areas = paths.len(), rooms = graph.len(), "loaded areas");
        Ok(graph)
    }

    /// Load everything and cross-check the roster against items and rooms.
    pub fn load_all(&self) -> LoadResult<Content> {
        let content = Content {
            config: self.load_config()?,
            items: self.load_items()?,
            productions: self.load_productions()?,
            rooms: self.load_rooms()?,
            actors: self.load_actors()?,
        };

        for profile in &content.actors {
            for name in profile.item_names() {
                anyhow::ensure!(
                    content.items.get(name).is_some(),
                    "Actor '{}' refers to unknown item '{}'",
                    profile.name,
                    name
                );
            }
            if let Some(room) = profile.room {
                anyhow::ensure!(
                    content.rooms.room(room).is_some(),
                    "Actor '{}' starts in unknown room {}",
                    profile.name,
                    room.0
                );
            }
        }

        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
