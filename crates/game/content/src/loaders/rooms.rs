//! Room graph loader.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use mud_core::{Direction, RoomId};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};
use crate::rooms::{Room, RoomGraph};

#[derive(Debug, Clone, Deserialize)]
struct RoomSpec {
    id: RoomId,
    name: String,
    #[serde(default)]
    exits: BTreeMap<Direction, RoomId>,
}

#[derive(Debug, Clone, Deserialize)]
struct RoomFile {
    rooms: Vec<RoomSpec>,
}

/// Loader for area files.
///
/// # RON Format
///
/// ```ron
/// (
///     rooms: [
///         (id: 1, name: "gate", exits: { East: 2 }),
///         (id: 2, name: "hall", exits: { West: 1 }),
///     ],
/// )
/// ```
pub struct RoomLoader;

impl RoomLoader {
    pub fn load(path: &Path) -> LoadResult<RoomGraph> {
        let graph = RoomGraph::new(Self::load_rooms(path)?);
        ensure_closed(&graph)
            .map_err(|e| anyhow::anyhow!("Invalid area {}: {}", path.display(), e))?;
        Ok(graph)
    }

    /// Parses an area and rejects duplicate ids and exits into unknown rooms.
    pub fn parse(content: &str) -> LoadResult<RoomGraph> {
        let graph = RoomGraph::new(Self::parse_rooms(content)?);
        ensure_closed(&graph)?;
        Ok(graph)
    }

    /// Rooms of one area file. Exits may point into other areas.
    pub fn load_rooms(path: &Path) -> LoadResult<Vec<Room>> {
        let content = read_file(path)?;
        Self::parse_rooms(&content)
            .map_err(|e| anyhow::anyhow!("Invalid area {}: {}", path.display(), e))
    }

    fn parse_rooms(content: &str) -> LoadResult<Vec<Room>> {
        let file: RoomFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse area RON: {}", e))?;

        let mut ids = BTreeSet::new();
        for spec in &file.rooms {
            anyhow::ensure!(ids.insert(spec.id), "Duplicate room id {}", spec.id.0);
        }

        Ok(file
            .rooms
            .into_iter()
            .map(|spec| Room {
                id: spec.id,
                name: spec.name,
                exits: spec.exits,
            })
            .collect())
    }
}

/// Fails if any exit leads to a room the graph does not contain.
pub fn ensure_closed(graph: &RoomGraph) -> LoadResult<()> {
    if let Some((from, direction, to)) = graph.dangling_exits().first() {
        anyhow::bail!(
            "Exit {} of room {} leads to unknown room {}",
            direction,
            from.0,
            to.0
        );
    }
    tracing::debug!(rooms = graph.len(), "room graph is closed");
    Ok(())
}
