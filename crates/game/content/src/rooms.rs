//! Static room graph.
//!
//! Rooms are nodes, exits are directed edges. Range between two rooms is the
//! number of exits on the shortest path, so a weapon with range 2 reaches
//! anyone at most two rooms away.

use std::collections::{BTreeMap, VecDeque};

use mud_core::{Direction, MapOracle, RoomId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub exits: BTreeMap<Direction, RoomId>,
}

impl Room {
    pub fn new(id: RoomId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            exits: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn exit(mut self, direction: Direction, to: RoomId) -> Self {
        self.exits.insert(direction, to);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomGraph {
    rooms: BTreeMap<RoomId, Room>,
}

impl RoomGraph {
    pub fn new(rooms: impl IntoIterator<Item = Room>) -> Self {
        Self {
            rooms: rooms.into_iter().map(|room| (room.id, room)).collect(),
        }
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Exits that lead to rooms missing from the graph.
    pub fn dangling_exits(&self) -> Vec<(RoomId, Direction, RoomId)> {
        self.rooms
            .values()
            .flat_map(|room| {
                room.exits
                    .iter()
                    .map(move |(direction, to)| (room.id, *direction, *to))
            })
            .filter(|(_, _, to)| !self.rooms.contains_key(to))
            .collect()
    }

    /// Shortest hop count from `origin` to `target`, searching at most
    /// `limit` hops.
    pub fn distance(&self, origin: RoomId, target: RoomId, limit: u32) -> Option<u32> {
        if !self.rooms.contains_key(&origin) {
            return None;
        }
        if origin == target {
            return Some(0);
        }

        let mut seen = vec![origin];
        let mut frontier = VecDeque::from([(origin, 0u32)]);
        while let Some((room, hops)) = frontier.pop_front() {
            if hops >= limit {
                continue;
            }
            let Some(node) = self.rooms.get(&room) else {
                continue;
            };
            for next in node.exits.values() {
                if *next == target {
                    return Some(hops + 1);
                }
                if !seen.contains(next) {
                    seen.push(*next);
                    frontier.push_back((*next, hops + 1));
                }
            }
        }
        None
    }
}

impl MapOracle for RoomGraph {
    fn exit(&self, room: RoomId, direction: Direction) -> Option<RoomId> {
        self.rooms.get(&room)?.exits.get(&direction).copied()
    }

    fn is_at_range(&self, origin: RoomId, target: RoomId, range: u32) -> bool {
        self.distance(origin, target, range).is_some()
    }
}
