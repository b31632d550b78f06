use strum::IntoEnumIterator;

use crate::state::{Direction, RoomId};

/// Room graph and line-of-sight queries owned by the spatial subsystem.
pub trait MapOracle: Send + Sync {
    /// Room reached by leaving `room` through `direction`, if there is an exit.
    fn exit(&self, room: RoomId, direction: Direction) -> Option<RoomId>;

    /// Whether `target` can be reached from `origin` by something with the
    /// given range. Range 0 means the same room.
    fn is_at_range(&self, origin: RoomId, target: RoomId, range: u32) -> bool;

    /// All exits of a room in direction order.
    fn exits(&self, room: RoomId) -> Vec<(Direction, RoomId)> {
        Direction::iter()
            .filter_map(|direction| self.exit(room, direction).map(|to| (direction, to)))
            .collect()
    }
}
