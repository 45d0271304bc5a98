//! A single classified chamber.

use serde::{Deserialize, Serialize};

use super::{Boss, Puzzle, RoomKind, RoomPosition, RoomType};
use crate::world_state::Tile;

/// A chamber slot of a raid together with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub position: RoomPosition,

    /// Tile the room was resolved from. Absent for rooms filled in from a matched layout.
    pub base: Option<Tile>,

    pub kind: RoomKind,
}

impl Room {
    /// Create a room resolved from a scanned tile.
    pub fn new(position: RoomPosition, base: Tile, kind: RoomKind) -> Self {
        Self {
            position,
            base: Some(base),
            kind,
        }
    }

    /// Create a placeholder room known only by its type.
    pub fn placeholder(position: RoomPosition, room_type: RoomType) -> Self {
        Self {
            position,
            base: None,
            kind: RoomKind::unresolved(room_type),
        }
    }

    pub fn room_type(&self) -> RoomType {
        self.kind.room_type()
    }

    pub fn boss(&self) -> Option<Boss> {
        self.kind.boss()
    }

    pub fn puzzle(&self) -> Option<Puzzle> {
        self.kind.puzzle()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_combat(&self) -> bool {
        self.room_type() == RoomType::Combat
    }

    /// Check whether the room was observed rather than inferred.
    pub fn is_scanned(&self) -> bool {
        self.base.is_some()
    }
}
