//! Room definitions for a reconstructed raid.

mod room;
mod templates;

pub use room::*;
pub use templates::*;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};
use thiserror::Error;

/// Number of floors a raid grid can hold.
pub const FLOOR_COUNT: usize = 3;

/// Number of chamber slots on one floor (a 4x2 grid).
pub const SLOTS_PER_FLOOR: usize = 8;

/// Total number of addressable chamber slots.
pub const MAX_ROOMS: usize = FLOOR_COUNT * SLOTS_PER_FLOOR;

/// Coarse category of a chamber.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Empty,
    Start,
    End,
    Scavengers,
    Farming,
    Combat,
    Puzzle,
}

impl RoomType {
    /// Single-character symbol used in layout codes and catalog notation.
    pub fn symbol(&self) -> char {
        match self {
            RoomType::Empty => '_',
            RoomType::Start => '#',
            RoomType::End => '$',
            RoomType::Scavengers => 'S',
            RoomType::Farming => 'F',
            RoomType::Combat => 'C',
            RoomType::Puzzle => 'P',
        }
    }

    /// Look up a room type by its symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '_' => Some(RoomType::Empty),
            '#' => Some(RoomType::Start),
            '$' => Some(RoomType::End),
            'S' => Some(RoomType::Scavengers),
            'F' => Some(RoomType::Farming),
            'C' => Some(RoomType::Combat),
            'P' => Some(RoomType::Puzzle),
            _ => None,
        }
    }

    /// Display name of this room type.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Boss encountered in a combat room.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
pub enum Boss {
    Tekton,
    Muttadiles,
    Guardians,
    Vespula,
    Shamans,
    Vasa,
    Vanguards,
    Mystics,
    /// Combat room known only from a matched layout.
    Unknown,
}

impl Boss {
    pub fn symbol(&self) -> char {
        match self {
            Boss::Tekton => 't',
            Boss::Muttadiles => 'm',
            Boss::Guardians => 'g',
            Boss::Vespula => 'v',
            Boss::Shamans => 's',
            Boss::Vasa => 'a',
            Boss::Vanguards => 'n',
            Boss::Mystics => 'y',
            Boss::Unknown => '?',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            't' => Some(Boss::Tekton),
            'm' => Some(Boss::Muttadiles),
            'g' => Some(Boss::Guardians),
            'v' => Some(Boss::Vespula),
            's' => Some(Boss::Shamans),
            'a' => Some(Boss::Vasa),
            'n' => Some(Boss::Vanguards),
            'y' => Some(Boss::Mystics),
            '?' => Some(Boss::Unknown),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn is_known(&self) -> bool {
        *self != Boss::Unknown
    }
}

/// Puzzle found in a puzzle room.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
pub enum Puzzle {
    Crabs,
    #[strum(serialize = "Ice demon")]
    IceDemon,
    Tightrope,
    Thieving,
    /// Puzzle room known only from a matched layout.
    Unknown,
}

impl Puzzle {
    pub fn symbol(&self) -> char {
        match self {
            Puzzle::Crabs => 'c',
            Puzzle::IceDemon => 'i',
            Puzzle::Tightrope => 'r',
            Puzzle::Thieving => 'h',
            Puzzle::Unknown => '?',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'c' => Some(Puzzle::Crabs),
            'i' => Some(Puzzle::IceDemon),
            'r' => Some(Puzzle::Tightrope),
            'h' => Some(Puzzle::Thieving),
            '?' => Some(Puzzle::Unknown),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Full classification of a chamber.
///
/// A boss is carried only by combat rooms and a puzzle only by puzzle rooms,
/// so the pairing can never drift out of sync with the room type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    #[default]
    Empty,
    Start,
    End,
    Scavengers,
    Farming,
    Combat(Boss),
    Puzzle(Puzzle),
}

impl RoomKind {
    /// Placeholder kind for a slot whose type is known but whose contents are not.
    pub fn unresolved(room_type: RoomType) -> Self {
        match room_type {
            RoomType::Empty => RoomKind::Empty,
            RoomType::Start => RoomKind::Start,
            RoomType::End => RoomKind::End,
            RoomType::Scavengers => RoomKind::Scavengers,
            RoomType::Farming => RoomKind::Farming,
            RoomType::Combat => RoomKind::Combat(Boss::Unknown),
            RoomType::Puzzle => RoomKind::Puzzle(Puzzle::Unknown),
        }
    }

    pub fn room_type(&self) -> RoomType {
        match self {
            RoomKind::Empty => RoomType::Empty,
            RoomKind::Start => RoomType::Start,
            RoomKind::End => RoomType::End,
            RoomKind::Scavengers => RoomType::Scavengers,
            RoomKind::Farming => RoomType::Farming,
            RoomKind::Combat(_) => RoomType::Combat,
            RoomKind::Puzzle(_) => RoomType::Puzzle,
        }
    }

    pub fn boss(&self) -> Option<Boss> {
        match self {
            RoomKind::Combat(boss) => Some(*boss),
            _ => None,
        }
    }

    pub fn puzzle(&self) -> Option<Puzzle> {
        match self {
            RoomKind::Puzzle(puzzle) => Some(*puzzle),
            _ => None,
        }
    }

    /// Most specific display name: the boss or puzzle if any, otherwise the room type.
    pub fn name(&self) -> &'static str {
        match self {
            RoomKind::Combat(boss) => boss.name(),
            RoomKind::Puzzle(puzzle) => puzzle.name(),
            other => other.room_type().name(),
        }
    }
}

/// Grid position of a chamber slot, ordered floor first and slot second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "PositionRecord")]
pub struct RoomPosition {
    floor: u8,
    slot: u8,
}

impl RoomPosition {
    /// Create a position, or `None` when it lies outside the grid.
    pub fn new(floor: usize, slot: usize) -> Option<Self> {
        if floor >= FLOOR_COUNT || slot >= SLOTS_PER_FLOOR {
            return None;
        }
        Some(Self {
            floor: floor as u8,
            slot: slot as u8,
        })
    }

    /// Create a position from its flat index in `0..MAX_ROOMS`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::new(index / SLOTS_PER_FLOOR, index % SLOTS_PER_FLOOR)
    }

    pub fn floor(&self) -> usize {
        self.floor as usize
    }

    pub fn slot(&self) -> usize {
        self.slot as usize
    }

    /// Flat index in grid traversal order.
    pub fn index(&self) -> usize {
        self.floor() * SLOTS_PER_FLOOR + self.slot()
    }

    /// Every position in grid traversal order.
    pub fn all() -> impl Iterator<Item = RoomPosition> {
        (0..MAX_ROOMS).filter_map(RoomPosition::from_index)
    }
}

/// Raised when a position read from data lies outside the grid.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error(
    "Room position floor {floor} slot {slot} lies outside the {floors}x{slots} grid",
    floors = FLOOR_COUNT,
    slots = SLOTS_PER_FLOOR
)]
pub struct PositionOutOfGrid {
    pub floor: usize,
    pub slot: usize,
}

#[derive(Deserialize)]
struct PositionRecord {
    floor: usize,
    slot: usize,
}

impl TryFrom<PositionRecord> for RoomPosition {
    type Error = PositionOutOfGrid;

    fn try_from(record: PositionRecord) -> Result<Self, Self::Error> {
        let PositionRecord { floor, slot } = record;
        RoomPosition::new(floor, slot).ok_or(PositionOutOfGrid { floor, slot })
    }
}

impl std::fmt::Display for RoomPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "floor {} slot {}", self.floor, self.slot)
    }
}
