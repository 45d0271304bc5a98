//! Instance templates - the source regions instanced chambers are copied from.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{Boss, Puzzle, RoomKind};
use crate::world_state::CHUNK_SIZE;

/// Edge length of a chamber template region, in tiles.
pub const ROOM_SIZE: i32 = 32;

/// Every chamber template the classifier recognises.
///
/// The discriminants index [`TEMPLATE_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum InstanceTemplate {
    Lobby,
    Start,
    End,
    Scavengers,
    ScavengersAlt,
    Farming,
    FarmingAlt,
    Shamans,
    Vasa,
    Vanguards,
    Muttadiles,
    Mystics,
    Tekton,
    Guardians,
    Vespula,
    IceDemon,
    Thieving,
    Tightrope,
    Crabs,
}

/// Source region of a template in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRegion {
    pub base_x: i32,
    pub base_y: i32,
    pub plane: u8,
    pub width: i32,
    pub height: i32,
}

impl TemplateRegion {
    const fn room(base_x: i32, base_y: i32) -> Self {
        Self {
            base_x,
            base_y,
            plane: 0,
            width: ROOM_SIZE,
            height: ROOM_SIZE,
        }
    }

    pub fn contains(&self, chunk: &TemplateChunk) -> bool {
        chunk.plane == self.plane
            && (self.base_x..self.base_x + self.width).contains(&chunk.x)
            && (self.base_y..self.base_y + self.height).contains(&chunk.y)
    }
}

/// One row of the template table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateEntry {
    pub template: InstanceTemplate,
    pub region: TemplateRegion,
    pub kind: RoomKind,
}

const fn entry(template: InstanceTemplate, base_x: i32, base_y: i32, kind: RoomKind) -> TemplateEntry {
    TemplateEntry {
        template,
        region: TemplateRegion::room(base_x, base_y),
        kind,
    }
}

/// Template to region and classification, in discriminant order.
pub static TEMPLATE_TABLE: [TemplateEntry; 19] = [
    entry(InstanceTemplate::Lobby, 3264, 5152, RoomKind::Start),
    entry(InstanceTemplate::Start, 3296, 5152, RoomKind::Start),
    entry(InstanceTemplate::End, 3328, 5152, RoomKind::End),
    entry(InstanceTemplate::Scavengers, 3360, 5152, RoomKind::Scavengers),
    entry(InstanceTemplate::ScavengersAlt, 3392, 5152, RoomKind::Scavengers),
    entry(InstanceTemplate::Farming, 3264, 5280, RoomKind::Farming),
    entry(InstanceTemplate::FarmingAlt, 3296, 5280, RoomKind::Farming),
    entry(InstanceTemplate::Shamans, 3264, 5184, RoomKind::Combat(Boss::Shamans)),
    entry(InstanceTemplate::Vasa, 3296, 5184, RoomKind::Combat(Boss::Vasa)),
    entry(InstanceTemplate::Vanguards, 3328, 5184, RoomKind::Combat(Boss::Vanguards)),
    entry(InstanceTemplate::Muttadiles, 3360, 5184, RoomKind::Combat(Boss::Muttadiles)),
    entry(InstanceTemplate::Mystics, 3392, 5184, RoomKind::Combat(Boss::Mystics)),
    entry(InstanceTemplate::Tekton, 3264, 5216, RoomKind::Combat(Boss::Tekton)),
    entry(InstanceTemplate::Guardians, 3296, 5216, RoomKind::Combat(Boss::Guardians)),
    entry(InstanceTemplate::Vespula, 3328, 5216, RoomKind::Combat(Boss::Vespula)),
    entry(InstanceTemplate::IceDemon, 3264, 5248, RoomKind::Puzzle(Puzzle::IceDemon)),
    entry(InstanceTemplate::Thieving, 3296, 5248, RoomKind::Puzzle(Puzzle::Thieving)),
    entry(InstanceTemplate::Tightrope, 3328, 5248, RoomKind::Puzzle(Puzzle::Tightrope)),
    entry(InstanceTemplate::Crabs, 3360, 5248, RoomKind::Puzzle(Puzzle::Crabs)),
];

/// Decoded form of a packed template chunk identifier.
///
/// Layout of the packed value: bit 24-25 plane, bit 14-23 chunk x,
/// bit 3-13 chunk y, bit 1-2 rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateChunk {
    pub plane: u8,
    /// World x of the chunk's south-west corner.
    pub x: i32,
    /// World y of the chunk's south-west corner.
    pub y: i32,
    pub rotation: u8,
}

impl TemplateChunk {
    pub fn decode(data: u32) -> Self {
        Self {
            plane: ((data >> 24) & 0x3) as u8,
            x: ((data >> 14) & 0x3FF) as i32 * CHUNK_SIZE,
            y: ((data >> 3) & 0x7FF) as i32 * CHUNK_SIZE,
            rotation: ((data >> 1) & 0x3) as u8,
        }
    }

    pub fn encode(&self) -> u32 {
        ((self.plane as u32 & 0x3) << 24)
            | (((self.x / CHUNK_SIZE) as u32 & 0x3FF) << 14)
            | (((self.y / CHUNK_SIZE) as u32 & 0x7FF) << 3)
            | ((self.rotation as u32 & 0x3) << 1)
    }
}

impl InstanceTemplate {
    /// Resolve a packed chunk identifier to the template it was copied from.
    pub fn find_match(data: u32) -> Option<Self> {
        let chunk = TemplateChunk::decode(data);
        TEMPLATE_TABLE
            .iter()
            .find(|entry| entry.region.contains(&chunk))
            .map(|entry| entry.template)
    }

    pub fn entry(&self) -> &'static TemplateEntry {
        &TEMPLATE_TABLE[*self as usize]
    }

    pub fn kind(&self) -> RoomKind {
        self.entry().kind
    }

    pub fn region(&self) -> TemplateRegion {
        self.entry().region
    }

    /// Packed identifier of the template's south-west chunk, unrotated.
    pub fn chunk_data(&self) -> u32 {
        let region = self.region();
        TemplateChunk {
            plane: region.plane,
            x: region.base_x,
            y: region.base_y,
            rotation: 0,
        }
        .encode()
    }
}
