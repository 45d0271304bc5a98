//! Synthetic snapshots shared by the unit tests.
//!
//! The lobby floor reproduces layout `SPCFC.CSPCF`: the anchor sits in the lobby at
//! floor slot 6, the path runs west through the scavengers and a puzzle, turns north and
//! runs east through both combat rooms to the end room.

use raid_rules::{InstanceTemplate, ScenePoint, Tile, TileSnapshot};

use crate::scanner::ANCHOR_OBJECT_ID;

pub const LOBBY_PLANE: u8 = 3;

pub const ANCHOR: ScenePoint = ScenePoint::new(40, 40);

/// Slot, base tile and template of every chamber on the lobby floor.
pub const LOBBY_ROOMS: [(usize, ScenePoint, Option<InstanceTemplate>); 8] = [
    (0, ScenePoint::new(1, 72), Some(InstanceTemplate::Shamans)),
    (1, ScenePoint::new(8, 72), Some(InstanceTemplate::Farming)),
    (2, ScenePoint::new(40, 72), Some(InstanceTemplate::Vasa)),
    (3, ScenePoint::new(72, 72), Some(InstanceTemplate::End)),
    (4, ScenePoint::new(1, 40), Some(InstanceTemplate::Crabs)),
    (5, ScenePoint::new(8, 40), Some(InstanceTemplate::Scavengers)),
    (6, ANCHOR, Some(InstanceTemplate::Lobby)),
    (7, ScenePoint::new(72, 40), None),
];

/// Code of the lobby floor with the two lower floors unobserved.
pub const LOBBY_CODE: &str = "CsFCa$PcS#_????????????????";

/// Notation of the only catalog layout compatible with [`LOBBY_CODE`].
pub const LOBBY_LAYOUT: &str = "SPCFC.CSPCF - #WWNEEE#WSWNWS";

pub fn lobby_snapshot() -> TileSnapshot {
    let mut snapshot = TileSnapshot::default();

    for (_, location, template) in LOBBY_ROOMS {
        let mut tile = Tile::new(LOBBY_PLANE, location);
        if location == ANCHOR {
            tile = tile.with_wall_object(ANCHOR_OBJECT_ID);
        }
        snapshot.insert_tile(tile).unwrap();

        if let Some(template) = template {
            set_template(&mut snapshot, LOBBY_PLANE, location, template);
        }
    }

    snapshot
}

/// Load a chamber template into the chunk under `location` on `plane`.
pub fn set_template(
    snapshot: &mut TileSnapshot,
    plane: u8,
    location: ScenePoint,
    template: InstanceTemplate,
) {
    let (chunk_x, chunk_y) = location.chunk();
    snapshot
        .set_template_chunk(plane, chunk_x, chunk_y, template.chunk_data())
        .unwrap();
}
