//! Grid Scanner - locates the lobby anchor and maps chamber slots to base tiles.
//!
//! Scanning works in two steps:
//! 1. **Anchor**: walk every tile of the lobby plane, column by column, and take the first
//!    tile carrying the anchor wall object
//! 2. **Floors**: for each floor, walk a 3-row neighbourhood of chamber cells around the
//!    anchor and hand out slot indices to the cells that resolve to a loaded tile
//!
//! The scanner only resolves positions. Classification happens afterwards in
//! [`crate::classifier`], so boundary handling can be tested on its own.

mod config;

pub use config::*;

use raid_rules::{RoomPosition, ScenePoint, Tile, TileSnapshot, SLOTS_PER_FLOOR};
use std::collections::BTreeMap;
use tracing::debug;

/// Cell rows relative to the anchor, north row first.
const ROW_OFFSETS: [i32; 3] = [1, 0, -1];

/// Slot at which the first row of a floor is complete.
const ROW_WIDTH: usize = SLOTS_PER_FLOOR / 2;

/// Resolved chamber slots of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub anchor: ScenePoint,
    pub slots: BTreeMap<RoomPosition, Tile>,
}

/// Walks a snapshot to find chamber slots.
#[derive(Debug, Clone, Default)]
pub struct GridScanner {
    config: ScanConfig,
}

impl GridScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Find the lobby anchor, or `None` when the snapshot is not inside the instance.
    pub fn find_anchor(&self, snapshot: &TileSnapshot) -> Option<ScenePoint> {
        snapshot
            .tiles_on_plane(self.config.lobby_plane)
            .find(|tile| tile.wall_object == Some(self.config.anchor_object))
            .map(|tile| tile.location)
    }

    /// Resolve every reachable chamber slot.
    ///
    /// Returns `None` when no anchor is present. Slots that cannot be resolved are
    /// simply missing from the result.
    pub fn scan(&self, snapshot: &TileSnapshot) -> Option<ScanResult> {
        let Some(anchor) = self.find_anchor(snapshot) else {
            debug!(plane = self.config.lobby_plane, "raid anchor not found");
            return None;
        };
        debug!(%anchor, "found raid anchor");

        let mut slots = BTreeMap::new();
        let mut first_column = self.config.first_column;

        for (floor, plane) in self.config.floor_planes() {
            self.scan_floor(snapshot, anchor, floor, plane, &mut first_column, &mut slots);
        }

        Some(ScanResult { anchor, slots })
    }

    /// Walk one floor. `first_column` carries over to the next floor once the
    /// western edge of the grid has been found.
    fn scan_floor(
        &self,
        snapshot: &TileSnapshot,
        anchor: ScenePoint,
        floor: usize,
        plane: u8,
        first_column: &mut i32,
        slots: &mut BTreeMap<RoomPosition, Tile>,
    ) {
        let size = snapshot.size();
        let room = self.config.room_size;
        let redirect = self.config.boundary == BoundaryRule::RedirectToEdge;

        // A missing eastern neighbour means the grid's first slot lies outside the scene.
        let mut slot = match snapshot.tile(plane, anchor.x + room, anchor.y) {
            Some(_) => 0,
            None => 1,
        };

        'rows: for row in ROW_OFFSETS {
            let y = anchor.y + row * room;

            for column in *first_column..self.config.column_end {
                let x = anchor.x + column * room;

                if redirect && x > size && slot > 1 && slot < ROW_WIDTH {
                    slot += 1;
                }
                if x >= size || y < 0 || y >= size {
                    continue;
                }

                let probe_x = match (x < 0, redirect) {
                    (false, _) => x,
                    (true, true) => 1,
                    (true, false) => continue,
                };

                let Some(base) = snapshot.tile(plane, probe_x, y) else {
                    if slot == ROW_WIDTH {
                        slot += 1;
                        continue 'rows;
                    }
                    continue;
                };

                let Some(position) = RoomPosition::new(floor, slot) else {
                    debug!(floor, plane, "floor slots exhausted, ignoring remaining cells");
                    break 'rows;
                };

                if slot == 0 && *first_column != column {
                    *first_column = column;
                }

                slots.insert(position, base.clone());
                slot += 1;
            }
        }
    }
}
