//! Grid scanner settings.

use raid_rules::{FLOOR_COUNT, PLANE_COUNT, ROOM_SIZE};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Wall object marking the lobby anchor.
pub const ANCHOR_OBJECT_ID: u32 = 12231;

/// How cells outside the scene are handled while walking a floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryRule {
    /// Cells west of the scene are read from column 1, since column 0 is never loaded,
    /// and cells east of the scene still consume a slot on the first row.
    #[default]
    RedirectToEdge,

    /// Cells outside the scene are treated as absent.
    Skip,
}

/// Configuration for the grid scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Plane holding the lobby and its anchor; floor 0 is scanned here.
    pub lobby_plane: u8,

    /// Number of floors scanned, walking one plane down per floor.
    pub floors: u8,

    pub anchor_object: u32,

    /// Distance between neighbouring chamber cells, in tiles.
    pub room_size: i32,

    /// First cell column relative to the anchor, inclusive.
    pub first_column: i32,

    /// Last cell column relative to the anchor, exclusive.
    pub column_end: i32,

    pub boundary: BoundaryRule,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            lobby_plane: 3,
            floors: 2,
            anchor_object: ANCHOR_OBJECT_ID,
            room_size: ROOM_SIZE,
            first_column: -2,
            column_end: 4,
            boundary: BoundaryRule::RedirectToEdge,
        }
    }
}

impl ScanConfig {
    /// Check that the settings describe a walkable grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::InvalidScan { reason });

        if self.lobby_plane >= PLANE_COUNT {
            return invalid(format!(
                "lobby plane {} exceeds the {} scene planes",
                self.lobby_plane, PLANE_COUNT
            ));
        }
        if self.floors == 0 || self.floors as usize > FLOOR_COUNT {
            return invalid(format!("floors must be between 1 and {FLOOR_COUNT}"));
        }
        if self.floors > self.lobby_plane + 1 {
            return invalid(format!(
                "{} floors do not fit below lobby plane {}",
                self.floors, self.lobby_plane
            ));
        }
        if self.room_size <= 0 {
            return invalid("room size must be positive".to_string());
        }
        if self.first_column >= self.column_end {
            return invalid("column range is empty".to_string());
        }

        Ok(())
    }

    /// Planes walked by the scanner, top floor first, paired with their floor index.
    ///
    /// Stops at plane 0 even when `floors` asks for more.
    pub fn floor_planes(&self) -> impl Iterator<Item = (usize, u8)> {
        let lobby = self.lobby_plane;
        (0..self.floors)
            .map_while(move |floor| lobby.checked_sub(floor).map(|plane| (floor as usize, plane)))
    }
}
