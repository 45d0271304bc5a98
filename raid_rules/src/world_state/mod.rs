//! Scene snapshots - the raw tile data handed over by the world-state collaborator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width and height of a loaded scene, in tiles.
pub const SCENE_SIZE: i32 = 104;

/// Largest scene edge a snapshot accepts, in tiles.
pub const MAX_SCENE_SIZE: i32 = 256;

/// Edge length of an instance template chunk, in tiles.
pub const CHUNK_SIZE: i32 = 8;

/// Number of vertical levels in a scene.
pub const PLANE_COUNT: u8 = 4;

/// A tile coordinate local to the loaded scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScenePoint {
    pub x: i32,
    pub y: i32,
}

impl ScenePoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate of the template chunk containing this point.
    pub fn chunk(&self) -> (i32, i32) {
        (self.x / CHUNK_SIZE, self.y / CHUNK_SIZE)
    }
}

impl std::fmt::Display for ScenePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single loaded tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub plane: u8,
    pub location: ScenePoint,
    /// Identifier of the wall object standing on this tile.
    #[serde(default)]
    pub wall_object: Option<u32>,
}

impl Tile {
    pub fn new(plane: u8, location: ScenePoint) -> Self {
        Self {
            plane,
            location,
            wall_object: None,
        }
    }

    /// Place a wall object on this tile.
    pub fn with_wall_object(mut self, id: u32) -> Self {
        self.wall_object = Some(id);
        self
    }
}

/// A packed template identifier for one chunk of one plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub plane: u8,
    pub chunk_x: i32,
    pub chunk_y: i32,
    pub data: u32,
}

/// Errors raised while building or loading a snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Scene size must be between 1 and {max}, got {size}", max = MAX_SCENE_SIZE)]
    InvalidSize { size: i32 },

    #[error("Tile on plane {plane} at {location} lies outside a scene of size {size}")]
    TileOutOfBounds {
        plane: u8,
        location: ScenePoint,
        size: i32,
    },

    #[error("Template chunk on plane {plane} at ({chunk_x}, {chunk_y}) lies outside the scene")]
    ChunkOutOfBounds { plane: u8, chunk_x: i32, chunk_y: i32 },

    #[error("Malformed snapshot: {0}")]
    Malformed(String),
}

/// Read-only view of every plane of a loaded scene at one moment.
///
/// Tiles are stored densely per plane; template chunks are stored per plane and 8x8 chunk.
/// Queries outside the scene return `None` rather than panicking, because the scanner
/// routinely probes cells that fall past the scene edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotRecord", into = "SnapshotRecord")]
pub struct TileSnapshot {
    size: i32,
    tiles: Vec<Option<Tile>>,
    chunks: Vec<Option<u32>>,
}

impl TileSnapshot {
    /// Create an empty snapshot of the given edge length.
    pub fn new(size: i32) -> Result<Self, SnapshotError> {
        if !(1..=MAX_SCENE_SIZE).contains(&size) {
            return Err(SnapshotError::InvalidSize { size });
        }

        let span = chunk_span(size);
        let planes = PLANE_COUNT as usize;
        Ok(Self {
            size,
            tiles: vec![None; planes * (size * size) as usize],
            chunks: vec![None; planes * (span * span) as usize],
        })
    }

    /// Edge length of the scene in tiles.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Edge length of the scene in template chunks.
    pub fn chunk_span(&self) -> i32 {
        chunk_span(self.size)
    }

    /// Check whether a coordinate lies inside the scene.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (0..self.size).contains(&x) && (0..self.size).contains(&y)
    }

    /// Get the tile at a coordinate, if one is loaded there.
    pub fn tile(&self, plane: u8, x: i32, y: i32) -> Option<&Tile> {
        let index = self.tile_index(plane, x, y)?;
        self.tiles[index].as_ref()
    }

    /// Insert a tile, replacing whatever was loaded at its location.
    pub fn insert_tile(&mut self, tile: Tile) -> Result<(), SnapshotError> {
        let index = self
            .tile_index(tile.plane, tile.location.x, tile.location.y)
            .ok_or(SnapshotError::TileOutOfBounds {
                plane: tile.plane,
                location: tile.location,
                size: self.size,
            })?;
        self.tiles[index] = Some(tile);
        Ok(())
    }

    /// Iterate over the loaded tiles of one plane, column by column.
    pub fn tiles_on_plane(&self, plane: u8) -> impl Iterator<Item = &Tile> {
        let area = (self.size * self.size) as usize;
        let start = if plane < PLANE_COUNT {
            plane as usize * area
        } else {
            self.tiles.len()
        };
        let end = (start + area).min(self.tiles.len());

        self.tiles[start..end].iter().filter_map(Option::as_ref)
    }

    /// Record the packed template identifier of one chunk.
    pub fn set_template_chunk(
        &mut self,
        plane: u8,
        chunk_x: i32,
        chunk_y: i32,
        data: u32,
    ) -> Result<(), SnapshotError> {
        let index = self
            .chunk_index(plane, chunk_x, chunk_y)
            .ok_or(SnapshotError::ChunkOutOfBounds {
                plane,
                chunk_x,
                chunk_y,
            })?;
        self.chunks[index] = Some(data);
        Ok(())
    }

    /// Get the packed template identifier of one chunk.
    pub fn template_chunk(&self, plane: u8, chunk_x: i32, chunk_y: i32) -> Option<u32> {
        let index = self.chunk_index(plane, chunk_x, chunk_y)?;
        self.chunks[index]
    }

    /// Get the packed template identifier of the chunk a tile belongs to.
    pub fn template_chunk_at(&self, tile: &Tile) -> Option<u32> {
        let (chunk_x, chunk_y) = tile.location.chunk();
        self.template_chunk(tile.plane, chunk_x, chunk_y)
    }

    /// Load a snapshot from its sparse JSON form.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Malformed(e.to_string()))
    }

    /// Dump the snapshot in its sparse JSON form.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Malformed(e.to_string()))
    }

    fn tile_index(&self, plane: u8, x: i32, y: i32) -> Option<usize> {
        if plane >= PLANE_COUNT || !self.contains(x, y) {
            return None;
        }
        let area = (self.size * self.size) as usize;
        Some(plane as usize * area + (x * self.size + y) as usize)
    }

    fn chunk_index(&self, plane: u8, chunk_x: i32, chunk_y: i32) -> Option<usize> {
        let span = self.chunk_span();
        if plane >= PLANE_COUNT || !(0..span).contains(&chunk_x) || !(0..span).contains(&chunk_y) {
            return None;
        }
        Some(plane as usize * (span * span) as usize + (chunk_x * span + chunk_y) as usize)
    }
}

impl Default for TileSnapshot {
    fn default() -> Self {
        let span = chunk_span(SCENE_SIZE);
        let planes = PLANE_COUNT as usize;
        Self {
            size: SCENE_SIZE,
            tiles: vec![None; planes * (SCENE_SIZE * SCENE_SIZE) as usize],
            chunks: vec![None; planes * (span * span) as usize],
        }
    }
}

fn chunk_span(size: i32) -> i32 {
    (size + CHUNK_SIZE - 1) / CHUNK_SIZE
}

/// Sparse serialized form of a [`TileSnapshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotRecord {
    size: i32,
    #[serde(default)]
    tiles: Vec<Tile>,
    #[serde(default)]
    chunks: Vec<ChunkRecord>,
}

impl TryFrom<SnapshotRecord> for TileSnapshot {
    type Error = SnapshotError;

    fn try_from(record: SnapshotRecord) -> Result<Self, Self::Error> {
        let mut snapshot = TileSnapshot::new(record.size)?;
        for tile in record.tiles {
            snapshot.insert_tile(tile)?;
        }
        for chunk in record.chunks {
            snapshot.set_template_chunk(chunk.plane, chunk.chunk_x, chunk.chunk_y, chunk.data)?;
        }
        Ok(snapshot)
    }
}

impl From<TileSnapshot> for SnapshotRecord {
    fn from(snapshot: TileSnapshot) -> Self {
        let span = snapshot.chunk_span();
        let per_plane = (span * span) as usize;
        let chunks = snapshot
            .chunks
            .iter()
            .enumerate()
            .filter_map(|(index, data)| {
                let data = (*data)?;
                let offset = (index % per_plane) as i32;
                Some(ChunkRecord {
                    plane: (index / per_plane) as u8,
                    chunk_x: offset / span,
                    chunk_y: offset % span,
                    data,
                })
            })
            .collect();

        SnapshotRecord {
            size: snapshot.size,
            tiles: snapshot.tiles.into_iter().flatten().collect(),
            chunks,
        }
    }
}
