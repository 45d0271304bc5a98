//! Layout Matcher - the catalog of known layouts and wildcard lookup against it.
//!
//! Layouts are written as `"<floor 0 rooms>.<floor 1 rooms> - #<floor 0 path>#<floor 1 path>"`.
//! Each floor is a 4×2 grid with slots 0-3 on the north row and 4-7 on the south row. A path
//! starts at the start room, every direction letter steps to the next room in the symbol list,
//! and the last step lands on the end room.

use raid_rules::{RoomPosition, RoomType, MAX_ROOMS, SLOTS_PER_FLOOR};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, LazyLock};
use thiserror::Error;
use tracing::{debug, warn};

use super::LayoutCode;

static NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]*)\.([A-Z]*) - #([NESW]*)#([NESW]*)$")
        .expect("Invalid layout notation regex pattern")
});

/// Grid width of a floor, in slots.
const FLOOR_WIDTH: i32 = 4;

/// Grid height of a floor, in slots.
const FLOOR_HEIGHT: i32 = 2;

const BUILTIN_LAYOUTS: [&str; 22] = [
    "FSCCP.PCSCF - #WNWSWN#ESEENW",
    "FSCCS.PCPSF - #WSEEEN#WSWNWS",
    "FSCPC.CSCPF - #WNWWSE#EENWWW",
    "SCCFC.PSCSF - #EEENWW#WSEEEN",
    "SCCFP.CCSPF - #NESEEN#WSWNWS",
    "SCFCP.CCSPF - #ESEENW#ESWWNW",
    "SCFCP.CSCFS - #NEEESW#WWNEEE",
    "SCFPC.CSPCF - #WSWWNE#WSEENE",
    "SCFPC.PCCSF - #WSEENE#WWWSEE",
    "SCFPC.SCPCF - #NESENE#WSWWNE",
    "SCPFC.CCPSF - #NWWWSE#WNEESE",
    "SCPFC.CSPCF - #NEEESW#WWNEEE",
    "SCPFC.CSPSF - #WWSEEE#NWSWWN",
    "SCSPF.CCSPF - #ESWWNW#ESENES",
    "SFCCP.CSCPF - #WNEESE#NWSWWN",
    "SFCCS.PCPSF - #ENWWSW#ENESEN",
    "SPCFC.CSPCF - #WWNEEE#WSWNWS",
    "SPCFC.SCCPF - #ESENES#WWWNEE",
    "SPSFP.CCCSF - #NWSWWN#ESEENW",
    "SCFCP.CSCPF - #ENESEN#WWWSEE",
    "SCPFC.PCSCF - #WNEEES#NWSWNW",
    "SPCFC.CSPCF - #WSWNWS#WNEESE",
];

static BUILTIN: LazyLock<Arc<LayoutCatalog>> =
    LazyLock::new(|| Arc::new(LayoutCatalog::parse_lenient(BUILTIN_LAYOUTS)));

/// Errors raised while parsing layout notation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Malformed layout notation: {notation}")]
    Malformed { notation: String },

    #[error("Unknown room symbol '{symbol}' in {notation}")]
    UnknownRoom { notation: String, symbol: char },

    #[error("Floor {floor} of {notation} lists {rooms} rooms but {steps} steps")]
    PathLength {
        notation: String,
        floor: usize,
        rooms: usize,
        steps: usize,
    },

    #[error("Path of floor {floor} in {notation} leaves the grid")]
    OffGrid { notation: String, floor: usize },

    #[error("Path of floor {floor} in {notation} visits a slot twice")]
    Revisit { notation: String, floor: usize },
}

/// A known chamber layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Layout {
    notation: String,

    /// Rooms in path order, floor by floor.
    path: Vec<(RoomPosition, RoomType)>,

    slots: [Option<RoomType>; MAX_ROOMS],
}

impl Layout {
    pub fn parse(notation: &str) -> Result<Self, CatalogError> {
        let captures = NOTATION
            .captures(notation)
            .ok_or_else(|| CatalogError::Malformed {
                notation: notation.to_string(),
            })?;

        let mut path = Vec::new();
        let floors = [(&captures[1], &captures[3]), (&captures[2], &captures[4])];
        for (floor, (rooms, steps)) in floors.into_iter().enumerate() {
            path.extend(parse_floor(notation, floor, rooms, steps)?);
        }

        let mut slots = [None; MAX_ROOMS];
        for (position, room_type) in &path {
            slots[position.index()] = Some(*room_type);
        }

        Ok(Self {
            notation: notation.to_string(),
            path,
            slots,
        })
    }

    /// Display name, the room symbol part of the notation.
    pub fn name(&self) -> &str {
        self.notation
            .split_once(" - ")
            .map_or(self.notation.as_str(), |(name, _)| name)
    }

    pub fn notation(&self) -> &str {
        &self.notation
    }

    /// Every room of the layout in path order.
    pub fn rooms(&self) -> &[(RoomPosition, RoomType)] {
        &self.path
    }

    pub fn room_at(&self, position: RoomPosition) -> Option<RoomType> {
        self.slots[position.index()]
    }

    /// Check whether `code` could describe this layout.
    ///
    /// An unknown token in the code, or a slot the layout leaves unused, matches anything.
    pub fn is_compatible(&self, code: &LayoutCode) -> bool {
        code.tokens()
            .iter()
            .zip(&self.slots)
            .all(|(token, slot)| match (token.room_type(), slot) {
                (Some(observed), Some(expected)) => observed == *expected,
                _ => true,
            })
    }

    /// Check whether some code could match both layouts.
    pub fn is_compatible_with(&self, other: &Layout) -> bool {
        self.slots
            .iter()
            .zip(&other.slots)
            .all(|(a, b)| match (a, b) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            })
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation)
    }
}

impl TryFrom<String> for Layout {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Layout::parse(&value)
    }
}

impl From<Layout> for String {
    fn from(layout: Layout) -> Self {
        layout.notation
    }
}

/// Walk one floor's path and place its rooms.
fn parse_floor(
    notation: &str,
    floor: usize,
    rooms: &str,
    steps: &str,
) -> Result<Vec<(RoomPosition, RoomType)>, CatalogError> {
    if steps.len() != rooms.len() + 1 {
        return Err(CatalogError::PathLength {
            notation: notation.to_string(),
            floor,
            rooms: rooms.len(),
            steps: steps.len(),
        });
    }

    let mut types = vec![RoomType::Start];
    for symbol in rooms.chars() {
        let room_type = RoomType::from_symbol(symbol).ok_or_else(|| CatalogError::UnknownRoom {
            notation: notation.to_string(),
            symbol,
        })?;
        types.push(room_type);
    }
    types.push(RoomType::End);

    let mut cells = vec![(0i32, 0i32)];
    let (mut x, mut y) = (0, 0);
    for step in steps.chars() {
        match step {
            'N' => y -= 1,
            'S' => y += 1,
            'E' => x += 1,
            _ => x -= 1,
        }
        cells.push((x, y));
    }

    let min_x = cells.iter().map(|c| c.0).min().unwrap_or(0);
    let min_y = cells.iter().map(|c| c.1).min().unwrap_or(0);
    let off_grid = || CatalogError::OffGrid {
        notation: notation.to_string(),
        floor,
    };

    let mut placed: Vec<(RoomPosition, RoomType)> = Vec::with_capacity(cells.len());
    for ((x, y), room_type) in cells.into_iter().zip(types) {
        let (column, row) = (x - min_x, y - min_y);
        if column >= FLOOR_WIDTH || row >= FLOOR_HEIGHT {
            return Err(off_grid());
        }

        let slot = (row * FLOOR_WIDTH + column) as usize;
        let position = RoomPosition::new(floor, slot).ok_or_else(off_grid)?;
        if placed.iter().any(|(p, _)| *p == position) {
            return Err(CatalogError::Revisit {
                notation: notation.to_string(),
                floor,
            });
        }
        placed.push((position, room_type));
    }

    Ok(placed)
}

/// Immutable set of known layouts, searched in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutCatalog {
    layouts: Vec<Layout>,
}

impl LayoutCatalog {
    /// Parse every notation, failing on the first invalid one.
    pub fn parse<'a>(notations: impl IntoIterator<Item = &'a str>) -> Result<Self, CatalogError> {
        let layouts = notations
            .into_iter()
            .map(Layout::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { layouts })
    }

    /// Parse every notation, reporting and skipping invalid ones.
    pub fn parse_lenient<'a>(notations: impl IntoIterator<Item = &'a str>) -> Self {
        let layouts = notations
            .into_iter()
            .filter_map(|notation| match Layout::parse(notation) {
                Ok(layout) => Some(layout),
                Err(error) => {
                    warn!(%error, "skipping invalid catalog layout");
                    None
                }
            })
            .collect();
        Self { layouts }
    }

    /// The shared catalog of known layouts, parsed on first use.
    pub fn builtin() -> Arc<LayoutCatalog> {
        Arc::clone(&BUILTIN)
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layout> {
        self.layouts.iter()
    }

    /// Every layout compatible with `code`, in catalog order.
    pub fn candidates(&self, code: &LayoutCode) -> Vec<&Layout> {
        self.layouts
            .iter()
            .filter(|layout| layout.is_compatible(code))
            .collect()
    }

    /// First layout compatible with `code`.
    pub fn find(&self, code: &LayoutCode) -> Option<&Layout> {
        let candidates = self.candidates(code);
        match candidates.as_slice() {
            [] => {
                debug!(%code, "no catalog layout matches");
                None
            }
            [layout] => Some(*layout),
            [first, ..] => {
                warn!(
                    %code,
                    matches = candidates.len(),
                    chosen = first.notation(),
                    "ambiguous layout match"
                );
                Some(*first)
            }
        }
    }

    /// Pairs of layouts that some code could match both of.
    pub fn ambiguous_pairs(&self) -> Vec<(&Layout, &Layout)> {
        let mut pairs = Vec::new();
        for (i, first) in self.layouts.iter().enumerate() {
            for second in &self.layouts[i + 1..] {
                if first.is_compatible_with(second) {
                    pairs.push((first, second));
                }
            }
        }
        pairs
    }
}
