//! The reconstructed raid and the data-integrity faults found while building it.

use raid_rules::{Boss, Room, RoomKind, RoomPosition, RoomType, MAX_ROOMS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::{Layout, LayoutCode};
use crate::rotation::{infer_unknown_bosses, Rotation};

/// A structurally valid input the pipeline could not fully account for.
///
/// Faults never abort reconstruction; they are collected on the [`Raid`].
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "fault", rename_all = "snake_case")]
pub enum IntegrityFault {
    #[error("Unrecognised template chunk {chunk:#010x} at {position}")]
    UnrecognizedTemplate { position: RoomPosition, chunk: u32 },

    #[error("Contradictory rotation constraints among {bosses:?}")]
    ContradictoryConstraints { bosses: Vec<Boss> },

    #[error("Code matches {} catalog layouts", .layouts.len())]
    AmbiguousLayout { layouts: Vec<String> },
}

/// A reconstructed raid instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Raid {
    rooms: [Option<Room>; MAX_ROOMS],
    code: LayoutCode,
    layout: Option<Layout>,
    rotation: Option<Rotation>,
    faults: Vec<IntegrityFault>,
}

impl Raid {
    /// Build a raid from scanned rooms. A later room at the same position replaces an earlier one.
    pub fn from_rooms(rooms: impl IntoIterator<Item = Room>) -> Self {
        let mut grid: [Option<Room>; MAX_ROOMS] = std::array::from_fn(|_| None);
        for room in rooms {
            let index = room.position.index();
            grid[index] = Some(room);
        }

        Self {
            code: LayoutCode::encode(&grid),
            rooms: grid,
            layout: None,
            rotation: None,
            faults: Vec::new(),
        }
    }

    /// Attach a matched layout and fill the slots it names that were not scanned.
    ///
    /// The code keeps describing what was observed.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        for &(position, room_type) in layout.rooms() {
            let slot = &mut self.rooms[position.index()];
            if slot.is_none() {
                *slot = Some(Room::placeholder(position, room_type));
            }
        }
        self.layout = Some(layout);
        self
    }

    /// Fill unknown bosses from the known boss cycles when they determine them.
    pub fn with_inferred_bosses(mut self) -> Self {
        let positions: Vec<RoomPosition> = self.combat_rooms().iter().map(|r| r.position).collect();
        let bosses: Vec<Boss> = self.combat_rooms().iter().filter_map(|r| r.boss()).collect();

        if let Some(inferred) = infer_unknown_bosses(&bosses) {
            for (position, boss) in positions.into_iter().zip(inferred) {
                if let Some(room) = self.rooms[position.index()].as_mut() {
                    if room.boss() == Some(Boss::Unknown) {
                        room.kind = RoomKind::Combat(boss);
                    }
                }
            }
        }
        self
    }

    pub fn with_rotation(mut self, rotation: Option<Rotation>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_fault(mut self, fault: IntegrityFault) -> Self {
        self.faults.push(fault);
        self
    }

    pub fn room(&self, position: RoomPosition) -> Option<&Room> {
        self.rooms[position.index()].as_ref()
    }

    /// Every known room in traversal order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().flatten()
    }

    pub fn code(&self) -> &LayoutCode {
        &self.code
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn rotation(&self) -> Option<&Rotation> {
        self.rotation.as_ref()
    }

    pub fn faults(&self) -> &[IntegrityFault] {
        &self.faults
    }

    /// Boss names of the solved rotation, comma separated.
    pub fn rotation_string(&self) -> Option<String> {
        self.rotation.as_ref().map(Rotation::to_string)
    }

    /// Rooms in the order they are walked: layout path order when a layout is known,
    /// traversal order otherwise.
    pub fn path(&self) -> Vec<&Room> {
        match &self.layout {
            Some(layout) => layout
                .rooms()
                .iter()
                .filter_map(|(position, _)| self.room(*position))
                .collect(),
            None => self.rooms().collect(),
        }
    }

    pub fn combat_rooms(&self) -> Vec<&Room> {
        self.path().into_iter().filter(|r| r.is_combat()).collect()
    }

    /// Names of every combat and puzzle room along the path, comma separated.
    pub fn full_rotation_string(&self) -> String {
        self.path()
            .into_iter()
            .filter(|r| matches!(r.room_type(), RoomType::Combat | RoomType::Puzzle))
            .map(Room::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::LOBBY_LAYOUT;
    use raid_rules::{Puzzle, ScenePoint, Tile};

    fn scanned(floor: usize, slot: usize, kind: RoomKind) -> Room {
        Room::new(
            RoomPosition::new(floor, slot).unwrap(),
            Tile::new(3, ScenePoint::new(1, 1)),
            kind,
        )
    }

    fn lobby_floor() -> Vec<Room> {
        vec![
            scanned(0, 0, RoomKind::Combat(Boss::Shamans)),
            scanned(0, 1, RoomKind::Farming),
            scanned(0, 2, RoomKind::Combat(Boss::Vasa)),
            scanned(0, 3, RoomKind::End),
            scanned(0, 4, RoomKind::Puzzle(Puzzle::Crabs)),
            scanned(0, 5, RoomKind::Scavengers),
            scanned(0, 6, RoomKind::Start),
        ]
    }

    #[test]
    fn test_from_rooms() {
        let raid = Raid::from_rooms(lobby_floor());

        assert_eq!(raid.rooms().count(), 7);
        assert!(raid.room(RoomPosition::new(0, 7).unwrap()).is_none());
        assert!(raid.code().to_string().starts_with("CsFCa$PcS#?"));
        assert!(raid.layout().is_none());
        assert!(raid.rotation_string().is_none());
        assert!(raid.faults().is_empty());
    }

    #[test]
    fn test_traversal_order_without_layout() {
        let raid = Raid::from_rooms(lobby_floor());
        let combat: Vec<_> = raid.combat_rooms().iter().map(|r| r.name()).collect();
        assert_eq!(combat, vec!["Shamans", "Vasa"]);
        assert_eq!(raid.full_rotation_string(), "Shamans, Vasa, Crabs");
    }

    #[test]
    fn test_layout_fills_placeholders_and_orders_path() {
        let layout = Layout::parse(LOBBY_LAYOUT).unwrap();
        let raid = Raid::from_rooms(lobby_floor()).with_layout(layout);

        // Floor 0 walks west from the start, then north and east.
        let full = raid.full_rotation_string();
        assert!(full.starts_with("Crabs, Shamans, Vasa, "));

        let combat = raid.combat_rooms();
        assert_eq!(combat.len(), 4);
        assert!(combat[2..].iter().all(|r| r.boss() == Some(Boss::Unknown) && !r.is_scanned()));
        assert!(raid.code().to_string().ends_with(&"?".repeat(16)));
    }

    #[test]
    fn test_inference_fills_unknown_bosses() {
        let rooms = vec![
            scanned(0, 0, RoomKind::Combat(Boss::Tekton)),
            scanned(0, 1, RoomKind::Combat(Boss::Unknown)),
            scanned(0, 2, RoomKind::Combat(Boss::Unknown)),
            scanned(0, 3, RoomKind::Combat(Boss::Mystics)),
        ];
        let raid = Raid::from_rooms(rooms).with_inferred_bosses();

        let bosses: Vec<_> = raid.combat_rooms().iter().filter_map(|r| r.boss()).collect();
        assert_eq!(
            bosses,
            vec![Boss::Tekton, Boss::Vasa, Boss::Guardians, Boss::Mystics]
        );
    }

    #[test]
    fn test_fault_messages() {
        let fault = IntegrityFault::UnrecognizedTemplate {
            position: RoomPosition::new(1, 2).unwrap(),
            chunk: 0xff,
        };
        assert_eq!(
            fault.to_string(),
            "Unrecognised template chunk 0x000000ff at floor 1 slot 2"
        );

        let json = serde_json::to_string(&fault).unwrap();
        assert!(json.contains(r#""fault":"unrecognized_template""#));
        assert_eq!(serde_json::from_str::<IntegrityFault>(&json).unwrap(), fault);

        let off_grid = json.replace(r#""floor":1"#, r#""floor":9"#);
        assert!(serde_json::from_str::<IntegrityFault>(&off_grid).is_err());
    }
}
