//! Rotation Solver - orders the combat rooms of a raid.
//!
//! The solver builds a precedence graph over the combat rooms, one edge per applicable
//! [`RotationConstraint`] whose bosses are both present, and sorts it topologically. Rooms the
//! constraints leave unordered keep grid traversal order.
//!
//! - **inference**: fills unknown bosses from the known boss cycles
//! - **filter**: matches a rotation string against user whitelists

mod filter;
mod inference;

pub use filter::*;
pub use inference::*;

use raid_rules::{Boss, Room, RoomPosition, RotationConstraint, DEFAULT_CONSTRAINTS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// One combat encounter of a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub position: RoomPosition,
    pub boss: Boss,
}

/// Ordered sequence of combat encounters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rotation {
    encounters: Vec<Encounter>,
}

impl Rotation {
    pub fn encounters(&self) -> &[Encounter] {
        &self.encounters
    }

    pub fn bosses(&self) -> impl Iterator<Item = Boss> + '_ {
        self.encounters.iter().map(|e| e.boss)
    }

    pub fn len(&self) -> usize {
        self.encounters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encounters.is_empty()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.bosses().map(|boss| boss.name()).collect();
        f.write_str(&names.join(", "))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RotationError {
    /// The constraints form a cycle among the present bosses. `fallback` orders the rooms
    /// anyway by releasing the earliest blocked room whenever the sort stalls.
    #[error("Contradictory rotation constraints among {}", boss_names(.bosses))]
    Contradiction { bosses: Vec<Boss>, fallback: Rotation },
}

fn boss_names(bosses: &[Boss]) -> String {
    bosses.iter().map(|b| b.name()).collect::<Vec<_>>().join(", ")
}

/// Orders combat rooms under a set of pairwise constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationSolver {
    constraints: Vec<RotationConstraint>,
}

impl Default for RotationSolver {
    fn default() -> Self {
        Self::new(DEFAULT_CONSTRAINTS.to_vec())
    }
}

impl RotationSolver {
    pub fn new(constraints: Vec<RotationConstraint>) -> Self {
        Self { constraints }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn constraints(&self) -> &[RotationConstraint] {
        &self.constraints
    }

    /// Order the combat rooms among `rooms`. Other rooms are ignored.
    pub fn solve(&self, rooms: &[Room]) -> Result<Rotation, RotationError> {
        let mut encounters: Vec<Encounter> = rooms
            .iter()
            .filter_map(|room| {
                room.boss().map(|boss| Encounter {
                    position: room.position,
                    boss,
                })
            })
            .collect();
        encounters.sort_by_key(|e| e.position);
        encounters.dedup_by_key(|e| e.position);

        let count = encounters.len();
        let mut successors = vec![Vec::new(); count];
        let mut blockers = vec![0usize; count];

        for constraint in self.constraints.iter().filter(|c| c.is_applicable()) {
            for (from, first) in encounters.iter().enumerate() {
                if first.boss != constraint.before {
                    continue;
                }
                for (to, second) in encounters.iter().enumerate() {
                    if second.boss == constraint.after && !successors[from].contains(&to) {
                        successors[from].push(to);
                        blockers[to] += 1;
                    }
                }
            }
        }

        let mut ready: BTreeSet<usize> = (0..count).filter(|&i| blockers[i] == 0).collect();
        let mut remaining: BTreeSet<usize> = (0..count).collect();
        let mut order = Vec::with_capacity(count);
        let mut cycle: Option<Vec<Boss>> = None;

        while let Some(&first) = remaining.first() {
            let next = match ready.pop_first() {
                Some(next) => next,
                None => {
                    cycle.get_or_insert_with(|| remaining.iter().map(|&i| encounters[i].boss).collect());
                    first
                }
            };

            remaining.remove(&next);
            order.push(encounters[next]);
            for &to in &successors[next] {
                if !remaining.contains(&to) {
                    continue;
                }
                blockers[to] = blockers[to].saturating_sub(1);
                if blockers[to] == 0 {
                    ready.insert(to);
                }
            }
        }

        let rotation = Rotation { encounters: order };
        match cycle {
            Some(bosses) => Err(RotationError::Contradiction {
                bosses,
                fallback: rotation,
            }),
            None => Ok(rotation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use raid_rules::{RoomKind, RoomType, ScenePoint, Tile, KNOWN_ROTATIONS, ROTATION_LENGTH};

    const ORDERING: [RotationConstraint; 4] = [
        RotationConstraint::new(Boss::Tekton, Boss::Vespula),
        RotationConstraint::new(Boss::Muttadiles, Boss::Vespula),
        RotationConstraint::new(Boss::Shamans, Boss::Vasa),
        RotationConstraint::new(Boss::Guardians, Boss::Mystics),
    ];

    fn combat(index: usize, boss: Boss) -> Room {
        Room::new(
            RoomPosition::from_index(index).unwrap(),
            Tile::new(3, ScenePoint::new(1, 1)),
            RoomKind::Combat(boss),
        )
    }

    fn names(rotation: &Rotation) -> Vec<Boss> {
        rotation.bosses().collect()
    }

    #[test]
    fn test_single_combat_room() {
        let rotation = RotationSolver::with_defaults()
            .solve(&[combat(0, Boss::Shamans)])
            .unwrap();
        assert_eq!(names(&rotation), vec![Boss::Shamans]);
        assert_eq!(rotation.to_string(), "Shamans");
    }

    #[test]
    fn test_no_combat_rooms() {
        let rooms = [Room::placeholder(RoomPosition::from_index(3).unwrap(), RoomType::End)];
        let rotation = RotationSolver::with_defaults().solve(&rooms).unwrap();
        assert!(rotation.is_empty());
        assert_eq!(rotation.to_string(), "");
    }

    #[test]
    fn test_constraint_overrides_traversal_order() {
        let rooms = [
            combat(1, Boss::Vespula),
            combat(2, Boss::Guardians),
            combat(9, Boss::Tekton),
        ];
        let solver = RotationSolver::new(vec![RotationConstraint::new(Boss::Tekton, Boss::Vespula)]);
        let rotation = solver.solve(&rooms).unwrap();

        assert_eq!(
            names(&rotation),
            vec![Boss::Guardians, Boss::Tekton, Boss::Vespula]
        );
        assert_eq!(rotation.to_string(), "Guardians, Tekton, Vespula");
    }

    #[test]
    fn test_unconstrained_rooms_keep_traversal_order() {
        let rooms = [
            combat(12, Boss::Vanguards),
            combat(0, Boss::Vasa),
            combat(5, Boss::Unknown),
        ];
        let rotation = RotationSolver::new(Vec::new()).solve(&rooms).unwrap();

        let positions: Vec<_> = rotation.encounters().iter().map(|e| e.position.index()).collect();
        assert_eq!(positions, vec![0, 5, 12]);
    }

    #[test]
    fn test_contradiction_is_reported_with_fallback() {
        let solver = RotationSolver::new(vec![
            RotationConstraint::new(Boss::Tekton, Boss::Vasa),
            RotationConstraint::new(Boss::Vasa, Boss::Tekton),
        ]);
        let rooms = [
            combat(0, Boss::Mystics),
            combat(1, Boss::Vasa),
            combat(2, Boss::Tekton),
        ];

        let Err(RotationError::Contradiction { bosses, fallback }) = solver.solve(&rooms) else {
            panic!("expected a contradiction");
        };
        assert_eq!(bosses, vec![Boss::Vasa, Boss::Tekton]);
        assert_eq!(names(&fallback), vec![Boss::Mystics, Boss::Vasa, Boss::Tekton]);

        let message = RotationError::Contradiction { bosses, fallback }.to_string();
        assert_eq!(message, "Contradictory rotation constraints among Vasa, Tekton");
    }

    fn known_boss() -> impl Strategy<Value = Boss> {
        prop_oneof![
            Just(Boss::Tekton),
            Just(Boss::Muttadiles),
            Just(Boss::Guardians),
            Just(Boss::Vespula),
            Just(Boss::Shamans),
            Just(Boss::Vasa),
            Just(Boss::Vanguards),
            Just(Boss::Mystics),
        ]
    }

    proptest! {
        #[test]
        fn prop_constraints_are_respected(
            bosses in prop::sample::subsequence(
                vec![
                    Boss::Tekton,
                    Boss::Muttadiles,
                    Boss::Guardians,
                    Boss::Vespula,
                    Boss::Shamans,
                    Boss::Vasa,
                    Boss::Vanguards,
                    Boss::Mystics,
                ],
                0..=8,
            ).prop_shuffle(),
        ) {
            let rooms: Vec<Room> = bosses
                .iter()
                .enumerate()
                .map(|(i, &boss)| combat(i * 2, boss))
                .collect();
            let rotation = RotationSolver::new(ORDERING.to_vec()).solve(&rooms).unwrap();
            let order = names(&rotation);

            prop_assert_eq!(order.len(), bosses.len());
            for constraint in &ORDERING {
                let before = order.iter().position(|&b| b == constraint.before);
                let after = order.iter().position(|&b| b == constraint.after);
                if let (Some(before), Some(after)) = (before, after) {
                    prop_assert!(before < after, "{} violated", constraint);
                }
            }
        }

        #[test]
        fn prop_without_constraints_order_is_traversal_order(
            bosses in prop::collection::vec(known_boss(), 0..8),
        ) {
            let rooms: Vec<Room> = bosses
                .iter()
                .enumerate()
                .rev()
                .map(|(i, &boss)| combat(i, boss))
                .collect();
            let rotation = RotationSolver::new(Vec::new()).solve(&rooms).unwrap();
            prop_assert_eq!(names(&rotation), bosses);
        }

        #[test]
        fn prop_defaults_keep_known_cycle_order(
            cycle in 0..KNOWN_ROTATIONS.len(),
            offset in 0..ROTATION_LENGTH,
            length in 1..=ROTATION_LENGTH,
        ) {
            let window: Vec<Boss> = (0..length)
                .map(|i| KNOWN_ROTATIONS[cycle][(offset + i) % ROTATION_LENGTH])
                .collect();
            let rooms: Vec<Room> = window
                .iter()
                .enumerate()
                .map(|(i, &boss)| combat(i * 3, boss))
                .collect();

            let rotation = RotationSolver::with_defaults().solve(&rooms).unwrap();
            prop_assert_eq!(names(&rotation), window);

            let whitelist = vec![rotation.to_string()];
            prop_assert_eq!(rotation_matches(&rotation.to_string(), &whitelist), length);
        }
    }
}
