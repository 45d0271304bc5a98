//! Rotation knowledge: ordering constraints between bosses and the known boss cycles.

use serde::{Deserialize, Serialize};

use crate::rooms::Boss;

/// A directed ordering rule: `before` must be fought ahead of `after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RotationConstraint {
    pub before: Boss,
    pub after: Boss,
}

impl RotationConstraint {
    pub const fn new(before: Boss, after: Boss) -> Self {
        Self { before, after }
    }

    /// Check whether the rule names two concrete bosses.
    ///
    /// Rules mentioning [`Boss::Unknown`] never apply.
    pub fn is_applicable(&self) -> bool {
        self.before.is_known() && self.after.is_known() && self.before != self.after
    }
}

impl std::fmt::Display for RotationConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} before {}", self.before, self.after)
    }
}

/// Ordering rules applied when no other set is configured.
///
/// Empty: every boss follows every other somewhere in [`KNOWN_ROTATIONS`], so no pairwise rule
/// holds for all raids. Extra rules come from configuration only.
pub const DEFAULT_CONSTRAINTS: &[RotationConstraint] = &[];

/// Length of one boss cycle.
pub const ROTATION_LENGTH: usize = 8;

/// The cyclic sequences combat rooms are drawn from.
///
/// Consecutive combat rooms of a raid follow one of these cycles, starting anywhere
/// and wrapping around at the end.
pub const KNOWN_ROTATIONS: [[Boss; ROTATION_LENGTH]; 4] = [
    [
        Boss::Tekton,
        Boss::Vasa,
        Boss::Guardians,
        Boss::Mystics,
        Boss::Shamans,
        Boss::Muttadiles,
        Boss::Vanguards,
        Boss::Vespula,
    ],
    [
        Boss::Tekton,
        Boss::Muttadiles,
        Boss::Guardians,
        Boss::Vespula,
        Boss::Shamans,
        Boss::Vasa,
        Boss::Vanguards,
        Boss::Mystics,
    ],
    [
        Boss::Vespula,
        Boss::Vanguards,
        Boss::Muttadiles,
        Boss::Shamans,
        Boss::Mystics,
        Boss::Guardians,
        Boss::Vasa,
        Boss::Tekton,
    ],
    [
        Boss::Mystics,
        Boss::Vanguards,
        Boss::Vasa,
        Boss::Shamans,
        Boss::Vespula,
        Boss::Guardians,
        Boss::Muttadiles,
        Boss::Tekton,
    ],
];
