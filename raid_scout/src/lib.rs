//! # Raid Scout
//!
//! Reconstructs the chamber layout of a raid instance from a scene snapshot and works out the
//! order its combat rooms are fought in. Reads the static model from `raid_rules`.
//!
//! ## Pipeline
//!
//! - **scanner**: finds the lobby anchor and resolves chamber slots to base tiles
//! - **classifier**: turns each slot's template chunk into a typed room
//! - **layout**: encodes the room grid and matches it against the known layouts
//! - **rotation**: orders the combat rooms, infers unseen bosses and filters rotations
//! - **pipeline**: runs the stages above over one snapshot
//! - **session**: owns the raid of the current visit
//!
//! ## Design Philosophy
//!
//! - **Pure stages**: every stage is a function of the snapshot and static tables
//! - **Faults, not failures**: unexpected data is recorded on the [`Raid`] and never aborts a scan
//! - **Owned state**: the only mutable state is the [`RaidSession`] held by the caller

pub mod classifier;
pub mod config;
pub mod layout;
pub mod lists;
pub mod pipeline;
pub mod raid;
pub mod rotation;
pub mod scanner;
pub mod session;

#[cfg(test)]
mod fixtures;

pub use classifier::*;
pub use config::*;
pub use layout::*;
pub use pipeline::*;
pub use raid::*;
pub use rotation::*;
pub use scanner::*;
pub use session::*;
