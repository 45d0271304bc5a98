//! # Raid Rules
//!
//! The static domain model for raid scouting - everything the pipeline reads but never derives.
//! This crate holds the world snapshot types, the room vocabulary, the instance template table and
//! the rotation knowledge. It contains no reconstruction logic.

pub mod rooms;
pub mod rotations;
pub mod world_state;

pub use rooms::*;
pub use rotations::*;
pub use world_state::*;
