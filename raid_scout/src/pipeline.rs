//! The scouting pipeline: scan, classify, encode, match and solve.

use raid_rules::{Room, TileSnapshot};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::classifier::classify;
use crate::config::ScoutConfig;
use crate::layout::LayoutCatalog;
use crate::raid::{IntegrityFault, Raid};
use crate::rotation::{RotationError, RotationSolver};
use crate::scanner::GridScanner;

/// Reconstructs raids from snapshots.
///
/// Holds only read-only state, so one instance can serve any number of snapshots.
#[derive(Debug, Clone)]
pub struct Scout {
    scanner: GridScanner,
    catalog: Arc<LayoutCatalog>,
    solver: RotationSolver,
}

impl Default for Scout {
    fn default() -> Self {
        Self::new(&ScoutConfig::default(), LayoutCatalog::builtin())
    }
}

impl Scout {
    pub fn new(config: &ScoutConfig, catalog: Arc<LayoutCatalog>) -> Self {
        Self {
            scanner: GridScanner::new(config.scan.clone()),
            catalog,
            solver: RotationSolver::new(config.rotation.constraints()),
        }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &LayoutCatalog {
        &self.catalog
    }

    /// Reconstruct the raid visible in `snapshot`.
    ///
    /// Returns `None` when the snapshot is not inside a raid.
    pub fn scout(&self, snapshot: &TileSnapshot) -> Option<Raid> {
        let scan = self.scanner.scan(snapshot)?;

        let mut rooms = Vec::with_capacity(scan.slots.len());
        let mut faults = Vec::new();
        for (position, base) in &scan.slots {
            let classification = classify(snapshot, *position, base);
            rooms.push(classification.room);
            faults.extend(classification.fault);
        }

        let mut raid = faults
            .into_iter()
            .fold(Raid::from_rooms(rooms), Raid::with_fault);
        debug!(code = %raid.code(), rooms = scan.slots.len(), "encoded raid");

        let candidates = self.catalog.candidates(raid.code());
        if candidates.len() > 1 {
            warn!(code = %raid.code(), matches = candidates.len(), "ambiguous layout match");
            let layouts = candidates.iter().map(|l| l.notation().to_string()).collect();
            raid = raid.with_fault(IntegrityFault::AmbiguousLayout { layouts });
        }
        match candidates.first() {
            Some(layout) => {
                debug!(layout = layout.name(), "matched layout");
                raid = raid.with_layout((*layout).clone());
            }
            None => debug!(code = %raid.code(), "no catalog layout matches"),
        }

        let raid = raid.with_inferred_bosses();
        let combat: Vec<Room> = raid.combat_rooms().into_iter().cloned().collect();

        let (rotation, fault) = match self.solver.solve(&combat) {
            Ok(rotation) => (rotation, None),
            Err(RotationError::Contradiction { bosses, fallback }) => {
                error!(?bosses, "contradictory rotation constraints, using fallback order");
                (
                    fallback,
                    Some(IntegrityFault::ContradictoryConstraints { bosses }),
                )
            }
        };

        let raid = fault.into_iter().fold(raid, Raid::with_fault);
        let rotation = (!rotation.is_empty()).then_some(rotation);
        Some(raid.with_rotation(rotation))
    }
}
