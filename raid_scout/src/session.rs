//! Per-visit raid state.
//!
//! A [`RaidSession`] owns the current raid. It scouts once when the player enters the chambers
//! and drops the result when they leave, unless the overlay is kept up at the bank.

use raid_rules::TileSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ScoutConfig;
use crate::layout::LayoutCatalog;
use crate::pipeline::Scout;
use crate::raid::Raid;

/// Identifies one stay inside the chambers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisitId(Uuid);

impl VisitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for VisitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VisitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raid membership flags reported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RaidStatus {
    pub in_raid: bool,
    pub in_party: bool,
}

impl RaidStatus {
    pub fn new(in_raid: bool, in_party: bool) -> Self {
        Self { in_raid, in_party }
    }
}

/// What an observed status change did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Entered the chambers and scouted. `scouted` is false when no raid was found.
    Entered { visit: VisitId, scouted: bool },

    /// Left the chambers. `kept` is true when the raid stays up for the bank overlay.
    Left { kept: bool },

    /// Left the raid party, dropping any raid.
    LeftParty,

    Unchanged,
}

/// Owns the raid of the current visit.
#[derive(Debug, Clone)]
pub struct RaidSession {
    scout: Scout,
    keep_at_bank: bool,
    status: RaidStatus,
    visit: Option<VisitId>,
    raid: Option<Raid>,
}

impl RaidSession {
    pub fn new(scout: Scout, keep_at_bank: bool) -> Self {
        Self {
            scout,
            keep_at_bank,
            status: RaidStatus::default(),
            visit: None,
            raid: None,
        }
    }

    /// Session using the built-in layout catalog.
    pub fn from_config(config: &ScoutConfig) -> Self {
        Self::new(
            Scout::new(config, LayoutCatalog::builtin()),
            config.scout_overlay_at_bank,
        )
    }

    /// Apply a status update, scouting `snapshot` if it marks entry into the chambers.
    pub fn observe(&mut self, status: RaidStatus, snapshot: &TileSnapshot) -> SessionEvent {
        let previous = std::mem::replace(&mut self.status, status);

        if previous.in_party && !status.in_party {
            debug!(visit = ?self.visit, "left raid party");
            self.visit = None;
            self.raid = None;
            return SessionEvent::LeftParty;
        }

        match (previous.in_raid, status.in_raid) {
            (false, true) => {
                let visit = VisitId::new();
                self.visit = Some(visit);
                self.raid = self.scout.scout(snapshot);

                match &self.raid {
                    Some(raid) => info!(
                        %visit,
                        code = %raid.code(),
                        layout = raid.layout().map(|l| l.name()),
                        "scouted raid"
                    ),
                    None => debug!(%visit, "entered raid but no anchor was found"),
                }

                SessionEvent::Entered {
                    visit,
                    scouted: self.raid.is_some(),
                }
            }
            (true, false) => {
                self.visit = None;
                if !self.keep_at_bank {
                    self.raid = None;
                }
                let kept = self.raid.is_some();
                debug!(kept, "left raid");
                SessionEvent::Left { kept }
            }
            _ => SessionEvent::Unchanged,
        }
    }

    pub fn status(&self) -> RaidStatus {
        self.status
    }

    pub fn visit(&self) -> Option<VisitId> {
        self.visit
    }

    pub fn raid(&self) -> Option<&Raid> {
        self.raid.as_ref()
    }

    /// The overlay is drawn only for raids that matched a known layout.
    pub fn overlay_visible(&self) -> bool {
        self.raid.as_ref().is_some_and(|raid| raid.layout().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::lobby_snapshot;

    const OUTSIDE: RaidStatus = RaidStatus {
        in_raid: false,
        in_party: true,
    };
    const INSIDE: RaidStatus = RaidStatus {
        in_raid: true,
        in_party: true,
    };

    fn session(keep_at_bank: bool) -> RaidSession {
        RaidSession::new(Scout::with_defaults(), keep_at_bank)
    }

    #[test]
    fn test_entering_scouts_once() {
        let mut session = session(false);
        let snapshot = lobby_snapshot();

        assert_eq!(session.observe(OUTSIDE, &snapshot), SessionEvent::Unchanged);
        assert!(session.raid().is_none());

        let SessionEvent::Entered { visit, scouted } = session.observe(INSIDE, &snapshot) else {
            panic!("expected entry");
        };
        assert!(scouted);
        assert_eq!(session.visit(), Some(visit));
        assert!(session.overlay_visible());

        // Staying inside does not scout again.
        assert_eq!(
            session.observe(INSIDE, &TileSnapshot::default()),
            SessionEvent::Unchanged
        );
        assert!(session.raid().is_some());
        assert_eq!(session.visit(), Some(visit));
    }

    #[test]
    fn test_entering_without_anchor() {
        let mut session = session(false);
        let event = session.observe(INSIDE, &TileSnapshot::default());

        assert!(matches!(event, SessionEvent::Entered { scouted: false, .. }));
        assert!(session.raid().is_none());
        assert!(!session.overlay_visible());
    }

    #[test]
    fn test_leaving_drops_raid() {
        let mut session = session(false);
        let snapshot = lobby_snapshot();
        session.observe(INSIDE, &snapshot);

        assert_eq!(
            session.observe(OUTSIDE, &snapshot),
            SessionEvent::Left { kept: false }
        );
        assert!(session.raid().is_none());
        assert!(session.visit().is_none());
    }

    #[test]
    fn test_overlay_kept_at_bank_until_party_is_left() {
        let mut session = session(true);
        let snapshot = lobby_snapshot();
        session.observe(INSIDE, &snapshot);

        assert_eq!(
            session.observe(OUTSIDE, &snapshot),
            SessionEvent::Left { kept: true }
        );
        assert!(session.overlay_visible());
        assert!(session.visit().is_none());

        let alone = RaidStatus::new(false, false);
        assert_eq!(session.observe(alone, &snapshot), SessionEvent::LeftParty);
        assert!(session.raid().is_none());
    }

    #[test]
    fn test_each_entry_opens_a_new_visit() {
        let mut session = session(false);
        let snapshot = lobby_snapshot();

        session.observe(INSIDE, &snapshot);
        let first = session.visit();
        session.observe(OUTSIDE, &snapshot);
        session.observe(INSIDE, &snapshot);

        assert!(first.is_some());
        assert_ne!(session.visit(), first);
    }

    #[test]
    fn test_from_config_reads_bank_setting() {
        let config = ScoutConfig::from_toml_str("scout_overlay_at_bank = true").unwrap();
        let mut session = RaidSession::from_config(&config);
        let snapshot = lobby_snapshot();

        session.observe(INSIDE, &snapshot);
        assert_eq!(
            session.observe(OUTSIDE, &snapshot),
            SessionEvent::Left { kept: true }
        );
    }
}
