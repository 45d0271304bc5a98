//! Room Classifier - resolves a base tile's template chunk to a typed room.

use raid_rules::{InstanceTemplate, Room, RoomKind, RoomPosition, Tile, TileSnapshot};
use tracing::{trace, warn};

use crate::raid::IntegrityFault;

/// Result of classifying one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub room: Room,
    /// Set when the slot carries a template chunk no known template accounts for.
    pub fault: Option<IntegrityFault>,
}

/// Classify the room whose base tile is `base`.
///
/// A slot without a template chunk, or with one that matches no known template, is
/// classified as [`RoomKind::Empty`]. The latter is also reported as a fault.
pub fn classify(snapshot: &TileSnapshot, position: RoomPosition, base: &Tile) -> Classification {
    let Some(chunk) = snapshot.template_chunk_at(base) else {
        trace!(%position, "no template chunk loaded");
        return Classification {
            room: Room::new(position, base.clone(), RoomKind::Empty),
            fault: None,
        };
    };

    match InstanceTemplate::find_match(chunk) {
        Some(template) => Classification {
            room: Room::new(position, base.clone(), template.kind()),
            fault: None,
        },
        None => {
            warn!(%position, chunk, "unrecognised template chunk");
            Classification {
                room: Room::new(position, base.clone(), RoomKind::Empty),
                fault: Some(IntegrityFault::UnrecognizedTemplate { position, chunk }),
            }
        }
    }
}
