//! Scout configuration, loaded from TOML.

use raid_rules::{Room, RotationConstraint, DEFAULT_CONSTRAINTS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::Layout;
use crate::lists::{parse_bracketed, split_list};
use crate::rotation::rotation_matches;
use crate::scanner::ScanConfig;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid scan configuration: {reason}")]
    InvalidScan { reason: String },
}

/// Rotation solving settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationSettings {
    /// Replaces the built-in ordering rules when set.
    pub constraints: Option<Vec<RotationConstraint>>,
}

impl RotationSettings {
    pub fn constraints(&self) -> Vec<RotationConstraint> {
        self.constraints
            .clone()
            .unwrap_or_else(|| DEFAULT_CONSTRAINTS.to_vec())
    }
}

/// Everything the scout reads from the user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    pub scan: ScanConfig,

    pub rotation: RotationSettings,

    /// Keep the last scouted raid after leaving the chambers.
    pub scout_overlay_at_bank: bool,

    pub whitelisted_rooms: String,
    pub blacklisted_rooms: String,

    /// Bracketed rotations, e.g. `[Tekton, Vasa, Guardians]`.
    pub whitelisted_rotations: String,

    pub whitelisted_layouts: String,
}

impl ScoutConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: ScoutConfig = toml::from_str(input)?;
        config.scan.validate()?;
        Ok(config)
    }

    pub fn lists(&self) -> ScoutLists {
        ScoutLists::from_config(self)
    }
}

/// Parsed user lists, lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScoutLists {
    pub room_whitelist: Vec<String>,
    pub room_blacklist: Vec<String>,
    pub rotation_whitelist: Vec<String>,
    pub layout_whitelist: Vec<String>,
}

impl ScoutLists {
    pub fn from_config(config: &ScoutConfig) -> Self {
        Self {
            room_whitelist: split_list(&config.whitelisted_rooms),
            room_blacklist: split_list(&config.blacklisted_rooms),
            rotation_whitelist: parse_bracketed(&config.whitelisted_rotations),
            layout_whitelist: split_list(&config.whitelisted_layouts),
        }
    }

    pub fn is_room_whitelisted(&self, room: &Room) -> bool {
        contains_name(&self.room_whitelist, room.name())
    }

    pub fn is_room_blacklisted(&self, room: &Room) -> bool {
        contains_name(&self.room_blacklist, room.name())
    }

    pub fn is_layout_whitelisted(&self, layout: &Layout) -> bool {
        contains_name(&self.layout_whitelist, layout.name())
    }

    /// Number of leading bosses of `rotation` matched by the rotation whitelist.
    pub fn rotation_matches(&self, rotation: &str) -> usize {
        rotation_matches(rotation, &self.rotation_whitelist)
    }
}

fn contains_name(list: &[String], name: &str) -> bool {
    let name = name.to_lowercase();
    list.iter().any(|entry| *entry == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::LOBBY_LAYOUT;
    use crate::scanner::BoundaryRule;
    use raid_rules::{Boss, RoomKind, RoomPosition, RoomType};

    #[test]
    fn test_defaults_from_empty_document() {
        let config = ScoutConfig::from_toml_str("").unwrap();

        assert_eq!(config, ScoutConfig::default());
        assert_eq!(config.scan.lobby_plane, 3);
        assert_eq!(config.scan.floors, 2);
        assert_eq!(config.rotation.constraints(), DEFAULT_CONSTRAINTS.to_vec());
        assert!(config.rotation.constraints().is_empty());
        assert!(!config.scout_overlay_at_bank);
    }

    #[test]
    fn test_full_document() {
        let config = ScoutConfig::from_toml_str(
            r#"
            scout_overlay_at_bank = true
            whitelisted_rooms = "Tekton, Ice demon"
            blacklisted_rooms = "Vespula,Tightrope"
            whitelisted_rotations = "[Shamans, Vasa, Vanguards] [Tekton, Vasa]"
            whitelisted_layouts = "SCFCP.CSCFS"

            [scan]
            floors = 3
            lobby_plane = 3
            boundary = "skip"

            [[rotation.constraints]]
            before = "vasa"
            after = "shamans"
            "#,
        )
        .unwrap();

        assert!(config.scout_overlay_at_bank);
        assert_eq!(config.scan.floors, 3);
        assert_eq!(config.scan.boundary, BoundaryRule::Skip);
        assert_eq!(
            config.rotation.constraints(),
            vec![RotationConstraint::new(Boss::Vasa, Boss::Shamans)]
        );

        let lists = config.lists();
        assert_eq!(lists.room_whitelist, vec!["tekton", "ice demon"]);
        assert_eq!(lists.room_blacklist, vec!["vespula", "tightrope"]);
        assert_eq!(
            lists.rotation_whitelist,
            vec!["shamans, vasa, vanguards", "tekton, vasa"]
        );
        assert_eq!(lists.rotation_matches("Shamans, Vasa, Vanguards"), 3);
        assert_eq!(lists.rotation_matches("Tekton, Vasa, Guardians"), 2);
    }

    #[test]
    fn test_room_lists_match_display_names() {
        let config = ScoutConfig {
            whitelisted_rooms: "Tekton, Ice demon".to_string(),
            blacklisted_rooms: "scavengers".to_string(),
            ..ScoutConfig::default()
        };
        let lists = config.lists();
        let position = RoomPosition::new(0, 0).unwrap();

        let tekton = Room::placeholder(position, RoomType::Combat);
        assert!(!lists.is_room_whitelisted(&tekton));

        let tekton = Room {
            kind: RoomKind::Combat(Boss::Tekton),
            ..tekton
        };
        assert!(lists.is_room_whitelisted(&tekton));
        assert!(lists.is_room_blacklisted(&Room::placeholder(position, RoomType::Scavengers)));
    }

    #[test]
    fn test_layout_whitelist_uses_layout_name() {
        let config = ScoutConfig {
            whitelisted_layouts: "SCFCP.CSCFS, spcfc.cspcf".to_string(),
            ..ScoutConfig::default()
        };
        let lists = config.lists();

        let listed = Layout::parse("SCFCP.CSCFS - #NEEESW#WWNEEE").unwrap();
        let lobby = Layout::parse(LOBBY_LAYOUT).unwrap();
        let other = Layout::parse("SCPFC.CSPCF - #NEEESW#WWNEEE").unwrap();

        assert!(lists.is_layout_whitelisted(&listed));
        assert!(lists.is_layout_whitelisted(&lobby));
        assert!(!lists.is_layout_whitelisted(&other));
    }

    #[test]
    fn test_invalid_scan_rejected() {
        let result = ScoutConfig::from_toml_str("[scan]\nfloors = 0\n");
        assert!(matches!(result, Err(ConfigError::InvalidScan { .. })));

        let result = ScoutConfig::from_toml_str("scan = 5");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
