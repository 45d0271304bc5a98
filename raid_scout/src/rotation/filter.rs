//! Rotation Filter - matches a rotation string against whitelisted rotations.

use crate::lists::segments;

/// Fewest leading bosses a partial whitelist match must cover.
pub const MIN_PARTIAL_MATCH: usize = 2;

/// Count how many leading bosses of `rotation` a whitelist entry matches.
///
/// A whitelist entry equal to the whole rotation matches all of its bosses. Otherwise an entry
/// matches only when every one of its bosses lines up with the start of the rotation, and the
/// first such entry naming at least [`MIN_PARTIAL_MATCH`] bosses decides the result. An entry
/// that differs anywhere, or runs past the end of the rotation, matches nothing. Comparison
/// ignores case.
pub fn rotation_matches(rotation: &str, whitelist: &[String]) -> usize {
    let rotation = rotation.trim().to_lowercase();
    if rotation.is_empty() {
        return 0;
    }
    let bosses = segments(&rotation);

    let entries: Vec<String> = whitelist.iter().map(|e| e.trim().to_lowercase()).collect();
    if entries.iter().any(|entry| segments(entry) == bosses) {
        return bosses.len();
    }

    entries
        .iter()
        .map(|entry| leading_match(&segments(entry), &bosses))
        .find(|&matched| matched >= MIN_PARTIAL_MATCH)
        .unwrap_or(0)
}

/// Length of `entry` when it is a prefix of `bosses`, otherwise 0.
fn leading_match(entry: &[&str], bosses: &[&str]) -> usize {
    if entry.len() <= bosses.len() && entry.iter().zip(bosses).all(|(wanted, boss)| wanted == boss) {
        entry.len()
    } else {
        0
    }
}
