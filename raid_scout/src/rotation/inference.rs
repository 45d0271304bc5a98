//! Boss inference from the known boss cycles.

use raid_rules::{Boss, KNOWN_ROTATIONS, ROTATION_LENGTH};

/// Fill the unknown bosses of a path-ordered combat sequence.
///
/// Consecutive combat rooms follow one of [`KNOWN_ROTATIONS`]. When at least two bosses are
/// known and exactly one way of laying the sequence onto a cycle agrees with all of them, the
/// unknown bosses are taken from that cycle. Returns `None` when nothing can be inferred,
/// including when every boss is already known.
pub fn infer_unknown_bosses(bosses: &[Boss]) -> Option<Vec<Boss>> {
    let known = bosses.iter().filter(|b| b.is_known()).count();
    if known < 2 || known == bosses.len() || bosses.len() > ROTATION_LENGTH {
        return None;
    }

    let mut inferred: Option<Vec<Boss>> = None;
    for cycle in &KNOWN_ROTATIONS {
        for offset in 0..ROTATION_LENGTH {
            let candidate: Vec<Boss> = (0..bosses.len())
                .map(|i| cycle[(offset + i) % ROTATION_LENGTH])
                .collect();

            let agrees = bosses
                .iter()
                .zip(&candidate)
                .all(|(boss, expected)| !boss.is_known() || boss == expected);
            if !agrees {
                continue;
            }

            match &inferred {
                Some(existing) if *existing != candidate => return None,
                Some(_) => {}
                None => inferred = Some(candidate),
            }
        }
    }

    inferred
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use Boss::*;

    #[test]
    fn test_fills_gap_between_known_bosses() {
        let inferred = infer_unknown_bosses(&[Tekton, Unknown, Unknown, Mystics]);
        assert_eq!(inferred, Some(vec![Tekton, Vasa, Guardians, Mystics]));
    }

    #[test]
    fn test_wraps_around_cycle_end() {
        let inferred = infer_unknown_bosses(&[Vespula, Tekton, Unknown]);
        assert_eq!(inferred, Some(vec![Vespula, Tekton, Vasa]));
    }

    #[test]
    fn test_needs_two_known_bosses() {
        assert_eq!(infer_unknown_bosses(&[Tekton, Unknown, Unknown]), None);
        assert_eq!(infer_unknown_bosses(&[Unknown, Unknown]), None);
        assert_eq!(infer_unknown_bosses(&[]), None);
    }

    #[test]
    fn test_fully_known_sequence_is_left_alone() {
        assert_eq!(infer_unknown_bosses(&[Tekton, Vasa]), None);
    }

    #[test]
    fn test_ambiguous_or_impossible_sequences_infer_nothing() {
        // Guardians sits two rooms after Tekton in two different cycles.
        assert_eq!(infer_unknown_bosses(&[Tekton, Unknown, Guardians]), None);
        assert_eq!(infer_unknown_bosses(&[Tekton, Unknown, Tekton]), None);
        assert_eq!(infer_unknown_bosses(&[Vasa, Vespula, Unknown]), None);
    }

    proptest! {
        #[test]
        fn prop_inference_agrees_with_known_bosses(
            cycle in 0..KNOWN_ROTATIONS.len(),
            offset in 0..ROTATION_LENGTH,
            len in 2..=ROTATION_LENGTH,
            hidden in prop::collection::vec(any::<bool>(), ROTATION_LENGTH),
        ) {
            let full: Vec<Boss> = (0..len)
                .map(|i| KNOWN_ROTATIONS[cycle][(offset + i) % ROTATION_LENGTH])
                .collect();
            let partial: Vec<Boss> = full
                .iter()
                .zip(&hidden)
                .map(|(&boss, &hide)| if hide { Unknown } else { boss })
                .collect();

            if let Some(inferred) = infer_unknown_bosses(&partial) {
                prop_assert_eq!(inferred.len(), partial.len());
                for (inferred, observed) in inferred.iter().zip(&partial) {
                    prop_assert!(!observed.is_known() || inferred == observed);
                    prop_assert!(inferred.is_known());
                }
            }
        }
    }
}
