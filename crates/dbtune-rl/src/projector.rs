//! Projection of action vectors onto knob domains

use dbtune_core::{KnobSet, KnobSpec, Result, TuneError};

/// Default fraction of a knob's range that one full-scale action moves.
pub const DEFAULT_ACTION_SCALE: f64 = 0.1;

/// Project an unconstrained action vector onto the knob domains.
///
/// Actions pair positionally with the knob set's lexicographic order.
/// Per knob: the action scales the knob's range into an adjustment, the
/// adjusted value is clipped to [min, max], and strictly positive
/// candidates are then rounded to the nearest integer. Negative and zero
/// candidates are kept unrounded; the asymmetry is intentional. Bounds
/// pass through unchanged.
///
/// Actions far outside [-1, 1] are legal; clipping contains them. Note
/// that rounding happens after clipping, so a fractional upper bound can
/// be exceeded by up to 0.5: a candidate clipped to a max of 0.9 rounds
/// to 1.0.
pub fn project_actions(knobs: &KnobSet, actions: &[f64], scale: f64) -> Result<KnobSet> {
    if actions.len() != knobs.len() {
        return Err(TuneError::ActionLengthMismatch {
            actions: actions.len(),
            knobs: knobs.len(),
        });
    }

    let mut projected = Vec::with_capacity(knobs.len());

    for (spec, &action) in knobs.iter().zip(actions) {
        if spec.min_value > spec.max_value {
            return Err(TuneError::InvalidKnobBounds {
                name: spec.name.clone(),
                min: spec.min_value,
                max: spec.max_value,
            });
        }

        let adjustment = (spec.max_value - spec.min_value) * action * scale;
        let candidate = (spec.value + adjustment).clamp(spec.min_value, spec.max_value);
        let value = if candidate > 0.0 {
            candidate.round()
        } else {
            candidate
        };

        projected.push(KnobSpec {
            name: spec.name.clone(),
            min_value: spec.min_value,
            max_value: spec.max_value,
            value,
        });
    }

    Ok(KnobSet::new(projected))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knob(name: &str, min: f64, max: f64, value: f64) -> KnobSpec {
        KnobSpec {
            name: name.to_string(),
            min_value: min,
            max_value: max,
            value,
        }
    }

    #[test]
    fn test_positive_candidate_rounds() {
        // range 20, action 0.2, scale 0.1 -> adjustment 0.4, candidate 2.4
        let knobs = KnobSet::new(vec![knob("k", -10.0, 10.0, 2.0)]);
        let projected = project_actions(&knobs, &[0.2], DEFAULT_ACTION_SCALE).unwrap();
        assert_eq!(projected.get("k").unwrap().value, 2.0);
    }

    #[test]
    fn test_negative_candidate_stays_unrounded() {
        // candidate -2.4 keeps its fraction
        let knobs = KnobSet::new(vec![knob("k", -10.0, 10.0, -2.0)]);
        let projected = project_actions(&knobs, &[-0.2], DEFAULT_ACTION_SCALE).unwrap();
        assert_eq!(projected.get("k").unwrap().value, -2.4);
    }

    #[test]
    fn test_clipping_contains_wild_actions() {
        let knobs = KnobSet::new(vec![
            knob("a", 1.0, 10000.0, 200.0),
            knob("b", -50.0, 50.0, 0.0),
        ]);

        for action in [-1e6, -3.0, -1.0, 0.0, 1.0, 7.5, 1e9] {
            let projected =
                project_actions(&knobs, &[action, action], DEFAULT_ACTION_SCALE).unwrap();
            for spec in &projected {
                assert!(
                    spec.value >= spec.min_value && spec.value <= spec.max_value,
                    "{} = {} outside [{}, {}] for action {action}",
                    spec.name,
                    spec.value,
                    spec.min_value,
                    spec.max_value
                );
            }
        }
    }

    #[test]
    fn test_rounding_can_exceed_fractional_bounds() {
        // A huge action clips the candidate to the max of 0.9; rounding
        // then lands on 1.0, outside the bound. Pins the round-after-clip
        // order.
        let knobs = KnobSet::new(vec![knob("checkpoint_completion_target", 0.0, 0.9, 0.5)]);
        let projected = project_actions(&knobs, &[1e9], DEFAULT_ACTION_SCALE).unwrap();
        assert_eq!(
            projected.get("checkpoint_completion_target").unwrap().value,
            1.0
        );
    }

    #[test]
    fn test_actions_pair_with_lexicographic_order() {
        let knobs = KnobSet::new(vec![
            knob("work_mem", 0.0, 100.0, 50.0),
            knob("wal_writer_delay", 0.0, 100.0, 50.0),
            knob("checkpoint_timeout", 0.0, 100.0, 50.0),
        ]);

        // Only action[0] is non-zero: it must move checkpoint_timeout,
        // the lexicographically first knob.
        let projected = project_actions(&knobs, &[1.0, 0.0, 0.0], DEFAULT_ACTION_SCALE).unwrap();
        assert_eq!(projected.get("checkpoint_timeout").unwrap().value, 60.0);
        assert_eq!(projected.get("wal_writer_delay").unwrap().value, 50.0);
        assert_eq!(projected.get("work_mem").unwrap().value, 50.0);
    }

    #[test]
    fn test_bounds_pass_through() {
        let knobs = KnobSet::new(vec![knob("k", 30.0, 86400.0, 300.0)]);
        let projected = project_actions(&knobs, &[0.5], DEFAULT_ACTION_SCALE).unwrap();
        let spec = projected.get("k").unwrap();
        assert_eq!(spec.min_value, 30.0);
        assert_eq!(spec.max_value, 86400.0);
    }

    #[test]
    fn test_length_mismatch_is_fatal() {
        let knobs = KnobSet::new(vec![knob("k", 0.0, 1.0, 0.5)]);
        let err = project_actions(&knobs, &[0.1, 0.2], DEFAULT_ACTION_SCALE).unwrap_err();
        assert!(matches!(
            err,
            TuneError::ActionLengthMismatch {
                actions: 2,
                knobs: 1
            }
        ));
    }

    #[test]
    fn test_inverted_bounds_are_fatal() {
        let knobs = KnobSet::new(vec![knob("k", 10.0, 1.0, 5.0)]);
        let err = project_actions(&knobs, &[0.1], DEFAULT_ACTION_SCALE).unwrap_err();
        assert!(matches!(err, TuneError::InvalidKnobBounds { .. }));
    }

    #[test]
    fn test_zero_action_keeps_value_modulo_rounding() {
        let knobs = KnobSet::new(vec![knob("k", 0.0, 100.0, 42.7)]);
        let projected = project_actions(&knobs, &[0.0], DEFAULT_ACTION_SCALE).unwrap();
        // Even a zero action rounds a positive candidate.
        assert_eq!(projected.get("k").unwrap().value, 43.0);
    }
}
