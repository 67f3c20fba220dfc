//! Phase gate - sequential unlock rules.
//!
//! Locking is never persisted. It is recomputed from current phase
//! progress on every read, so it cannot go stale relative to the
//! aggregator's output.

use devmate_core::Phase;
use crate::error::ProgressError;

/// Whether a phase may currently be interacted with.
///
/// `phases` must be the roadmap's full phase sequence ordered by
/// `phase_index`. Index 0 is always unlocked; any later phase unlocks if
/// and only if the immediately preceding phase has reached 100 percent.
/// Exactly 100 unlocks; anything below does not. An index outside the
/// sequence is an error, never a silent unlock.
pub fn is_phase_unlocked(phase_index: usize, phases: &[Phase]) -> Result<bool, ProgressError> {
    if phase_index >= phases.len() {
        return Err(ProgressError::PhaseIndexOutOfRange {
            index: phase_index,
            len: phases.len(),
        });
    }
    if phase_index == 0 {
        return Ok(true);
    }
    Ok(phases[phase_index - 1].progress >= 100.0)
}

/// Unlock flags for every phase of the sequence, in order.
pub fn unlock_states(phases: &[Phase]) -> Vec<bool> {
    (0..phases.len())
        .map(|index| index == 0 || phases[index - 1].progress >= 100.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture;
    use devmate_core::UserId;

    fn phases_with_progress(progress: &[f32]) -> Vec<Phase> {
        let sizes: Vec<usize> = progress.iter().map(|_| 1).collect();
        let tree = fixture::roadmap_tree(&UserId::new("u"), &sizes);
        tree.phases
            .into_iter()
            .zip(progress)
            .map(|(mut phase, p)| {
                phase.progress = *p;
                phase
            })
            .collect()
    }

    #[test]
    fn test_first_phase_always_unlocked() {
        let phases = phases_with_progress(&[0.0, 0.0]);
        assert!(is_phase_unlocked(0, &phases).unwrap());
    }

    #[test]
    fn test_exactly_100_unlocks_successor() {
        let phases = phases_with_progress(&[100.0, 0.0, 0.0]);
        assert!(is_phase_unlocked(1, &phases).unwrap());
        // Phase 2 still gated on phase 1
        assert!(!is_phase_unlocked(2, &phases).unwrap());
    }

    #[test]
    fn test_below_100_locks_successor() {
        let phases = phases_with_progress(&[99.9, 0.0]);
        assert!(!is_phase_unlocked(1, &phases).unwrap());
    }

    #[test]
    fn test_out_of_range_index_is_an_error() {
        let phases = phases_with_progress(&[100.0]);
        let err = is_phase_unlocked(1, &phases).unwrap_err();
        assert!(matches!(
            err,
            ProgressError::PhaseIndexOutOfRange { index: 1, len: 1 }
        ));

        let err = is_phase_unlocked(0, &[]).unwrap_err();
        assert!(matches!(err, ProgressError::PhaseIndexOutOfRange { .. }));
    }

    #[test]
    fn test_zero_activity_phase_locks_successor() {
        // A phase with no activities reports progress 0 and never reaches
        // 100, so it keeps its successor locked.
        let phases = phases_with_progress(&[0.0, 0.0]);
        assert!(!is_phase_unlocked(1, &phases).unwrap());
    }

    #[test]
    fn test_unlock_is_monotone_in_predecessor_progress() {
        for progress in [0.0f32, 50.0, 99.0, 100.0] {
            let before = is_phase_unlocked(1, &phases_with_progress(&[progress, 0.0])).unwrap();
            let after = is_phase_unlocked(1, &phases_with_progress(&[progress + 0.5, 0.0])).unwrap();
            // Raising the predecessor's progress never re-locks a phase.
            assert!(!before || after);
        }
    }

    #[test]
    fn test_unlock_states_matches_pointwise_checks() {
        let phases = phases_with_progress(&[100.0, 100.0, 40.0, 0.0]);
        let states = unlock_states(&phases);
        assert_eq!(states, vec![true, true, true, false]);
        for (index, expected) in states.iter().enumerate() {
            assert_eq!(is_phase_unlocked(index, &phases).unwrap(), *expected);
        }
    }
}
