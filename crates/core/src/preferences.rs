//! Onboarding preferences and confidence scores.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::id::{TopicId, TrackId, UserId};
use crate::Time;

/// Number of confidence questions asked during onboarding.
pub const CONFIDENCE_QUESTIONS: usize = 10;

/// Highest answer on the confidence scale.
pub const MAX_CONFIDENCE_SCORE: u8 = 5;

/// A user's onboarding questionnaire result.
///
/// Existence of this record is what marks onboarding as completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Owning user
    pub user_id: UserId,

    /// Chosen learning track
    pub track_id: TrackId,

    /// Topics the user declared interest in
    pub topic_ids: Vec<TopicId>,

    /// Self-assessed confidence answers
    pub confidence_scores: Vec<ConfidenceScore>,

    /// When onboarding was completed
    pub created_at: Time,
}

/// One answered confidence question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceScore {
    /// 1-based question number
    pub question_id: u8,

    /// Answer on a 0-5 scale
    pub score: u8,
}

/// Validate a raw confidence answer array: exactly [`CONFIDENCE_QUESTIONS`]
/// entries, each in `0..=MAX_CONFIDENCE_SCORE`.
pub fn validate_confidence_scores(scores: &[u8]) -> bool {
    scores.len() == CONFIDENCE_QUESTIONS && scores.iter().all(|s| *s <= MAX_CONFIDENCE_SCORE)
}

/// Convert a raw answer array into question/score pairs (1-based ids).
pub fn confidence_from_array(scores: &[u8]) -> Vec<ConfidenceScore> {
    scores
        .iter()
        .enumerate()
        .map(|(index, score)| ConfidenceScore {
            question_id: index as u8 + 1,
            score: *score,
        })
        .collect()
}

/// Convert stored scores back to the positional array form.
///
/// Unanswered questions come back as 0.
pub fn confidence_to_array(scores: &[ConfidenceScore]) -> Vec<u8> {
    let by_question: BTreeMap<u8, u8> =
        scores.iter().map(|s| (s.question_id, s.score)).collect();

    (1..=CONFIDENCE_QUESTIONS as u8)
        .map(|q| by_question.get(&q).copied().unwrap_or(0))
        .collect()
}

/// Average confidence across all answered questions. 0 when empty.
pub fn average_confidence(scores: &[ConfidenceScore]) -> f32 {
    if scores.is_empty() {
        return 0.0;
    }
    let sum: u32 = scores.iter().map(|s| s.score as u32).sum();
    sum as f32 / scores.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_confidence_scores() {
        assert!(validate_confidence_scores(&[0, 1, 2, 3, 4, 5, 0, 1, 2, 3]));
        // Wrong length
        assert!(!validate_confidence_scores(&[1, 2, 3]));
        assert!(!validate_confidence_scores(&[0; 11]));
        // Out of range
        assert!(!validate_confidence_scores(&[0, 1, 2, 3, 4, 6, 0, 1, 2, 3]));
    }

    #[test]
    fn test_confidence_array_round_trip() {
        let raw = vec![3, 1, 4, 1, 5, 0, 2, 2, 3, 5];
        let scores = confidence_from_array(&raw);
        assert_eq!(scores.len(), CONFIDENCE_QUESTIONS);
        assert_eq!(scores[0].question_id, 1);
        assert_eq!(scores[9].question_id, 10);
        assert_eq!(confidence_to_array(&scores), raw);
    }

    #[test]
    fn test_confidence_to_array_fills_gaps() {
        let scores = vec![
            ConfidenceScore { question_id: 2, score: 4 },
            ConfidenceScore { question_id: 7, score: 1 },
        ];
        let arr = confidence_to_array(&scores);
        assert_eq!(arr, vec![0, 4, 0, 0, 0, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn test_average_confidence() {
        assert_eq!(average_confidence(&[]), 0.0);
        let scores = confidence_from_array(&[2, 4, 3, 3, 2, 4, 3, 3, 2, 4]);
        assert!((average_confidence(&scores) - 3.0).abs() < f32::EPSILON);
    }
}
