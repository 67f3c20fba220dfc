//! Roadmap model - the persisted phase/activity tree with progress.

use serde::{Deserialize, Serialize};
use crate::id::{ActivityId, PhaseId, RoadmapId, UserId};
use crate::Time;

/// A personalized learning roadmap. One per user.
///
/// The roadmap and its full phase/activity tree are created together when a
/// generated draft is saved; the subtree is replaced wholesale on
/// regeneration. Between regenerations only activity completion flags and
/// the derived progress percentages mutate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roadmap {
    /// Unique identifier
    pub id: RoadmapId,

    /// Owning user
    pub user_id: UserId,

    /// Roadmap title
    pub title: String,

    /// Description
    pub description: String,

    /// Track this roadmap was generated for
    pub track_name: String,

    /// Difficulty label derived from onboarding confidence
    pub difficulty: Difficulty,

    /// Total estimated duration in days
    pub total_days: u32,

    /// Total number of activities across all phases
    pub total_activities: u32,

    /// Overall completion percentage (0-100, derived)
    pub overall_progress: f32,

    /// Created at
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,
}

/// A phase is one stage of a roadmap, unlocked sequentially.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    /// Unique identifier
    pub id: PhaseId,

    /// Owning roadmap
    pub roadmap_id: RoadmapId,

    /// Zero-based position within the roadmap. Immutable once created.
    pub phase_index: u32,

    /// Phase name
    pub name: String,

    /// Description
    pub description: String,

    /// Learning objectives
    pub objectives: Vec<String>,

    /// Topics covered in this phase
    pub topics: Vec<String>,

    /// Estimated duration in days
    pub estimated_days: u32,

    /// Completion percentage (0-100, derived - never set by callers)
    pub progress: f32,
}

/// An activity is a single unit of learning work within a phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier
    pub id: ActivityId,

    /// Owning phase
    pub phase_id: PhaseId,

    /// Zero-based position within the phase. Immutable once created.
    pub activity_index: u32,

    /// Activity name
    pub name: String,

    /// Description
    pub description: String,

    /// What kind of work this is
    pub kind: ActivityKind,

    /// Estimated effort in hours
    pub estimated_hours: f32,

    /// Whether the user has completed this activity
    pub completed: bool,

    /// When completion was toggled true. None whenever `completed` is false.
    pub completed_at: Option<Time>,
}

/// Kind of learning activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    /// Hands-on project
    Project,
    /// Reading material
    Reading,
    /// Practice exercise
    Exercise,
    /// Knowledge quiz
    Quiz,
}

impl ActivityKind {
    /// Get string representation (the generator wire form).
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Project => "project",
            ActivityKind::Reading => "reading",
            ActivityKind::Exercise => "exercise",
            ActivityKind::Quiz => "quiz",
        }
    }
}

/// Error returned when an activity kind string is not recognized.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown activity kind: {0}")]
pub struct ParseKindError(pub String);

impl std::str::FromStr for ActivityKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project" => Ok(ActivityKind::Project),
            "reading" => Ok(ActivityKind::Reading),
            "exercise" => Ok(ActivityKind::Exercise),
            "quiz" => Ok(ActivityKind::Quiz),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty label for a roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Average confidence at or below 2.0
    Beginner,
    /// Average confidence at or below 3.5
    Intermediate,
    /// Everything above
    Advanced,
}

impl Difficulty {
    /// Derive the difficulty label from an average confidence score (0-5).
    pub fn from_confidence(avg: f32) -> Self {
        if avg <= 2.0 {
            Difficulty::Beginner
        } else if avg <= 3.5 {
            Difficulty::Intermediate
        } else {
            Difficulty::Advanced
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
