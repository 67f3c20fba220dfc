//! Draft document produced by the external curriculum generator.
//!
//! The generator is an external collaborator: it returns one JSON document
//! describing the whole roadmap. This module only defines the wire shape;
//! turning a draft into persisted records is the roadmap service's job.

use serde::{Deserialize, Serialize};
use crate::roadmap::{ActivityKind, Difficulty};

/// A complete generated roadmap, not yet persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapDraft {
    /// Roadmap title
    pub title: String,

    /// Overall description
    pub description: String,

    /// Difficulty the generator targeted
    pub difficulty_level: Difficulty,

    /// Track name carried on the save payload. Optional; when absent it is
    /// resolved from the user's onboarding track at save time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,

    /// Estimated total duration in days
    pub estimated_days: u32,

    /// Total number of activities across all phases
    pub total_activities: u32,

    /// Ordered learning phases
    pub phases: Vec<PhaseDraft>,
}

/// One phase of a generated roadmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseDraft {
    /// Phase name
    pub name: String,

    /// Description
    pub description: String,

    /// Learning objectives
    #[serde(default)]
    pub objectives: Vec<String>,

    /// Topics covered
    #[serde(default)]
    pub topics: Vec<String>,

    /// Estimated duration in days
    pub estimated_days: u32,

    /// Prerequisites named by the generator (informational only)
    #[serde(default)]
    pub prerequisites: Vec<String>,

    /// Ordered activities
    pub activities: Vec<ActivityDraft>,
}

/// One activity of a generated phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDraft {
    /// Activity name
    pub name: String,

    /// Description
    pub description: String,

    /// Kind of work ("project" | "reading" | "exercise" | "quiz")
    #[serde(rename = "type")]
    pub kind: ActivityKind,

    /// Estimated effort in hours
    pub estimated_hours: f32,
}

impl RoadmapDraft {
    /// Count the activities actually present in the draft's phases.
    ///
    /// Generators occasionally return a `totalActivities` that disagrees
    /// with the tree they produced; callers should trust this count.
    pub fn activity_count(&self) -> usize {
        self.phases.iter().map(|p| p.activities.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "title": "Frontend Foundations",
        "description": "A 90-day path into modern frontend work",
        "difficultyLevel": "Beginner",
        "estimatedDays": 90,
        "totalActivities": 3,
        "phases": [
            {
                "name": "HTML & CSS",
                "description": "Markup and styling fundamentals",
                "objectives": ["Build static pages"],
                "topics": ["HTML & CSS"],
                "estimatedDays": 30,
                "prerequisites": [],
                "activities": [
                    {
                        "name": "Read MDN HTML guide",
                        "description": "Core document structure",
                        "type": "reading",
                        "estimatedHours": 6.0
                    },
                    {
                        "name": "Build a landing page",
                        "description": "Static page from a mockup",
                        "type": "project",
                        "estimatedHours": 10.0
                    }
                ]
            },
            {
                "name": "JavaScript",
                "description": "Language fundamentals",
                "estimatedDays": 60,
                "activities": [
                    {
                        "name": "Scope and closures quiz",
                        "description": "Check understanding",
                        "type": "quiz",
                        "estimatedHours": 1.5
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_draft_deserializes_generator_output() {
        let draft: RoadmapDraft = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(draft.title, "Frontend Foundations");
        assert_eq!(draft.difficulty_level, Difficulty::Beginner);
        assert_eq!(draft.phases.len(), 2);
        assert_eq!(draft.phases[0].activities[1].kind, ActivityKind::Project);
        // Missing optional arrays default to empty
        assert!(draft.phases[1].objectives.is_empty());
        assert!(draft.phases[1].prerequisites.is_empty());
    }

    #[test]
    fn test_activity_count_ignores_declared_total() {
        let draft: RoadmapDraft = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(draft.total_activities, 3);
        assert_eq!(draft.activity_count(), 3);
    }
}
