//! Display view of a roadmap tree.

use devmate_core::{Activity, Phase, Roadmap};
use serde::Serialize;

/// A roadmap loaded with its full tree and derived unlock flags.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapView {
    /// The roadmap record
    pub roadmap: Roadmap,

    /// Phases in `phase_index` order
    pub phases: Vec<PhaseView>,
}

/// One phase with its activities and unlock state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseView {
    /// The phase record
    pub phase: Phase,

    /// Activities in `activity_index` order
    pub activities: Vec<Activity>,

    /// Whether the user may interact with this phase right now.
    /// Derived on every load; never persisted.
    pub unlocked: bool,
}

impl RoadmapView {
    /// Flatten into `(phase, activities)` pairs for the analytics layer.
    pub fn phase_sets(&self) -> Vec<(Phase, Vec<Activity>)> {
        self.phases
            .iter()
            .map(|p| (p.phase.clone(), p.activities.clone()))
            .collect()
    }

    /// Total number of activities in the tree.
    pub fn activity_count(&self) -> usize {
        self.phases.iter().map(|p| p.activities.len()).sum()
    }
}
