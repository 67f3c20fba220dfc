//! Progress aggregation service.
//!
//! Keeps the derived percentages on phases and roadmaps consistent with
//! individual activity completion flags. The three records touched by a
//! toggle (activity, phase, roadmap) are persisted through the storage
//! layer's single-unit update so no partial state becomes observable.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use devmate_core::{Activity, ActivityId, Clock, PhaseId, RoadmapId, SystemClock, Time};
use devmate_storage::Storage;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::ProgressError;

/// The activity fields a caller needs back after a toggle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    /// Activity identifier
    pub id: ActivityId,

    /// New completion flag
    pub completed: bool,

    /// Completion timestamp; None when `completed` is false
    pub completed_at: Option<Time>,
}

/// Result of a completion toggle. Serializes in the shape API callers
/// expect (camelCase).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleOutcome {
    /// The updated activity
    pub activity: ActivitySummary,

    /// Recomputed progress of the owning phase (0-100)
    pub phase_progress: f32,

    /// Recomputed overall progress of the roadmap (0-100)
    pub overall_progress: f32,
}

/// A snapshot of a roadmap's progress at a point in time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// The roadmap
    pub roadmap_id: RoadmapId,

    /// Overall progress (0-100)
    pub overall: f32,

    /// Per-phase progress in `phase_index` order
    pub phases: Vec<(PhaseId, f32)>,
}

/// Completion percentage of one phase's activity set.
///
/// Defined as 0 for an empty set; never NaN.
pub fn phase_progress(activities: &[Activity]) -> f32 {
    let completed = activities.iter().filter(|a| a.completed).count();
    percentage(completed, activities.len())
}

/// Overall completion percentage across every phase's activity set.
pub fn overall_progress(phase_activities: &[Vec<Activity>]) -> f32 {
    let total: usize = phase_activities.iter().map(|set| set.len()).sum();
    let completed: usize = phase_activities
        .iter()
        .map(|set| set.iter().filter(|a| a.completed).count())
        .sum();
    percentage(completed, total)
}

fn percentage(completed: usize, total: usize) -> f32 {
    if total > 0 {
        (completed as f32 / total as f32) * 100.0
    } else {
        0.0
    }
}

/// Progress aggregation service over a storage backend.
pub struct ProgressAggregator<S: Storage> {
    storage: Arc<Mutex<S>>,
    clock: Arc<dyn Clock>,
}

impl<S: Storage> ProgressAggregator<S> {
    /// Create a new aggregator using the system clock.
    pub fn new(storage: Arc<Mutex<S>>) -> Self {
        Self {
            storage,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set an activity's completion flag and recompute the derived
    /// percentages on its phase and roadmap.
    ///
    /// Toggling to the already-current value is allowed and idempotent
    /// apart from the completion timestamp, which is refreshed on every
    /// `true` toggle.
    pub async fn toggle_activity_completion(
        &self,
        activity_id: ActivityId,
        desired_completed: bool,
    ) -> Result<ToggleOutcome, ProgressError> {
        let now = self.clock.now();
        let mut storage = self.storage.lock().await;

        let mut activity = storage
            .load_activity(activity_id)
            .await?
            .ok_or(ProgressError::ActivityNotFound(activity_id))?;

        activity.completed = desired_completed;
        activity.completed_at = if desired_completed { Some(now) } else { None };

        let mut phase = storage
            .load_phase(activity.phase_id)
            .await?
            .ok_or(ProgressError::PhaseNotFound(activity.phase_id))?;

        // Recompute from the full activity set with the toggled record
        // substituted in; the update is not persisted yet.
        let mut phase_activities = storage.list_activities(phase.id).await?;
        if let Some(slot) = phase_activities.iter_mut().find(|a| a.id == activity.id) {
            *slot = activity.clone();
        }
        phase.progress = phase_progress(&phase_activities);

        let mut roadmap = storage
            .load_roadmap(phase.roadmap_id)
            .await?
            .ok_or(ProgressError::RoadmapNotFound(phase.roadmap_id))?;

        // Overall progress counts activities across ALL phases, not just
        // the modified one.
        let phases = storage.list_phases(roadmap.id).await?;
        let mut sets = Vec::with_capacity(phases.len());
        for p in &phases {
            if p.id == phase.id {
                sets.push(phase_activities.clone());
            } else {
                sets.push(storage.list_activities(p.id).await?);
            }
        }
        roadmap.overall_progress = overall_progress(&sets);
        roadmap.updated_at = now;

        storage
            .apply_progress_update(&activity, &phase, &roadmap)
            .await?;

        info!(
            activity = %activity.id,
            completed = desired_completed,
            phase_progress = phase.progress,
            overall_progress = roadmap.overall_progress,
            "activity completion toggled"
        );

        Ok(ToggleOutcome {
            activity: ActivitySummary {
                id: activity.id,
                completed: activity.completed,
                completed_at: activity.completed_at,
            },
            phase_progress: phase.progress,
            overall_progress: roadmap.overall_progress,
        })
    }

    /// Toggle by a caller-supplied raw identifier.
    ///
    /// The id is an opaque non-empty string at this boundary; anything that
    /// does not parse fails validation before storage is consulted.
    pub async fn toggle_by_str(
        &self,
        activity_id: &str,
        desired_completed: bool,
    ) -> Result<ToggleOutcome, ProgressError> {
        let id: ActivityId = activity_id
            .parse()
            .map_err(|_| ProgressError::InvalidActivityId(activity_id.to_string()))?;
        self.toggle_activity_completion(id, desired_completed).await
    }

    /// Re-derive every percentage of a roadmap from current activity flags.
    ///
    /// Heals stale aggregates (a backend without atomic updates can leave
    /// them behind after a failed write) and primes them after a roadmap
    /// tree is first created or replaced. Returns the overall percentage.
    pub async fn recompute_roadmap(&self, roadmap_id: RoadmapId) -> Result<f32, ProgressError> {
        let mut storage = self.storage.lock().await;

        let mut roadmap = storage
            .load_roadmap(roadmap_id)
            .await?
            .ok_or(ProgressError::RoadmapNotFound(roadmap_id))?;

        let phases = storage.list_phases(roadmap_id).await?;
        let mut sets = Vec::with_capacity(phases.len());
        for mut phase in phases {
            let activities = storage.list_activities(phase.id).await?;
            let progress = phase_progress(&activities);
            if (progress - phase.progress).abs() > f32::EPSILON {
                debug!(phase = %phase.id, old = phase.progress, new = progress, "healing stale phase progress");
            }
            phase.progress = progress;
            storage.save_phase(&phase).await?;
            sets.push(activities);
        }

        roadmap.overall_progress = overall_progress(&sets);
        roadmap.updated_at = self.clock.now();
        storage.save_roadmap(&roadmap).await?;

        Ok(roadmap.overall_progress)
    }

    /// Take a progress snapshot of one roadmap.
    pub async fn snapshot(&self, roadmap_id: RoadmapId) -> Result<ProgressSnapshot, ProgressError> {
        let storage = self.storage.lock().await;

        let roadmap = storage
            .load_roadmap(roadmap_id)
            .await?
            .ok_or(ProgressError::RoadmapNotFound(roadmap_id))?;

        let phases = storage.list_phases(roadmap_id).await?;

        Ok(ProgressSnapshot {
            timestamp: self.clock.now(),
            roadmap_id,
            overall: roadmap.overall_progress,
            phases: phases.into_iter().map(|p| (p.id, p.progress)).collect(),
        })
    }
}
