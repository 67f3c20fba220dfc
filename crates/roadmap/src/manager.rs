//! Roadmap management service.

use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use devmate_core::{
    Activity, ActivityId, Phase, PhaseId, Roadmap, RoadmapDraft, RoadmapId, UserId,
};
use devmate_progress::unlock_states;
use devmate_storage::{Storage, StorageError};
use tokio::sync::Mutex;
use tracing::info;

use crate::view::{PhaseView, RoadmapView};

/// Errors surfaced by roadmap lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum RoadmapError {
    /// The user has no saved roadmap.
    #[error("no roadmap found for user {0}")]
    NotFound(UserId),

    /// The draft has no phases to persist.
    #[error("draft contains no phases")]
    EmptyDraft,

    /// The underlying read or write failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Roadmap management service.
#[async_trait]
pub trait RoadmapManager: Send + Sync {
    /// Persist a generated draft as the user's roadmap.
    ///
    /// Replaces any existing phase/activity subtree wholesale; no
    /// incremental diffing. All completion state and derived progress is
    /// reset, since the new tree starts uncompleted.
    async fn save_roadmap(
        &self,
        user_id: &UserId,
        draft: &RoadmapDraft,
    ) -> Result<Roadmap, RoadmapError>;

    /// Load the user's roadmap with activities and unlock flags.
    async fn load_view(&self, user_id: &UserId) -> Result<RoadmapView, RoadmapError>;

    /// Delete the user's roadmap and its whole subtree.
    async fn delete_roadmap(&self, user_id: &UserId) -> Result<(), RoadmapError>;
}

/// Basic roadmap manager implementation.
pub struct BasicRoadmapManager<S: Storage> {
    storage: Arc<Mutex<S>>,
}

impl<S: Storage> BasicRoadmapManager<S> {
    /// Create a new roadmap manager.
    pub fn new(storage: Arc<Mutex<S>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: Storage + 'static> RoadmapManager for BasicRoadmapManager<S> {
    async fn save_roadmap(
        &self,
        user_id: &UserId,
        draft: &RoadmapDraft,
    ) -> Result<Roadmap, RoadmapError> {
        if draft.phases.is_empty() {
            return Err(RoadmapError::EmptyDraft);
        }

        let now = Utc::now();
        let mut storage = self.storage.lock().await;

        // Upsert: keep the record's identity and creation time across
        // regenerations.
        let existing = storage.load_roadmap_by_user(user_id).await?;
        let (id, created_at) = match &existing {
            Some(roadmap) => (roadmap.id, roadmap.created_at),
            None => (RoadmapId::new(), now),
        };

        let track_name = match &draft.track_name {
            Some(name) => name.clone(),
            None => resolve_track_name(&*storage, user_id).await?,
        };

        let roadmap = Roadmap {
            id,
            user_id: user_id.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            track_name,
            difficulty: draft.difficulty_level,
            total_days: draft.estimated_days,
            // Trust the tree over the generator's declared total.
            total_activities: draft.activity_count() as u32,
            overall_progress: 0.0,
            created_at,
            updated_at: now,
        };

        storage.delete_phases(id).await?;
        storage.save_roadmap(&roadmap).await?;

        for (phase_index, phase_draft) in draft.phases.iter().enumerate() {
            let phase = Phase {
                id: PhaseId::new(),
                roadmap_id: id,
                phase_index: phase_index as u32,
                name: phase_draft.name.clone(),
                description: phase_draft.description.clone(),
                objectives: phase_draft.objectives.clone(),
                topics: phase_draft.topics.clone(),
                estimated_days: phase_draft.estimated_days,
                progress: 0.0,
            };
            storage.save_phase(&phase).await?;

            for (activity_index, activity_draft) in phase_draft.activities.iter().enumerate() {
                let activity = Activity {
                    id: ActivityId::new(),
                    phase_id: phase.id,
                    activity_index: activity_index as u32,
                    name: activity_draft.name.clone(),
                    description: activity_draft.description.clone(),
                    kind: activity_draft.kind,
                    estimated_hours: activity_draft.estimated_hours,
                    completed: false,
                    completed_at: None,
                };
                storage.save_activity(&activity).await?;
            }
        }

        info!(
            user = %user_id,
            roadmap = %roadmap.id,
            phases = draft.phases.len(),
            activities = roadmap.total_activities,
            regenerated = existing.is_some(),
            "roadmap saved"
        );

        Ok(roadmap)
    }

    async fn load_view(&self, user_id: &UserId) -> Result<RoadmapView, RoadmapError> {
        let storage = self.storage.lock().await;

        let roadmap = storage
            .load_roadmap_by_user(user_id)
            .await?
            .ok_or_else(|| RoadmapError::NotFound(user_id.clone()))?;

        let phases = storage.list_phases(roadmap.id).await?;
        let unlocked = unlock_states(&phases);

        let mut views = Vec::with_capacity(phases.len());
        for (phase, unlocked) in phases.into_iter().zip(unlocked) {
            let activities = storage.list_activities(phase.id).await?;
            views.push(PhaseView { phase, activities, unlocked });
        }

        Ok(RoadmapView { roadmap, phases: views })
    }

    async fn delete_roadmap(&self, user_id: &UserId) -> Result<(), RoadmapError> {
        let mut storage = self.storage.lock().await;

        let roadmap = storage
            .load_roadmap_by_user(user_id)
            .await?
            .ok_or_else(|| RoadmapError::NotFound(user_id.clone()))?;

        storage.delete_phases(roadmap.id).await?;
        storage.delete_roadmap(roadmap.id).await?;
        info!(user = %user_id, roadmap = %roadmap.id, "roadmap deleted");
        Ok(())
    }
}

async fn resolve_track_name<S: Storage + ?Sized>(
    storage: &S,
    user_id: &UserId,
) -> Result<String, StorageError> {
    let Some(preferences) = storage.load_preferences(user_id).await? else {
        return Ok(String::new());
    };
    Ok(storage
        .list_tracks()
        .await?
        .into_iter()
        .find(|t| t.id == preferences.track_id)
        .map(|t| t.name)
        .unwrap_or_default())
}
