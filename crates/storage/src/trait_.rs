//! Storage trait abstraction.

use async_trait::async_trait;
use devmate_core::{
    Activity, ActivityId, Phase, PhaseId, Roadmap, RoadmapId, Topic, Track, UserId,
    UserPreferences,
};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Storage abstraction for DevMate data.
///
/// This trait allows different storage backends to be plugged in.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Roadmap operations ===

    /// Save a roadmap record (create or update).
    async fn save_roadmap(&mut self, roadmap: &Roadmap) -> Result<()>;

    /// Load a roadmap by ID.
    async fn load_roadmap(&self, id: RoadmapId) -> Result<Option<Roadmap>>;

    /// Load the roadmap owned by a user. At most one exists per user.
    async fn load_roadmap_by_user(&self, user_id: &UserId) -> Result<Option<Roadmap>>;

    /// Delete a roadmap record. Phases are deleted separately.
    async fn delete_roadmap(&mut self, id: RoadmapId) -> Result<()>;

    // === Phase operations ===

    /// Save a phase (create or update).
    async fn save_phase(&mut self, phase: &Phase) -> Result<()>;

    /// Load a phase by ID.
    async fn load_phase(&self, id: PhaseId) -> Result<Option<Phase>>;

    /// List a roadmap's phases ordered by `phase_index`.
    async fn list_phases(&self, roadmap_id: RoadmapId) -> Result<Vec<Phase>>;

    /// Delete all of a roadmap's phases and their activities.
    ///
    /// Used on regeneration: the subtree is replaced wholesale, never
    /// diffed incrementally.
    async fn delete_phases(&mut self, roadmap_id: RoadmapId) -> Result<()>;

    // === Activity operations ===

    /// Save an activity (create or update).
    async fn save_activity(&mut self, activity: &Activity) -> Result<()>;

    /// Load an activity by ID.
    async fn load_activity(&self, id: ActivityId) -> Result<Option<Activity>>;

    /// List a phase's activities ordered by `activity_index`.
    async fn list_activities(&self, phase_id: PhaseId) -> Result<Vec<Activity>>;

    // === Progress update ===

    /// Persist the three records touched by a completion toggle as one
    /// unit: either all writes land or none remain observable.
    ///
    /// This is the transactional boundary that keeps the derived phase and
    /// roadmap percentages from going stale when a later write fails.
    async fn apply_progress_update(
        &mut self,
        activity: &Activity,
        phase: &Phase,
        roadmap: &Roadmap,
    ) -> Result<()>;

    // === Preferences operations ===

    /// Save a user's onboarding preferences.
    async fn save_preferences(&mut self, preferences: &UserPreferences) -> Result<()>;

    /// Load a user's onboarding preferences.
    async fn load_preferences(&self, user_id: &UserId) -> Result<Option<UserPreferences>>;

    // === Catalog operations ===

    /// Save a track.
    async fn save_track(&mut self, track: &Track) -> Result<()>;

    /// List all tracks.
    async fn list_tracks(&self) -> Result<Vec<Track>>;

    /// Save a topic.
    async fn save_topic(&mut self, topic: &Topic) -> Result<()>;

    /// List all topics.
    async fn list_topics(&self) -> Result<Vec<Topic>>;
}
