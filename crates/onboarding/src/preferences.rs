//! Onboarding preferences service.

use std::sync::Arc;
use chrono::Utc;
use devmate_core::{
    confidence_from_array, validate_confidence_scores, UserId, UserPreferences,
    CONFIDENCE_QUESTIONS, MAX_CONFIDENCE_SCORE,
};
use devmate_storage::{Storage, StorageError};
use tokio::sync::Mutex;
use tracing::info;

/// Errors surfaced by onboarding operations.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    /// The user already completed onboarding; preferences are write-once.
    #[error("user {0} already completed onboarding")]
    AlreadyOnboarded(UserId),

    /// The chosen track is not in the catalog.
    #[error("unknown track: {0}")]
    UnknownTrack(String),

    /// A chosen topic is not in the catalog.
    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    /// The confidence answers fail validation.
    #[error(
        "confidence answers must be exactly {CONFIDENCE_QUESTIONS} scores in 0..={MAX_CONFIDENCE_SCORE}"
    )]
    InvalidConfidence,

    /// The underlying read or write failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Raw questionnaire answers as submitted.
#[derive(Debug, Clone)]
pub struct PreferencesSpec {
    /// Chosen track, by catalog name
    pub track: String,

    /// Topics of interest, by catalog name
    pub topics: Vec<String>,

    /// Confidence answers in question order
    pub confidence: Vec<u8>,
}

/// Summary of a user's stored preferences.
#[derive(Debug, Clone)]
pub struct PreferencesSummary {
    /// Track name, if the referenced track still exists in the catalog
    pub track_name: Option<String>,

    /// Number of topic interests
    pub topics_count: usize,

    /// Number of answered confidence questions
    pub confidence_count: usize,

    /// Whether the stored preferences are usable for generation
    pub is_complete: bool,
}

/// Onboarding preferences service.
pub struct OnboardingService<S: Storage> {
    storage: Arc<Mutex<S>>,
}

impl<S: Storage> OnboardingService<S> {
    /// Create a new onboarding service.
    pub fn new(storage: Arc<Mutex<S>>) -> Self {
        Self { storage }
    }

    /// Validate and persist a user's questionnaire answers.
    ///
    /// Preferences are write-once: a second submission is rejected rather
    /// than merged.
    pub async fn complete_onboarding(
        &self,
        user_id: &UserId,
        spec: PreferencesSpec,
    ) -> Result<UserPreferences, OnboardingError> {
        if !validate_confidence_scores(&spec.confidence) {
            return Err(OnboardingError::InvalidConfidence);
        }

        let mut storage = self.storage.lock().await;

        if storage.load_preferences(user_id).await?.is_some() {
            return Err(OnboardingError::AlreadyOnboarded(user_id.clone()));
        }

        let tracks = storage.list_tracks().await?;
        let track = tracks
            .iter()
            .find(|t| t.name == spec.track)
            .ok_or_else(|| OnboardingError::UnknownTrack(spec.track.clone()))?;

        let topics = storage.list_topics().await?;
        let mut topic_ids = Vec::with_capacity(spec.topics.len());
        for name in &spec.topics {
            let topic = topics
                .iter()
                .find(|t| t.name == *name)
                .ok_or_else(|| OnboardingError::UnknownTopic(name.clone()))?;
            topic_ids.push(topic.id);
        }

        let preferences = UserPreferences {
            user_id: user_id.clone(),
            track_id: track.id,
            topic_ids,
            confidence_scores: confidence_from_array(&spec.confidence),
            created_at: Utc::now(),
        };
        storage.save_preferences(&preferences).await?;

        info!(user = %user_id, track = %track.name, topics = preferences.topic_ids.len(), "onboarding completed");
        Ok(preferences)
    }

    /// Summarize a user's stored preferences. None when the user has not
    /// completed onboarding.
    pub async fn preferences_summary(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PreferencesSummary>, OnboardingError> {
        let storage = self.storage.lock().await;

        let Some(preferences) = storage.load_preferences(user_id).await? else {
            return Ok(None);
        };

        let track_name = storage
            .list_tracks()
            .await?
            .into_iter()
            .find(|t| t.id == preferences.track_id)
            .map(|t| t.name);

        let is_complete = track_name.is_some()
            && !preferences.topic_ids.is_empty()
            && !preferences.confidence_scores.is_empty();

        Ok(Some(PreferencesSummary {
            track_name,
            topics_count: preferences.topic_ids.len(),
            confidence_count: preferences.confidence_scores.len(),
            is_complete,
        }))
    }
}

/// Load the built-in catalog into storage. Existing entries (matched by
/// name) are left as they are so seeding stays idempotent.
pub async fn seed_catalog<S: Storage>(storage: &Arc<Mutex<S>>) -> Result<(), StorageError> {
    use devmate_core::{builtin_topics, builtin_tracks, Topic, TopicId, Track, TrackId};

    let mut storage = storage.lock().await;

    let existing: Vec<String> = storage.list_tracks().await?.into_iter().map(|t| t.name).collect();
    for seed in builtin_tracks() {
        if existing.iter().any(|name| name == seed.name) {
            continue;
        }
        storage
            .save_track(&Track {
                id: TrackId::new(),
                name: seed.name.to_string(),
                description: seed.description.to_string(),
            })
            .await?;
    }

    let existing: Vec<String> = storage.list_topics().await?.into_iter().map(|t| t.name).collect();
    for seed in builtin_topics() {
        if existing.iter().any(|name| name == seed.name) {
            continue;
        }
        storage
            .save_topic(&Topic {
                id: TopicId::new(),
                name: seed.name.to_string(),
                description: seed.description.to_string(),
                track: seed.track.map(str::to_string),
            })
            .await?;
    }

    info!("catalog seeded");
    Ok(())
}
