//! DevMate core data models.
//!
//! This crate defines the fundamental data structures for the personalized
//! learning roadmap system: roadmaps with their phase/activity trees, the
//! draft document produced by the external curriculum generator, and the
//! onboarding preferences that drive generation.

#![warn(missing_docs)]

// Core identities
mod id;

// Time source
mod clock;

// Roadmap tree
mod roadmap;

// Generator draft document
mod draft;

// Onboarding
mod preferences;
mod catalog;

// Re-exports
pub use id::*;
pub use clock::{Clock, SystemClock};

// Roadmap & progress
pub use roadmap::{Activity, ActivityKind, Difficulty, ParseKindError, Phase, Roadmap};

// Generator draft
pub use draft::{ActivityDraft, PhaseDraft, RoadmapDraft};

// Onboarding
pub use preferences::{
    average_confidence, confidence_from_array, confidence_to_array, validate_confidence_scores,
    ConfidenceScore, UserPreferences, CONFIDENCE_QUESTIONS, MAX_CONFIDENCE_SCORE,
};
pub use catalog::{builtin_topics, builtin_tracks, Topic, TopicSeed, Track, TrackSeed};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
