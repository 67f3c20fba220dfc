//! Onboarding
//!
//! The questionnaire result (track, topics, confidence) and the cached
//! onboarding-completed flag derived from it. Completing onboarding is
//! what unlocks roadmap generation; its status is checked often enough
//! that reads go through a TTL cache instead of hitting storage every
//! time.

#![warn(missing_docs)]

pub mod preferences;
pub mod cache;

pub use preferences::{
    seed_catalog, OnboardingError, OnboardingService, PreferencesSpec, PreferencesSummary,
};
pub use cache::{should_refresh, OnboardingStatus, OnboardingStatusCache, DEFAULT_TTL_SECONDS};
