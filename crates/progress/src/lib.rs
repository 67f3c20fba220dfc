//! Progress Tracking
//!
//! Activity completion aggregation, sequential phase unlocking, and
//! dashboard analytics.
//!
//! The aggregator maintains one invariant: phase and roadmap percentages
//! always equal `100 * completed / total` over their activity sets (0 for
//! empty sets). Unlock state is never persisted; it is derived from phase
//! progress on every read.

#![warn(missing_docs)]

pub mod aggregator;
pub mod gate;
pub mod analytics;

mod error;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::{
    phase_progress, overall_progress, ActivitySummary, ProgressAggregator, ProgressSnapshot,
    ToggleOutcome,
};
pub use gate::{is_phase_unlocked, unlock_states};
pub use analytics::{
    dashboard, CurrentPhase, DashboardAnalytics, RecentActivity, UpcomingActivity,
};
pub use error::ProgressError;
