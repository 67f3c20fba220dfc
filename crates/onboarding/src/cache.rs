//! Cached onboarding status.
//!
//! "Has this user completed onboarding" is derived from a preferences
//! existence check. Callers ask on nearly every request, so the answer is
//! cached per user with a TTL: a completed status is trusted until the TTL
//! elapses, while a not-yet-completed status is re-checked on every read
//! (completion should be noticed promptly). A failed refresh keeps the
//! previous value and re-arms the timer instead of failing the caller.

use std::collections::HashMap;
use std::sync::Arc;
use chrono::Duration;
use devmate_core::{Clock, SystemClock, Time, UserId};
use devmate_storage::Storage;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Default seconds between re-checks of a completed status.
pub const DEFAULT_TTL_SECONDS: i64 = 5 * 60;

/// One cached status entry. Serializable so session layers can embed it
/// in whatever token or context object they carry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatus {
    /// Last known answer
    pub completed: bool,

    /// When storage was last consulted. None before the first check.
    pub last_checked_at: Option<Time>,
}

/// Whether a cache entry is due for a read-through refresh.
///
/// An entry that has never been checked always refreshes; otherwise the
/// entry refreshes once strictly more than `ttl` has passed since the last
/// check.
pub fn should_refresh(now: Time, last_checked_at: Option<Time>, ttl: Duration) -> bool {
    match last_checked_at {
        None => true,
        Some(last) => now.signed_duration_since(last) > ttl,
    }
}

/// Read-through cache of per-user onboarding status.
pub struct OnboardingStatusCache<S: Storage> {
    storage: Arc<Mutex<S>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    entries: HashMap<UserId, OnboardingStatus>,
}

impl<S: Storage> OnboardingStatusCache<S> {
    /// Create a cache with the default TTL and the system clock.
    pub fn new(storage: Arc<Mutex<S>>) -> Self {
        Self {
            storage,
            clock: Arc::new(SystemClock),
            ttl: Duration::seconds(DEFAULT_TTL_SECONDS),
            entries: HashMap::new(),
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Current onboarding status for a user, refreshing when due.
    pub async fn status(&mut self, user_id: &UserId) -> bool {
        let now = self.clock.now();
        let entry = self.entries.get(user_id).copied().unwrap_or(OnboardingStatus {
            completed: false,
            last_checked_at: None,
        });

        // A completed answer is stable; an incomplete one is re-checked
        // every time so completion is picked up promptly.
        if entry.completed && !should_refresh(now, entry.last_checked_at, self.ttl) {
            return true;
        }

        match self.storage.lock().await.load_preferences(user_id).await {
            Ok(preferences) => {
                let completed = preferences.is_some();
                if !entry.completed && completed {
                    info!(user = %user_id, "onboarding completion detected");
                }
                self.entries.insert(
                    user_id.clone(),
                    OnboardingStatus { completed, last_checked_at: Some(now) },
                );
                completed
            }
            Err(error) => {
                // Degraded mode: keep the previous answer and delay the
                // next check rather than failing the caller.
                warn!(user = %user_id, %error, "onboarding status refresh failed");
                self.entries.insert(
                    user_id.clone(),
                    OnboardingStatus {
                        completed: entry.completed,
                        last_checked_at: Some(now),
                    },
                );
                entry.completed
            }
        }
    }

    /// Last cached entry without refreshing.
    pub fn peek(&self, user_id: &UserId) -> Option<OnboardingStatus> {
        self.entries.get(user_id).copied()
    }

    /// Drop a user's cached entry, forcing the next read to hit storage.
    pub fn invalidate(&mut self, user_id: &UserId) {
        self.entries.remove(user_id);
    }
}
