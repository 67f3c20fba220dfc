//! Progress error taxonomy.

use devmate_core::{ActivityId, PhaseId, RoadmapId};
use devmate_storage::StorageError;

/// Errors surfaced by progress operations.
///
/// Every failure is reported to the caller; nothing is retried or silently
/// recovered here.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// The referenced activity does not exist.
    #[error("activity not found: {0}")]
    ActivityNotFound(ActivityId),

    /// The activity's owning phase does not exist.
    #[error("phase not found: {0}")]
    PhaseNotFound(PhaseId),

    /// The phase's owning roadmap does not exist.
    #[error("roadmap not found: {0}")]
    RoadmapNotFound(RoadmapId),

    /// The caller-supplied activity identifier is empty or unparseable.
    #[error("invalid activity id: {0:?}")]
    InvalidActivityId(String),

    /// A phase index points outside the roadmap's phase sequence.
    #[error("phase index {index} out of range for {len} phases")]
    PhaseIndexOutOfRange {
        /// The offending index
        index: usize,
        /// Number of phases in the sequence
        len: usize,
    },

    /// The underlying write or read failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
