//! User statistics snapshot used as badge evaluation input.
//!
//! The snapshot is assembled by the caller from state the progress store
//! does not own (creation and share counters live with the image history).
//! It is never persisted as its own entity.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Largest value accepted for any counter in a snapshot.
pub const MAX_STAT_COUNT: u32 = 1_000_000;

/// Counters a badge predicate may inspect.
///
/// Missing fields deserialize as zero so older clients can send partial
/// snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserStats {
    /// Portraits generated so far
    #[serde(default)]
    #[validate(range(max = MAX_STAT_COUNT))]
    pub total_creations: u32,
    /// Portraits shared so far
    #[serde(default)]
    #[validate(range(max = MAX_STAT_COUNT))]
    pub total_shares: u32,
    /// Distinct historical eras the user has generated in
    #[serde(default)]
    #[validate(range(max = MAX_STAT_COUNT))]
    pub eras_used: u32,
    /// Current consecutive-day streak
    #[serde(default)]
    #[validate(range(max = MAX_STAT_COUNT))]
    pub current_streak: u32,
}

impl UserStats {
    /// Snapshot with only the creation counter set.
    pub fn with_creations(total_creations: u32) -> Self {
        Self {
            total_creations,
            ..Self::default()
        }
    }
}
