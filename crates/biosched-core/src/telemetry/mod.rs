//! Bio-state telemetry persistence.
//!
//! The scheduler never touches storage; callers that want history record
//! [`BioState`] samples through a [`TelemetryStore`]:
//! - [`SqliteTelemetryStore`] persists to a SQLite file
//! - [`MemoryTelemetryStore`] keeps samples in memory (tests, offline mode)

mod ingest;
mod memory;
mod sqlite;

pub use ingest::{ingest_states, IngestReport, TelemetrySample};
pub use memory::MemoryTelemetryStore;
pub use sqlite::SqliteTelemetryStore;

use std::time::Duration;

use chrono::NaiveDateTime;

use crate::biomodel::BioState;
use crate::error::Result;

/// Abstract store capability for bio-state samples.
pub trait TelemetryStore: Send + Sync {
    /// Record `state` for `user_id` at `timestamp`.
    fn save(&self, user_id: &str, timestamp: NaiveDateTime, state: &BioState) -> Result<()>;

    /// Most recent sample for `user_id`, or `None` if nothing was recorded.
    fn load_latest(&self, user_id: &str) -> Result<Option<BioState>>;
}

/// Fixed attempt count and delay for opening a store that may still be
/// starting up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no waiting.
    pub fn once() -> Self {
        Self {
            attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

/// Timestamp layout used by the SQLite backend; sorts chronologically as text.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";
