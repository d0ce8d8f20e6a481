//! Hourly bio-state ingestion.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::TelemetryStore;
use crate::biomodel::{BioParams, BioState};

/// One persisted sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub timestamp: NaiveDateTime,
    pub state: BioState,
}

/// Outcome of an ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    pub saved: Vec<TelemetrySample>,
    pub failed: usize,
}

/// Compute and store one state per hour for `hours` hours from `start`.
///
/// A failed save is logged and counted; the remaining hours still run.
pub fn ingest_states(
    store: &dyn TelemetryStore,
    user_id: &str,
    params: &BioParams,
    start: NaiveDateTime,
    hours: u32,
) -> IngestReport {
    let mut report = IngestReport::default();

    for i in 0..hours {
        let timestamp = start + Duration::hours(i as i64);
        let state = params.calculate_state(timestamp);

        match store.save(user_id, timestamp, &state) {
            Ok(()) => {
                tracing::debug!(
                    user_id,
                    time = %timestamp.format("%H:%M"),
                    capacity = state.total_capacity,
                    "sample saved"
                );
                report.saved.push(TelemetrySample { timestamp, state });
            }
            Err(err) => {
                tracing::warn!(user_id, time = %timestamp, error = %err, "failed to save sample");
                report.failed += 1;
            }
        }
    }

    tracing::info!(
        user_id,
        saved = report.saved.len(),
        failed = report.failed,
        "ingestion complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DatabaseError, Result};
    use crate::telemetry::MemoryTelemetryStore;
    use chrono::{NaiveDate, Timelike};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn wake() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 17)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap()
    }

    /// Fails every other save.
    struct FlakyStore {
        calls: AtomicUsize,
        inner: MemoryTelemetryStore,
    }

    impl TelemetryStore for FlakyStore {
        fn save(&self, user_id: &str, timestamp: NaiveDateTime, state: &BioState) -> Result<()> {
            if self.calls.fetch_add(1, Ordering::SeqCst) % 2 == 1 {
                return Err(DatabaseError::Locked.into());
            }
            self.inner.save(user_id, timestamp, state)
        }

        fn load_latest(&self, user_id: &str) -> Result<Option<BioState>> {
            self.inner.load_latest(user_id)
        }
    }

    #[test]
    fn test_ingest_full_day() {
        let store = MemoryTelemetryStore::new();
        let params = BioParams::new(wake(), 0.0, 16.0);
        let report = ingest_states(&store, "user_001", &params, wake(), 24);

        assert_eq!(report.saved.len(), 24);
        assert_eq!(report.failed, 0);
        assert_eq!(store.len(), 24);
        assert_eq!(report.saved[0].state.freshness, 1.0);
        assert_eq!(report.saved[23].timestamp.hour(), 6);

        let latest = store.load_latest("user_001").unwrap().unwrap();
        assert_eq!(latest, report.saved[23].state);
    }

    #[test]
    fn test_ingest_counts_failures_and_continues() {
        let store = FlakyStore {
            calls: AtomicUsize::new(0),
            inner: MemoryTelemetryStore::new(),
        };
        let params = BioParams::new(wake(), 0.0, 16.0);
        let report = ingest_states(&store, "user_001", &params, wake(), 5);

        assert_eq!(report.saved.len(), 3);
        assert_eq!(report.failed, 2);
        assert_eq!(store.inner.len(), 3);
    }
}
