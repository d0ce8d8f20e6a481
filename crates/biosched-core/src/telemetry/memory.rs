//! In-memory telemetry backend.

use std::sync::Mutex;

use chrono::NaiveDateTime;

use super::TelemetryStore;
use crate::biomodel::BioState;
use crate::error::Result;

#[derive(Debug, Clone)]
struct Sample {
    user_id: String,
    timestamp: NaiveDateTime,
    state: BioState,
}

/// Mutex-guarded store with the same ordering rules as the SQLite backend.
#[derive(Debug, Default)]
pub struct MemoryTelemetryStore {
    samples: Mutex<Vec<Sample>>,
}

impl MemoryTelemetryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.samples.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TelemetryStore for MemoryTelemetryStore {
    fn save(&self, user_id: &str, timestamp: NaiveDateTime, state: &BioState) -> Result<()> {
        let mut samples = self.samples.lock().unwrap_or_else(|p| p.into_inner());
        samples.push(Sample {
            user_id: user_id.to_string(),
            timestamp,
            state: *state,
        });
        Ok(())
    }

    fn load_latest(&self, user_id: &str) -> Result<Option<BioState>> {
        let samples = self.samples.lock().unwrap_or_else(|p| p.into_inner());
        // max_by_key keeps the last of equal timestamps
        Ok(samples
            .iter()
            .filter(|s| s.user_id == user_id)
            .max_by_key(|s| s.timestamp)
            .map(|s| s.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 17)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn state(total: f64) -> BioState {
        BioState {
            freshness: 1.0,
            circadian: 0.5,
            total_capacity: total,
        }
    }

    #[test]
    fn test_latest_per_user() {
        let store = MemoryTelemetryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.load_latest("a").unwrap(), None);

        store.save("a", at(9), &state(0.2)).unwrap();
        store.save("a", at(11), &state(0.4)).unwrap();
        store.save("a", at(10), &state(0.3)).unwrap();
        store.save("b", at(23), &state(0.9)).unwrap();

        assert_eq!(store.len(), 4);
        assert_eq!(store.load_latest("a").unwrap(), Some(state(0.4)));
        assert_eq!(store.load_latest("b").unwrap(), Some(state(0.9)));
    }

    #[test]
    fn test_equal_timestamps_prefer_last_insert() {
        let store = MemoryTelemetryStore::new();
        store.save("a", at(9), &state(0.2)).unwrap();
        store.save("a", at(9), &state(0.6)).unwrap();
        assert_eq!(store.load_latest("a").unwrap(), Some(state(0.6)));
    }
}
