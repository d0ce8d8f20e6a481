//! Capacity model based on the Borbély Two-Process Model.
//!
//! Capacity is the mean of two components:
//! - Homeostatic freshness, decaying from 1.0 at wake toward 0.0
//! - Circadian arousal, a 24h sine wave normalized to [0, 1]

use std::f64::consts::PI;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Biological constants for one person.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BioParams {
    /// Reference instant for homeostatic freshness
    pub wake_time: NaiveDateTime,
    /// Circadian phase shift in hours (positive = later peak)
    pub chronotype_lag: f64,
    /// Homeostatic time constant in hours (typical range 14.0 - 18.0)
    pub fatigue_rate: f64,
}

/// Model output at a single point in time.
///
/// `freshness` keeps its historical `process_s` name on the wire; consumers
/// expect it to start at 1.0 on waking and decay toward 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BioState {
    #[serde(rename = "process_s")]
    pub freshness: f64,
    #[serde(rename = "process_c")]
    pub circadian: f64,
    pub total_capacity: f64,
}

impl BioParams {
    pub fn new(wake_time: NaiveDateTime, chronotype_lag: f64, fatigue_rate: f64) -> Self {
        Self {
            wake_time,
            chronotype_lag,
            fatigue_rate,
        }
    }

    /// Compute the biological state at `target`.
    ///
    /// Queries before `wake_time` are treated as zero hours awake.
    pub fn calculate_state(&self, target: NaiveDateTime) -> BioState {
        let freshness = (-self.hours_awake(target) / self.fatigue_rate).exp();

        let time_of_day = target.hour() as f64 + target.minute() as f64 / 60.0;
        let raw = ((2.0 * PI / 24.0) * (time_of_day - 6.0 - self.chronotype_lag)).sin();
        let circadian = (raw + 1.0) / 2.0;

        BioState {
            freshness: clamp_unit(freshness),
            circadian: clamp_unit(circadian),
            total_capacity: clamp_unit((freshness + circadian) / 2.0),
        }
    }

    fn hours_awake(&self, target: NaiveDateTime) -> f64 {
        let millis = (target - self.wake_time).num_milliseconds() as f64;
        (millis / 3_600_000.0).max(0.0)
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
