//! Planning horizon slots.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::capacity::BioParams;

/// Slot granularity in minutes.
pub const SLOT_MINUTES: u32 = 30;

/// Number of slots in the planning horizon (12 hours).
pub const HORIZON_SLOTS: usize = 24;

/// A 30-minute window of availability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub time: NaiveDateTime,
    pub capacity: f64,
    pub booked: bool,
}

/// Build the contiguous slot sequence starting at `anchor`.
pub fn generate_slots(params: &BioParams, anchor: NaiveDateTime) -> Vec<Slot> {
    (0..HORIZON_SLOTS)
        .map(|i| {
            let time = anchor + Duration::minutes(i as i64 * SLOT_MINUTES as i64);
            Slot {
                time,
                capacity: params.calculate_state(time).total_capacity,
                booked: false,
            }
        })
        .collect()
}
