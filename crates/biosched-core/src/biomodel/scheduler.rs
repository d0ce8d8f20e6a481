//! Greedy capacity-aware task scheduler.
//!
//! First-fit-descending over a fixed slot horizon:
//! - Tasks are visited hardest first (stable on ties)
//! - Each task claims the free contiguous window with the best mean capacity
//! - Booked slots are never released within a run

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::capacity::BioParams;
use super::fit::FitScore;
use super::slots::{generate_slots, Slot, SLOT_MINUTES};

/// Start marker for tasks that found no window.
pub const UNSCHEDULED: &str = "UNSCHEDULED";

/// Identifier reported alongside every plan.
pub const ALGORITHM_NAME: &str = "bio-greedy-v1";

/// A unit of work to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(rename = "duration_minutes")]
    pub duration: u32,
    /// 1-10 (10 = hardest)
    #[serde(rename = "effort_level")]
    pub effort: u8,
}

impl Task {
    pub fn new(name: impl Into<String>, duration: u32, effort: u8) -> Self {
        Self {
            name: name.into(),
            duration,
            effort,
        }
    }

    /// Whole slots covered by this task. Remainders are dropped.
    pub fn slots_needed(&self) -> usize {
        (self.duration / SLOT_MINUTES) as usize
    }
}

/// A task placed on the horizon, or the unscheduled marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// "HH:MM" or [`UNSCHEDULED`]
    pub start_time: String,
    pub task_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_capacity: Option<f64>,
    pub fit_score: FitScore,
}

impl ScheduleItem {
    fn scheduled(start: NaiveDateTime, task: &Task, capacity: f64) -> Self {
        Self {
            start_time: start.format("%H:%M").to_string(),
            task_name: task.name.clone(),
            predicted_capacity: Some(capacity),
            fit_score: FitScore::judge(task.effort, capacity),
        }
    }

    fn unscheduled(task: &Task) -> Self {
        Self {
            start_time: UNSCHEDULED.to_string(),
            task_name: task.name.clone(),
            predicted_capacity: None,
            fit_score: FitScore::NoTimeEnergy,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.predicted_capacity.is_some()
    }
}

/// Schedule plus the algorithm that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePlan {
    pub algorithm: String,
    pub schedule: Vec<ScheduleItem>,
}

impl SchedulePlan {
    pub fn new(schedule: Vec<ScheduleItem>) -> Self {
        Self {
            algorithm: ALGORITHM_NAME.to_string(),
            schedule,
        }
    }
}

/// Assign `tasks` to the horizon starting at `anchor`.
///
/// Returns one item per task, ordered by the lexical value of `start_time`,
/// so [`UNSCHEDULED`] entries sort after every "HH:MM" value. `tasks` is
/// left untouched.
pub fn optimize_schedule(
    tasks: &[Task],
    anchor: NaiveDateTime,
    params: &BioParams,
) -> Vec<ScheduleItem> {
    let mut slots = generate_slots(params, anchor);

    let mut order: Vec<&Task> = tasks.iter().collect();
    order.sort_by(|a, b| b.effort.cmp(&a.effort));

    let mut schedule: Vec<ScheduleItem> = order
        .into_iter()
        .map(|task| {
            let needed = task.slots_needed();
            match best_window(&slots, needed) {
                Some((start, capacity)) => {
                    for slot in &mut slots[start..start + needed] {
                        slot.booked = true;
                    }
                    ScheduleItem::scheduled(slots[start].time, task, capacity)
                }
                None => ScheduleItem::unscheduled(task),
            }
        })
        .collect();

    schedule.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    schedule
}

/// Free window of `len` slots with the highest mean capacity.
///
/// Ties keep the earliest window. Zero-length and oversize requests have
/// no window.
fn best_window(slots: &[Slot], len: usize) -> Option<(usize, f64)> {
    if len == 0 || len > slots.len() {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for (start, window) in slots.windows(len).enumerate() {
        if window.iter().any(|s| s.booked) {
            continue;
        }
        let mean = window.iter().map(|s| s.capacity).sum::<f64>() / len as f64;
        if best.map_or(true, |(_, score)| mean > score) {
            best = Some((start, mean));
        }
    }
    best
}
