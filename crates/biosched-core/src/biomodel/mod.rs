//! Two-Process biological model and greedy task scheduler.
//!
//! Everything in this module is pure and synchronous:
//! - [`BioParams::calculate_state`] turns a point in time into a [`BioState`]
//! - [`generate_slots`] discretizes a planning horizon into capacity slots
//! - [`FitScore::judge`] labels how well a task's effort matches a capacity
//! - [`optimize_schedule`] greedily assigns tasks to slot windows

mod capacity;
mod fit;
mod recommend;
mod scheduler;
mod slots;

pub use capacity::{BioParams, BioState};
pub use fit::FitScore;
pub use recommend::{CapacityComponents, CapacityReport, Recommendation};
pub use scheduler::{
    optimize_schedule, ScheduleItem, SchedulePlan, Task, ALGORITHM_NAME, UNSCHEDULED,
};
pub use slots::{generate_slots, Slot, HORIZON_SLOTS, SLOT_MINUTES};
