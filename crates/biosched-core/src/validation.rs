//! Input checks for front ends.
//!
//! The scheduler accepts any task list; transports call these before handing
//! decoded input to it.

use crate::biomodel::Task;
use crate::error::ValidationError;

pub const MIN_EFFORT: u8 = 1;
pub const MAX_EFFORT: u8 = 10;

/// Reject blank names, zero durations and effort outside 1-10.
pub fn validate_task(task: &Task) -> Result<(), ValidationError> {
    if task.name.trim().is_empty() {
        return Err(ValidationError::invalid("name", "must not be empty"));
    }
    if task.duration == 0 {
        return Err(ValidationError::invalid(
            "duration_minutes",
            format!("'{}' must be a positive number of minutes", task.name),
        ));
    }
    if !(MIN_EFFORT..=MAX_EFFORT).contains(&task.effort) {
        return Err(ValidationError::invalid(
            "effort_level",
            format!(
                "'{}' has effort {}, expected {MIN_EFFORT}-{MAX_EFFORT}",
                task.name, task.effort
            ),
        ));
    }
    Ok(())
}

/// Validate every task in a non-empty list.
pub fn validate_tasks(tasks: &[Task]) -> Result<(), ValidationError> {
    if tasks.is_empty() {
        return Err(ValidationError::EmptyCollection("tasks".into()));
    }
    tasks.iter().try_for_each(validate_task)
}
