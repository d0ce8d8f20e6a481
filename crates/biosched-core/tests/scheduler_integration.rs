//! Integration tests for the capacity model and greedy scheduler.

use biosched_core::{
    generate_slots, optimize_schedule, BioParams, FitScore, SchedulePlan, Task, UNSCHEDULED,
};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use proptest::prelude::*;

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, 17)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn default_params() -> BioParams {
    BioParams::new(at(7, 0), 0.0, 16.0)
}

#[test]
fn test_wake_time_scenario() {
    let state = default_params().calculate_state(at(7, 0));
    let expected_circadian = ((std::f64::consts::PI / 12.0).sin() + 1.0) / 2.0;

    assert_eq!(state.freshness, 1.0);
    assert!((state.circadian - expected_circadian).abs() < 1e-12);
    assert!((state.circadian - 0.6294).abs() < 1e-4);
    assert!((state.total_capacity - 0.8147).abs() < 1e-4);
}

#[test]
fn test_deep_work_and_email_scenario() {
    let anchor = at(8, 0);
    let params = default_params();
    let tasks = vec![Task::new("Deep Work", 60, 9), Task::new("Email", 30, 2)];

    let schedule = optimize_schedule(&tasks, anchor, &params);
    assert_eq!(schedule.len(), 2);

    // Independent oracle over the same slots.
    let slots = generate_slots(&params, anchor);
    let mut best_pair = 0;
    for i in 1..slots.len() - 1 {
        let mean = (slots[i].capacity + slots[i + 1].capacity) / 2.0;
        let best = (slots[best_pair].capacity + slots[best_pair + 1].capacity) / 2.0;
        if mean > best {
            best_pair = i;
        }
    }
    let mut best_single: Option<usize> = None;
    for (i, slot) in slots.iter().enumerate() {
        if i == best_pair || i == best_pair + 1 {
            continue;
        }
        if best_single.map_or(true, |b| slot.capacity > slots[b].capacity) {
            best_single = Some(i);
        }
    }
    let best_single = best_single.unwrap();

    let deep = schedule.iter().find(|i| i.task_name == "Deep Work").unwrap();
    let email = schedule.iter().find(|i| i.task_name == "Email").unwrap();

    assert_eq!(deep.start_time, slots[best_pair].time.format("%H:%M").to_string());
    assert_eq!(email.start_time, slots[best_single].time.format("%H:%M").to_string());
    assert_eq!(email.predicted_capacity, Some(slots[best_single].capacity));
    assert_eq!(email.fit_score, FitScore::Perfect);

    assert!(schedule[0].start_time <= schedule[1].start_time);
}

#[test]
fn test_horizon_full_leaves_rest_unscheduled() {
    let tasks = vec![Task::new("Leftover", 30, 5), Task::new("Whole Day", 720, 7)];
    let schedule = optimize_schedule(&tasks, at(8, 0), &default_params());

    let leftover = schedule.iter().find(|i| i.task_name == "Leftover").unwrap();
    assert_eq!(leftover.start_time, UNSCHEDULED);
    assert_eq!(leftover.fit_score, FitScore::NoTimeEnergy);
    assert_eq!(schedule[0].task_name, "Whole Day");
    assert_eq!(schedule[0].start_time, "08:00");
    assert_eq!(schedule[1].task_name, "Leftover");
}

#[test]
fn test_equal_effort_keeps_input_order() {
    // Both need the whole horizon; the first listed wins.
    let tasks = vec![Task::new("First", 720, 5), Task::new("Second", 720, 5)];
    let schedule = optimize_schedule(&tasks, at(8, 0), &default_params());

    let first = schedule.iter().find(|i| i.task_name == "First").unwrap();
    let second = schedule.iter().find(|i| i.task_name == "Second").unwrap();
    assert!(first.is_scheduled());
    assert_eq!(second.start_time, UNSCHEDULED);
}

#[test]
fn test_output_order_is_lexical_across_midnight() {
    // Horizon 18:00 -> 05:30 next day; "00:00".."05:30" sort before "18:00".
    let tasks: Vec<Task> = (0..24)
        .map(|i| Task::new(format!("Task {i}"), 30, 5))
        .collect();
    let schedule = optimize_schedule(&tasks, at(18, 0), &default_params());

    assert!(schedule.iter().all(|i| i.is_scheduled()));
    assert!(schedule.windows(2).all(|w| w[0].start_time <= w[1].start_time));
    assert!(schedule[0].start_time.starts_with("0"));
    assert!(schedule.last().unwrap().start_time.starts_with("2"));
}

#[test]
fn test_truncated_duration_books_fewer_slots() {
    // 45 minutes books one slot, so 24 of them all fit.
    let tasks: Vec<Task> = (0..24)
        .map(|i| Task::new(format!("Chunk {i}"), 45, 3))
        .collect();
    let schedule = optimize_schedule(&tasks, at(8, 0), &default_params());
    assert!(schedule.iter().all(|i| i.is_scheduled()));
}

#[test]
fn test_rerun_is_byte_identical() {
    let tasks = vec![
        Task::new("Refactor", 90, 10),
        Task::new("Weekly Sync", 30, 3),
        Task::new("Write Docs", 60, 5),
    ];
    let anchor = at(9, 0);
    let params = BioParams::new(at(8, 0), 0.5, 15.0);

    let run = || {
        let plan = SchedulePlan::new(optimize_schedule(&tasks, anchor, &params));
        serde_json::to_string(&plan).unwrap()
    };
    assert_eq!(run(), run());
}

fn slot_index(start_time: &str, anchor: NaiveDateTime) -> usize {
    let t = NaiveTime::parse_from_str(start_time, "%H:%M").unwrap();
    let minutes = t.hour() * 60 + t.minute();
    let anchor_minutes = anchor.hour() * 60 + anchor.minute();
    ((minutes - anchor_minutes) / 30) as usize
}

proptest! {
    #[test]
    fn prop_state_components_in_unit_range(
        wake_offset_min in -720i64..720,
        target_offset_min in -1440i64..2880,
        lag in -12.0f64..12.0,
        rate in 0.5f64..40.0,
    ) {
        let wake = at(7, 0) + Duration::minutes(wake_offset_min);
        let params = BioParams::new(wake, lag, rate);
        let state = params.calculate_state(at(7, 0) + Duration::minutes(target_offset_min));

        prop_assert!((0.0..=1.0).contains(&state.freshness));
        prop_assert!((0.0..=1.0).contains(&state.circadian));
        prop_assert!((0.0..=1.0).contains(&state.total_capacity));
    }

    #[test]
    fn prop_before_wake_is_fully_fresh(
        before_min in 0i64..2880,
        lag in -6.0f64..6.0,
        rate in 1.0f64..30.0,
    ) {
        let params = BioParams::new(at(7, 0), lag, rate);
        let state = params.calculate_state(at(7, 0) - Duration::minutes(before_min));
        prop_assert_eq!(state.freshness, 1.0);
    }

    #[test]
    fn prop_calculate_state_is_deterministic(
        target_offset_min in 0i64..1440,
        lag in -6.0f64..6.0,
        rate in 1.0f64..30.0,
    ) {
        let params = BioParams::new(at(7, 0), lag, rate);
        let target = at(7, 0) + Duration::minutes(target_offset_min);
        prop_assert_eq!(params.calculate_state(target), params.calculate_state(target));
    }

    #[test]
    fn prop_scheduled_windows_never_overlap(
        specs in prop::collection::vec((1u32..=8, 1u8..=10), 1..12),
    ) {
        let anchor = at(8, 0);
        let tasks: Vec<Task> = specs
            .iter()
            .enumerate()
            .map(|(i, (slots, effort))| Task::new(format!("t{i}"), slots * 30, *effort))
            .collect();

        let schedule = optimize_schedule(&tasks, anchor, &default_params());
        prop_assert_eq!(schedule.len(), tasks.len());

        let mut occupied = [false; 24];
        for item in schedule.iter().filter(|i| i.is_scheduled()) {
            let task = tasks.iter().find(|t| t.name == item.task_name).unwrap();
            let start = slot_index(&item.start_time, anchor);
            for slot in start..start + task.slots_needed() {
                prop_assert!(slot < 24);
                prop_assert!(!occupied[slot]);
                occupied[slot] = true;
            }
        }
    }
}
