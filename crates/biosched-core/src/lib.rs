//! # biosched Core Library
//!
//! Predicts momentary cognitive capacity from a Two-Process biological model
//! and greedily places tasks on the hours where capacity is highest. The
//! `biosched` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Biomodel**: pure capacity model, slot generator, fit classifier and
//!   first-fit-descending scheduler. No I/O, no logging, never fails.
//! - **Telemetry**: bio-state persistence behind the [`TelemetryStore`] trait
//!   (SQLite and in-memory backends) plus hourly ingestion
//! - **Storage**: TOML configuration and data directory
//!
//! ## Key Components
//!
//! - [`BioParams`]: biological constants; `calculate_state` yields a [`BioState`]
//! - [`optimize_schedule`]: assigns [`Task`]s to the 12-hour horizon
//! - [`FitScore`]: effort-vs-capacity label
//! - [`Config`]: application configuration management

pub mod biomodel;
pub mod error;
pub mod storage;
pub mod telemetry;
pub mod validation;

pub use biomodel::{
    generate_slots, optimize_schedule, BioParams, BioState, CapacityComponents, CapacityReport,
    FitScore, Recommendation, ScheduleItem, SchedulePlan, Slot, Task, HORIZON_SLOTS,
    SLOT_MINUTES, UNSCHEDULED,
};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use storage::Config;
pub use telemetry::{
    ingest_states, IngestReport, MemoryTelemetryStore, RetryPolicy, SqliteTelemetryStore,
    TelemetryStore,
};
