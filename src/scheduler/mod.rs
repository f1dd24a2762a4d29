//! Spaced repetition scheduling for topics
//!
//! This module provides:
//! - The fixed five-stage interval table and advance/reset computations
//! - Due-date classification (overdue, due today, upcoming)
//! - Review state validation
//! - An injectable clock so schedules can be computed against any instant

pub mod algorithm;
pub mod clock;
pub mod state;

pub use algorithm::{
    advance, classify, format_interval, initial_state, interval_for_stage, reset, DueStatus,
    ScheduleResult, SchedulerConfig, STAGE_INTERVAL_DAYS,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use state::{ReviewState, SchedulerError, FINAL_STAGE};
