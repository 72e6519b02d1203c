// src/pipeline/mod.rs

//! Engagement pipeline: selection, the single-action cycle, daily
//! scheduling and reporting.

mod report;
mod run;
mod schedule;
mod select;

pub use report::{DailyReport, build_report, write_report};
pub use run::{CycleOutcome, run_cycle};
pub use schedule::{plan_slots, run_scheduler};
pub use select::select_best;
