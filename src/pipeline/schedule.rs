// src/pipeline/schedule.rs

//! Daily-window slot planning and the scheduler loop.

use std::path::Path;

use chrono::{DateTime, Duration, Local, TimeZone};
use tokio::time::sleep;

use crate::comment::CommentPolicy;
use crate::error::Result;
use crate::models::{Config, ScheduleConfig, SlotSpacing};
use crate::publish::Publisher;
use crate::services::ContentSource;
use crate::storage::HistoryStore;

use super::run::{CycleOutcome, run_cycle};
use super::{build_report, write_report};

/// Plan the remaining action slots for the calendar day of `now`.
///
/// Every returned slot is strictly after `now` and strictly inside the
/// configured window. At most `max_posts_per_day - already_posted`
/// slots are produced; a mid-window start replans only the remaining
/// window. An elapsed window yields no slots.
pub fn plan_slots<Tz: TimeZone>(
    now: DateTime<Tz>,
    config: &ScheduleConfig,
    already_posted: u32,
) -> Vec<DateTime<Tz>> {
    // At most one slot per minute of a day; keeps the gap arithmetic
    // below inside i32 range for any configured cap.
    let remaining = config
        .max_posts_per_day
        .saturating_sub(already_posted)
        .min(1440);
    if remaining == 0 {
        return vec![];
    }

    let date = now.date_naive();
    let tz = now.timezone();

    let start_naive = date.and_hms_opt(config.window_start_hour, 0, 0);
    let end_naive = if config.window_end_hour == 24 {
        date.succ_opt().and_then(|d| d.and_hms_opt(0, 0, 0))
    } else {
        date.and_hms_opt(config.window_end_hour, 0, 0)
    };
    let (Some(start), Some(end)) = (
        start_naive.and_then(|n| tz.from_local_datetime(&n).earliest()),
        end_naive.and_then(|n| tz.from_local_datetime(&n).earliest()),
    ) else {
        return vec![];
    };

    let effective_start = if now > start { now.clone() } else { start };
    if effective_start >= end {
        return vec![];
    }

    let mut slots = Vec::with_capacity(remaining as usize);
    match config.spacing {
        SlotSpacing::Even => {
            let gap = (end.clone() - effective_start.clone()) / remaining as i32;
            let jitter_secs = i64::from(config.jitter_minutes) * 60;
            for i in 0..remaining as i32 {
                let jitter = if jitter_secs > 0 {
                    Duration::seconds(fastrand::i64(-jitter_secs..=jitter_secs))
                } else {
                    Duration::zero()
                };
                let slot = effective_start.clone() + gap * i + gap / 2 + jitter;
                let slot = clamp_slot(slot, &effective_start, &end);
                if let Some(slot) = slot {
                    slots.push(slot);
                }
            }
            slots.sort();
        }
        SlotSpacing::Fixed => {
            let interval = Duration::minutes(i64::from(config.interval_minutes));
            let mut slot = effective_start + interval;
            while slot < end && slots.len() < remaining as usize {
                slots.push(slot.clone());
                slot = slot + interval;
            }
        }
    }
    slots
}

/// Pull a jittered slot back inside (start, end), or drop it when the
/// window is too narrow to hold it.
fn clamp_slot<Tz: TimeZone>(
    slot: DateTime<Tz>,
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let floor = start.clone() + Duration::seconds(1);
    let ceil = end.clone() - Duration::seconds(1);
    if floor > ceil {
        return None;
    }
    Some(slot.clamp(floor, ceil))
}

/// First instant of the next day's posting window.
fn next_window_start<Tz: TimeZone>(
    now: DateTime<Tz>,
    config: &ScheduleConfig,
) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    now.date_naive()
        .succ_opt()?
        .and_hms_opt(config.window_start_hour, 0, 0)
        .and_then(|n| tz.from_local_datetime(&n).earliest())
}

/// Run the scheduler until interrupted: fire each remaining slot of
/// the current day, write that day's report once its window or cap is
/// exhausted, then re-arm at the next day's window start.
///
/// Slots are replanned before every wait from the persisted daily
/// count, so an externally updated history shrinks the plan. A failed
/// cycle abandons its slot and the loop continues. Ctrl-C stops the
/// loop cleanly between actions.
pub async fn run_scheduler(
    config: &Config,
    source: &dyn ContentSource,
    policy: &dyn CommentPolicy,
    publisher: &dyn Publisher,
    store: &dyn HistoryStore,
    reports_dir: &Path,
) -> Result<()> {
    loop {
        let now = Local::now();
        let history = store.load().await?;
        let posted = history.posted_on(now.date_naive());

        let Some(slot) = plan_slots(now, &config.schedule, posted).into_iter().next() else {
            log::info!("No slots remain today ({} action(s) taken)", posted);
            let report =
                build_report(&history, now.date_naive(), config.schedule.max_posts_per_day);
            let path = write_report(&report, reports_dir).await?;
            log::info!("Daily report written to {:?}", path);

            let Some(next) = next_window_start(now, &config.schedule) else {
                log::warn!("Cannot determine the next window start; stopping scheduler");
                return Ok(());
            };
            log::info!("Re-arming at {}", next.format("%Y-%m-%d %H:%M:%S"));
            let wait = (next - Local::now()).to_std().unwrap_or_default();
            tokio::select! {
                _ = sleep(wait) => {}
                _ = tokio::signal::ctrl_c() => {
                    log::info!("Interrupt received; stopping scheduler");
                    return Ok(());
                }
            }
            continue;
        };

        log::info!("Next action scheduled for {}", slot.format("%H:%M:%S"));
        let wait = (slot - Local::now()).to_std().unwrap_or_default();
        tokio::select! {
            _ = sleep(wait) => {}
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupt received; stopping scheduler");
                return Ok(());
            }
        }

        match run_cycle(config, source, policy, publisher, store, Local::now()).await {
            Ok(CycleOutcome::Published { post_id, .. }) => {
                log::info!("Completed repost of {}", post_id);
            }
            Ok(CycleOutcome::NoCandidate) => {
                log::info!("Slot passed with nothing to repost");
            }
            // The next replanning pass sees the full counter and moves
            // on to the end-of-day branch.
            Ok(CycleOutcome::CapReached) => {}
            Err(e) => log::error!("Cycle failed, slot abandoned: {}", e),
        }
    }
}
