use std::time::{Duration, Instant};

use chrono::{DateTime, TimeDelta, Utc};

use crate::model::config::SweepConfig;
use crate::model::state::AppState;
use crate::ops::action::{Action, dispatch};

/// Recurring inactivity check for the acting user.
///
/// The owner polls it from its event loop; nothing runs in the background.
/// Once cancelled (or dropped with its owner) it never fires again.
#[derive(Debug)]
pub struct InactivitySweep {
    interval: Duration,
    threshold: TimeDelta,
    /// `None` once the schedule runs past what `Instant` can represent
    next_due: Option<Instant>,
    cancelled: bool,
}

impl InactivitySweep {
    pub fn new(interval: Duration, threshold: TimeDelta, started: Instant) -> Self {
        InactivitySweep {
            interval,
            threshold,
            next_due: started.checked_add(interval),
            cancelled: false,
        }
    }

    pub fn from_config(cfg: &SweepConfig, started: Instant) -> Self {
        let threshold = i64::try_from(cfg.inactive_after_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);
        Self::new(Duration::from_secs(cfg.interval_secs.max(1)), threshold, started)
    }

    pub fn threshold(&self) -> TimeDelta {
        self.threshold
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// True when an interval has elapsed; reschedules the next tick.
    /// Ticks missed while the loop was busy collapse into one.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(mut due) = self.next_due else {
            return false;
        };
        if self.cancelled || now < due {
            return false;
        }
        while due <= now {
            match due.checked_add(self.interval) {
                Some(next) => due = next,
                None => {
                    self.next_due = None;
                    return true;
                }
            }
        }
        self.next_due = Some(due);
        true
    }

    /// Poll and, if due, run the auto-offline check for the current user.
    /// Returns true when a check was dispatched.
    pub fn run_due(&mut self, state: &mut AppState, tick: Instant, now: DateTime<Utc>) -> bool {
        if !self.poll(tick) {
            return false;
        }
        let member_id = state.role.current_user_id.clone();
        if member_id.is_empty() {
            return false;
        }
        dispatch(
            state,
            Action::AutoOfflineIfInactive {
                member_id,
                threshold_ms: self.threshold.num_milliseconds(),
                now: Some(now),
            },
            now,
        );
        true
    }
}
