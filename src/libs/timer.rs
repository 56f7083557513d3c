//! Work timer state machine.
//!
//! A timer is a persisted record moving through `running`, `paused`, and
//! `completed`. The non-obvious invariant is how resume preserves elapsed
//! time without an accumulator field: the stored start instant is rewritten
//! to `now - (pause_end - start)`, so `now - start` always yields the total
//! accumulated running time. The stored start of a resumed timer is
//! therefore synthetic, not the original start.
//!
//! `completed` is transient: the caller that stopped the timer immediately
//! either converts it into a time entry or discards it, and the record is
//! deleted in both cases.
//!
//! Precondition violations (no active timer, wrong status) are typed,
//! non-fatal errors; callers report them and leave state untouched. Store
//! failures abort the transition the same way.

use crate::db::timers::{NewTimer, TimerRecord, Timers};
use crate::libs::billing;
use crate::libs::entry::NewTimeEntry;
use crate::libs::formatter::format_duration;
use crate::libs::messages::Message;
use crate::libs::notifier::Notify;
use chrono::{Duration, Local, NaiveDateTime};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Running,
    Paused,
    Completed,
}

impl TimerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "running" => Some(TimerStatus::Running),
            "paused" => Some(TimerStatus::Paused),
            "completed" => Some(TimerStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum TimerError {
    #[error("no active timer")]
    NoActiveTimer,
    #[error("timer is not running")]
    NotRunning,
    #[error("timer is not paused")]
    NotPaused,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl TimerError {
    /// True for precondition violations, which callers report as a
    /// notification rather than propagating.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, TimerError::Store(_))
    }
}

pub type TimerResult<T> = Result<T, TimerError>;

/// A stopped timer together with its computed durations, handed to the
/// caller for the save-or-discard confirmation step.
#[derive(Debug, Clone)]
pub struct StoppedTimer {
    pub record: TimerRecord,
    pub actual_minutes: i64,
    pub rounded_minutes: i64,
}

/// State machine over the persisted timer store.
///
/// Owned by the command layer; the notifier is injected so side effects
/// (like abandoning a previous timer) surface without the service printing
/// directly.
pub struct TimerService {
    user: String,
    timers: Timers,
    notifier: Box<dyn Notify>,
}

impl TimerService {
    pub fn new(user: String, timers: Timers, notifier: Box<dyn Notify>) -> Self {
        TimerService { user, timers, notifier }
    }

    /// The user's active timer, if any.
    pub fn active(&mut self) -> TimerResult<Option<TimerRecord>> {
        Ok(self.timers.get_active(&self.user)?)
    }

    /// Starts a new timer, abandoning any previous active one.
    ///
    /// The abandoned timer's elapsed time is discarded; no time entry is
    /// synthesized for it.
    pub fn start(&mut self, client_id: i64, product_id: Option<i64>, description: Option<String>) -> TimerResult<TimerRecord> {
        if let Some(previous) = self.timers.get_active(&self.user)? {
            self.timers.delete(previous.id)?;
            self.notifier
                .warning(Message::TimerAbandoned(previous.start.format("%H:%M").to_string()));
        }

        let record = self.timers.create(&NewTimer {
            user: self.user.clone(),
            client_id,
            product_id,
            description,
            start: Self::now(),
        })?;
        Ok(record)
    }

    /// Pauses the running timer. The pause instant is stored in `end` as a
    /// marker; elapsed time so far equals `end - start`.
    pub fn pause(&mut self) -> TimerResult<TimerRecord> {
        let timer = self.require_active()?;
        if timer.status != TimerStatus::Running {
            return Err(TimerError::NotRunning);
        }
        let record = self.timers.mark_paused(timer.id, Self::now())?;
        Ok(record)
    }

    /// Resumes a paused timer, rewriting `start` so the accumulated elapsed
    /// time is preserved across the pause gap.
    pub fn resume(&mut self) -> TimerResult<TimerRecord> {
        let timer = self.require_active()?;
        if timer.status != TimerStatus::Paused {
            return Err(TimerError::NotPaused);
        }
        let accumulated = Self::elapsed_of(&timer, Self::now());
        let synthetic_start = Self::now() - accumulated;
        let record = self.timers.mark_running(timer.id, synthetic_start)?;
        Ok(record)
    }

    /// Stops the active timer and returns it with actual and rounded
    /// durations for the caller's confirmation step.
    pub fn stop(&mut self) -> TimerResult<StoppedTimer> {
        let timer = self.require_active()?;
        let now = Self::now();
        let elapsed = Self::elapsed_of(&timer, now);

        // A paused timer keeps its pause marker so end - start still equals
        // the elapsed time; a running timer is closed at the stop instant.
        let end = match timer.status {
            TimerStatus::Paused => timer.end.unwrap_or(now),
            _ => now,
        };
        let record = self.timers.mark_completed(timer.id, end)?;

        let actual_minutes = elapsed.num_minutes().max(0);
        Ok(StoppedTimer {
            record,
            actual_minutes,
            rounded_minutes: billing::round_to_increment(actual_minutes),
        })
    }

    /// Persists the stopped timer as a time entry with the caller-chosen
    /// billed duration, deleting the timer in the same transaction.
    pub fn convert_to_entry(&mut self, stopped: &StoppedTimer, billed_minutes: i64) -> TimerResult<i64> {
        let entry = NewTimeEntry::from_timer(&stopped.record, stopped.actual_minutes, billed_minutes);
        let entry_id = self.timers.convert_to_entry(stopped.record.id, &entry)?;
        self.notifier.success(Message::TimerConverted(entry_id));
        Ok(entry_id)
    }

    /// Deletes the timer without creating a time entry.
    pub fn discard(&mut self, timer_id: i64) -> TimerResult<()> {
        self.timers.delete(timer_id)?;
        Ok(())
    }

    /// Elapsed time of a timer at `now`: projected from `start` while
    /// running, fixed at `end - start` while paused or completed.
    pub fn elapsed_of(timer: &TimerRecord, now: NaiveDateTime) -> Duration {
        let elapsed = match timer.status {
            TimerStatus::Running => now - timer.start,
            _ => timer.end.map_or(now - timer.start, |end| end - timer.start),
        };
        std::cmp::max(elapsed, Duration::zero())
    }

    /// Formatted elapsed time, used in pause/resume notifications.
    pub fn format_elapsed_of(timer: &TimerRecord) -> String {
        format_duration(&Self::elapsed_of(timer, Self::now()))
    }

    fn require_active(&mut self) -> TimerResult<TimerRecord> {
        self.timers.get_active(&self.user)?.ok_or(TimerError::NoActiveTimer)
    }

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }
}
