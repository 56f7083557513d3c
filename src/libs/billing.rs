//! Billing duration calculation.
//!
//! Converts wall-clock `HH:MM` values into elapsed minutes and applies the
//! billing rounding rule. Everything here is a pure function over `chrono`
//! values; persistence and presentation live elsewhere.
//!
//! ## Rounding rule
//!
//! Billable durations round up to the next 15-minute block over the *total*
//! minute count: `ceil(actual / 15) * 15`, with zero staying zero. The same
//! rule applies below and above one hour, so 59 minutes bills as 60 and
//! 61 minutes bills as 75.
//!
//! ## Parsing contract
//!
//! `parse_time_of_day` is best-effort: a missing, non-numeric, or
//! out-of-range component degrades to `0` rather than failing. Callers that
//! need real validation (interactive input) must check with
//! `is_valid_time_of_day` first; an all-zero result may be a parse failure.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Billing increment in minutes. The only rounding policy implemented.
pub const BILLING_INCREMENT_MINUTES: i64 = 15;

/// Minimum billable span in minutes for the opt-in minimum-duration helper.
pub const MINIMUM_SPAN_MINUTES: i64 = 15;

/// Spans longer than this are likely input mistakes and get a warning.
pub const SPAN_SANITY_HOURS: i64 = 16;

/// Parses an `HH:MM` time-of-day value, degrading malformed components to 0.
///
/// `"9:30"` parses as 09:30, `"24:10"` as 00:10 (hour out of range),
/// `"abc"` as 00:00. No error path exists; validate separately when the
/// input comes from a user.
pub fn parse_time_of_day(value: &str) -> NaiveTime {
    let mut parts = value.splitn(2, ':');
    let hour = parts
        .next()
        .and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|h| *h <= 23)
        .unwrap_or(0);
    let minute = parts
        .next()
        .and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|m| *m <= 59)
        .unwrap_or(0);
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Strict validation counterpart to `parse_time_of_day`.
pub fn is_valid_time_of_day(value: &str) -> bool {
    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() != 2 {
        return false;
    }
    let hour_ok = matches!(parts[0].trim().parse::<u32>(), Ok(h) if h <= 23);
    let minute_ok = matches!(parts[1].trim().parse::<u32>(), Ok(m) if m <= 59);
    hour_ok && minute_ok
}

/// A pair of wall-clock instants with `end >= start` guaranteed.
///
/// Built from two times of day anchored to a reference date; an end time
/// earlier than the start time is taken to mean the following day (single
/// rollover only, multi-day spans are not representable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeSpan {
    /// Computes a span from two `HH:MM` values anchored to `reference_date`.
    pub fn compute(start: &str, end: &str, reference_date: NaiveDate) -> Self {
        let start_dt = reference_date.and_time(parse_time_of_day(start));
        let mut end_dt = reference_date.and_time(parse_time_of_day(end));
        if end_dt < start_dt {
            end_dt += Duration::days(1);
        }
        TimeSpan { start: start_dt, end: end_dt }
    }

    /// Elapsed whole minutes; fractional seconds are truncated, not rounded.
    pub fn actual_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Opt-in minimum-duration helper: extends the end instant so the span
    /// is exactly 15 minutes when the actual span is shorter. Distinct from
    /// rounding and never applied automatically.
    pub fn with_minimum(self) -> Self {
        if self.actual_minutes() < MINIMUM_SPAN_MINUTES {
            TimeSpan {
                start: self.start,
                end: self.start + Duration::minutes(MINIMUM_SPAN_MINUTES),
            }
        } else {
            self
        }
    }

    /// True when the span exceeds the 16-hour sanity threshold. The span is
    /// still accepted; callers surface a warning instead of failing.
    pub fn exceeds_sanity_threshold(&self) -> bool {
        self.end - self.start > Duration::hours(SPAN_SANITY_HOURS)
    }
}

/// Rounds a minute count up to the next billing increment.
///
/// Zero (and anything non-positive) stays zero; everything else ceils to a
/// multiple of 15. Idempotent on values already on a block boundary.
pub fn round_to_increment(actual_minutes: i64) -> i64 {
    if actual_minutes <= 0 {
        return 0;
    }
    (actual_minutes + BILLING_INCREMENT_MINUTES - 1) / BILLING_INCREMENT_MINUTES * BILLING_INCREMENT_MINUTES
}

/// Billed minutes for a span, with rounding suppressible by the caller.
///
/// Suppression is used when re-saving an already-rounded entry so edits do
/// not re-round on every save.
pub fn billable_minutes(actual_minutes: i64, apply_rounding: bool) -> i64 {
    if apply_rounding {
        round_to_increment(actual_minutes)
    } else {
        actual_minutes.max(0)
    }
}
