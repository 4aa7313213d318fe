//! The rotation engine: pure calendar arithmetic, no I/O.
//!
//! Week zero starts at the epoch date (see [`crate::config::rotation_epoch`]).
//! Each chore advances through the roster by one roomie per elapsed week:
//!
//! ```text
//! assignee_index = (chore_ordinal + weeks_elapsed) mod roomie_count
//! ```
//!
//! Independently, each chore carries a recurrence period in weeks and is
//! due only on weeks that are whole multiples of that period.

use chrono::NaiveDate;

/// Whole weeks elapsed from `epoch` to `today`.
///
/// Euclidean division, so a `today` before the epoch yields a negative
/// week number that still rotates through the roster consistently rather
/// than mirroring around zero.
pub fn weeks_elapsed(epoch: NaiveDate, today: NaiveDate) -> i64 {
    today.signed_duration_since(epoch).num_days().div_euclid(7)
}

/// Index into the roster of the roomie assigned to the chore at
/// `chore_ordinal` for the given week.
///
/// `chore_ordinal` is the chore's 0-based position in the sorted,
/// unfiltered chore sequence. Precondition: `roomie_count >= 1`; the
/// planner never calls this with an empty roster.
pub fn assignee_index(chore_ordinal: usize, weeks_elapsed: i64, roomie_count: usize) -> usize {
    (chore_ordinal as i64 + weeks_elapsed).rem_euclid(roomie_count as i64) as usize
}

/// Normalize a stored recurrence period to a positive whole number of weeks.
///
/// Notion number properties are floats and may be absent, zero, negative,
/// or fractional; anything that does not truncate to a positive integer
/// falls back to 1 (due every week).
pub fn normalize_period(raw: Option<f64>) -> u32 {
    match raw {
        Some(value) if value.is_finite() && value >= 1.0 => value.trunc() as u32,
        _ => 1,
    }
}

/// Whether a chore with the given period is due on the given week.
///
/// Due exactly when `weeks_elapsed` is a whole multiple of `period_weeks`.
/// Precondition: `period_weeks >= 1` (guaranteed by [`normalize_period`]).
pub fn is_due(period_weeks: u32, weeks_elapsed: i64) -> bool {
    weeks_elapsed.rem_euclid(i64::from(period_weeks)) == 0
}
