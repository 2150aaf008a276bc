//! Date policies applied around the evaluator: normalizing a task date on
//! create/edit, and deciding what completing a task does.

use chrono::NaiveDate;

use crate::date::{format_date, parse_date};
use crate::error::CoreError;
use crate::recurrence::next_date;
use crate::rule::RecurrenceRule;

/// What to do with a stored date when a task is created or edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateAction {
    /// The date is today or later.
    Keep,
    /// The date is in the past and the task does not repeat.
    SnapToToday,
    /// The date is in the past and the task repeats.
    Advance,
}

impl DateAction {
    pub fn decide(has_rule: bool, is_past: bool) -> Self {
        match (has_rule, is_past) {
            (_, false) => DateAction::Keep,
            (false, true) => DateAction::SnapToToday,
            (true, true) => DateAction::Advance,
        }
    }
}

/// Normalizes the date of a task being created or edited.
///
/// * An empty date becomes `now`.
/// * A past date snaps to `now`, or advances through the rule if there is one.
/// * Any other date is returned unchanged.
///
/// A non-empty `repeat` is always parsed, so a bad rule is rejected even when
/// the date does not need to move.
pub fn normalize_date(now: NaiveDate, stored: &str, repeat: &str) -> Result<String, CoreError> {
    let rule = RecurrenceRule::parse_optional(repeat)?;

    if stored.is_empty() {
        return Ok(format_date(now));
    }
    let date = parse_date(stored)?;

    match (DateAction::decide(rule.is_some(), date < now), rule) {
        (DateAction::Keep, _) => Ok(stored.to_string()),
        (DateAction::SnapToToday, _) => Ok(format_date(now)),
        (DateAction::Advance, Some(rule)) => next_date(now, date, &rule).map(format_date),
        (DateAction::Advance, None) => Err(CoreError::NoRule),
    }
}

/// Outcome of marking a task as done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The task does not repeat and should be removed.
    Delete,
    /// The task repeats; store this as its new date.
    Reschedule(NaiveDate),
}

/// Decides what completing a task means. Unlike [`normalize_date`] this never
/// snaps to today: a repeating task always advances through its rule.
pub fn complete(now: NaiveDate, stored: &str, repeat: &str) -> Result<Completion, CoreError> {
    match RecurrenceRule::parse_optional(repeat)? {
        None => Ok(Completion::Delete),
        Some(rule) => {
            let anchor = parse_date(stored)?;
            next_date(now, anchor, &rule).map(Completion::Reschedule)
        }
    }
}
