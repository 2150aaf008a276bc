//! Next-date evaluation.
//!
//! Every rule kind is expressed as a lazy sequence of search steps. A step
//! yields `Some(date)` when it lands on a date that satisfies the rule and
//! `None` when it only moved the cursor (for example past a month that is not
//! in the rule's month set). [`search`] consumes at most [`MAX_SEARCH_STEPS`]
//! steps and returns the first matching date strictly after `now`, so an
//! unsatisfiable rule such as `m 31 2` ends in
//! [`CoreError::UnsatisfiableRule`] instead of looping forever.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeSet;
use std::iter;

use crate::date::{
    add_years, first_day_of_next_month, format_date, iso_weekday, last_day_of_month, parse_date,
};
use crate::error::CoreError;
use crate::rule::{DaySelector, RecurrenceRule};

/// Upper bound on search steps for a single evaluation.
pub const MAX_SEARCH_STEPS: usize = 4096;

/// Returns the first date strictly after `now` that satisfies `rule`, searching
/// forward from the day after `anchor`.
pub fn next_date(
    now: NaiveDate,
    anchor: NaiveDate,
    rule: &RecurrenceRule,
) -> Result<NaiveDate, CoreError> {
    let found = match rule {
        RecurrenceRule::Daily { interval: 0 } => {
            return Err(CoreError::InvalidArgument(
                "daily interval must be positive".to_string(),
            ));
        }
        RecurrenceRule::Daily { interval } => search(daily_steps(now, anchor, *interval), now),
        RecurrenceRule::Yearly => search(yearly_steps(now, anchor), now),
        RecurrenceRule::Weekly { weekdays } => {
            search(weekly_steps(scan_start(now, anchor), weekdays), now)
        }
        RecurrenceRule::Monthly { days, months } => search(
            MonthlySteps::new(scan_start(now, anchor), days, months),
            now,
        ),
    };

    let next = found.ok_or_else(|| CoreError::UnsatisfiableRule(rule.to_string()))?;
    tracing::trace!(%now, %anchor, %rule, %next, "evaluated repeat rule");
    Ok(next)
}

/// [`next_date`] for callers holding an optional rule; `None` is
/// [`CoreError::NoRule`].
pub fn next_date_opt(
    now: NaiveDate,
    anchor: NaiveDate,
    rule: Option<&RecurrenceRule>,
) -> Result<NaiveDate, CoreError> {
    next_date(now, anchor, rule.ok_or(CoreError::NoRule)?)
}

/// Textual form of [`next_date`]: `YYYYMMDD` anchor and result, repeat in the
/// rule grammar. An empty repeat is [`CoreError::NoRule`].
pub fn next_date_str(now: NaiveDate, anchor: &str, repeat: &str) -> Result<String, CoreError> {
    if repeat.is_empty() {
        return Err(CoreError::NoRule);
    }
    let anchor = parse_date(anchor)?;
    let rule = RecurrenceRule::parse(repeat)?;
    next_date(now, anchor, &rule).map(format_date)
}

fn search<I>(steps: I, now: NaiveDate) -> Option<NaiveDate>
where
    I: Iterator<Item = Option<NaiveDate>>,
{
    steps
        .take(MAX_SEARCH_STEPS)
        .flatten()
        .find(|candidate| *candidate > now)
}

/// First day a day-by-day scan has to look at. Days up to `now` can never be
/// returned, so the scan starts at whichever of `anchor` and `now` is later.
fn scan_start(now: NaiveDate, anchor: NaiveDate) -> Option<NaiveDate> {
    anchor.max(now).succ_opt()
}

/// `anchor + k * interval` for k = 1, 2, ...; whole intervals that cannot pass
/// `now` are skipped arithmetically.
fn daily_steps(
    now: NaiveDate,
    anchor: NaiveDate,
    interval: u32,
) -> impl Iterator<Item = Option<NaiveDate>> {
    let step = Duration::days(i64::from(interval));
    let skipped = if anchor < now {
        (now - anchor).num_days() / i64::from(interval)
    } else {
        0
    };
    let first = Duration::try_days(skipped * i64::from(interval))
        .and_then(|offset| anchor.checked_add_signed(offset))
        .and_then(|start| start.checked_add_signed(step));

    iter::successors(first, move |date| date.checked_add_signed(step)).map(Some)
}

/// One year after the previous occurrence, starting from `anchor`.
///
/// A Feb 29 anchor rolls over to Mar 1 on the first step and stays on Mar 1
/// from then on. Every later step keeps its month and day, so step `k` is the
/// first step shifted by `k - 1` years and the years that cannot pass `now`
/// are skipped.
fn yearly_steps(now: NaiveDate, anchor: NaiveDate) -> impl Iterator<Item = Option<NaiveDate>> {
    let first_step = add_years(anchor, 1);
    let skip_to = (now.year() - anchor.year()).max(1) as u32;
    (skip_to..).map(move |k| first_step.and_then(|first| add_years(first, k - 1)))
}

fn weekly_steps<'a>(
    start: Option<NaiveDate>,
    weekdays: &'a BTreeSet<u8>,
) -> impl Iterator<Item = Option<NaiveDate>> + 'a {
    iter::successors(start, |date| date.succ_opt())
        .map(move |date| weekdays.contains(&iso_weekday(date)).then_some(date))
}

/// Day numbers selected in the given month, ascending and deduplicated.
pub fn resolve_days(days: &BTreeSet<DaySelector>, year: i32, month: u32) -> Vec<u32> {
    let Some(last_day) = last_day_of_month(year, month) else {
        return Vec::new();
    };
    let resolved: BTreeSet<u32> = days
        .iter()
        .filter_map(|selector| selector.resolve(last_day))
        .collect();
    resolved.into_iter().collect()
}

/// Month-aware cursor over monthly matches.
struct MonthlySteps<'a> {
    cursor: Option<NaiveDate>,
    days: &'a BTreeSet<DaySelector>,
    months: &'a BTreeSet<u8>,
}

impl<'a> MonthlySteps<'a> {
    fn new(
        start: Option<NaiveDate>,
        days: &'a BTreeSet<DaySelector>,
        months: &'a BTreeSet<u8>,
    ) -> Self {
        Self {
            cursor: start,
            days,
            months,
        }
    }

    fn month_allowed(&self, date: NaiveDate) -> bool {
        self.months.is_empty() || self.months.contains(&(date.month() as u8))
    }
}

impl Iterator for MonthlySteps<'_> {
    type Item = Option<NaiveDate>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor?;

        if !self.month_allowed(cursor) {
            self.cursor = first_day_of_next_month(cursor);
            return Some(None);
        }

        let hit = resolve_days(self.days, cursor.year(), cursor.month())
            .into_iter()
            .find(|day| *day >= cursor.day())
            .and_then(|day| cursor.with_day(day));

        match hit {
            Some(date) => {
                self.cursor = date.succ_opt();
                Some(Some(date))
            }
            None => {
                self.cursor = first_day_of_next_month(cursor);
                Some(None)
            }
        }
    }
}
