//! The compact repeat grammar.
//!
//! | text            | meaning                                              |
//! |-----------------|------------------------------------------------------|
//! | `d 5`           | every 5 days (1..=400)                               |
//! | `y`             | every year on the same month and day                 |
//! | `w 1,3`         | every Monday and Wednesday (1 = Monday, 7 = Sunday)  |
//! | `m 1,-1`        | the 1st and the last day of every month              |
//! | `m -2 1,7`      | the second-to-last day of January and July           |
//!
//! An empty string means "not recurring" and is reported as
//! [`CoreError::EmptyRule`] so callers can branch on it.

use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Largest interval accepted by a daily rule.
pub const MAX_DAILY_INTERVAL: u32 = 400;

/// One entry of a monthly day list.
///
/// Relative selectors sort before absolute days so that a rule prints as
/// `m -2,-1,5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DaySelector {
    /// `-2`
    SecondToLast,
    /// `-1`
    Last,
    /// `1..=31`
    Day(u8),
}

impl DaySelector {
    fn from_value(value: i64) -> Option<Self> {
        match value {
            -2 => Some(DaySelector::SecondToLast),
            -1 => Some(DaySelector::Last),
            1..=31 => Some(DaySelector::Day(value as u8)),
            _ => None,
        }
    }

    /// Resolves the selector against a month whose last day is `last_day`.
    ///
    /// Absolute days past the end of the month do not exist in that month, and
    /// the second-to-last day needs a month of at least two days.
    pub fn resolve(self, last_day: u32) -> Option<u32> {
        match self {
            DaySelector::Day(day) => {
                let day = u32::from(day);
                (day <= last_day).then_some(day)
            }
            DaySelector::Last => Some(last_day),
            DaySelector::SecondToLast => (last_day > 1).then(|| last_day - 1),
        }
    }
}

impl fmt::Display for DaySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaySelector::SecondToLast => write!(f, "-2"),
            DaySelector::Last => write!(f, "-1"),
            DaySelector::Day(day) => write!(f, "{}", day),
        }
    }
}

/// A parsed repeat rule.
#[derive(Debug, Clone, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub enum RecurrenceRule {
    /// Every `interval` days.
    Daily { interval: u32 },
    /// Every year on the anchor's month and day.
    Yearly,
    /// ISO weekday numbers, Monday = 1 through Sunday = 7.
    Weekly { weekdays: BTreeSet<u8> },
    /// Day selectors, optionally restricted to a set of months (1..=12).
    /// An empty month set means every month.
    Monthly {
        days: BTreeSet<DaySelector>,
        months: BTreeSet<u8>,
    },
}

impl RecurrenceRule {
    /// Parses a repeat string.
    ///
    /// Every kind takes exactly its own arguments; a trailing token, an empty
    /// list entry or an out-of-range value is an [`CoreError::InvalidArgument`].
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        if text.is_empty() {
            return Err(CoreError::EmptyRule);
        }

        let mut tokens = text.split(' ');
        let kind = tokens.next().unwrap_or_default();
        let args: Vec<&str> = tokens.collect();

        match (kind, args.as_slice()) {
            ("d", [interval]) => Ok(RecurrenceRule::Daily {
                interval: parse_interval(interval)?,
            }),
            ("y", []) => Ok(RecurrenceRule::Yearly),
            ("w", [weekdays]) => Ok(RecurrenceRule::Weekly {
                weekdays: parse_set(weekdays, "weekday", |v| {
                    (1..=7).contains(&v).then_some(v as u8)
                })?,
            }),
            ("m", [days]) => Ok(RecurrenceRule::Monthly {
                days: parse_set(days, "day", DaySelector::from_value)?,
                months: BTreeSet::new(),
            }),
            ("m", [days, months]) => Ok(RecurrenceRule::Monthly {
                days: parse_set(days, "day", DaySelector::from_value)?,
                months: parse_set(months, "month", |v| {
                    (1..=12).contains(&v).then_some(v as u8)
                })?,
            }),
            ("d" | "y" | "w" | "m", _) => Err(CoreError::InvalidArgument(format!(
                "wrong number of arguments for '{}' in '{}'",
                kind, text
            ))),
            (other, _) => Err(CoreError::UnknownRuleKind(other.to_string())),
        }
    }

    /// Like [`RecurrenceRule::parse`], but an empty string is `Ok(None)`.
    pub fn parse_optional(text: &str) -> Result<Option<Self>, CoreError> {
        match Self::parse(text) {
            Ok(rule) => Ok(Some(rule)),
            Err(CoreError::EmptyRule) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn parse_interval(token: &str) -> Result<u32, CoreError> {
    let value: i64 = token
        .parse()
        .map_err(|_| CoreError::InvalidArgument(format!("invalid days format: '{}'", token)))?;
    if value > i64::from(MAX_DAILY_INTERVAL) {
        return Err(CoreError::RangeExceeded {
            value,
            max: MAX_DAILY_INTERVAL,
        });
    }
    if value <= 0 {
        return Err(CoreError::InvalidArgument(format!(
            "days value must be positive: {}",
            value
        )));
    }
    Ok(value as u32)
}

/// Parses a comma-separated list into a set, rejecting the whole list on the
/// first bad entry.
fn parse_set<T: Ord>(
    list: &str,
    what: &str,
    convert: impl Fn(i64) -> Option<T>,
) -> Result<BTreeSet<T>, CoreError> {
    list.split(',')
        .map(|entry| {
            entry
                .parse::<i64>()
                .ok()
                .and_then(&convert)
                .ok_or_else(|| CoreError::InvalidArgument(format!("invalid {}: '{}'", what, entry)))
        })
        .collect()
}

fn join<T: fmt::Display>(items: &BTreeSet<T>) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceRule::Daily { interval } => write!(f, "d {}", interval),
            RecurrenceRule::Yearly => write!(f, "y"),
            RecurrenceRule::Weekly { weekdays } => write!(f, "w {}", join(weekdays)),
            RecurrenceRule::Monthly { days, months } if months.is_empty() => {
                write!(f, "m {}", join(days))
            }
            RecurrenceRule::Monthly { days, months } => {
                write!(f, "m {} {}", join(days), join(months))
            }
        }
    }
}

impl FromStr for RecurrenceRule {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
