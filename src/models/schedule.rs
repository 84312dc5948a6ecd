//! Shift blocks and the schedule records allocated onto them.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::Season;

/// A named time window staff can be assigned to.
///
/// `start` and `end` are hours of the day. A block whose end is before its
/// start wraps past midnight; equal start and end cover the whole day.
///
/// # Example
///
/// ```
/// use staffing_engine::models::ShiftBlock;
/// use rust_decimal::Decimal;
///
/// let night = ShiftBlock::new("Night", 19, 7);
/// assert_eq!(night.hours, Decimal::new(12, 0));
/// assert!(night.covers(23));
/// assert!(night.covers(3));
/// assert!(!night.covers(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftBlock {
    /// Label of the shift (e.g. "Day").
    pub label: String,
    /// Start hour, 0-23.
    pub start: u8,
    /// End hour, 0-23 (exclusive).
    pub end: u8,
    /// Paid duration of the block in hours.
    pub hours: Decimal,
    /// Days of the week the block is worked.
    #[serde(default)]
    pub days: ShiftDays,
}

impl ShiftBlock {
    /// Creates a block whose duration is the wrap-aware span of start/end.
    pub fn new(label: impl Into<String>, start: u8, end: u8) -> Self {
        Self {
            label: label.into(),
            start,
            end,
            hours: Decimal::from(span_hours(start, end).len() as u32),
            days: ShiftDays::Every,
        }
    }

    /// Limits the block to weekdays or weekends.
    pub fn on_days(mut self, days: ShiftDays) -> Self {
        self.days = days;
        self
    }

    /// Returns true if the block is worked on the given date.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.days.includes(date)
    }

    /// Overrides the duration with an explicitly supplied value.
    pub fn with_hours(mut self, hours: Decimal) -> Self {
        self.hours = hours;
        self
    }

    /// Returns true if the given hour of day falls inside the block.
    pub fn covers(&self, hour: u8) -> bool {
        span_hours(self.start, self.end).contains(&hour)
    }

    /// Returns the hours of the day the block covers, in clock order from start.
    pub fn hours_of_day(&self) -> Vec<u8> {
        span_hours(self.start, self.end)
    }
}

/// Returns true for Saturdays and Sundays.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Which days of the week a shift block is worked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShiftDays {
    /// Every day.
    #[default]
    #[serde(alias = "every", alias = "all", alias = "All")]
    Every,
    /// Monday to Friday.
    #[serde(alias = "weekday", alias = "weekdays", alias = "Weekdays")]
    Weekday,
    /// Saturday and Sunday.
    #[serde(alias = "weekend", alias = "weekends", alias = "Weekends")]
    Weekend,
}

impl ShiftDays {
    /// Parses a label such as `"Weekday"`, `"weekends"` or `"All"`.
    ///
    /// A blank label means every day.
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "all" | "every" | "daily" => Some(ShiftDays::Every),
            "weekday" | "weekdays" => Some(ShiftDays::Weekday),
            "weekend" | "weekends" => Some(ShiftDays::Weekend),
            _ => None,
        }
    }

    /// Returns true if the date falls on one of these days.
    pub fn includes(self, date: NaiveDate) -> bool {
        match self {
            ShiftDays::Every => true,
            ShiftDays::Weekday => !is_weekend(date),
            ShiftDays::Weekend => is_weekend(date),
        }
    }
}

impl fmt::Display for ShiftDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftDays::Every => write!(f, "Every"),
            ShiftDays::Weekday => write!(f, "Weekday"),
            ShiftDays::Weekend => write!(f, "Weekend"),
        }
    }
}

/// Lists the hours in `[start, end)`, wrapping past midnight when `end < start`.
///
/// `start == end` denotes a full 24-hour block. Out-of-range hours yield an
/// empty span.
pub fn span_hours(start: u8, end: u8) -> Vec<u8> {
    if start > 23 || end > 23 {
        return Vec::new();
    }
    if start < end {
        (start..end).collect()
    } else if start > end {
        (start..24).chain(0..end).collect()
    } else {
        (0..24).collect()
    }
}

/// Parses an hour of day from `"7"`, `"07:00"`, `"7.0"` or `"19:30"`.
///
/// Minutes are accepted but dropped. `24` (or `"24:00"`) normalises to 0.
pub fn parse_clock_hour(raw: &str) -> Option<u8> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let hour = match raw.split_once(':') {
        Some((hours, rest)) => {
            let minutes = rest.split(':').next().unwrap_or_default();
            minutes.trim().parse::<u8>().ok().filter(|m| *m < 60)?;
            hours.trim().parse::<u8>().ok()?
        }
        None => Decimal::from_str(raw).ok()?.trunc().to_u8()?,
    };
    match hour {
        0..=23 => Some(hour),
        24 => Some(0),
        _ => None,
    }
}

/// Where a role's shift blocks came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftSource {
    /// The explicit shift table supplied with the inputs.
    #[serde(rename = "Excel")]
    Excel,
    /// The fallback per-role list in the settings file.
    #[serde(rename = "YAML")]
    Yaml,
}

impl fmt::Display for ShiftSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftSource::Excel => write!(f, "Excel"),
            ShiftSource::Yaml => write!(f, "YAML"),
        }
    }
}

/// One row of the explicit shift table.
///
/// Rows without a role apply to every role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTableRow {
    /// Role the block belongs to, if scoped.
    #[serde(default)]
    pub role: Option<String>,
    /// The block itself.
    #[serde(flatten)]
    pub block: ShiftBlock,
}

impl ShiftTableRow {
    /// Returns true if the row applies to the given role.
    pub fn applies_to(&self, role: &str) -> bool {
        match self.role.as_deref().map(str::trim) {
            Some(scoped) if !scoped.is_empty() => scoped == role,
            _ => true,
        }
    }
}

/// Headcount allocated to one shift block for a (date, role, season) group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    /// The calendar date.
    pub date: NaiveDate,
    /// The role.
    pub role: String,
    /// Season label of the demand group.
    pub season: Season,
    /// Shift block label.
    pub shift: String,
    /// Block start hour.
    pub start: u8,
    /// Block end hour.
    pub end: u8,
    /// Block duration in hours.
    pub hours: Decimal,
    /// Staff assigned to the block.
    pub assigned: u32,
    /// Which source supplied the block.
    pub shift_source: ShiftSource,
}

/// Demand consolidated from hourly rows into a shift block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftNeedRecord {
    /// The calendar date.
    pub date: NaiveDate,
    /// The role.
    pub role: String,
    /// Shift block label.
    pub shift: String,
    /// Block start hour.
    pub start: u8,
    /// Block end hour.
    pub end: u8,
    /// Whether the date is a Saturday or Sunday.
    pub weekend: bool,
    /// Sum of hourly staff needed falling in the block.
    pub needed: u32,
}
