//! Configuration types for staffing plans.
//!
//! This module contains the structures deserialized from the YAML settings
//! file and the validated [`PlannerConfig`] built from them.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{SeasonRule, ShiftBlock, ShiftDays, parse_clock_hour};

/// An hour of day as written in the settings file.
///
/// Both `7` and `"07:00"` are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClockHour {
    /// A bare hour number.
    Number(i64),
    /// A clock string such as `"19:00"`.
    Text(String),
}

impl ClockHour {
    /// Returns the hour of day, or `None` if it is out of range or unparsable.
    pub fn resolve(&self) -> Option<u8> {
        match self {
            ClockHour::Number(n) => parse_clock_hour(&n.to_string()),
            ClockHour::Text(s) => parse_clock_hour(s),
        }
    }
}

impl std::fmt::Display for ClockHour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockHour::Number(n) => write!(f, "{}", n),
            ClockHour::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A fallback shift block for one role.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShiftBlockConfig {
    /// Label of the shift.
    pub name: String,
    /// Start of the block.
    pub start: ClockHour,
    /// End of the block (exclusive).
    pub end: ClockHour,
    /// Explicit duration; defaults to the span of start/end.
    #[serde(default)]
    pub hours: Option<Decimal>,
    /// Days the block is worked; defaults to every day.
    #[serde(default)]
    pub days: ShiftDays,
}

/// Default length of the leave planning cycle, in weeks.
pub const DEFAULT_PLANNING_WEEKS: u32 = 6;

fn default_planning_weeks() -> u32 {
    DEFAULT_PLANNING_WEEKS
}

/// The settings file as written.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsFile {
    /// Weeks in the cycle that leave is measured against.
    #[serde(default = "default_planning_weeks")]
    pub planning_weeks: u32,
    /// Ordered season rules; the first match wins.
    #[serde(default)]
    pub seasons: Vec<SeasonRule>,
    /// Fallback shift blocks keyed by role.
    #[serde(default)]
    pub shifts: BTreeMap<String, Vec<ShiftBlockConfig>>,
}

/// Validated planning configuration.
///
/// Passed explicitly into the pipeline; nothing reads settings from a
/// global location.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Season rules in evaluation order.
    season_rules: Vec<SeasonRule>,
    /// Fallback shift blocks per role, in configured order.
    shifts: BTreeMap<String, Vec<ShiftBlock>>,
    /// Leave cycle length in weeks.
    planning_weeks: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new(Vec::new(), BTreeMap::new())
    }
}

impl PlannerConfig {
    /// Creates a configuration from already validated parts.
    pub fn new(season_rules: Vec<SeasonRule>, shifts: BTreeMap<String, Vec<ShiftBlock>>) -> Self {
        Self {
            season_rules,
            shifts,
            planning_weeks: DEFAULT_PLANNING_WEEKS,
        }
    }

    /// Sets the leave cycle length.
    pub fn with_planning_weeks(mut self, planning_weeks: u32) -> Self {
        self.planning_weeks = planning_weeks;
        self
    }

    /// Returns the leave cycle length in weeks.
    pub fn planning_weeks(&self) -> u32 {
        self.planning_weeks
    }

    /// Returns the season rules in evaluation order.
    pub fn season_rules(&self) -> &[SeasonRule] {
        &self.season_rules
    }

    /// Returns all fallback shift lists keyed by role.
    pub fn shifts(&self) -> &BTreeMap<String, Vec<ShiftBlock>> {
        &self.shifts
    }

    /// Returns the fallback shift blocks for a role, or an empty slice.
    pub fn shifts_for_role(&self, role: &str) -> &[ShiftBlock] {
        self.shifts.get(role).map(Vec::as_slice).unwrap_or_default()
    }
}
