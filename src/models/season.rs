//! Season labels and the calendar rules that assign them.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Qualitative demand regime that selects which staffing ratio applies.
///
/// # Example
///
/// ```
/// use staffing_engine::models::Season;
///
/// let season: Season = "high".parse().unwrap();
/// assert_eq!(season, Season::High);
/// assert_eq!(season.to_string(), "High");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Season {
    /// Quiet period, covered by the most generous ratio.
    Low,
    /// Default regime for dates no rule claims.
    #[default]
    Medium,
    /// Peak period, covered by the tightest ratio.
    High,
}

impl Season {
    /// All seasons in ascending demand order.
    pub const ALL: [Season; 3] = [Season::Low, Season::Medium, Season::High];

    /// Returns the informational demand multiplier for this season.
    ///
    /// The factor is reported alongside the label but never feeds ratio
    /// selection; the label alone picks the ratio column.
    pub fn factor(self) -> Decimal {
        match self {
            Season::High => Decimal::new(11, 1),
            Season::Medium => Decimal::ONE,
            Season::Low => Decimal::new(9, 1),
        }
    }

    /// Returns the canonical label.
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Low => "Low",
            Season::Medium => "Medium",
            Season::High => "High",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Season::Low),
            "medium" => Ok(Season::Medium),
            "high" => Ok(Season::High),
            _ => Err(EngineError::UnknownSeason {
                label: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Season {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Season> for String {
    fn from(season: Season) -> Self {
        season.as_str().to_string()
    }
}

/// A calendar rule mapping (month, weekday) combinations to a season.
///
/// Rules are evaluated in order and the first match wins. Weekdays are
/// numbered from Monday = 0 to Sunday = 6.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRule {
    /// Month numbers 1-12 this rule covers.
    pub months: BTreeSet<u32>,
    /// Weekday indices 0-6 this rule covers.
    pub weekdays: BTreeSet<u32>,
    /// The season assigned on a match.
    pub season: Season,
}

impl SeasonRule {
    /// Returns true if the rule covers the given month and weekday.
    pub fn matches(&self, month: u32, weekday: u32) -> bool {
        self.months.contains(&month) && self.weekdays.contains(&weekday)
    }
}
