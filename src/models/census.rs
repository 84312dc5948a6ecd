//! Census records, raw and season-labelled.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Season;

/// A patient count at a point in time.
///
/// `hour` is 0-23; an hour of 0 also stands for a daily aggregate when the
/// source carries no hour column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusRecord {
    /// The calendar date of the observation.
    pub date: NaiveDate,
    /// Hour of day, 0-23.
    #[serde(default)]
    pub hour: u8,
    /// Number of patients (or equivalent unit load).
    pub census: Decimal,
}

impl CensusRecord {
    /// Creates a census record.
    pub fn new(date: NaiveDate, hour: u8, census: Decimal) -> Self {
        Self { date, hour, census }
    }
}

/// A census record with its assigned season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledCensus {
    /// The underlying observation.
    #[serde(flatten)]
    pub record: CensusRecord,
    /// The season that selects the staffing ratio.
    pub season: Season,
    /// Informational multiplier for the season (High 1.1, Medium 1.0, Low 0.9).
    pub season_factor: Decimal,
}
