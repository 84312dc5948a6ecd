//! Staffing demand records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Season;

/// Required headcount for one census observation under one staffing rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandRecord {
    /// The calendar date of the census observation.
    pub date: NaiveDate,
    /// Hour of day, 0-23.
    pub hour: u8,
    /// Department from the staffing rule.
    pub department: String,
    /// Role from the staffing rule.
    pub role: String,
    /// Shift from the staffing rule.
    pub shift: String,
    /// Season label of the census observation.
    pub season: Season,
    /// The census the demand was computed from.
    pub census: Decimal,
    /// The ratio selected by the season, if the rule defines one.
    pub ratio_used: Option<Decimal>,
    /// `ceil(census / ratio_used)`, or 0 when the ratio is unusable.
    pub staff_needed: u32,
}
