//! Season labelling of census records.
//!
//! Each census date is matched against the ordered season rules by month
//! number and weekday index (Monday = 0). The first matching rule decides
//! the label; dates no rule claims fall back to Medium.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{CensusRecord, LabeledCensus, Season, SeasonRule};

/// Returns the season the rules assign to a date.
///
/// # Example
///
/// ```
/// use staffing_engine::models::{Season, SeasonRule};
/// use staffing_engine::planning::season_for_date;
/// use chrono::NaiveDate;
///
/// let rules = vec![SeasonRule {
///     months: [7].into_iter().collect(),
///     weekdays: (0..7).collect(),
///     season: Season::High,
/// }];
///
/// let july = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
/// let march = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// assert_eq!(season_for_date(&rules, july), Season::High);
/// assert_eq!(season_for_date(&rules, march), Season::Medium);
/// ```
pub fn season_for_date(rules: &[SeasonRule], date: NaiveDate) -> Season {
    let month = date.month();
    let weekday = date.weekday().num_days_from_monday();

    rules
        .iter()
        .find(|rule| rule.matches(month, weekday))
        .map(|rule| rule.season)
        .unwrap_or_default()
}

/// Labels one census record, returning its season and factor.
pub fn label_season(rules: &[SeasonRule], record: &CensusRecord) -> (Season, Decimal) {
    let season = season_for_date(rules, record.date);
    (season, season.factor())
}

/// Labels every census record.
///
/// With `season_override` set, every record receives that season and the
/// rules are not consulted.
pub fn label_census(
    rules: &[SeasonRule],
    census: &[CensusRecord],
    season_override: Option<Season>,
) -> Vec<LabeledCensus> {
    census
        .iter()
        .map(|record| {
            let season = season_override.unwrap_or_else(|| season_for_date(rules, record.date));
            LabeledCensus {
                record: record.clone(),
                season,
                season_factor: season.factor(),
            }
        })
        .collect()
}
