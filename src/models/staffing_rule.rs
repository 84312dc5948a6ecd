//! Staffing ratio rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ALL_SHIFTS, Season};

/// Per-season census coverage ratios.
///
/// A ratio of N means one staff member covers N census units. Missing or
/// non-positive ratios make the season unplannable for the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RatioSet {
    /// Ratio used in High season.
    #[serde(default)]
    pub high: Option<Decimal>,
    /// Ratio used in Medium season.
    #[serde(default)]
    pub medium: Option<Decimal>,
    /// Ratio used in Low season.
    #[serde(default)]
    pub low: Option<Decimal>,
}

impl RatioSet {
    /// Creates a ratio set with one ratio per season.
    pub fn seasonal(high: Decimal, medium: Decimal, low: Decimal) -> Self {
        Self {
            high: Some(high),
            medium: Some(medium),
            low: Some(low),
        }
    }

    /// Creates a ratio set that applies the same ratio in every season.
    pub fn uniform(ratio: Decimal) -> Self {
        Self::seasonal(ratio, ratio, ratio)
    }

    /// Returns the ratio column selected by the season label.
    pub fn for_season(&self, season: Season) -> Option<Decimal> {
        match season {
            Season::High => self.high,
            Season::Medium => self.medium,
            Season::Low => self.low,
        }
    }
}

/// A staffing rule for one (department, role, shift).
///
/// # Example
///
/// ```
/// use staffing_engine::models::{RatioSet, Season, StaffingRule};
/// use rust_decimal::Decimal;
///
/// let rule = StaffingRule::role_only("RN", Decimal::new(4, 0));
/// assert_eq!(rule.shift, "All");
/// assert_eq!(rule.ratios.for_season(Season::High), Some(Decimal::new(4, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingRule {
    /// Department the rule applies to; empty for role-only rules.
    #[serde(default)]
    pub department: String,
    /// Role the rule staffs.
    pub role: String,
    /// Shift the rule applies to; `All` for role-only rules.
    #[serde(default = "default_shift")]
    pub shift: String,
    /// The ratios per season.
    pub ratios: RatioSet,
}

fn default_shift() -> String {
    ALL_SHIFTS.to_string()
}

impl StaffingRule {
    /// Creates a fully specified rule.
    pub fn new(
        department: impl Into<String>,
        role: impl Into<String>,
        shift: impl Into<String>,
        ratios: RatioSet,
    ) -> Self {
        Self {
            department: department.into(),
            role: role.into(),
            shift: shift.into(),
            ratios,
        }
    }

    /// Creates a simplified {Role, Ratio} rule used in every season.
    pub fn role_only(role: impl Into<String>, ratio: Decimal) -> Self {
        Self::new("", role, ALL_SHIFTS, RatioSet::uniform(ratio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_season_selects_matching_column() {
        let ratios = RatioSet::seasonal(Decimal::new(4, 0), Decimal::new(5, 0), Decimal::new(6, 0));
        assert_eq!(ratios.for_season(Season::High), Some(Decimal::new(4, 0)));
        assert_eq!(ratios.for_season(Season::Medium), Some(Decimal::new(5, 0)));
        assert_eq!(ratios.for_season(Season::Low), Some(Decimal::new(6, 0)));
    }

    #[test]
    fn test_missing_column_is_none() {
        let ratios = RatioSet {
            high: Some(Decimal::new(4, 0)),
            ..RatioSet::default()
        };
        assert_eq!(ratios.for_season(Season::Low), None);
    }

    #[test]
    fn test_rule_deserializes_with_defaults() {
        let json = r#"{"role": "NA", "ratios": {"medium": "7"}}"#;
        let rule: StaffingRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.department, "");
        assert_eq!(rule.shift, ALL_SHIFTS);
        assert_eq!(rule.ratios.medium, Some(Decimal::new(7, 0)));
        assert_eq!(rule.ratios.high, None);
    }
}
