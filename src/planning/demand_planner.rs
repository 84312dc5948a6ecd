//! Ratio-based staffing demand.
//!
//! Every labelled census record is cross-joined with every staffing rule.
//! The record's season picks the rule's ratio and the headcount is the
//! ceiling of census over ratio.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{EngineError, EngineResult};
use crate::models::{DemandRecord, LabeledCensus, StaffingRule};

/// Computes `ceil(census / ratio)`.
///
/// A missing or non-positive ratio yields 0 rather than an error, as does a
/// non-positive census. Results too large for `u32` saturate.
///
/// # Examples
///
/// ```
/// use staffing_engine::planning::staff_needed;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let ratio = Some(Decimal::new(4, 0));
/// assert_eq!(staff_needed(Decimal::new(10, 0), ratio), 3);
/// assert_eq!(staff_needed(Decimal::new(12, 0), ratio), 3);
/// assert_eq!(staff_needed(Decimal::from_str("12.01").unwrap(), ratio), 4);
/// assert_eq!(staff_needed(Decimal::new(12, 0), Some(Decimal::ZERO)), 0);
/// assert_eq!(staff_needed(Decimal::new(12, 0), None), 0);
/// ```
pub fn staff_needed(census: Decimal, ratio: Option<Decimal>) -> u32 {
    let Some(ratio) = ratio.filter(|r| *r > Decimal::ZERO) else {
        return 0;
    };
    if census <= Decimal::ZERO {
        return 0;
    }

    census
        .checked_div(ratio)
        .and_then(|quotient| quotient.ceil().to_u32())
        .unwrap_or(u32::MAX)
}

/// Checks that every rule carries the role that identifies it.
pub fn validate_rules(rules: &[StaffingRule]) -> EngineResult<()> {
    for (index, rule) in rules.iter().enumerate() {
        if rule.role.trim().is_empty() {
            return Err(EngineError::InvalidStaffingRule {
                index,
                message: "role is empty".to_string(),
            });
        }
        if rule.shift.trim().is_empty() {
            return Err(EngineError::InvalidStaffingRule {
                index,
                message: format!("shift is empty for role '{}'", rule.role),
            });
        }
    }
    Ok(())
}

/// Builds the staffing plan.
///
/// Produces one [`DemandRecord`] per (census record, rule) pair, sorted by
/// date, hour, department, role and shift. Ties keep input order.
///
/// # Errors
///
/// Returns `InvalidStaffingRule` if any rule lacks its role or shift, before
/// any demand is computed.
pub fn build_demand_plan(
    census: &[LabeledCensus],
    rules: &[StaffingRule],
) -> EngineResult<Vec<DemandRecord>> {
    validate_rules(rules)?;

    let mut plan: Vec<DemandRecord> = census
        .iter()
        .flat_map(|labeled| {
            rules.iter().map(move |rule| {
                let ratio_used = rule.ratios.for_season(labeled.season);
                DemandRecord {
                    date: labeled.record.date,
                    hour: labeled.record.hour,
                    department: rule.department.clone(),
                    role: rule.role.clone(),
                    shift: rule.shift.clone(),
                    season: labeled.season,
                    census: labeled.record.census,
                    ratio_used,
                    staff_needed: staff_needed(labeled.record.census, ratio_used),
                }
            })
        })
        .collect();

    plan.sort_by(|a, b| {
        (a.date, a.hour, &a.department, &a.role, &a.shift)
            .cmp(&(b.date, b.hour, &b.department, &b.role, &b.shift))
    });

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CensusRecord, RatioSet, Season};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn labeled(date: &str, hour: u8, census: &str, season: Season) -> LabeledCensus {
        LabeledCensus {
            record: CensusRecord::new(
                NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                hour,
                dec(census),
            ),
            season,
            season_factor: season.factor(),
        }
    }

    fn seasonal_rule(role: &str, high: &str, medium: &str, low: &str) -> StaffingRule {
        StaffingRule::new(
            "4 West",
            role,
            "Day",
            RatioSet::seasonal(dec(high), dec(medium), dec(low)),
        )
    }

    #[test]
    fn test_ceiling_not_rounding() {
        let ratio = Some(dec("4"));
        assert_eq!(staff_needed(dec("10"), ratio), 3);
        assert_eq!(staff_needed(dec("12"), ratio), 3);
        assert_eq!(staff_needed(dec("10.0001"), ratio), 3);
        assert_eq!(staff_needed(dec("12.01"), ratio), 4);
        assert_eq!(staff_needed(dec("0.5"), ratio), 1);
    }

    #[test]
    fn test_exact_decimal_boundaries() {
        assert_eq!(staff_needed(dec("1.1"), Some(dec("0.1"))), 11);
        assert_eq!(staff_needed(dec("0.3"), Some(dec("0.1"))), 3);
    }

    #[test]
    fn test_zero_ratio_safety() {
        assert_eq!(staff_needed(dec("10"), Some(Decimal::ZERO)), 0);
        assert_eq!(staff_needed(dec("10"), Some(dec("-2"))), 0);
        assert_eq!(staff_needed(dec("10"), None), 0);
    }

    #[test]
    fn test_zero_or_negative_census_needs_nobody() {
        assert_eq!(staff_needed(Decimal::ZERO, Some(dec("4"))), 0);
        assert_eq!(staff_needed(dec("-3"), Some(dec("4"))), 0);
    }

    #[test]
    fn test_huge_quotient_saturates() {
        assert_eq!(staff_needed(dec("1000000000000"), Some(dec("0.001"))), u32::MAX);
    }

    #[test]
    fn test_season_selects_ratio_column() {
        let rules = vec![seasonal_rule("RN", "4", "5", "6")];
        let census = vec![
            labeled("2025-07-01", 0, "20", Season::High),
            labeled("2025-03-01", 0, "20", Season::Low),
            labeled("2025-10-01", 0, "20", Season::Medium),
        ];

        let plan = build_demand_plan(&census, &rules).unwrap();
        let needed = |date: &str| {
            plan.iter()
                .find(|r| r.date.to_string() == date)
                .map(|r| (r.ratio_used, r.staff_needed))
                .unwrap()
        };

        assert_eq!(needed("2025-07-01"), (Some(dec("4")), 5));
        assert_eq!(needed("2025-03-01"), (Some(dec("6")), 4));
        assert_eq!(needed("2025-10-01"), (Some(dec("5")), 4));
    }

    #[test]
    fn test_role_only_rule_ignores_season() {
        let rules = vec![StaffingRule::role_only("RN", dec("4"))];
        let census = vec![labeled("2025-07-01", 0, "12", Season::High)];

        let plan = build_demand_plan(&census, &rules).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].staff_needed, 3);
        assert_eq!(plan[0].shift, "All");
    }

    #[test]
    fn test_missing_season_ratio_yields_zero() {
        let rules = vec![StaffingRule::new(
            "4 West",
            "RN",
            "Day",
            RatioSet {
                high: Some(dec("4")),
                ..RatioSet::default()
            },
        )];
        let census = vec![labeled("2025-03-01", 0, "20", Season::Low)];

        let plan = build_demand_plan(&census, &rules).unwrap();
        assert_eq!(plan[0].ratio_used, None);
        assert_eq!(plan[0].staff_needed, 0);
    }

    #[test]
    fn test_cross_join_counts() {
        let rules = vec![
            seasonal_rule("RN", "4", "5", "6"),
            seasonal_rule("NA", "6", "7", "8"),
        ];
        let census = vec![
            labeled("2025-06-01", 0, "10", Season::Medium),
            labeled("2025-06-02", 0, "15", Season::Medium),
        ];

        let plan = build_demand_plan(&census, &rules).unwrap();
        assert_eq!(plan.len(), 4);
    }

    #[test]
    fn test_plan_sorted_by_date_hour_department_role_shift() {
        let rules = vec![
            seasonal_rule("RN", "4", "5", "6"),
            seasonal_rule("NA", "6", "7", "8"),
        ];
        let census = vec![
            labeled("2025-06-02", 3, "10", Season::Medium),
            labeled("2025-06-01", 5, "10", Season::Medium),
            labeled("2025-06-01", 1, "10", Season::Medium),
        ];

        let plan = build_demand_plan(&census, &rules).unwrap();
        let keys: Vec<(String, u8, String)> = plan
            .iter()
            .map(|r| (r.date.to_string(), r.hour, r.role.clone()))
            .collect();

        assert_eq!(
            keys,
            vec![
                ("2025-06-01".to_string(), 1, "NA".to_string()),
                ("2025-06-01".to_string(), 1, "RN".to_string()),
                ("2025-06-01".to_string(), 5, "NA".to_string()),
                ("2025-06-01".to_string(), 5, "RN".to_string()),
                ("2025-06-02".to_string(), 3, "NA".to_string()),
                ("2025-06-02".to_string(), 3, "RN".to_string()),
            ]
        );
    }

    #[test]
    fn test_rule_without_role_fails_fast() {
        let rules = vec![
            seasonal_rule("RN", "4", "5", "6"),
            StaffingRule::new("4 West", "  ", "Day", RatioSet::uniform(dec("4"))),
        ];
        let census = vec![labeled("2025-06-01", 0, "10", Season::Medium)];

        match build_demand_plan(&census, &rules) {
            Err(EngineError::InvalidStaffingRule { index, message }) => {
                assert_eq!(index, 1);
                assert!(message.contains("role"));
            }
            other => panic!("Expected InvalidStaffingRule, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_inputs_produce_empty_plan() {
        assert!(build_demand_plan(&[], &[]).unwrap().is_empty());
        let census = vec![labeled("2025-06-01", 0, "10", Season::Medium)];
        assert!(build_demand_plan(&census, &[]).unwrap().is_empty());
    }
}
