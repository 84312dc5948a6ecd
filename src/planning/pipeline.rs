//! End-to-end planning run.
//!
//! Census and rules flow through the labeler and demand planner; the plan is
//! then reconciled against resources and, independently, allocated onto
//! shift blocks. The run is pure: identical inputs give identical output.

use std::time::Instant;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::PlannerConfig;
use crate::error::EngineResult;
use crate::models::{
    CensusRecord, DroppedRows, PlanOutput, ResourceRecord, Season, ShiftTableRow, StaffingRule,
};

use super::capacity::{build_capacity, compare_plan_vs_capacity};
use super::demand_planner::build_demand_plan;
use super::season_labeler::label_census;
use super::shift_allocator::{ShiftResolver, assign_staff_to_shifts};
use super::shift_coverage::consolidate_to_shifts;
use super::summary::{RunContext, daily_balance, run_summary, season_summary};

/// The typed tables one run consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanInputs {
    /// Census observations.
    pub census: Vec<CensusRecord>,
    /// Staffing ratios.
    pub rules: Vec<StaffingRule>,
    /// Available staff.
    #[serde(default)]
    pub resources: Vec<ResourceRecord>,
    /// Explicit shift blocks; empty means use the configured fallback.
    #[serde(default)]
    pub shift_table: Vec<ShiftTableRow>,
}

/// Per-run settings that are not part of the input tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanOptions {
    /// Forces one season onto every census record.
    pub season_override: Option<Season>,
    /// Name recorded in the run summary.
    pub input_name: String,
    /// Timestamp recorded in the run summary.
    pub run_date: Option<NaiveDateTime>,
    /// Rows the caller discarded while reading the inputs.
    pub dropped_rows: DroppedRows,
}

/// Runs the whole planning pipeline.
///
/// # Errors
///
/// Fails with `InvalidStaffingRule` before producing anything if a rule lacks
/// its identifying fields.
///
/// # Example
///
/// ```
/// use staffing_engine::config::PlannerConfig;
/// use staffing_engine::models::{CensusRecord, StaffingRule};
/// use staffing_engine::planning::{PlanInputs, PlanOptions, run_pipeline};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let inputs = PlanInputs {
///     census: vec![CensusRecord::new(date, 0, Decimal::new(10, 0))],
///     rules: vec![StaffingRule::role_only("RN", Decimal::new(4, 0))],
///     ..PlanInputs::default()
/// };
///
/// let output = run_pipeline(&inputs, &PlannerConfig::default(), &PlanOptions::default())?;
/// assert_eq!(output.staffing_plan[0].staff_needed, 3);
/// # Ok::<(), staffing_engine::error::EngineError>(())
/// ```
pub fn run_pipeline(
    inputs: &PlanInputs,
    config: &PlannerConfig,
    options: &PlanOptions,
) -> EngineResult<PlanOutput> {
    let start_time = Instant::now();

    let labeled = label_census(config.season_rules(), &inputs.census, options.season_override);
    let staffing_plan = build_demand_plan(&labeled, &inputs.rules)?;

    let capacity = build_capacity(&inputs.resources, config.planning_weeks());
    let staffing_vs_resources = compare_plan_vs_capacity(&staffing_plan, &capacity);

    let resolver = ShiftResolver::new(&inputs.shift_table, config);
    let allocation = assign_staff_to_shifts(&staffing_plan, &resolver);
    let shift_need = consolidate_to_shifts(&staffing_plan, &resolver);

    let context = RunContext {
        input_name: &options.input_name,
        run_date: options.run_date,
        season_override: options.season_override,
        unallocated_staff: allocation.unallocated_staff,
        dropped_rows: options.dropped_rows,
    };
    let summary = run_summary(
        &context,
        &staffing_plan,
        &staffing_vs_resources,
        &allocation.schedule,
    );

    info!(
        input = %options.input_name,
        plan_rows = summary.plan_rows,
        comparison_rows = summary.comparison_rows,
        schedule_rows = summary.schedule_rows,
        total_shortage = %summary.total_shortage,
        unallocated_staff = summary.unallocated_staff,
        duration_us = start_time.elapsed().as_micros(),
        "Planning run completed"
    );

    Ok(PlanOutput {
        summary,
        season_summary: season_summary(&allocation.schedule),
        daily_balance: daily_balance(&staffing_vs_resources),
        available_capacity: capacity,
        staffing_plan,
        staffing_vs_resources,
        staffing_schedule: allocation.schedule,
        shift_need,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{RatioSet, SeasonRule, ShiftBlock, ShiftSource};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn config() -> PlannerConfig {
        let seasons = vec![SeasonRule {
            months: [12, 1, 2].into_iter().collect(),
            weekdays: (0..7).collect(),
            season: Season::High,
        }];
        let mut shifts = BTreeMap::new();
        shifts.insert(
            "RN".to_string(),
            vec![ShiftBlock::new("Day", 7, 19), ShiftBlock::new("Night", 19, 7)],
        );
        PlannerConfig::new(seasons, shifts)
    }

    fn inputs() -> PlanInputs {
        PlanInputs {
            census: vec![
                CensusRecord::new(make_date("2025-01-06"), 8, Decimal::new(20, 0)),
                CensusRecord::new(make_date("2025-01-06"), 20, Decimal::new(14, 0)),
                CensusRecord::new(make_date("2025-06-02"), 8, Decimal::new(20, 0)),
            ],
            rules: vec![StaffingRule::new(
                "4 West",
                "RN",
                "Day",
                RatioSet::seasonal(Decimal::new(4, 0), Decimal::new(5, 0), Decimal::new(6, 0)),
            )],
            resources: vec![ResourceRecord {
                department: "4 West".to_string(),
                role: "RN".to_string(),
                name: "Float".to_string(),
                fte: Decimal::new(4, 0),
                shift: None,
                start: None,
                end: None,
                leave_start: None,
                leave_end: None,
            }],
            shift_table: Vec::new(),
        }
    }

    #[test]
    fn test_pipeline_produces_every_table() {
        let output = run_pipeline(&inputs(), &config(), &PlanOptions::default()).unwrap();

        assert_eq!(output.staffing_plan.len(), 3);
        assert_eq!(output.staffing_vs_resources.len(), 3);
        assert!(!output.staffing_schedule.is_empty());
        assert!(!output.season_summary.is_empty());
        assert_eq!(output.daily_balance.len(), 2);
        assert_eq!(output.summary.unique_dates, 2);
    }

    #[test]
    fn test_january_uses_high_ratio() {
        let output = run_pipeline(&inputs(), &config(), &PlanOptions::default()).unwrap();
        let january = &output.staffing_plan[0];
        assert_eq!(january.season, Season::High);
        assert_eq!(january.staff_needed, 5);
    }

    #[test]
    fn test_schedule_conserves_group_demand() {
        let output = run_pipeline(&inputs(), &config(), &PlanOptions::default()).unwrap();
        // January: ceil(20/4) + ceil(14/4) = 5 + 4
        let january: u32 = output
            .staffing_schedule
            .iter()
            .filter(|r| r.date == make_date("2025-01-06"))
            .map(|r| r.assigned)
            .sum();
        assert_eq!(january, 9);
        assert!(output
            .staffing_schedule
            .iter()
            .all(|r| r.shift_source == ShiftSource::Yaml));
    }

    #[test]
    fn test_season_override_applies_everywhere() {
        let options = PlanOptions {
            season_override: Some(Season::Low),
            ..PlanOptions::default()
        };
        let output = run_pipeline(&inputs(), &config(), &options).unwrap();
        assert!(output.staffing_plan.iter().all(|r| r.season == Season::Low));
        assert_eq!(output.summary.season_override, Some(Season::Low));
    }

    #[test]
    fn test_invalid_rule_aborts_run() {
        let mut bad = inputs();
        bad.rules.push(StaffingRule::new("4 West", "", "Day", RatioSet::default()));
        assert!(matches!(
            run_pipeline(&bad, &config(), &PlanOptions::default()),
            Err(EngineError::InvalidStaffingRule { index: 1, .. })
        ));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let options = PlanOptions {
            input_name: "census.csv".to_string(),
            ..PlanOptions::default()
        };
        let first = run_pipeline(&inputs(), &config(), &options).unwrap();
        let second = run_pipeline(&inputs(), &config(), &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_inputs_give_empty_tables() {
        let output =
            run_pipeline(&PlanInputs::default(), &config(), &PlanOptions::default()).unwrap();
        assert!(output.staffing_plan.is_empty());
        assert!(output.staffing_schedule.is_empty());
        assert_eq!(output.summary.total_assigned, 0);
    }

    #[test]
    fn test_simplified_rules_match_capacity_by_role() {
        let mut simple = inputs();
        simple.rules = vec![StaffingRule::role_only("RN", Decimal::new(4, 0))];

        let output = run_pipeline(&simple, &config(), &PlanOptions::default()).unwrap();
        let row = &output.staffing_vs_resources[0];
        assert_eq!(row.department, "");
        assert_eq!(row.shift, "All");
        assert_eq!(row.available_fte, Decimal::new(4, 0));
        assert_eq!(row.capacity_match, crate::models::CapacityMatch::Exact);
    }

    #[test]
    fn test_leave_cycle_comes_from_config() {
        let mut on_leave = inputs();
        on_leave.resources[0].leave_start = Some(make_date("2025-01-06"));
        on_leave.resources[0].leave_end = Some(make_date("2025-01-12"));

        let config = config().with_planning_weeks(2);
        let output = run_pipeline(&on_leave, &config, &PlanOptions::default()).unwrap();
        assert_eq!(output.available_capacity.len(), 1);
        assert_eq!(output.available_capacity[0].available_fte, Decimal::new(2, 0));
        assert_eq!(output.staffing_vs_resources[0].available_fte, Decimal::new(2, 0));
    }

    #[test]
    fn test_dropped_rows_reach_summary() {
        let options = PlanOptions {
            dropped_rows: DroppedRows {
                census: 3,
                ..DroppedRows::default()
            },
            ..PlanOptions::default()
        };
        let output = run_pipeline(&inputs(), &config(), &options).unwrap();
        assert_eq!(output.summary.dropped_rows.census, 3);
    }
}
