//! Aggregated reports and the complete output of a planning run.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    CapacityAggregate, ComparisonRecord, DemandRecord, ScheduleRecord, Season, ShiftNeedRecord,
};

/// Assigned staff summed per (season, role, shift).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSummaryRow {
    /// The season label.
    pub season: Season,
    /// The role.
    pub role: String,
    /// Shift block label.
    pub shift: String,
    /// Total staff assigned.
    pub assigned: u64,
}

/// Shortage and surplus summed per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBalance {
    /// The calendar date.
    pub date: NaiveDate,
    /// Sum of shortages across the date's comparison rows.
    pub shortage: Decimal,
    /// Sum of surpluses across the date's comparison rows.
    pub surplus: Decimal,
}

/// Input rows discarded during ingestion, per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedRows {
    /// Census rows.
    pub census: usize,
    /// Staffing rule rows.
    pub rules: usize,
    /// Resource rows.
    pub resources: usize,
    /// Shift table rows.
    pub shifts: usize,
}

impl DroppedRows {
    /// Rows dropped across all tables.
    pub fn total(&self) -> usize {
        self.census + self.rules + self.resources + self.shifts
    }
}

/// Run metadata and headline figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Name of the input dataset.
    pub input_name: String,
    /// When the run was started, if the caller recorded it.
    pub run_date: Option<NaiveDateTime>,
    /// Season forced onto every census record, if any.
    pub season_override: Option<Season>,
    /// Rows in the staffing plan.
    pub plan_rows: usize,
    /// Rows in the staffing-versus-resources comparison.
    pub comparison_rows: usize,
    /// Rows in the staffing schedule.
    pub schedule_rows: usize,
    /// Sum of all shortages.
    pub total_shortage: Decimal,
    /// Sum of all surpluses.
    pub total_surplus: Decimal,
    /// Sum of all assigned staff.
    pub total_assigned: u64,
    /// Demand that could not be allocated because its role had no shift blocks.
    pub unallocated_staff: u64,
    /// Number of distinct dates in the plan.
    pub unique_dates: usize,
    /// Input rows discarded before planning.
    #[serde(default)]
    pub dropped_rows: DroppedRows,
}

/// Every table produced by one planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOutput {
    /// Run metadata and KPIs.
    pub summary: RunSummary,
    /// The staffing plan.
    pub staffing_plan: Vec<DemandRecord>,
    /// Available FTE per (department, role, shift), after leave.
    pub available_capacity: Vec<CapacityAggregate>,
    /// Staffing plan against available resources.
    pub staffing_vs_resources: Vec<ComparisonRecord>,
    /// Headcount allocated to shift blocks.
    pub staffing_schedule: Vec<ScheduleRecord>,
    /// Schedule aggregated by season, role and shift.
    pub season_summary: Vec<SeasonSummaryRow>,
    /// Hourly demand consolidated into shift blocks.
    pub shift_need: Vec<ShiftNeedRecord>,
    /// Shortage and surplus per date.
    pub daily_balance: Vec<DailyBalance>,
}
