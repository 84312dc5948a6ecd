//! Report tables derived from the schedule and the comparison.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::models::{
    ComparisonRecord, DailyBalance, DemandRecord, DroppedRows, RunSummary, ScheduleRecord,
    Season, SeasonSummaryRow,
};

/// Sums assigned staff per (season, role, shift).
pub fn season_summary(schedule: &[ScheduleRecord]) -> Vec<SeasonSummaryRow> {
    let mut totals: BTreeMap<(Season, &str, &str), u64> = BTreeMap::new();
    for record in schedule {
        *totals
            .entry((record.season, record.role.as_str(), record.shift.as_str()))
            .or_insert(0) += u64::from(record.assigned);
    }

    totals
        .into_iter()
        .map(|((season, role, shift), assigned)| SeasonSummaryRow {
            season,
            role: role.to_string(),
            shift: shift.to_string(),
            assigned,
        })
        .collect()
}

/// Sums shortage and surplus per date.
pub fn daily_balance(comparison: &[ComparisonRecord]) -> Vec<DailyBalance> {
    let mut totals: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for record in comparison {
        let (shortage, surplus) = totals
            .entry(record.date)
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        *shortage += record.shortage;
        *surplus += record.surplus;
    }

    totals
        .into_iter()
        .map(|(date, (shortage, surplus))| DailyBalance {
            date,
            shortage,
            surplus,
        })
        .collect()
}

/// Inputs to the run summary that do not come from the output tables.
#[derive(Debug, Clone, Default)]
pub struct RunContext<'a> {
    /// Name of the input dataset.
    pub input_name: &'a str,
    /// When the run was started.
    pub run_date: Option<NaiveDateTime>,
    /// Season forced onto every record, if any.
    pub season_override: Option<Season>,
    /// Demand left unallocated for lack of shift blocks.
    pub unallocated_staff: u64,
    /// Rows discarded during ingestion.
    pub dropped_rows: DroppedRows,
}

/// Builds the headline figures for a run.
pub fn run_summary(
    context: &RunContext<'_>,
    plan: &[DemandRecord],
    comparison: &[ComparisonRecord],
    schedule: &[ScheduleRecord],
) -> RunSummary {
    let unique_dates: BTreeSet<NaiveDate> = plan.iter().map(|r| r.date).collect();

    RunSummary {
        input_name: context.input_name.to_string(),
        run_date: context.run_date,
        season_override: context.season_override,
        plan_rows: plan.len(),
        comparison_rows: comparison.len(),
        schedule_rows: schedule.len(),
        total_shortage: comparison.iter().map(|r| r.shortage).sum(),
        total_surplus: comparison.iter().map(|r| r.surplus).sum(),
        total_assigned: schedule.iter().map(|r| u64::from(r.assigned)).sum(),
        unallocated_staff: context.unallocated_staff,
        unique_dates: unique_dates.len(),
        dropped_rows: context.dropped_rows,
    }
}
