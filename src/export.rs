//! Writing planning output to disk.
//!
//! [`write_tables`] writes one CSV file per output table with human-readable
//! headers; [`write_json`] writes the whole [`PlanOutput`] as one document.
//! Output is a pure function of the [`PlanOutput`], so identical runs give
//! byte-identical files.

use std::fs;
use std::path::{Path, PathBuf};

use csv::Writer;
use rust_decimal::Decimal;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::PlanOutput;

/// File names written by [`write_tables`], in write order.
pub const TABLE_FILES: [&str; 8] = [
    "summary.csv",
    "staffing_plan.csv",
    "available_capacity.csv",
    "staffing_vs_resources.csv",
    "staffing_schedule.csv",
    "season_summary.csv",
    "shift_need.csv",
    "daily_balance.csv",
];

/// Formats an hour of day as `HH:00`.
///
/// # Example
///
/// ```
/// use staffing_engine::export::clock;
///
/// assert_eq!(clock(7), "07:00");
/// assert_eq!(clock(19), "19:00");
/// ```
pub fn clock(hour: u8) -> String {
    format!("{:02}:00", hour)
}

fn decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

fn optional_decimal(value: Option<Decimal>) -> String {
    value.map(decimal).unwrap_or_default()
}

/// Writes every output table as CSV into `dir`, creating it if needed.
///
/// Returns the paths written, in [`TABLE_FILES`] order.
///
/// # Errors
///
/// `ExportFailed` naming the first file that could not be written.
pub fn write_tables<P: AsRef<Path>>(dir: P, output: &PlanOutput) -> EngineResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| EngineError::ExportFailed {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;

    let writers: [fn(&mut Writer<fs::File>, &PlanOutput) -> csv::Result<()>; 8] = [
        write_summary,
        write_staffing_plan,
        write_capacity,
        write_comparison,
        write_schedule,
        write_season_summary,
        write_shift_need,
        write_daily_balance,
    ];

    let mut written = Vec::with_capacity(TABLE_FILES.len());
    for (name, write) in TABLE_FILES.iter().zip(writers) {
        let path = dir.join(name);
        write_csv(&path, |w| write(w, output))?;
        written.push(path);
    }

    info!(
        dir = %dir.display(),
        files = written.len(),
        "Output tables written"
    );
    Ok(written)
}

/// Writes the whole output as pretty-printed JSON.
pub fn write_json<P: AsRef<Path>>(path: P, output: &PlanOutput) -> EngineResult<()> {
    let path = path.as_ref();
    let failed = |message: String| EngineError::ExportFailed {
        path: path.display().to_string(),
        message,
    };

    let json = serde_json::to_string_pretty(output).map_err(|e| failed(e.to_string()))?;
    fs::write(path, json).map_err(|e| failed(e.to_string()))?;

    info!(path = %path.display(), "Output JSON written");
    Ok(())
}

fn write_csv<F>(path: &Path, body: F) -> EngineResult<()>
where
    F: FnOnce(&mut Writer<fs::File>) -> csv::Result<()>,
{
    let failed = |message: String| EngineError::ExportFailed {
        path: path.display().to_string(),
        message,
    };

    let mut writer = Writer::from_path(path).map_err(|e| failed(e.to_string()))?;
    body(&mut writer).map_err(|e| failed(e.to_string()))?;
    writer.flush().map_err(|e| failed(e.to_string()))
}

fn write_summary(w: &mut Writer<fs::File>, output: &PlanOutput) -> csv::Result<()> {
    let summary = &output.summary;
    let rows = [
        ("Input", summary.input_name.clone()),
        (
            "Run Date",
            summary
                .run_date
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        ),
        (
            "Season Override",
            summary
                .season_override
                .map(|s| s.to_string())
                .unwrap_or_default(),
        ),
        ("Staffing Plan Rows", summary.plan_rows.to_string()),
        ("Staffing vs Resources Rows", summary.comparison_rows.to_string()),
        ("Staffing Schedule Rows", summary.schedule_rows.to_string()),
        ("Total Shortages", decimal(summary.total_shortage)),
        ("Total Surpluses", decimal(summary.total_surplus)),
        ("Total Assigned", summary.total_assigned.to_string()),
        ("Unallocated Staff", summary.unallocated_staff.to_string()),
        ("Unique Dates", summary.unique_dates.to_string()),
        ("Dropped Census Rows", summary.dropped_rows.census.to_string()),
        ("Dropped Rule Rows", summary.dropped_rows.rules.to_string()),
        ("Dropped Resource Rows", summary.dropped_rows.resources.to_string()),
        ("Dropped Shift Rows", summary.dropped_rows.shifts.to_string()),
    ];

    w.write_record(["Metric", "Value"])?;
    for (metric, value) in rows {
        w.write_record([metric, value.as_str()])?;
    }
    Ok(())
}

fn write_staffing_plan(w: &mut Writer<fs::File>, output: &PlanOutput) -> csv::Result<()> {
    w.write_record([
        "Date",
        "Hour",
        "Department",
        "Role",
        "Shift",
        "Season",
        "Census",
        "Ratio Used",
        "Staff Needed",
    ])?;
    for r in &output.staffing_plan {
        w.write_record([
            r.date.to_string(),
            clock(r.hour),
            r.department.clone(),
            r.role.clone(),
            r.shift.clone(),
            r.season.to_string(),
            decimal(r.census),
            optional_decimal(r.ratio_used),
            r.staff_needed.to_string(),
        ])?;
    }
    Ok(())
}

fn write_capacity(w: &mut Writer<fs::File>, output: &PlanOutput) -> csv::Result<()> {
    w.write_record([
        "Department",
        "Role",
        "Shift",
        "Unit FTE",
        "Leave FTE",
        "Available FTE",
        "Weekday FTE",
        "Weekend FTE",
    ])?;
    for r in &output.available_capacity {
        w.write_record([
            r.department.clone(),
            r.role.clone(),
            r.shift.clone(),
            decimal(r.unit_fte),
            decimal(r.leave_fte),
            decimal(r.available_fte),
            decimal(r.weekday_fte),
            decimal(r.weekend_fte),
        ])?;
    }
    Ok(())
}

fn write_comparison(w: &mut Writer<fs::File>, output: &PlanOutput) -> csv::Result<()> {
    w.write_record([
        "Date",
        "Hour",
        "Department",
        "Role",
        "Shift",
        "Needed",
        "Available FTE",
        "Gap",
        "Shortage",
        "Surplus",
        "Capacity Match",
    ])?;
    for r in &output.staffing_vs_resources {
        w.write_record([
            r.date.to_string(),
            clock(r.hour),
            r.department.clone(),
            r.role.clone(),
            r.shift.clone(),
            r.needed.to_string(),
            decimal(r.available_fte),
            decimal(r.gap),
            decimal(r.shortage),
            decimal(r.surplus),
            r.capacity_match.as_str().to_string(),
        ])?;
    }
    Ok(())
}

fn write_schedule(w: &mut Writer<fs::File>, output: &PlanOutput) -> csv::Result<()> {
    w.write_record([
        "Date",
        "Role",
        "Season",
        "Shift",
        "Start",
        "End",
        "Hours",
        "Assigned",
        "Shift Source",
    ])?;
    for r in &output.staffing_schedule {
        w.write_record([
            r.date.to_string(),
            r.role.clone(),
            r.season.to_string(),
            r.shift.clone(),
            clock(r.start),
            clock(r.end),
            decimal(r.hours),
            r.assigned.to_string(),
            r.shift_source.to_string(),
        ])?;
    }
    Ok(())
}

fn write_season_summary(w: &mut Writer<fs::File>, output: &PlanOutput) -> csv::Result<()> {
    w.write_record(["Season", "Role", "Shift", "Assigned"])?;
    for r in &output.season_summary {
        w.write_record([
            r.season.to_string(),
            r.role.clone(),
            r.shift.clone(),
            r.assigned.to_string(),
        ])?;
    }
    Ok(())
}

fn write_shift_need(w: &mut Writer<fs::File>, output: &PlanOutput) -> csv::Result<()> {
    w.write_record(["Date", "Weekend", "Role", "Shift", "Start", "End", "Needed"])?;
    for r in &output.shift_need {
        w.write_record([
            r.date.to_string(),
            if r.weekend { "Yes" } else { "No" }.to_string(),
            r.role.clone(),
            r.shift.clone(),
            clock(r.start),
            clock(r.end),
            r.needed.to_string(),
        ])?;
    }
    Ok(())
}

fn write_daily_balance(w: &mut Writer<fs::File>, output: &PlanOutput) -> csv::Result<()> {
    w.write_record(["Date", "Shortage", "Surplus"])?;
    for r in &output.daily_balance {
        w.write_record([r.date.to_string(), decimal(r.shortage), decimal(r.surplus)])?;
    }
    Ok(())
}
