//! Staff resources, aggregated capacity and demand-versus-capacity comparisons.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shift value marking capacity usable on any shift of its (department, role).
pub const ALL_SHIFTS: &str = "All";

/// One staff member (or position) and the capacity they bring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// The department the resource belongs to.
    pub department: String,
    /// The role the resource fills.
    pub role: String,
    /// Name of the person or position.
    #[serde(default)]
    pub name: String,
    /// Full-time-equivalent capacity.
    pub fte: Decimal,
    /// Assigned shift; `None` or blank means usable on any shift.
    #[serde(default)]
    pub shift: Option<String>,
    /// Optional start hour of the assigned shift.
    #[serde(default)]
    pub start: Option<u8>,
    /// Optional end hour of the assigned shift.
    #[serde(default)]
    pub end: Option<u8>,
    /// First day of planned leave, inclusive.
    #[serde(default)]
    pub leave_start: Option<NaiveDate>,
    /// Last day of planned leave, inclusive.
    #[serde(default)]
    pub leave_end: Option<NaiveDate>,
}

impl ResourceRecord {
    /// Returns the shift bucket this resource counts toward.
    ///
    /// Blank or missing shifts normalise to [`ALL_SHIFTS`].
    pub fn shift_bucket(&self) -> &str {
        match self.shift.as_deref().map(str::trim) {
            Some(shift) if !shift.is_empty() => shift,
            _ => ALL_SHIFTS,
        }
    }

    /// Share of a `planning_weeks` cycle spent on leave, capped at 1.
    ///
    /// Missing dates, an end before the start, or a zero-week cycle mean no
    /// leave.
    pub fn leave_fraction(&self, planning_weeks: u32) -> Decimal {
        let (Some(start), Some(end)) = (self.leave_start, self.leave_end) else {
            return Decimal::ZERO;
        };
        if end < start || planning_weeks == 0 {
            return Decimal::ZERO;
        }

        let days = Decimal::from((end - start).num_days() + 1);
        let cycle = Decimal::from(planning_weeks) * Decimal::from(DAYS_PER_WEEK);
        (days / cycle).min(Decimal::ONE)
    }

    /// FTE left after leave over a `planning_weeks` cycle.
    pub fn available_fte(&self, planning_weeks: u32) -> Decimal {
        self.fte * (Decimal::ONE - self.leave_fraction(planning_weeks))
    }
}

const DAYS_PER_WEEK: u32 = 7;

/// Places kept on the weekday/weekend capacity split.
const SPLIT_DP: u32 = 4;

/// Splits an FTE figure into its weekday (5/7) and weekend (2/7) shares.
pub fn split_week(fte: Decimal) -> (Decimal, Decimal) {
    let week = Decimal::from(DAYS_PER_WEEK);
    (
        (fte * Decimal::from(5) / week).round_dp(SPLIT_DP),
        (fte * Decimal::from(2) / week).round_dp(SPLIT_DP),
    )
}

/// Summed FTE for one (department, role, shift) bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityAggregate {
    /// The department.
    pub department: String,
    /// The role.
    pub role: String,
    /// The shift, or [`ALL_SHIFTS`] for float capacity.
    pub shift: String,
    /// Sum of FTE over the matching resources before leave.
    pub unit_fte: Decimal,
    /// Sum of FTE after leave; this is what demand is compared against.
    pub available_fte: Decimal,
    /// Weekday share (5/7) of the available FTE.
    pub weekday_fte: Decimal,
    /// Weekend share (2/7) of the available FTE.
    pub weekend_fte: Decimal,
    /// FTE lost to leave.
    pub leave_fte: Decimal,
}

/// Which tier of the capacity lookup produced a comparison's FTE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityMatch {
    /// The (department, role, shift) bucket itself.
    Exact,
    /// The (department, role, All) float bucket.
    AllShifts,
    /// Nothing matched; capacity is zero.
    None,
}

impl CapacityMatch {
    /// Returns a short label for reports.
    pub fn as_str(self) -> &'static str {
        match self {
            CapacityMatch::Exact => "Exact",
            CapacityMatch::AllShifts => "All",
            CapacityMatch::None => "None",
        }
    }
}

/// Needed headcount against available FTE for one demand slot.
///
/// `gap == surplus - shortage` and at most one of shortage/surplus is positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    /// The calendar date.
    pub date: NaiveDate,
    /// Hour of day, 0-23.
    pub hour: u8,
    /// The department.
    pub department: String,
    /// The role.
    pub role: String,
    /// The shift.
    pub shift: String,
    /// Total staff needed in the slot.
    pub needed: u32,
    /// FTE available to cover it.
    pub available_fte: Decimal,
    /// `available_fte - needed`.
    pub gap: Decimal,
    /// `max(needed - available_fte, 0)`.
    pub shortage: Decimal,
    /// `max(available_fte - needed, 0)`.
    pub surplus: Decimal,
    /// How the available FTE was found.
    pub capacity_match: CapacityMatch,
}
