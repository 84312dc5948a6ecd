//! Capacity aggregation and demand-versus-capacity reconciliation.
//!
//! Resources are summed into (department, role, shift) buckets, with blank
//! shifts pooled under `All` and planned leave taken off each person's FTE.
//! Each demand slot then looks up its exact bucket, falls back to the
//! department's `All` bucket for the role, and finally to zero capacity.
//! Slots with no department match on role alone, summed over departments.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    ALL_SHIFTS, CapacityAggregate, CapacityMatch, ComparisonRecord, DemandRecord, ResourceRecord,
    split_week,
};

#[derive(Default)]
struct Bucket {
    unit_fte: Decimal,
    available_fte: Decimal,
}

/// Sums resource FTE per (department, role, shift).
///
/// Leave is measured against a cycle of `planning_weeks`. Output is ordered
/// by department, role and shift.
///
/// # Example
///
/// ```
/// use staffing_engine::models::ResourceRecord;
/// use staffing_engine::planning::build_capacity;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let float = ResourceRecord {
///     department: "4 West".to_string(),
///     role: "RN".to_string(),
///     name: "Float pool".to_string(),
///     fte: Decimal::new(8, 0),
///     shift: None,
///     start: None,
///     end: None,
///     leave_start: NaiveDate::from_ymd_opt(2025, 3, 3),
///     leave_end: NaiveDate::from_ymd_opt(2025, 3, 23),
/// };
///
/// let capacity = build_capacity(&[float], 6);
/// assert_eq!(capacity[0].shift, "All");
/// assert_eq!(capacity[0].unit_fte, Decimal::new(8, 0));
/// assert_eq!(capacity[0].available_fte, Decimal::new(4, 0));
/// ```
pub fn build_capacity(
    resources: &[ResourceRecord],
    planning_weeks: u32,
) -> Vec<CapacityAggregate> {
    let mut buckets: BTreeMap<(String, String, String), Bucket> = BTreeMap::new();

    for resource in resources {
        let key = (
            resource.department.trim().to_string(),
            resource.role.trim().to_string(),
            resource.shift_bucket().to_string(),
        );
        let bucket = buckets.entry(key).or_default();
        bucket.unit_fte += resource.fte;
        bucket.available_fte += resource.available_fte(planning_weeks);
    }

    buckets
        .into_iter()
        .map(|((department, role, shift), bucket)| {
            let (weekday_fte, weekend_fte) = split_week(bucket.available_fte);
            CapacityAggregate {
                department,
                role,
                shift,
                unit_fte: bucket.unit_fte,
                available_fte: bucket.available_fte,
                weekday_fte,
                weekend_fte,
                leave_fte: bucket.unit_fte - bucket.available_fte,
            }
        })
        .collect()
}

/// Lookup table over capacity aggregates with the `All` fallback.
#[derive(Debug, Clone, Default)]
pub struct CapacityIndex {
    buckets: HashMap<(String, String, String), Decimal>,
    by_role: HashMap<(String, String), Decimal>,
}

impl CapacityIndex {
    /// Indexes a set of capacity aggregates.
    pub fn new(capacity: &[CapacityAggregate]) -> Self {
        let mut index = Self::default();
        for c in capacity {
            let department = c.department.trim().to_string();
            let role = c.role.trim().to_string();
            let shift = c.shift.trim().to_string();

            *index
                .by_role
                .entry((role.clone(), shift.clone()))
                .or_insert(Decimal::ZERO) += c.available_fte;
            *index
                .buckets
                .entry((department, role, shift))
                .or_insert(Decimal::ZERO) += c.available_fte;
        }
        index
    }

    fn get(&self, department: &str, role: &str, shift: &str) -> Option<Decimal> {
        if department.is_empty() {
            return self
                .by_role
                .get(&(role.to_string(), shift.to_string()))
                .copied();
        }
        self.buckets
            .get(&(department.to_string(), role.to_string(), shift.to_string()))
            .copied()
    }

    /// Resolves available FTE for a slot: exact bucket, then `All`, then zero.
    ///
    /// Keys are compared trimmed. A blank department matches the role in
    /// every department.
    pub fn lookup(&self, department: &str, role: &str, shift: &str) -> (Decimal, CapacityMatch) {
        let (department, role, shift) = (department.trim(), role.trim(), shift.trim());

        if let Some(fte) = self.get(department, role, shift) {
            return (fte, CapacityMatch::Exact);
        }
        if let Some(fte) = self.get(department, role, ALL_SHIFTS) {
            return (fte, CapacityMatch::AllShifts);
        }
        (Decimal::ZERO, CapacityMatch::None)
    }
}

/// Builds one comparison record from a slot's demand and capacity.
///
/// Gap, shortage and surplus are each computed from `needed` and
/// `available_fte` directly, never from one another.
pub fn compare_slot(
    date: NaiveDate,
    hour: u8,
    department: &str,
    role: &str,
    shift: &str,
    needed: u32,
    index: &CapacityIndex,
) -> ComparisonRecord {
    let (available_fte, capacity_match) = index.lookup(department, role, shift);
    let needed_fte = Decimal::from(needed);

    ComparisonRecord {
        date,
        hour,
        department: department.to_string(),
        role: role.to_string(),
        shift: shift.to_string(),
        needed,
        available_fte,
        gap: available_fte - needed_fte,
        shortage: (needed_fte - available_fte).max(Decimal::ZERO),
        surplus: (available_fte - needed_fte).max(Decimal::ZERO),
        capacity_match,
    }
}

/// Compares the staffing plan against available capacity.
///
/// Demand is first summed per (date, hour, department, role, shift); one
/// comparison record is produced per such slot, in key order.
pub fn compare_plan_vs_capacity(
    plan: &[DemandRecord],
    capacity: &[CapacityAggregate],
) -> Vec<ComparisonRecord> {
    let index = CapacityIndex::new(capacity);

    let mut needed: BTreeMap<(NaiveDate, u8, &str, &str, &str), u32> = BTreeMap::new();
    for record in plan {
        let key = (
            record.date,
            record.hour,
            record.department.as_str(),
            record.role.as_str(),
            record.shift.as_str(),
        );
        let slot = needed.entry(key).or_insert(0);
        *slot = slot.saturating_add(record.staff_needed);
    }

    needed
        .into_iter()
        .map(|((date, hour, department, role, shift), needed)| {
            compare_slot(date, hour, department, role, shift, needed, &index)
        })
        .collect()
}
