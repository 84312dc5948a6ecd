//! Distribution of aggregate demand across shift blocks.
//!
//! Demand is summed per (date, role, season). Each group's total is then
//! split over the role's shift blocks: every block gets `total / n` and the
//! first `total % n` blocks, in their given order, get one more.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::PlannerConfig;
use crate::models::{DemandRecord, ScheduleRecord, Season, ShiftBlock, ShiftSource, ShiftTableRow};

/// The ordered shift blocks for one role and where they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedShifts<'a> {
    /// Blocks in allocation order.
    pub blocks: Vec<&'a ShiftBlock>,
    /// Source that supplied the blocks.
    pub source: ShiftSource,
}

/// Picks a role's shift blocks from the explicit table or the settings.
///
/// Explicit rows applicable to the role win and are tagged
/// [`ShiftSource::Excel`]. Only when none apply does the configured list for
/// the role get used, tagged [`ShiftSource::Yaml`]. Weekday- and
/// weekend-only blocks are filtered per date by [`ShiftResolver::resolve_on`].
#[derive(Debug, Clone, Copy)]
pub struct ShiftResolver<'a> {
    table: &'a [ShiftTableRow],
    config: &'a PlannerConfig,
}

impl<'a> ShiftResolver<'a> {
    /// Creates a resolver over an explicit shift table and the fallback settings.
    pub fn new(table: &'a [ShiftTableRow], config: &'a PlannerConfig) -> Self {
        Self { table, config }
    }

    /// Returns the role's blocks worked on `date`.
    ///
    /// The source is chosen first; blocks for other day types are then
    /// dropped. `None` if nothing is left.
    pub fn resolve_on(&self, role: &str, date: NaiveDate) -> Option<ResolvedShifts<'a>> {
        let mut resolved = self.resolve(role)?;
        resolved.blocks.retain(|block| block.applies_on(date));
        if resolved.blocks.is_empty() {
            return None;
        }
        Some(resolved)
    }

    /// Returns the role's blocks, or `None` if neither source defines any.
    pub fn resolve(&self, role: &str) -> Option<ResolvedShifts<'a>> {
        let explicit: Vec<&'a ShiftBlock> = self
            .table
            .iter()
            .filter(|row| row.applies_to(role))
            .map(|row| &row.block)
            .collect();
        if !explicit.is_empty() {
            return Some(ResolvedShifts {
                blocks: explicit,
                source: ShiftSource::Excel,
            });
        }

        let configured = self.config.shifts_for_role(role);
        if configured.is_empty() {
            return None;
        }
        Some(ResolvedShifts {
            blocks: configured.iter().collect(),
            source: ShiftSource::Yaml,
        })
    }
}

/// Splits `total` into `slots` integer parts that sum to `total`.
///
/// The first `total % slots` parts are one larger than the rest. Zero slots
/// yields an empty vector.
///
/// # Example
///
/// ```
/// use staffing_engine::planning::distribute;
///
/// assert_eq!(distribute(5, 2), vec![3, 2]);
/// assert_eq!(distribute(4, 2), vec![2, 2]);
/// assert_eq!(distribute(7, 3), vec![3, 2, 2]);
/// ```
pub fn distribute(total: u32, slots: usize) -> Vec<u32> {
    let Ok(n) = u32::try_from(slots) else {
        // More slots than staff can ever fill: one each to the first `total`.
        return (0..slots)
            .map(|i| u32::from((i as u64) < u64::from(total)))
            .collect();
    };
    if n == 0 {
        return Vec::new();
    }

    let base = total / n;
    let remainder = total % n;
    (0..n).map(|i| base + u32::from(i < remainder)).collect()
}

/// The schedule plus the demand that could not be placed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Allocation {
    /// One record per (group, shift block), ordered by date, role, season
    /// and then block order.
    pub schedule: Vec<ScheduleRecord>,
    /// Staff needed in groups whose role has no shift blocks.
    pub unallocated_staff: u64,
}

/// Sums staff needed per (date, role, season).
pub fn group_demand(plan: &[DemandRecord]) -> BTreeMap<(NaiveDate, &str, Season), u32> {
    let mut groups: BTreeMap<(NaiveDate, &str, Season), u32> = BTreeMap::new();
    for record in plan {
        let total = groups
            .entry((record.date, record.role.as_str(), record.season))
            .or_insert(0);
        *total = total.saturating_add(record.staff_needed);
    }
    groups
}

/// Allocates the plan's demand onto shift blocks.
///
/// Groups with zero demand produce nothing. Groups whose role has no blocks
/// are skipped with a warning and counted in
/// [`Allocation::unallocated_staff`].
pub fn assign_staff_to_shifts(plan: &[DemandRecord], resolver: &ShiftResolver<'_>) -> Allocation {
    let mut allocation = Allocation::default();

    for ((date, role, season), total) in group_demand(plan) {
        if total == 0 {
            continue;
        }

        let Some(resolved) = resolver.resolve_on(role, date) else {
            warn!(
                date = %date,
                role = %role,
                season = %season,
                staff_needed = total,
                "No shift blocks defined for role; demand left unallocated"
            );
            allocation.unallocated_staff += u64::from(total);
            continue;
        };

        debug!(
            date = %date,
            role = %role,
            blocks = resolved.blocks.len(),
            source = %resolved.source,
            "Allocating staff to shifts"
        );

        let shares = distribute(total, resolved.blocks.len());
        for (block, assigned) in resolved.blocks.iter().zip(shares) {
            allocation.schedule.push(ScheduleRecord {
                date,
                role: role.to_string(),
                season,
                shift: block.label.clone(),
                start: block.start,
                end: block.end,
                hours: block.hours,
                assigned,
                shift_source: resolved.source,
            });
        }
    }

    allocation
}
