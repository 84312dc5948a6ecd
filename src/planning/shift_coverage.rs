//! Hour-of-day coverage of shift blocks and hourly demand consolidation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::warn;

use crate::models::{DemandRecord, ShiftBlock, ShiftNeedRecord, is_weekend};

use super::ShiftResolver;

/// How a set of shift blocks covers the 24 hours of a day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    /// Hours no block covers.
    pub uncovered: Vec<u8>,
    /// Hours more than one block covers.
    pub overlapping: Vec<u8>,
}

impl CoverageReport {
    /// Returns true if every hour is covered exactly once.
    pub fn is_clean(&self) -> bool {
        self.uncovered.is_empty() && self.overlapping.is_empty()
    }
}

/// Checks whether blocks tile the day without gaps or overlaps.
///
/// # Example
///
/// ```
/// use staffing_engine::models::ShiftBlock;
/// use staffing_engine::planning::check_shift_coverage;
///
/// let blocks = vec![ShiftBlock::new("Day", 7, 19), ShiftBlock::new("Night", 19, 7)];
/// assert!(check_shift_coverage(&blocks).is_clean());
///
/// let report = check_shift_coverage(&blocks[..1]);
/// assert_eq!(report.uncovered.len(), 12);
/// ```
pub fn check_shift_coverage(blocks: &[ShiftBlock]) -> CoverageReport {
    let mut counts = [0u32; 24];
    for block in blocks {
        for hour in block.hours_of_day() {
            counts[usize::from(hour)] += 1;
        }
    }

    let mut report = CoverageReport::default();
    for (hour, count) in (0u8..).zip(counts) {
        match count {
            0 => report.uncovered.push(hour),
            1 => {}
            _ => report.overlapping.push(hour),
        }
    }
    report
}

/// Returns the first block whose span contains `hour`.
pub fn block_for_hour<'b>(blocks: &[&'b ShiftBlock], hour: u8) -> Option<&'b ShiftBlock> {
    blocks.iter().copied().find(|block| block.covers(hour))
}

/// Sums hourly demand into the role's shift blocks.
///
/// Each demand row lands in the first block worked on its date that covers
/// its hour, so weekends can use their own block set. Rows for roles without
/// blocks, or hours no block covers, are left out and counted in a single
/// warning.
pub fn consolidate_to_shifts(
    plan: &[DemandRecord],
    resolver: &ShiftResolver<'_>,
) -> Vec<ShiftNeedRecord> {
    // (date, role, block position) keeps output in configured block order
    let mut needs: BTreeMap<(NaiveDate, &str, usize), (&ShiftBlock, u32)> = BTreeMap::new();
    let mut unmatched_rows = 0usize;

    for record in plan {
        let Some(resolved) = resolver.resolve_on(&record.role, record.date) else {
            unmatched_rows += 1;
            continue;
        };
        let Some((position, block)) = resolved
            .blocks
            .iter()
            .enumerate()
            .find(|(_, block)| block.covers(record.hour))
        else {
            unmatched_rows += 1;
            continue;
        };

        let entry = needs
            .entry((record.date, record.role.as_str(), position))
            .or_insert((*block, 0));
        entry.1 = entry.1.saturating_add(record.staff_needed);
    }

    if unmatched_rows > 0 {
        warn!(
            rows = unmatched_rows,
            "Demand rows fell outside every shift block and were not consolidated"
        );
    }

    needs
        .into_iter()
        .map(|((date, role, _), (block, needed))| ShiftNeedRecord {
            date,
            role: role.to_string(),
            shift: block.label.clone(),
            start: block.start,
            end: block.end,
            weekend: is_weekend(date),
            needed,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::models::{Season, ShiftDays, ShiftTableRow};
    use rust_decimal::Decimal;

    fn demand(role: &str, hour: u8, needed: u32) -> DemandRecord {
        demand_on("2025-06-01", role, hour, needed)
    }

    fn demand_on(date: &str, role: &str, hour: u8, needed: u32) -> DemandRecord {
        DemandRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            hour,
            department: String::new(),
            role: role.to_string(),
            shift: "All".to_string(),
            season: Season::Medium,
            census: Decimal::ZERO,
            ratio_used: None,
            staff_needed: needed,
        }
    }

    fn table(blocks: &[(&str, u8, u8)]) -> Vec<ShiftTableRow> {
        blocks
            .iter()
            .map(|(label, start, end)| ShiftTableRow {
                role: None,
                block: ShiftBlock::new(*label, *start, *end),
            })
            .collect()
    }

    #[test]
    fn test_three_eight_hour_blocks_are_clean() {
        let blocks = vec![
            ShiftBlock::new("Day", 7, 15),
            ShiftBlock::new("Evening", 15, 23),
            ShiftBlock::new("Night", 23, 7),
        ];
        assert!(check_shift_coverage(&blocks).is_clean());
    }

    #[test]
    fn test_overlap_detected() {
        let blocks = vec![ShiftBlock::new("Day", 7, 19), ShiftBlock::new("Mid", 11, 23)];
        let report = check_shift_coverage(&blocks);
        assert_eq!(report.overlapping, (11..19).collect::<Vec<u8>>());
        assert_eq!(report.uncovered, vec![0, 1, 2, 3, 4, 5, 6, 23]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_no_blocks_leaves_whole_day_uncovered() {
        assert_eq!(check_shift_coverage(&[]).uncovered.len(), 24);
    }

    #[test]
    fn test_hours_map_into_wrapping_block() {
        let config = PlannerConfig::default();
        let rows = table(&[("Day", 7, 19), ("Night", 19, 7)]);
        let resolver = ShiftResolver::new(&rows, &config);
        let plan = vec![
            demand("RN", 23, 2),
            demand("RN", 3, 1),
            demand("RN", 7, 4),
            demand("RN", 18, 1),
        ];

        let needs = consolidate_to_shifts(&plan, &resolver);
        assert_eq!(needs.len(), 2);
        assert_eq!(needs[0].shift, "Day");
        assert_eq!(needs[0].needed, 5);
        assert_eq!(needs[1].shift, "Night");
        assert_eq!(needs[1].needed, 3);
        assert_eq!((needs[1].start, needs[1].end), (19, 7));
    }

    #[test]
    fn test_first_matching_block_wins_on_overlap() {
        let config = PlannerConfig::default();
        let rows = table(&[("Day", 7, 19), ("Mid", 11, 23)]);
        let resolver = ShiftResolver::new(&rows, &config);

        let needs = consolidate_to_shifts(&[demand("RN", 12, 3)], &resolver);
        assert_eq!(needs.len(), 1);
        assert_eq!(needs[0].shift, "Day");
    }

    #[test]
    fn test_uncovered_hours_are_left_out() {
        let config = PlannerConfig::default();
        let rows = table(&[("Day", 7, 19)]);
        let resolver = ShiftResolver::new(&rows, &config);

        let needs = consolidate_to_shifts(&[demand("RN", 2, 3), demand("RN", 8, 1)], &resolver);
        assert_eq!(needs.len(), 1);
        assert_eq!(needs[0].needed, 1);
    }

    #[test]
    fn test_block_for_hour() {
        let day = ShiftBlock::new("Day", 7, 19);
        let night = ShiftBlock::new("Night", 19, 7);
        let blocks = vec![&day, &night];
        assert_eq!(block_for_hour(&blocks, 6).map(|b| b.label.as_str()), Some("Night"));
        assert_eq!(block_for_hour(&blocks, 7).map(|b| b.label.as_str()), Some("Day"));
    }

    #[test]
    fn test_weekend_uses_weekend_block_set() {
        let config = PlannerConfig::default();
        let rows = vec![
            ShiftTableRow {
                role: None,
                block: ShiftBlock::new("Day", 7, 19).on_days(ShiftDays::Weekday),
            },
            ShiftTableRow {
                role: None,
                block: ShiftBlock::new("Night", 19, 7).on_days(ShiftDays::Weekday),
            },
            ShiftTableRow {
                role: None,
                block: ShiftBlock::new("Weekend Day", 8, 20).on_days(ShiftDays::Weekend),
            },
            ShiftTableRow {
                role: None,
                block: ShiftBlock::new("Weekend Night", 20, 8).on_days(ShiftDays::Weekend),
            },
        ];
        let resolver = ShiftResolver::new(&rows, &config);
        let plan = vec![
            // Friday 07:00 lands in Day
            demand_on("2025-06-06", "RN", 7, 2),
            // Saturday 07:00 lands in Weekend Night
            demand_on("2025-06-07", "RN", 7, 3),
            demand_on("2025-06-07", "RN", 12, 1),
        ];

        let needs = consolidate_to_shifts(&plan, &resolver);
        let got: Vec<(&str, bool, u32)> = needs
            .iter()
            .map(|n| (n.shift.as_str(), n.weekend, n.needed))
            .collect();
        assert_eq!(
            got,
            vec![("Day", false, 2), ("Weekend Day", true, 1), ("Weekend Night", true, 3)]
        );
    }
}
