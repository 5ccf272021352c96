//! Dashboard aggregation functions.
//!
//! # Invariants
//! - Division by zero is guarded and yields `0.0`, never NaN.
//! - Top branch ties go to the branch seen first.
//! - Status breakdown always lists the four known statuses first, in
//!   `ApplicationStatus::ALL` order, followed by any unknown literal in
//!   first-seen order.

use super::frequency::FrequencyTable;
use crate::model::application::ApplicationStatus;
use serde::{Deserialize, Serialize};

/// Size of a fetched collection; an absent collection counts as empty.
pub fn count<T>(items: Option<&[T]>) -> usize {
    items.map_or(0, <[T]>::len)
}

/// Percentage of students placed: `selected / total * 100`.
pub fn placement_rate(selected: u64, total: u64) -> f64 {
    percentage(selected, total)
}

/// Arithmetic mean of job packages in LPA.
pub fn average_package(packages: &[f64]) -> f64 {
    if packages.is_empty() {
        return 0.0;
    }
    packages.iter().sum::<f64>() / packages.len() as f64
}

/// Most frequent branch, or an empty string when there are no students.
pub fn top_branch<I, S>(branches: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    FrequencyTable::tally(branches)
        .mode()
        .map(|(branch, _)| branch.to_string())
        .unwrap_or_default()
}

/// One row of the status breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
    /// Share of the total application count, `0.0..=100.0`.
    pub percentage: f64,
}

/// Application counts per status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub entries: Vec<StatusCount>,
    /// Denominator used for percentages.
    pub total: u64,
}

impl StatusBreakdown {
    pub fn get(&self, status: &str) -> Option<&StatusCount> {
        self.entries.iter().find(|entry| entry.status == status)
    }

    pub fn count_of(&self, status: ApplicationStatus) -> u64 {
        self.get(status.as_str()).map_or(0, |entry| entry.count)
    }
}

/// Breakdown with percentages relative to the number of statuses given.
pub fn status_breakdown<I, S>(statuses: I) -> StatusBreakdown
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let table = tally_statuses(statuses);
    let total = table.total() as u64;
    build_breakdown(&table, total)
}

/// Breakdown with percentages relative to an externally counted total.
///
/// The dashboard counts applications with a separate read, so its
/// denominator can disagree with the status projection.
pub fn status_breakdown_with_total<I, S>(statuses: I, total: u64) -> StatusBreakdown
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    build_breakdown(&tally_statuses(statuses), total)
}

fn tally_statuses<I, S>(statuses: I) -> FrequencyTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut table = FrequencyTable::seeded(ApplicationStatus::ALL.map(ApplicationStatus::as_str));
    table.extend(statuses);
    table
}

fn build_breakdown(table: &FrequencyTable, total: u64) -> StatusBreakdown {
    let entries = table
        .iter()
        .map(|(status, count)| {
            let count = count as u64;
            StatusCount {
                status: status.to_string(),
                count,
                percentage: percentage(count, total),
            }
        })
        .collect();
    StatusBreakdown { entries, total }
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::{
        average_package, count, placement_rate, status_breakdown, status_breakdown_with_total,
        top_branch,
    };
    use crate::model::application::ApplicationStatus;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn count_treats_absent_as_empty() {
        assert_eq!(count::<u8>(None), 0);
        assert_eq!(count(Some(&[1, 2, 3][..])), 3);
    }

    #[test]
    fn placement_rate_is_zero_without_students() {
        assert_eq!(placement_rate(0, 0), 0.0);
        assert_eq!(placement_rate(3, 0), 0.0);
    }

    #[test]
    fn placement_rate_matches_formula_for_all_small_inputs() {
        for total in 1..=20u64 {
            for selected in 0..=total {
                assert_close(
                    placement_rate(selected, total),
                    selected as f64 / total as f64 * 100.0,
                );
            }
        }
    }

    #[test]
    fn average_package_is_mean_or_zero() {
        assert_eq!(average_package(&[]), 0.0);
        assert_close(average_package(&[4.5]), 4.5);
        assert_close(average_package(&[6.0, 12.0, 3.0]), 7.0);
    }

    #[test]
    fn top_branch_picks_mode_with_first_seen_tie_break() {
        assert_eq!(top_branch(Vec::<String>::new()), "");
        assert_eq!(top_branch(["CS", "CS", "EC"]), "CS");
        assert_eq!(top_branch(["ME", "EC", "EC", "ME"]), "ME");
        assert_eq!(top_branch(["Civil"]), "Civil");
    }

    #[test]
    fn empty_breakdown_lists_known_statuses_with_zeroes() {
        let breakdown = status_breakdown(Vec::<&str>::new());
        let statuses: Vec<_> = breakdown
            .entries
            .iter()
            .map(|entry| entry.status.as_str())
            .collect();
        assert_eq!(statuses, vec!["Applied", "Shortlisted", "Selected", "Rejected"]);
        assert!(breakdown
            .entries
            .iter()
            .all(|entry| entry.count == 0 && entry.percentage == 0.0));
    }

    #[test]
    fn breakdown_counts_and_percentages() {
        let breakdown = status_breakdown(["Applied", "Selected", "Selected"]);
        assert_eq!(breakdown.total, 3);
        assert_eq!(breakdown.count_of(ApplicationStatus::Applied), 1);
        assert_eq!(breakdown.count_of(ApplicationStatus::Selected), 2);
        assert_eq!(breakdown.count_of(ApplicationStatus::Shortlisted), 0);
        assert_eq!(breakdown.count_of(ApplicationStatus::Rejected), 0);

        let applied = breakdown.get("Applied").unwrap();
        let selected = breakdown.get("Selected").unwrap();
        assert_eq!(format!("{:.1}", applied.percentage), "33.3");
        assert_eq!(format!("{:.1}", selected.percentage), "66.7");
    }

    #[test]
    fn unknown_statuses_are_tallied_after_known_ones() {
        let breakdown = status_breakdown(["On Hold", "Applied", "On Hold"]);
        assert_eq!(breakdown.entries.len(), 5);
        let last = breakdown.entries.last().unwrap();
        assert_eq!(last.status, "On Hold");
        assert_eq!(last.count, 2);
    }

    #[test]
    fn external_total_drives_percentages() {
        let breakdown = status_breakdown_with_total(["Applied"], 4);
        assert_close(breakdown.get("Applied").unwrap().percentage, 25.0);

        let unknown_total = status_breakdown_with_total(["Applied"], 0);
        assert_eq!(unknown_total.get("Applied").unwrap().percentage, 0.0);
    }
}
