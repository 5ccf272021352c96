//! Dashboard screen.
//!
//! Read-only view over `DashboardService`. A failed read zeroes its own
//! figure; the remaining figures still render and one error alert is raised.

use super::Alert;
use crate::repo::stats_repo::StatsRepository;
use crate::service::dashboard_service::{
    DashboardFigure, DashboardReport, DashboardService, DashboardStats, FigureFailure,
};
use crate::stats::StatusBreakdown;

/// Dashboard view-model.
pub struct DashboardScreen<R: StatsRepository> {
    service: DashboardService<R>,
    report: DashboardReport,
    loading: bool,
    alert: Option<Alert>,
}

impl<R: StatsRepository> DashboardScreen<R> {
    /// Creates the screen and loads every figure.
    pub fn mount(repo: R) -> Self {
        let mut screen = Self {
            service: DashboardService::new(repo),
            report: DashboardReport::default(),
            loading: true,
            alert: None,
        };
        screen.refresh();
        screen
    }

    /// Reloads every figure.
    pub fn refresh(&mut self) {
        self.loading = true;
        self.report = self.service.load();
        self.loading = false;
        self.alert = match self.report.failures.len() {
            0 => None,
            failed => Some(Alert::error(format!(
                "Error fetching dashboard statistics ({failed} of {} figures unavailable)",
                DashboardFigure::ALL.len()
            ))),
        };
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn take_alert(&mut self) -> Option<Alert> {
        self.alert.take()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.report.stats
    }

    /// `None` renders as "No application data available".
    pub fn status_breakdown(&self) -> Option<&StatusBreakdown> {
        self.report.status_breakdown.as_ref()
    }

    pub fn report(&self) -> &DashboardReport {
        &self.report
    }

    /// Reads that failed during the last refresh.
    pub fn failures(&self) -> &[FigureFailure] {
        &self.report.failures
    }

    pub fn placement_rate_label(&self) -> String {
        let stats = &self.report.stats;
        percent_label(stats.placement_rate(), stats.total_students)
    }

    pub fn average_package_label(&self) -> String {
        package_label(self.report.stats.average_package)
    }
}

/// One-decimal percentage, or `0%` when the denominator is zero.
pub fn percent_label(value: f64, denominator: u64) -> String {
    if denominator == 0 {
        return "0%".to_string();
    }
    format!("{value:.1}%")
}

/// Status breakdown rows as `status <name>=<count> (<pct>%)`; only a missing breakdown
/// renders as "No application data available".
pub fn breakdown_lines(breakdown: Option<&StatusBreakdown>) -> Vec<String> {
    match breakdown {
        Some(breakdown) => breakdown
            .entries
            .iter()
            .map(|entry| {
                format!(
                    "status {}={} ({:.1}%)",
                    entry.status, entry.count, entry.percentage
                )
            })
            .collect(),
        None => vec!["No application data available".to_string()],
    }
}

/// Two-decimal package amount with its unit.
pub fn package_label(value: f64) -> String {
    format!("{value:.2} LPA")
}
