//! Dashboard figure loading.
//!
//! # Responsibility
//! - Issue the independent dashboard reads and feed the aggregator.
//! - Isolate failures per figure: a failed read zeroes its figure only.
//!
//! # Invariants
//! - `load` never fails as a whole; every failure is logged and reported in
//!   `DashboardReport::failures`.
//! - `placed_students` counts applications with status `Selected`.

use crate::model::application::ApplicationStatus;
use crate::repo::stats_repo::StatsRepository;
use crate::repo::{ColumnFilter, RepoError, RepoResult, Table};
use crate::stats::{
    average_package, placement_rate, status_breakdown_with_total, top_branch, StatusBreakdown,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Headline dashboard numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_students: u64,
    pub total_companies: u64,
    pub total_job_profiles: u64,
    pub total_applications: u64,
    pub total_training_programs: u64,
    pub placed_students: u64,
    pub average_package: f64,
    pub top_branch: String,
}

impl DashboardStats {
    pub fn placement_rate(&self) -> f64 {
        placement_rate(self.placed_students, self.total_students)
    }
}

/// One independently fetched dashboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardFigure {
    TotalStudents,
    TotalCompanies,
    TotalJobProfiles,
    TotalApplications,
    TotalTrainingPrograms,
    PlacedStudents,
    AveragePackage,
    TopBranch,
    StatusBreakdown,
}

impl DashboardFigure {
    pub const ALL: [Self; 9] = [
        Self::TotalStudents,
        Self::TotalCompanies,
        Self::TotalJobProfiles,
        Self::TotalApplications,
        Self::TotalTrainingPrograms,
        Self::PlacedStudents,
        Self::AveragePackage,
        Self::TopBranch,
        Self::StatusBreakdown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TotalStudents => "total_students",
            Self::TotalCompanies => "total_companies",
            Self::TotalJobProfiles => "total_job_profiles",
            Self::TotalApplications => "total_applications",
            Self::TotalTrainingPrograms => "total_training_programs",
            Self::PlacedStudents => "placed_students",
            Self::AveragePackage => "average_package",
            Self::TopBranch => "top_branch",
            Self::StatusBreakdown => "status_breakdown",
        }
    }
}

impl Display for DashboardFigure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read failure for one figure.
#[derive(Debug)]
pub struct FigureFailure {
    pub figure: DashboardFigure,
    pub error: RepoError,
}

/// Result of one dashboard load.
#[derive(Debug, Default)]
pub struct DashboardReport {
    pub stats: DashboardStats,
    /// `None` when the status read failed.
    pub status_breakdown: Option<StatusBreakdown>,
    pub failures: Vec<FigureFailure>,
}

impl DashboardReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, figure: DashboardFigure) -> bool {
        self.failures.iter().any(|failure| failure.figure == figure)
    }
}

/// Dashboard use-case service.
pub struct DashboardService<R: StatsRepository> {
    repo: R,
}

impl<R: StatsRepository> DashboardService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Runs every dashboard read and computes the figures.
    pub fn load(&self) -> DashboardReport {
        let started_at = Instant::now();
        info!("event=dashboard_load module=service status=start");

        let mut failures = Vec::new();
        let repo = &self.repo;
        let selected_filter = ColumnFilter::eq(
            "application_status",
            ApplicationStatus::Selected.as_str(),
        );

        let total_students = fetch_figure(
            DashboardFigure::TotalStudents,
            repo.count(Table::Students, None),
            &mut failures,
        );
        let total_companies = fetch_figure(
            DashboardFigure::TotalCompanies,
            repo.count(Table::Companies, None),
            &mut failures,
        );
        let total_job_profiles = fetch_figure(
            DashboardFigure::TotalJobProfiles,
            repo.count(Table::JobProfiles, None),
            &mut failures,
        );
        let total_applications = fetch_figure(
            DashboardFigure::TotalApplications,
            repo.count(Table::Applications, None),
            &mut failures,
        );
        let total_training_programs = fetch_figure(
            DashboardFigure::TotalTrainingPrograms,
            repo.count(Table::TrainingPrograms, None),
            &mut failures,
        );
        let placed_students = fetch_figure(
            DashboardFigure::PlacedStudents,
            repo.count(Table::Applications, Some(&selected_filter)),
            &mut failures,
        );
        let packages = fetch_figure(
            DashboardFigure::AveragePackage,
            repo.job_packages(),
            &mut failures,
        );
        let branches = fetch_figure(
            DashboardFigure::TopBranch,
            repo.student_branches(),
            &mut failures,
        );
        let statuses = fetch_figure(
            DashboardFigure::StatusBreakdown,
            repo.application_statuses(),
            &mut failures,
        );

        let total_applications = total_applications.unwrap_or(0);
        let stats = DashboardStats {
            total_students: total_students.unwrap_or(0),
            total_companies: total_companies.unwrap_or(0),
            total_job_profiles: total_job_profiles.unwrap_or(0),
            total_applications,
            total_training_programs: total_training_programs.unwrap_or(0),
            placed_students: placed_students.unwrap_or(0),
            average_package: packages.as_deref().map_or(0.0, average_package),
            top_branch: branches.map(top_branch).unwrap_or_default(),
        };
        let status_breakdown =
            statuses.map(|statuses| status_breakdown_with_total(statuses, total_applications));

        info!(
            "event=dashboard_load module=service status={} duration_ms={} failed_figures={}",
            if failures.is_empty() { "ok" } else { "partial" },
            started_at.elapsed().as_millis(),
            failures.len()
        );

        DashboardReport {
            stats,
            status_breakdown,
            failures,
        }
    }
}

fn fetch_figure<T>(
    figure: DashboardFigure,
    result: RepoResult<T>,
    failures: &mut Vec<FigureFailure>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            error!(
                "event=dashboard_fetch module=service status=error figure={} error={}",
                figure, err
            );
            failures.push(FigureFailure { figure, error: err });
            None
        }
    }
}
