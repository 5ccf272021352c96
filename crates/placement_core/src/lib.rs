//! Core domain logic for the placement cell dashboard.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod screen;
pub mod service;
pub mod stats;

pub use config::PlacementConfig;
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::application::{Application, ApplicationDetails, ApplicationDraft, ApplicationStatus};
pub use model::company::{Company, CompanyDraft};
pub use model::job_profile::{JobProfile, JobProfileDraft, JobProfileWithCompany};
pub use model::student::{Student, StudentDraft};
pub use model::training::{
    CompletionStatus, EnrollmentDraft, EnrollmentWithStudent, TrainingEnrollment,
    TrainingProgram, TrainingProgramDraft,
};
pub use model::validation::{ValidationError, ValidationResult};
pub use repo::{ColumnFilter, ListOrder, RepoError, RepoResult, Table};
pub use repo::stats_repo::{SqliteStatsRepository, StatsRepository};
pub use screen::{Alert, AlertKind, ScreenError};
pub use service::dashboard_service::{
    DashboardFigure, DashboardReport, DashboardService, DashboardStats, FigureFailure,
};

/// Minimal health-check API for entry points.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
