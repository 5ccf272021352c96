//! Job application domain model.
//!
//! # Invariants
//! - A student applies to a job profile at most once; the store enforces it.
//! - Status literals are capitalised and shared with storage.

use super::company::Company;
use super::job_profile::{JobProfile, JobProfileId};
use super::student::{Student, StudentId};
use super::validation::{require_id, ValidationResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ApplicationId = Uuid;

/// Candidacy state of an application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Shortlisted,
    Selected,
    Rejected,
}

impl ApplicationStatus {
    /// Known statuses in display order.
    pub const ALL: [Self; 4] = [
        Self::Applied,
        Self::Shortlisted,
        Self::Selected,
        Self::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Shortlisted => "Shortlisted",
            Self::Selected => "Selected",
            Self::Rejected => "Rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Applied" => Some(Self::Applied),
            "Shortlisted" => Some(Self::Shortlisted),
            "Selected" => Some(Self::Selected),
            "Rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Application as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub student_id: StudentId,
    pub job_id: JobProfileId,
    pub application_status: ApplicationStatus,
    pub created_at: i64,
}

/// Insert payload for [`Application`].
///
/// Updates only ever change `application_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub student_id: StudentId,
    pub job_id: JobProfileId,
    pub application_status: ApplicationStatus,
}

impl Default for ApplicationDraft {
    fn default() -> Self {
        Self {
            student_id: Uuid::nil(),
            job_id: Uuid::nil(),
            application_status: ApplicationStatus::Applied,
        }
    }
}

impl ApplicationDraft {
    pub fn validate(&self) -> ValidationResult {
        require_id("student_id", self.student_id)?;
        require_id("job_id", self.job_id)?;
        Ok(())
    }
}

impl From<&Application> for ApplicationDraft {
    fn from(application: &Application) -> Self {
        Self {
            student_id: application.student_id,
            job_id: application.job_id,
            application_status: application.application_status,
        }
    }
}

/// Application joined with student, job profile and company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDetails {
    pub application: Application,
    pub student: Option<Student>,
    pub job: Option<JobProfile>,
    pub company: Option<Company>,
}
