//! Job profile domain model.
//!
//! # Invariants
//! - Every job profile belongs to exactly one company.
//! - `package` is a finite, non-negative amount in LPA.

use super::company::{Company, CompanyId};
use super::validation::{require_id, require_range, require_text, ValidationResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type JobProfileId = Uuid;

/// Offered role at a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobProfile {
    pub id: JobProfileId,
    pub company_id: CompanyId,
    pub role: String,
    /// Lakhs per annum.
    pub package: f64,
    pub created_at: i64,
}

/// Insert/update payload for [`JobProfile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobProfileDraft {
    pub company_id: CompanyId,
    pub role: String,
    pub package: f64,
}

impl Default for JobProfileDraft {
    fn default() -> Self {
        Self {
            company_id: Uuid::nil(),
            role: String::new(),
            package: 0.0,
        }
    }
}

impl JobProfileDraft {
    pub fn validate(&self) -> ValidationResult {
        require_id("company_id", self.company_id)?;
        require_text("role", &self.role)?;
        require_range("package", self.package, 0.0, f64::MAX)?;
        Ok(())
    }
}

impl From<&JobProfile> for JobProfileDraft {
    fn from(job: &JobProfile) -> Self {
        Self {
            company_id: job.company_id,
            role: job.role.clone(),
            package: job.package,
        }
    }
}

/// Job profile joined with its owning company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobProfileWithCompany {
    pub job: JobProfile,
    pub company: Option<Company>,
}

impl JobProfileWithCompany {
    /// Picker label, e.g. `Acme - SDE (12.5 LPA)`.
    pub fn label(&self) -> String {
        let company_name = self
            .company
            .as_ref()
            .map_or("", |company| company.company_name.as_str());
        format!("{company_name} - {} ({} LPA)", self.job.role, self.job.package)
    }
}
