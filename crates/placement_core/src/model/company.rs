//! Company domain model.
//!
//! # Responsibility
//! - Define the recruiting company record and its write payload.
//!
//! # Invariants
//! - `company_name` is never blank.
//! - Every contact field is required by the create/edit form.

use super::validation::{require_text, ValidationResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CompanyId = Uuid;

/// Industry options offered by the company form.
pub const INDUSTRY_OPTIONS: &[&str] = &[
    "IT Services",
    "Product",
    "Consulting",
    "Manufacturing",
    "Finance",
    "Healthcare",
    "E-commerce",
];

/// Recruiting company as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub company_name: String,
    pub location: String,
    pub industry_type: String,
    pub hr_name: String,
    pub hr_contact: String,
    /// Store-assigned, epoch milliseconds.
    pub created_at: i64,
}

/// Insert/update payload for [`Company`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDraft {
    pub company_name: String,
    pub location: String,
    pub industry_type: String,
    pub hr_name: String,
    pub hr_contact: String,
}

impl CompanyDraft {
    pub fn validate(&self) -> ValidationResult {
        require_text("company_name", &self.company_name)?;
        require_text("location", &self.location)?;
        require_text("industry_type", &self.industry_type)?;
        require_text("hr_name", &self.hr_name)?;
        require_text("hr_contact", &self.hr_contact)?;
        Ok(())
    }
}

impl From<&Company> for CompanyDraft {
    fn from(company: &Company) -> Self {
        Self {
            company_name: company.company_name.clone(),
            location: company.location.clone(),
            industry_type: company.industry_type.clone(),
            hr_name: company.hr_name.clone(),
            hr_contact: company.hr_contact.clone(),
        }
    }
}
