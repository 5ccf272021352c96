//! Student domain model.
//!
//! # Responsibility
//! - Define the student record, its write payload and form defaults.
//!
//! # Invariants
//! - `year` is within 1..=4 and `cgpa` within 0..=10.
//! - `roll_number` is unique; the store enforces it.
//! - `resume_link` is absent rather than blank.

use super::validation::{require_email, require_range, require_text, ValidationResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type StudentId = Uuid;

/// Branch options offered by the student form.
pub const BRANCH_OPTIONS: &[&str] = &[
    "Computer Science",
    "Electronics",
    "Mechanical",
    "Civil",
    "Electrical",
];

pub const MIN_YEAR: u8 = 1;
pub const MAX_YEAR: u8 = 4;
pub const MAX_CGPA: f64 = 10.0;

/// Student as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub roll_number: String,
    pub branch: String,
    pub year: u8,
    pub cgpa: f64,
    pub email: String,
    pub phone_number: String,
    pub resume_link: Option<String>,
    pub created_at: i64,
}

/// Insert/update payload for [`Student`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentDraft {
    pub name: String,
    pub roll_number: String,
    pub branch: String,
    pub year: u8,
    pub cgpa: f64,
    pub email: String,
    pub phone_number: String,
    pub resume_link: Option<String>,
}

impl Default for StudentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            roll_number: String::new(),
            branch: String::new(),
            year: MIN_YEAR,
            cgpa: 0.0,
            email: String::new(),
            phone_number: String::new(),
            resume_link: None,
        }
    }
}

impl StudentDraft {
    pub fn validate(&self) -> ValidationResult {
        require_text("name", &self.name)?;
        require_text("roll_number", &self.roll_number)?;
        require_text("branch", &self.branch)?;
        require_range(
            "year",
            f64::from(self.year),
            f64::from(MIN_YEAR),
            f64::from(MAX_YEAR),
        )?;
        require_range("cgpa", self.cgpa, 0.0, MAX_CGPA)?;
        require_email(&self.email)?;
        require_text("phone_number", &self.phone_number)?;
        Ok(())
    }
}

impl From<&Student> for StudentDraft {
    fn from(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            roll_number: student.roll_number.clone(),
            branch: student.branch.clone(),
            year: student.year,
            cgpa: student.cgpa,
            email: student.email.clone(),
            phone_number: student.phone_number.clone(),
            resume_link: student.resume_link.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StudentDraft;
    use crate::model::validation::ValidationError;

    fn valid_draft() -> StudentDraft {
        StudentDraft {
            name: "Asha Rao".to_string(),
            roll_number: "CS21-001".to_string(),
            branch: "Computer Science".to_string(),
            year: 3,
            cgpa: 8.4,
            email: "asha@college.edu".to_string(),
            phone_number: "9876543210".to_string(),
            resume_link: None,
        }
    }

    #[test]
    fn default_draft_matches_empty_form() {
        let draft = StudentDraft::default();
        assert_eq!(draft.year, 1);
        assert_eq!(draft.cgpa, 0.0);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn year_outside_one_to_four_is_rejected() {
        let mut draft = valid_draft();
        draft.year = 5;
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::OutOfRange { field: "year", .. })
        ));
        draft.year = 0;
        assert!(draft.validate().is_err());
    }

    #[test]
    fn cgpa_above_ten_is_rejected() {
        let mut draft = valid_draft();
        draft.cgpa = 10.5;
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::OutOfRange { field: "cgpa", .. })
        ));
    }

    #[test]
    fn valid_draft_passes() {
        assert!(valid_draft().validate().is_ok());
    }
}
