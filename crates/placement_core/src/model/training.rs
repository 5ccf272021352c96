//! Training program and enrollment domain model.
//!
//! # Responsibility
//! - Define training programs and the per-student enrollment record.
//! - Own completion status literals shared with storage.
//!
//! # Invariants
//! - `end_date` is not earlier than `start_date` (ISO dates compare lexically).
//! - `attendance_percentage` is within 0..=100.
//! - A student is enrolled at most once per program; the store enforces it.

use super::student::{Student, StudentId};
use super::validation::{
    require_id, require_iso_date, require_range, require_text, ValidationError, ValidationResult,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TrainingProgramId = Uuid;
pub type EnrollmentId = Uuid;

/// Participation state of a student in a program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionStatus {
    #[default]
    Enrolled,
    Completed,
    Dropped,
}

impl CompletionStatus {
    pub const ALL: [Self; 3] = [Self::Enrolled, Self::Completed, Self::Dropped];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enrolled => "Enrolled",
            Self::Completed => "Completed",
            Self::Dropped => "Dropped",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Enrolled" => Some(Self::Enrolled),
            "Completed" => Some(Self::Completed),
            "Dropped" => Some(Self::Dropped),
            _ => None,
        }
    }
}

/// Training program as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingProgram {
    pub id: TrainingProgramId,
    pub title: String,
    pub trainer_name: String,
    /// `YYYY-MM-DD`.
    pub start_date: String,
    /// `YYYY-MM-DD`.
    pub end_date: String,
    pub description: Option<String>,
    pub created_at: i64,
}

/// Insert/update payload for [`TrainingProgram`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingProgramDraft {
    pub title: String,
    pub trainer_name: String,
    pub start_date: String,
    pub end_date: String,
    pub description: Option<String>,
}

impl TrainingProgramDraft {
    pub fn validate(&self) -> ValidationResult {
        require_text("title", &self.title)?;
        require_text("trainer_name", &self.trainer_name)?;
        require_iso_date("start_date", &self.start_date)?;
        require_iso_date("end_date", &self.end_date)?;
        if self.end_date.trim() < self.start_date.trim() {
            return Err(ValidationError::DateRangeReversed {
                start: self.start_date.trim().to_string(),
                end: self.end_date.trim().to_string(),
            });
        }
        Ok(())
    }
}

impl From<&TrainingProgram> for TrainingProgramDraft {
    fn from(program: &TrainingProgram) -> Self {
        Self {
            title: program.title.clone(),
            trainer_name: program.trainer_name.clone(),
            start_date: program.start_date.clone(),
            end_date: program.end_date.clone(),
            description: program.description.clone(),
        }
    }
}

/// Enrollment of one student in one program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingEnrollment {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub training_id: TrainingProgramId,
    pub attendance_percentage: f64,
    pub completion_status: CompletionStatus,
    pub created_at: i64,
}

/// Insert payload for [`TrainingEnrollment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentDraft {
    pub student_id: StudentId,
    pub training_id: TrainingProgramId,
    pub attendance_percentage: f64,
    pub completion_status: CompletionStatus,
}

impl Default for EnrollmentDraft {
    fn default() -> Self {
        Self {
            student_id: Uuid::nil(),
            training_id: Uuid::nil(),
            attendance_percentage: 0.0,
            completion_status: CompletionStatus::Enrolled,
        }
    }
}

impl EnrollmentDraft {
    pub fn validate(&self) -> ValidationResult {
        require_id("student_id", self.student_id)?;
        require_id("training_id", self.training_id)?;
        require_range("attendance_percentage", self.attendance_percentage, 0.0, 100.0)
    }
}

/// Enrollment joined with its student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentWithStudent {
    pub enrollment: TrainingEnrollment,
    pub student: Option<Student>,
}

#[cfg(test)]
mod tests {
    use super::{CompletionStatus, EnrollmentDraft, TrainingProgramDraft};
    use crate::model::validation::ValidationError;
    use uuid::Uuid;

    fn program() -> TrainingProgramDraft {
        TrainingProgramDraft {
            title: "Aptitude Bootcamp".to_string(),
            trainer_name: "R. Iyer".to_string(),
            start_date: "2024-07-01".to_string(),
            end_date: "2024-07-15".to_string(),
            description: None,
        }
    }

    #[test]
    fn reversed_date_range_is_rejected() {
        let mut draft = program();
        draft.end_date = "2024-06-30".to_string();
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::DateRangeReversed { .. })
        ));
    }

    #[test]
    fn single_day_program_is_valid() {
        let mut draft = program();
        draft.end_date = draft.start_date.clone();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn attendance_over_hundred_is_rejected() {
        let draft = EnrollmentDraft {
            student_id: Uuid::new_v4(),
            training_id: Uuid::new_v4(),
            attendance_percentage: 101.0,
            ..EnrollmentDraft::default()
        };
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::OutOfRange {
                field: "attendance_percentage",
                ..
            })
        ));

        let unpicked = EnrollmentDraft::default();
        assert_eq!(
            unpicked.validate(),
            Err(ValidationError::EmptyField("student_id"))
        );
    }

    #[test]
    fn completion_status_literals_roundtrip() {
        for status in CompletionStatus::ALL {
            assert_eq!(CompletionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CompletionStatus::parse("enrolled"), None);
    }
}
