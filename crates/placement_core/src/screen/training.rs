//! Training programs screen.
//!
//! # Responsibility
//! - Program CRUD through the generic screen.
//! - Enrollment form, enrollment progress updates and per-program
//!   enrollment views.
//!
//! # Invariants
//! - Enrollment submit resets the enrollment form and refetches everything,
//!   successful or not.

use super::crud::{CrudScreen, CrudStore};
use super::{Alert, ScreenError, WriteAction};
use crate::model::student::Student;
use crate::model::training::{
    CompletionStatus, EnrollmentDraft, EnrollmentId, EnrollmentWithStudent, TrainingProgram,
    TrainingProgramDraft, TrainingProgramId,
};
use crate::repo::student_repo::{SqliteStudentRepository, StudentListQuery, StudentRepository};
use crate::repo::training_repo::{
    EnrollmentListQuery, SqliteTrainingRepository, TrainingRepository,
};
use crate::repo::{ListOrder, RepoError, RepoResult};
use crate::stats::count;
use log::{error, info};

impl CrudStore for SqliteTrainingRepository<'_> {
    type Id = TrainingProgramId;
    type Record = TrainingProgram;
    type Draft = TrainingProgramDraft;

    const ENTITY: &'static str = "program";
    const SUBJECT: &'static str = "training_programs";

    fn record_id(record: &TrainingProgram) -> TrainingProgramId {
        record.id
    }

    fn draft_from(record: &TrainingProgram) -> TrainingProgramDraft {
        TrainingProgramDraft::from(record)
    }

    fn fetch(&self) -> RepoResult<Vec<TrainingProgram>> {
        self.list_programs(ListOrder::NewestFirst)
    }

    fn insert(&self, draft: &TrainingProgramDraft) -> RepoResult<TrainingProgramId> {
        self.create_program(draft)
    }

    fn update(&self, id: TrainingProgramId, draft: &TrainingProgramDraft) -> RepoResult<()> {
        self.update_program(id, draft)
    }

    fn remove(&self, id: TrainingProgramId) -> RepoResult<()> {
        self.delete_program(id)
    }
}

/// Training programs, their enrollments and the student picker.
pub struct TrainingScreen<'conn> {
    programs: CrudScreen<SqliteTrainingRepository<'conn>>,
    student_repo: SqliteStudentRepository<'conn>,
    enrollments: Vec<EnrollmentWithStudent>,
    students: Vec<Student>,
    enrollment_form: Option<EnrollmentDraft>,
    selected_program: Option<TrainingProgramId>,
    alert: Option<Alert>,
}

impl<'conn> TrainingScreen<'conn> {
    pub fn mount(
        training_repo: SqliteTrainingRepository<'conn>,
        student_repo: SqliteStudentRepository<'conn>,
    ) -> Self {
        let mut screen = Self {
            programs: CrudScreen::new(training_repo),
            student_repo,
            enrollments: Vec::new(),
            students: Vec::new(),
            enrollment_form: None,
            selected_program: None,
            alert: None,
        };
        screen.reload();
        screen
    }

    pub fn programs(&self) -> &CrudScreen<SqliteTrainingRepository<'conn>> {
        &self.programs
    }

    pub fn programs_mut(&mut self) -> &mut CrudScreen<SqliteTrainingRepository<'conn>> {
        &mut self.programs
    }

    /// All enrollments, newest first.
    pub fn enrollments(&self) -> &[EnrollmentWithStudent] {
        &self.enrollments
    }

    /// Student picker, ordered by name.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn enrollment_form(&self) -> Option<&EnrollmentDraft> {
        self.enrollment_form.as_ref()
    }

    /// Returns the pending alert from either the program or enrollment flow.
    pub fn take_alert(&mut self) -> Option<Alert> {
        self.alert.take().or_else(|| self.programs.take_alert())
    }

    /// Refetches programs, enrollments and students independently.
    pub fn reload(&mut self) -> bool {
        let programs_ok = self.programs.reload();

        let enrollments_ok = match self
            .programs
            .store()
            .list_enrollment_details(&EnrollmentListQuery::default())
        {
            Ok(enrollments) => {
                info!(
                    "event=screen_reload module=screen status=ok subject=training_enrollments rows={}",
                    enrollments.len()
                );
                self.enrollments = enrollments;
                true
            }
            Err(err) => {
                error!(
                    "event=screen_reload module=screen status=error subject=training_enrollments error={}",
                    err
                );
                false
            }
        };

        let students_ok = match self.student_repo.list_students(&StudentListQuery {
            order: ListOrder::Alphabetical,
            branch: None,
        }) {
            Ok(students) => {
                self.students = students;
                true
            }
            Err(err) => {
                error!(
                    "event=screen_reload module=screen status=error subject=students error={}",
                    err
                );
                false
            }
        };

        programs_ok && enrollments_ok && students_ok
    }

    /// Selects a program whose enrollments should be shown.
    pub fn view_enrollments(&mut self, program_id: TrainingProgramId) -> Result<(), ScreenError> {
        if self.programs.find(program_id).is_none() {
            return Err(ScreenError::UnknownRow(program_id.to_string()));
        }
        self.selected_program = Some(program_id);
        Ok(())
    }

    pub fn close_enrollments(&mut self) {
        self.selected_program = None;
    }

    pub fn selected_program(&self) -> Option<&TrainingProgram> {
        self.selected_program
            .and_then(|program_id| self.programs.find(program_id))
    }

    /// Enrollments of the selected program.
    pub fn selected_enrollments(&self) -> Vec<&EnrollmentWithStudent> {
        match self.selected_program {
            Some(program_id) => self.enrollments_for(program_id),
            None => Vec::new(),
        }
    }

    pub fn enrollments_for(&self, program_id: TrainingProgramId) -> Vec<&EnrollmentWithStudent> {
        self.enrollments
            .iter()
            .filter(|details| details.enrollment.training_id == program_id)
            .collect()
    }

    /// Number of enrollments listed for one program.
    pub fn enrollment_count(&self, program_id: TrainingProgramId) -> usize {
        count(Some(self.enrollments_for(program_id).as_slice()))
    }

    pub fn open_enrollment_form(&mut self) {
        self.enrollment_form = Some(EnrollmentDraft::default());
    }

    pub fn edit_enrollment_form(
        &mut self,
        change: impl FnOnce(&mut EnrollmentDraft),
    ) -> Result<(), ScreenError> {
        let draft = self
            .enrollment_form
            .as_mut()
            .ok_or(ScreenError::NoOpenForm)?;
        change(draft);
        Ok(())
    }

    pub fn reset_enrollment_form(&mut self) {
        self.enrollment_form = None;
    }

    /// Enrolls the student from the open form, then resets and refetches.
    pub fn submit_enrollment(&mut self) -> Result<(), ScreenError> {
        let draft = self
            .enrollment_form
            .take()
            .ok_or(ScreenError::NoOpenForm)?;
        let result = self.programs.store().create_enrollment(&draft).map(|_| ());
        let failure = match &result {
            Err(RepoError::Constraint(_)) => {
                "Error enrolling student. Student may already be enrolled."
            }
            _ => "Error enrolling student",
        };
        let outcome = self.record_enrollment_write(
            WriteAction::Enroll,
            result,
            "Student enrolled successfully!",
            failure,
        );
        self.reload();
        outcome
    }

    /// Records attendance and completion progress for one enrollment.
    pub fn update_enrollment(
        &mut self,
        enrollment_id: EnrollmentId,
        attendance_percentage: f64,
        completion_status: CompletionStatus,
    ) -> Result<(), ScreenError> {
        let result = self.programs.store().update_enrollment(
            enrollment_id,
            attendance_percentage,
            completion_status,
        );
        let outcome = self.record_enrollment_write(
            WriteAction::Update,
            result,
            "Enrollment updated successfully!",
            "Error updating enrollment",
        );
        self.reload();
        outcome
    }

    /// Removes one enrollment; refetches only on success.
    pub fn delete_enrollment(&mut self, enrollment_id: EnrollmentId) -> Result<(), ScreenError> {
        let result = self.programs.store().delete_enrollment(enrollment_id);
        let outcome = self.record_enrollment_write(
            WriteAction::Delete,
            result,
            "Enrollment deleted successfully!",
            "Error deleting enrollment",
        );
        if outcome.is_ok() {
            self.reload();
        }
        outcome
    }

    fn record_enrollment_write(
        &mut self,
        action: WriteAction,
        result: RepoResult<()>,
        success: &str,
        failure: &str,
    ) -> Result<(), ScreenError> {
        match result {
            Ok(()) => {
                info!(
                    "event=screen_write module=screen status=ok entity=enrollment action={}",
                    action.past()
                );
                self.alert = Some(Alert::success(success));
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=screen_write module=screen status=error entity=enrollment action={} error={}",
                    action.progressive(),
                    err
                );
                self.alert = Some(Alert::error(failure));
                Err(ScreenError::Write {
                    action,
                    entity: "enrollment",
                    source: err,
                })
            }
        }
    }
}
