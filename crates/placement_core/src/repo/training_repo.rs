//! Training program and enrollment repository contract and SQLite
//! implementation.
//!
//! # Responsibility
//! - Program CRUD.
//! - Enrollment create/update/delete and the enrollment-with-student listing.
//!
//! # Invariants
//! - `(student_id, training_id)` is unique; duplicates surface as
//!   `RepoError::Constraint`.
//! - Deleting a program cascades to its enrollments.

use super::student_repo::{parse_student_row, STUDENT_COLUMNS};
use super::{
    ensure_tables, join_is_null, new_id, order_clause, read_uuid, select_list, ListOrder,
    RepoError, RepoResult, Table,
};
use crate::model::training::{
    CompletionStatus, EnrollmentDraft, EnrollmentId, EnrollmentWithStudent, TrainingEnrollment,
    TrainingProgram, TrainingProgramDraft, TrainingProgramId,
};
use crate::model::validation::{normalize_optional, require_range};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

pub(crate) const PROGRAM_COLUMNS: &[&str] = &[
    "id",
    "title",
    "trainer_name",
    "start_date",
    "end_date",
    "description",
    "created_at",
];

pub(crate) const ENROLLMENT_COLUMNS: &[&str] = &[
    "id",
    "student_id",
    "training_id",
    "attendance_percentage",
    "completion_status",
    "created_at",
];

/// Query options for listing enrollments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentListQuery {
    pub training_id: Option<TrainingProgramId>,
}

/// Repository interface for training programs and enrollments.
pub trait TrainingRepository {
    fn create_program(&self, draft: &TrainingProgramDraft) -> RepoResult<TrainingProgramId>;
    fn update_program(&self, id: TrainingProgramId, draft: &TrainingProgramDraft)
        -> RepoResult<()>;
    fn get_program(&self, id: TrainingProgramId) -> RepoResult<Option<TrainingProgram>>;
    fn list_programs(&self, order: ListOrder) -> RepoResult<Vec<TrainingProgram>>;
    fn delete_program(&self, id: TrainingProgramId) -> RepoResult<()>;

    fn create_enrollment(&self, draft: &EnrollmentDraft) -> RepoResult<EnrollmentId>;
    /// Records attendance and completion progress.
    fn update_enrollment(
        &self,
        id: EnrollmentId,
        attendance_percentage: f64,
        completion_status: CompletionStatus,
    ) -> RepoResult<()>;
    /// Enrollments joined with their student, newest first.
    fn list_enrollment_details(
        &self,
        query: &EnrollmentListQuery,
    ) -> RepoResult<Vec<EnrollmentWithStudent>>;
    fn delete_enrollment(&self, id: EnrollmentId) -> RepoResult<()>;
}

/// SQLite-backed training repository.
pub struct SqliteTrainingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTrainingRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(
            conn,
            &[
                Table::TrainingPrograms,
                Table::TrainingEnrollments,
                Table::Students,
            ],
        )?;
        Ok(Self { conn })
    }
}

impl TrainingRepository for SqliteTrainingRepository<'_> {
    fn create_program(&self, draft: &TrainingProgramDraft) -> RepoResult<TrainingProgramId> {
        draft.validate()?;

        let id = new_id();
        self.conn.execute(
            "INSERT INTO training_programs (
                id,
                title,
                trainer_name,
                start_date,
                end_date,
                description
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                id.to_string(),
                draft.title.trim(),
                draft.trainer_name.trim(),
                draft.start_date.trim(),
                draft.end_date.trim(),
                normalize_optional(draft.description.as_deref()),
            ],
        )?;

        Ok(id)
    }

    fn update_program(
        &self,
        id: TrainingProgramId,
        draft: &TrainingProgramDraft,
    ) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE training_programs
             SET
                title = ?1,
                trainer_name = ?2,
                start_date = ?3,
                end_date = ?4,
                description = ?5
             WHERE id = ?6;",
            params![
                draft.title.trim(),
                draft.trainer_name.trim(),
                draft.start_date.trim(),
                draft.end_date.trim(),
                normalize_optional(draft.description.as_deref()),
                id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "training program",
                id,
            });
        }

        Ok(())
    }

    fn get_program(&self, id: TrainingProgramId) -> RepoResult<Option<TrainingProgram>> {
        let sql = format!(
            "SELECT {} FROM training_programs p WHERE p.id = ?1;",
            select_list(PROGRAM_COLUMNS, "p", "")
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_program_row(row, "")?));
        }
        Ok(None)
    }

    fn list_programs(&self, order: ListOrder) -> RepoResult<Vec<TrainingProgram>> {
        let sql = format!(
            "SELECT {} FROM training_programs p{};",
            select_list(PROGRAM_COLUMNS, "p", ""),
            order_clause(order, "p", "title")
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut programs = Vec::new();
        while let Some(row) = rows.next()? {
            programs.push(parse_program_row(row, "")?);
        }
        Ok(programs)
    }

    fn delete_program(&self, id: TrainingProgramId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM training_programs WHERE id = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "training program",
                id,
            });
        }
        Ok(())
    }

    fn create_enrollment(&self, draft: &EnrollmentDraft) -> RepoResult<EnrollmentId> {
        draft.validate()?;

        let id = new_id();
        self.conn.execute(
            "INSERT INTO training_enrollments (
                id,
                student_id,
                training_id,
                attendance_percentage,
                completion_status
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                id.to_string(),
                draft.student_id.to_string(),
                draft.training_id.to_string(),
                draft.attendance_percentage,
                draft.completion_status.as_str(),
            ],
        )?;

        Ok(id)
    }

    fn update_enrollment(
        &self,
        id: EnrollmentId,
        attendance_percentage: f64,
        completion_status: CompletionStatus,
    ) -> RepoResult<()> {
        require_range("attendance_percentage", attendance_percentage, 0.0, 100.0)?;

        let changed = self.conn.execute(
            "UPDATE training_enrollments
             SET
                attendance_percentage = ?1,
                completion_status = ?2
             WHERE id = ?3;",
            params![
                attendance_percentage,
                completion_status.as_str(),
                id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "enrollment",
                id,
            });
        }

        Ok(())
    }

    fn list_enrollment_details(
        &self,
        query: &EnrollmentListQuery,
    ) -> RepoResult<Vec<EnrollmentWithStudent>> {
        let mut sql = format!(
            "SELECT {}, {}
             FROM training_enrollments e
             LEFT JOIN students s ON s.id = e.student_id
             WHERE 1 = 1",
            select_list(ENROLLMENT_COLUMNS, "e", "e_"),
            select_list(STUDENT_COLUMNS, "s", "s_"),
        );
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(training_id) = query.training_id {
            sql.push_str(" AND e.training_id = ?");
            bind_values.push(Value::Text(training_id.to_string()));
        }
        sql.push_str(&order_clause(ListOrder::NewestFirst, "e", "created_at"));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut enrollments = Vec::new();
        while let Some(row) = rows.next()? {
            let student = if join_is_null(row, "s_id")? {
                None
            } else {
                Some(parse_student_row(row, "s_")?)
            };
            enrollments.push(EnrollmentWithStudent {
                enrollment: parse_enrollment_row(row, "e_")?,
                student,
            });
        }
        Ok(enrollments)
    }

    fn delete_enrollment(&self, id: EnrollmentId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM training_enrollments WHERE id = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "enrollment",
                id,
            });
        }
        Ok(())
    }
}

fn parse_program_row(row: &Row<'_>, prefix: &str) -> RepoResult<TrainingProgram> {
    let column = |name: &str| format!("{prefix}{name}");
    Ok(TrainingProgram {
        id: read_uuid(row, &column("id"))?,
        title: row.get(column("title").as_str())?,
        trainer_name: row.get(column("trainer_name").as_str())?,
        start_date: row.get(column("start_date").as_str())?,
        end_date: row.get(column("end_date").as_str())?,
        description: row.get(column("description").as_str())?,
        created_at: row.get(column("created_at").as_str())?,
    })
}

fn parse_enrollment_row(row: &Row<'_>, prefix: &str) -> RepoResult<TrainingEnrollment> {
    let column = |name: &str| format!("{prefix}{name}");

    let status_text: String = row.get(column("completion_status").as_str())?;
    let completion_status = CompletionStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid completion status `{status_text}` in training_enrollments.completion_status"
        ))
    })?;

    Ok(TrainingEnrollment {
        id: read_uuid(row, &column("id"))?,
        student_id: read_uuid(row, &column("student_id"))?,
        training_id: read_uuid(row, &column("training_id"))?,
        attendance_percentage: row.get(column("attendance_percentage").as_str())?,
        completion_status,
        created_at: row.get(column("created_at").as_str())?,
    })
}
