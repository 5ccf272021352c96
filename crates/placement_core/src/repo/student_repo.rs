//! Student repository contract and SQLite implementation.
//!
//! # Invariants
//! - `roll_number` uniqueness is enforced by the store and reported as
//!   `RepoError::Constraint`.
//! - Deleting a student cascades to enrollments and applications.

use super::{
    ensure_tables, new_id, order_clause, read_uuid, select_list, ListOrder, RepoError,
    RepoResult, Table,
};
use crate::model::student::{Student, StudentDraft, StudentId};
use crate::model::validation::normalize_optional;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

pub(crate) const STUDENT_COLUMNS: &[&str] = &[
    "id",
    "name",
    "roll_number",
    "branch",
    "year",
    "cgpa",
    "email",
    "phone_number",
    "resume_link",
    "created_at",
];

/// Query options for listing students.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentListQuery {
    pub order: ListOrder,
    /// Exact branch match.
    pub branch: Option<String>,
}

/// Repository interface for student CRUD.
pub trait StudentRepository {
    fn create_student(&self, draft: &StudentDraft) -> RepoResult<StudentId>;
    fn update_student(&self, id: StudentId, draft: &StudentDraft) -> RepoResult<()>;
    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>>;
    fn list_students(&self, query: &StudentListQuery) -> RepoResult<Vec<Student>>;
    fn delete_student(&self, id: StudentId) -> RepoResult<()>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &[Table::Students])?;
        Ok(Self { conn })
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn create_student(&self, draft: &StudentDraft) -> RepoResult<StudentId> {
        draft.validate()?;

        let id = new_id();
        self.conn.execute(
            "INSERT INTO students (
                id,
                name,
                roll_number,
                branch,
                year,
                cgpa,
                email,
                phone_number,
                resume_link
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                id.to_string(),
                draft.name.trim(),
                draft.roll_number.trim(),
                draft.branch.trim(),
                i64::from(draft.year),
                draft.cgpa,
                draft.email.trim(),
                draft.phone_number.trim(),
                normalize_optional(draft.resume_link.as_deref()),
            ],
        )?;

        Ok(id)
    }

    fn update_student(&self, id: StudentId, draft: &StudentDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE students
             SET
                name = ?1,
                roll_number = ?2,
                branch = ?3,
                year = ?4,
                cgpa = ?5,
                email = ?6,
                phone_number = ?7,
                resume_link = ?8
             WHERE id = ?9;",
            params![
                draft.name.trim(),
                draft.roll_number.trim(),
                draft.branch.trim(),
                i64::from(draft.year),
                draft.cgpa,
                draft.email.trim(),
                draft.phone_number.trim(),
                normalize_optional(draft.resume_link.as_deref()),
                id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "student",
                id,
            });
        }

        Ok(())
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let sql = format!(
            "SELECT {} FROM students s WHERE s.id = ?1;",
            select_list(STUDENT_COLUMNS, "s", "")
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row, "")?));
        }
        Ok(None)
    }

    fn list_students(&self, query: &StudentListQuery) -> RepoResult<Vec<Student>> {
        let mut sql = format!(
            "SELECT {} FROM students s WHERE 1 = 1",
            select_list(STUDENT_COLUMNS, "s", "")
        );
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(branch) = query.branch.as_ref() {
            sql.push_str(" AND s.branch = ?");
            bind_values.push(Value::Text(branch.clone()));
        }
        sql.push_str(&order_clause(query.order, "s", "name"));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row, "")?);
        }
        Ok(students)
    }

    fn delete_student(&self, id: StudentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM students WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "student",
                id,
            });
        }
        Ok(())
    }
}

pub(crate) fn parse_student_row(row: &Row<'_>, prefix: &str) -> RepoResult<Student> {
    let column = |name: &str| format!("{prefix}{name}");

    let year_value: i64 = row.get(column("year").as_str())?;
    let year = u8::try_from(year_value)
        .map_err(|_| RepoError::InvalidData(format!("invalid year `{year_value}` in students.year")))?;

    Ok(Student {
        id: read_uuid(row, &column("id"))?,
        name: row.get(column("name").as_str())?,
        roll_number: row.get(column("roll_number").as_str())?,
        branch: row.get(column("branch").as_str())?,
        year,
        cgpa: row.get(column("cgpa").as_str())?,
        email: row.get(column("email").as_str())?,
        phone_number: row.get(column("phone_number").as_str())?,
        resume_link: row.get(column("resume_link").as_str())?,
        created_at: row.get(column("created_at").as_str())?,
    })
}
