//! Application repository contract and SQLite implementation.
//!
//! # Invariants
//! - `(student_id, job_id)` is unique; a second application for the same
//!   pair fails with `RepoError::Constraint` and leaves existing rows intact.
//! - Updates only change `application_status`.

use super::company_repo::{parse_company_row, COMPANY_COLUMNS};
use super::job_profile_repo::{parse_job_profile_row, JOB_PROFILE_COLUMNS};
use super::student_repo::{parse_student_row, STUDENT_COLUMNS};
use super::{
    ensure_tables, join_is_null, new_id, order_clause, read_uuid, select_list, ListOrder,
    RepoError, RepoResult, Table,
};
use crate::model::application::{
    Application, ApplicationDetails, ApplicationDraft, ApplicationId, ApplicationStatus,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const APPLICATION_COLUMNS: &[&str] = &[
    "id",
    "student_id",
    "job_id",
    "application_status",
    "created_at",
];

/// Query options for listing applications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationListQuery {
    pub status: Option<ApplicationStatus>,
}

/// Repository interface for application CRUD.
pub trait ApplicationRepository {
    fn create_application(&self, draft: &ApplicationDraft) -> RepoResult<ApplicationId>;
    fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> RepoResult<()>;
    fn get_application(&self, id: ApplicationId) -> RepoResult<Option<Application>>;
    fn list_applications(&self, query: &ApplicationListQuery) -> RepoResult<Vec<Application>>;
    /// Applications joined with student, job profile and company, newest first.
    fn list_application_details(
        &self,
        query: &ApplicationListQuery,
    ) -> RepoResult<Vec<ApplicationDetails>>;
    fn delete_application(&self, id: ApplicationId) -> RepoResult<()>;
}

/// SQLite-backed application repository.
pub struct SqliteApplicationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteApplicationRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(
            conn,
            &[
                Table::Applications,
                Table::Students,
                Table::JobProfiles,
                Table::Companies,
            ],
        )?;
        Ok(Self { conn })
    }
}

impl ApplicationRepository for SqliteApplicationRepository<'_> {
    fn create_application(&self, draft: &ApplicationDraft) -> RepoResult<ApplicationId> {
        draft.validate()?;

        let id = new_id();
        self.conn.execute(
            "INSERT INTO applications (id, student_id, job_id, application_status)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                id.to_string(),
                draft.student_id.to_string(),
                draft.job_id.to_string(),
                draft.application_status.as_str(),
            ],
        )?;
        Ok(id)
    }

    fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE applications SET application_status = ?1 WHERE id = ?2;",
            params![status.as_str(), id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "application",
                id,
            });
        }
        Ok(())
    }

    fn get_application(&self, id: ApplicationId) -> RepoResult<Option<Application>> {
        let sql = format!(
            "SELECT {} FROM applications a WHERE a.id = ?1;",
            select_list(APPLICATION_COLUMNS, "a", "")
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_application_row(row, "")?));
        }
        Ok(None)
    }

    fn list_applications(&self, query: &ApplicationListQuery) -> RepoResult<Vec<Application>> {
        let (filter_sql, bind_values) = status_filter(query);
        let sql = format!(
            "SELECT {} FROM applications a WHERE 1 = 1{filter_sql}{};",
            select_list(APPLICATION_COLUMNS, "a", ""),
            order_clause(ListOrder::NewestFirst, "a", "created_at")
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut applications = Vec::new();
        while let Some(row) = rows.next()? {
            applications.push(parse_application_row(row, "")?);
        }
        Ok(applications)
    }

    fn list_application_details(
        &self,
        query: &ApplicationListQuery,
    ) -> RepoResult<Vec<ApplicationDetails>> {
        let (filter_sql, bind_values) = status_filter(query);
        let sql = format!(
            "SELECT {}, {}, {}, {}
             FROM applications a
             LEFT JOIN students s ON s.id = a.student_id
             LEFT JOIN job_profiles j ON j.id = a.job_id
             LEFT JOIN companies c ON c.id = j.company_id
             WHERE 1 = 1{filter_sql}{};",
            select_list(APPLICATION_COLUMNS, "a", "a_"),
            select_list(STUDENT_COLUMNS, "s", "s_"),
            select_list(JOB_PROFILE_COLUMNS, "j", "j_"),
            select_list(COMPANY_COLUMNS, "c", "c_"),
            order_clause(ListOrder::NewestFirst, "a", "created_at")
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut details = Vec::new();
        while let Some(row) = rows.next()? {
            let student = if join_is_null(row, "s_id")? {
                None
            } else {
                Some(parse_student_row(row, "s_")?)
            };
            let job = if join_is_null(row, "j_id")? {
                None
            } else {
                Some(parse_job_profile_row(row, "j_")?)
            };
            let company = if join_is_null(row, "c_id")? {
                None
            } else {
                Some(parse_company_row(row, "c_")?)
            };
            details.push(ApplicationDetails {
                application: parse_application_row(row, "a_")?,
                student,
                job,
                company,
            });
        }
        Ok(details)
    }

    fn delete_application(&self, id: ApplicationId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM applications WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "application",
                id,
            });
        }
        Ok(())
    }
}

fn status_filter(query: &ApplicationListQuery) -> (&'static str, Vec<Value>) {
    match query.status {
        Some(status) => (
            " AND a.application_status = ?",
            vec![Value::Text(status.as_str().to_string())],
        ),
        None => ("", Vec::new()),
    }
}

fn parse_application_row(row: &Row<'_>, prefix: &str) -> RepoResult<Application> {
    let column = |name: &str| format!("{prefix}{name}");

    let status_text: String = row.get(column("application_status").as_str())?;
    let application_status = ApplicationStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid application status `{status_text}` in applications.application_status"
        ))
    })?;

    Ok(Application {
        id: read_uuid(row, &column("id"))?,
        student_id: read_uuid(row, &column("student_id"))?,
        job_id: read_uuid(row, &column("job_id"))?,
        application_status,
        created_at: row.get(column("created_at").as_str())?,
    })
}
