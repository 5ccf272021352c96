//! Job profile repository contract and SQLite implementation.
//!
//! # Invariants
//! - A job profile cannot reference a missing company (foreign key).
//! - Joined listings keep job profiles whose company row is gone as
//!   `company: None` rather than dropping them.

use super::company_repo::{parse_company_row, COMPANY_COLUMNS};
use super::{
    ensure_tables, join_is_null, new_id, order_clause, read_uuid, select_list, ListOrder,
    RepoError, RepoResult, Table,
};
use crate::model::company::CompanyId;
use crate::model::job_profile::{JobProfile, JobProfileDraft, JobProfileId, JobProfileWithCompany};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

pub(crate) const JOB_PROFILE_COLUMNS: &[&str] =
    &["id", "company_id", "role", "package", "created_at"];

/// Query options for listing job profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobProfileListQuery {
    pub order: ListOrder,
    pub company_id: Option<CompanyId>,
}

/// Repository interface for job profile CRUD.
pub trait JobProfileRepository {
    fn create_job_profile(&self, draft: &JobProfileDraft) -> RepoResult<JobProfileId>;
    fn update_job_profile(&self, id: JobProfileId, draft: &JobProfileDraft) -> RepoResult<()>;
    fn get_job_profile(&self, id: JobProfileId) -> RepoResult<Option<JobProfile>>;
    fn list_job_profiles(&self, query: &JobProfileListQuery) -> RepoResult<Vec<JobProfile>>;
    /// Job profiles joined with their company.
    fn list_job_profiles_with_company(
        &self,
        order: ListOrder,
    ) -> RepoResult<Vec<JobProfileWithCompany>>;
    fn delete_job_profile(&self, id: JobProfileId) -> RepoResult<()>;
}

/// SQLite-backed job profile repository.
pub struct SqliteJobProfileRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteJobProfileRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &[Table::JobProfiles, Table::Companies])?;
        Ok(Self { conn })
    }
}

impl JobProfileRepository for SqliteJobProfileRepository<'_> {
    fn create_job_profile(&self, draft: &JobProfileDraft) -> RepoResult<JobProfileId> {
        draft.validate()?;

        let id = new_id();
        self.conn.execute(
            "INSERT INTO job_profiles (id, company_id, role, package)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                id.to_string(),
                draft.company_id.to_string(),
                draft.role.trim(),
                draft.package,
            ],
        )?;

        Ok(id)
    }

    fn update_job_profile(&self, id: JobProfileId, draft: &JobProfileDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE job_profiles
             SET
                company_id = ?1,
                role = ?2,
                package = ?3
             WHERE id = ?4;",
            params![
                draft.company_id.to_string(),
                draft.role.trim(),
                draft.package,
                id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "job profile",
                id,
            });
        }

        Ok(())
    }

    fn get_job_profile(&self, id: JobProfileId) -> RepoResult<Option<JobProfile>> {
        let sql = format!(
            "SELECT {} FROM job_profiles j WHERE j.id = ?1;",
            select_list(JOB_PROFILE_COLUMNS, "j", "")
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_job_profile_row(row, "")?));
        }
        Ok(None)
    }

    fn list_job_profiles(&self, query: &JobProfileListQuery) -> RepoResult<Vec<JobProfile>> {
        let mut sql = format!(
            "SELECT {} FROM job_profiles j WHERE 1 = 1",
            select_list(JOB_PROFILE_COLUMNS, "j", "")
        );
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(company_id) = query.company_id {
            sql.push_str(" AND j.company_id = ?");
            bind_values.push(Value::Text(company_id.to_string()));
        }
        sql.push_str(&order_clause(query.order, "j", "role"));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut jobs = Vec::new();
        while let Some(row) = rows.next()? {
            jobs.push(parse_job_profile_row(row, "")?);
        }
        Ok(jobs)
    }

    fn list_job_profiles_with_company(
        &self,
        order: ListOrder,
    ) -> RepoResult<Vec<JobProfileWithCompany>> {
        let sql = format!(
            "SELECT {}, {}
             FROM job_profiles j
             LEFT JOIN companies c ON c.id = j.company_id{};",
            select_list(JOB_PROFILE_COLUMNS, "j", "j_"),
            select_list(COMPANY_COLUMNS, "c", "c_"),
            order_clause(order, "j", "role")
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut jobs = Vec::new();
        while let Some(row) = rows.next()? {
            let company = if join_is_null(row, "c_id")? {
                None
            } else {
                Some(parse_company_row(row, "c_")?)
            };
            jobs.push(JobProfileWithCompany {
                job: parse_job_profile_row(row, "j_")?,
                company,
            });
        }
        Ok(jobs)
    }

    fn delete_job_profile(&self, id: JobProfileId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM job_profiles WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "job profile",
                id,
            });
        }
        Ok(())
    }
}

pub(crate) fn parse_job_profile_row(row: &Row<'_>, prefix: &str) -> RepoResult<JobProfile> {
    let column = |name: &str| format!("{prefix}{name}");
    Ok(JobProfile {
        id: read_uuid(row, &column("id"))?,
        company_id: read_uuid(row, &column("company_id"))?,
        role: row.get(column("role").as_str())?,
        package: row.get(column("package").as_str())?,
        created_at: row.get(column("created_at").as_str())?,
    })
}
