//! Company repository contract and SQLite implementation.
//!
//! # Invariants
//! - Deleting a company cascades to its job profiles and their applications.

use super::{
    ensure_tables, new_id, order_clause, read_uuid, select_list, ListOrder, RepoError,
    RepoResult, Table,
};
use crate::model::company::{Company, CompanyDraft, CompanyId};
use rusqlite::{params, Connection, Row};

pub(crate) const COMPANY_COLUMNS: &[&str] = &[
    "id",
    "company_name",
    "location",
    "industry_type",
    "hr_name",
    "hr_contact",
    "created_at",
];

/// Repository interface for company CRUD.
pub trait CompanyRepository {
    fn create_company(&self, draft: &CompanyDraft) -> RepoResult<CompanyId>;
    fn update_company(&self, id: CompanyId, draft: &CompanyDraft) -> RepoResult<()>;
    fn get_company(&self, id: CompanyId) -> RepoResult<Option<Company>>;
    fn list_companies(&self, order: ListOrder) -> RepoResult<Vec<Company>>;
    fn delete_company(&self, id: CompanyId) -> RepoResult<()>;
}

/// SQLite-backed company repository.
pub struct SqliteCompanyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCompanyRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &[Table::Companies])?;
        Ok(Self { conn })
    }
}

impl CompanyRepository for SqliteCompanyRepository<'_> {
    fn create_company(&self, draft: &CompanyDraft) -> RepoResult<CompanyId> {
        draft.validate()?;

        let id = new_id();
        self.conn.execute(
            "INSERT INTO companies (
                id,
                company_name,
                location,
                industry_type,
                hr_name,
                hr_contact
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                id.to_string(),
                draft.company_name.trim(),
                draft.location.trim(),
                draft.industry_type.trim(),
                draft.hr_name.trim(),
                draft.hr_contact.trim(),
            ],
        )?;

        Ok(id)
    }

    fn update_company(&self, id: CompanyId, draft: &CompanyDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE companies
             SET
                company_name = ?1,
                location = ?2,
                industry_type = ?3,
                hr_name = ?4,
                hr_contact = ?5
             WHERE id = ?6;",
            params![
                draft.company_name.trim(),
                draft.location.trim(),
                draft.industry_type.trim(),
                draft.hr_name.trim(),
                draft.hr_contact.trim(),
                id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "company",
                id,
            });
        }

        Ok(())
    }

    fn get_company(&self, id: CompanyId) -> RepoResult<Option<Company>> {
        let sql = format!(
            "SELECT {} FROM companies c WHERE c.id = ?1;",
            select_list(COMPANY_COLUMNS, "c", "")
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_company_row(row, "")?));
        }
        Ok(None)
    }

    fn list_companies(&self, order: ListOrder) -> RepoResult<Vec<Company>> {
        let sql = format!(
            "SELECT {} FROM companies c{};",
            select_list(COMPANY_COLUMNS, "c", ""),
            order_clause(order, "c", "company_name")
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut companies = Vec::new();
        while let Some(row) = rows.next()? {
            companies.push(parse_company_row(row, "")?);
        }
        Ok(companies)
    }

    fn delete_company(&self, id: CompanyId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM companies WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "company",
                id,
            });
        }
        Ok(())
    }
}

pub(crate) fn parse_company_row(row: &Row<'_>, prefix: &str) -> RepoResult<Company> {
    let column = |name: &str| format!("{prefix}{name}");
    Ok(Company {
        id: read_uuid(row, &column("id"))?,
        company_name: row.get(column("company_name").as_str())?,
        location: row.get(column("location").as_str())?,
        industry_type: row.get(column("industry_type").as_str())?,
        hr_name: row.get(column("hr_name").as_str())?,
        hr_contact: row.get(column("hr_contact").as_str())?,
        created_at: row.get(column("created_at").as_str())?,
    })
}
