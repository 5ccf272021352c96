//! Repository layer: the data store contract and its SQLite implementation.
//!
//! # Responsibility
//! - Define per-table data access contracts (list, joined list, create,
//!   update, delete, count).
//! - Isolate SQL details from screens and services.
//!
//! # Invariants
//! - Write paths validate drafts before touching SQL.
//! - Constraint violations surface as `RepoError::Constraint`, never as
//!   panics or silent no-ops.
//! - Missing rows on update/delete surface as `RepoError::NotFound`.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use rusqlite::{Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod application_repo;
pub mod company_repo;
pub mod job_profile_repo;
pub mod stats_repo;
pub mod student_repo;
pub mod training_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every table.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { entity: &'static str, id: Uuid },
    /// Uniqueness, foreign-key or check constraint rejected the write.
    Constraint(String),
    InvalidData(String),
    /// Count filter named a column the table does not expose.
    UnknownColumn { table: &'static str, column: String },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Constraint(message) => write!(f, "constraint violation: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UnknownColumn { table, column } => {
                write!(f, "unknown column `{column}` for table `{table}`")
            }
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match &value {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Self::Constraint(message.clone().unwrap_or_else(|| failure.to_string()))
            }
            _ => Self::Db(DbError::Sqlite(value)),
        }
    }
}

/// Tables owned by the placement store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Companies,
    JobProfiles,
    Students,
    TrainingPrograms,
    TrainingEnrollments,
    Applications,
}

impl Table {
    pub const ALL: [Self; 6] = [
        Self::Companies,
        Self::JobProfiles,
        Self::Students,
        Self::TrainingPrograms,
        Self::TrainingEnrollments,
        Self::Applications,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Companies => "companies",
            Self::JobProfiles => "job_profiles",
            Self::Students => "students",
            Self::TrainingPrograms => "training_programs",
            Self::TrainingEnrollments => "training_enrollments",
            Self::Applications => "applications",
        }
    }

    /// Columns accepted by equality filters.
    pub fn filterable_columns(self) -> &'static [&'static str] {
        match self {
            Self::Companies => &["id", "company_name", "location", "industry_type"],
            Self::JobProfiles => &["id", "company_id", "role"],
            Self::Students => &["id", "roll_number", "branch", "year"],
            Self::TrainingPrograms => &["id", "title", "trainer_name"],
            Self::TrainingEnrollments => &["id", "student_id", "training_id", "completion_status"],
            Self::Applications => &["id", "student_id", "job_id", "application_status"],
        }
    }
}

/// Row ordering for list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListOrder {
    /// `created_at DESC`, insertion order breaking ties.
    #[default]
    NewestFirst,
    /// Case-insensitive by the table's label column (name, role, title).
    Alphabetical,
}

/// `column = value` equality filter used by `count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub column: String,
    pub value: String,
}

impl ColumnFilter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

pub(crate) fn order_clause(order: ListOrder, alias: &str, label_column: &str) -> String {
    match order {
        ListOrder::NewestFirst => format!(" ORDER BY {alias}.created_at DESC, {alias}.rowid DESC"),
        ListOrder::Alphabetical => {
            format!(" ORDER BY {alias}.{label_column} COLLATE NOCASE ASC, {alias}.rowid ASC")
        }
    }
}

/// Builds `alias.col AS prefixcol, ...` so joined rows keep distinct names.
pub(crate) fn select_list(columns: &[&str], alias: &str, prefix: &str) -> String {
    columns
        .iter()
        .map(|column| format!("{alias}.{column} AS {prefix}{column}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn new_id() -> Uuid {
    Uuid::new_v4()
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

pub(crate) fn read_uuid(row: &Row<'_>, column: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    parse_uuid(&text, column)
}

/// Returns `true` when a LEFT JOIN produced no row for `column`'s table.
pub(crate) fn join_is_null(row: &Row<'_>, column: &str) -> RepoResult<bool> {
    Ok(row.get::<_, Option<String>>(column)?.is_none())
}

pub(crate) fn ensure_tables(conn: &Connection, tables: &[Table]) -> RepoResult<()> {
    for table in tables {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table.name()],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table.name()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{order_clause, ListOrder, Table};

    #[test]
    fn table_names_are_unique() {
        let mut names: Vec<_> = Table::ALL.iter().map(|table| table.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Table::ALL.len());
    }

    #[test]
    fn newest_first_breaks_ties_by_insertion() {
        let clause = order_clause(ListOrder::NewestFirst, "s", "name");
        assert!(clause.contains("s.created_at DESC"));
        assert!(clause.contains("s.rowid DESC"));
    }
}
