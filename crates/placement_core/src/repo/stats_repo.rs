//! Read-only projections backing the dashboard.
//!
//! # Responsibility
//! - Row counts with optional allow-listed equality filter.
//! - Single-column projections (packages, branches, statuses).
//!
//! # Invariants
//! - Filter columns are checked against `Table::filterable_columns` before
//!   being spliced into SQL; values are always bound.
//! - Branch values come back in insertion order.

use super::{ColumnFilter, RepoError, RepoResult, Table};
use rusqlite::Connection;

/// Read interface consumed by the dashboard service.
pub trait StatsRepository {
    fn count(&self, table: Table, filter: Option<&ColumnFilter>) -> RepoResult<u64>;
    fn job_packages(&self) -> RepoResult<Vec<f64>>;
    fn student_branches(&self) -> RepoResult<Vec<String>>;
    fn application_statuses(&self) -> RepoResult<Vec<String>>;
}

/// SQLite-backed stats repository.
pub struct SqliteStatsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStatsRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn column_values<T: rusqlite::types::FromSql>(&self, sql: &str) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut values = Vec::new();
        while let Some(row) = rows.next()? {
            values.push(row.get(0)?);
        }
        Ok(values)
    }
}

impl StatsRepository for SqliteStatsRepository<'_> {
    fn count(&self, table: Table, filter: Option<&ColumnFilter>) -> RepoResult<u64> {
        let count: i64 = match filter {
            Some(filter) => {
                if !table
                    .filterable_columns()
                    .contains(&filter.column.as_str())
                {
                    return Err(RepoError::UnknownColumn {
                        table: table.name(),
                        column: filter.column.clone(),
                    });
                }
                self.conn.query_row(
                    &format!(
                        "SELECT COUNT(*) FROM {} WHERE {} = ?1;",
                        table.name(),
                        filter.column
                    ),
                    [filter.value.as_str()],
                    |row| row.get(0),
                )?
            }
            None => self.conn.query_row(
                &format!("SELECT COUNT(*) FROM {};", table.name()),
                [],
                |row| row.get(0),
            )?,
        };
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count {count}")))
    }

    fn job_packages(&self) -> RepoResult<Vec<f64>> {
        self.column_values("SELECT package FROM job_profiles ORDER BY created_at ASC, rowid ASC;")
    }

    fn student_branches(&self) -> RepoResult<Vec<String>> {
        self.column_values("SELECT branch FROM students ORDER BY created_at ASC, rowid ASC;")
    }

    fn application_statuses(&self) -> RepoResult<Vec<String>> {
        self.column_values(
            "SELECT application_status FROM applications ORDER BY created_at ASC, rowid ASC;",
        )
    }
}
