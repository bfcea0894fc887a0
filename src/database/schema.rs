/*!
 * Table introspection.
 *
 * Reads table existence and declared column types from SQLite's catalog.
 */

use anyhow::{Context, Result};
use log::debug;
use rusqlite::Connection;

/// One column as declared in the table definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Declared type, exactly as written (may be empty)
    pub declared_type: String,
    /// Whether the column is part of the primary key
    pub primary_key: bool,
}

/// Quote an identifier for interpolation into SQL
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Check whether a table exists
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [table],
            |row| row.get(0),
        )
        .with_context(|| format!("Failed to check existence of table {}", table))?;

    Ok(count > 0)
}

/// List the columns of a table in definition order
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<ColumnInfo>> {
    let sql = format!("PRAGMA table_info({})", quote_identifier(table));
    let mut stmt = conn
        .prepare(&sql)
        .with_context(|| format!("Failed to inspect columns of table {}", table))?;

    let columns = stmt
        .query_map([], |row| {
            Ok(ColumnInfo {
                name: row.get(1)?,
                declared_type: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                primary_key: row.get::<_, i64>(5)? > 0,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!("Table {} has {} column(s)", table, columns.len());
    Ok(columns)
}
