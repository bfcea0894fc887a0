/*!
 * Repository layer for row access.
 *
 * This module reads whole rows from arbitrary tables as JSON-valued attribute
 * maps and writes individual columns back, converting between SQLite values
 * and `serde_json::Value`.
 */

use anyhow::{Context, Result};
use log::debug;
use rusqlite::params_from_iter;
use rusqlite::types::Value as SqlValue;
use serde_json::{Map, Number, Value};

use super::connection::DatabaseConnection;
use super::schema::quote_identifier;

/// A null-safe equality condition on one column
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub operator: ConditionOperator,
    pub value: Value,
}

/// Supported comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOperator {
    Equal,
    NotEqual,
}

impl Condition {
    pub fn eq(column: impl Into<String>, value: Value) -> Self {
        Self {
            column: column.into(),
            operator: ConditionOperator::Equal,
            value,
        }
    }

    pub fn ne(column: impl Into<String>, value: Value) -> Self {
        Self {
            column: column.into(),
            operator: ConditionOperator::NotEqual,
            value,
        }
    }

    fn to_sql(&self, index: usize) -> String {
        let operator = match self.operator {
            ConditionOperator::Equal => "IS",
            ConditionOperator::NotEqual => "IS NOT",
        };
        format!("{} {} ?{}", quote_identifier(&self.column), operator, index)
    }
}

/// Convert a SQLite value into JSON
pub fn sql_to_json(value: SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(i) => Value::Number(i.into()),
        SqlValue::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        SqlValue::Text(text) => Value::String(text),
        SqlValue::Blob(bytes) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
    }
}

/// Convert a JSON value into a SQLite parameter
pub fn json_to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => n.as_f64().map(SqlValue::Real).unwrap_or(SqlValue::Null),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

/// Row access for one database
#[derive(Debug, Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Get the underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Read every row of `table` matching all `conditions`
    pub fn fetch_rows(&self, table: &str, conditions: &[Condition]) -> Result<Vec<Map<String, Value>>> {
        let mut sql = format!("SELECT * FROM {}", quote_identifier(table));
        if !conditions.is_empty() {
            let clauses: Vec<String> = conditions
                .iter()
                .enumerate()
                .map(|(i, condition)| condition.to_sql(i + 1))
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        self.db.execute(|conn| {
            let mut stmt = conn
                .prepare(&sql)
                .with_context(|| format!("Failed to query table {}", table))?;
            let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
            let params = params_from_iter(conditions.iter().map(|c| json_to_sql(&c.value)));

            let rows = stmt
                .query_map(params, |row| {
                    let mut attributes = Map::new();
                    for (index, name) in names.iter().enumerate() {
                        attributes.insert(name.clone(), sql_to_json(row.get::<_, SqlValue>(index)?));
                    }
                    Ok(attributes)
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            debug!("Fetched {} row(s) from {}", rows.len(), table);
            Ok(rows)
        })
    }

    /// Write `updates` into the row whose `key_column` equals `key`
    ///
    /// Returns the number of rows changed.
    pub fn update_row(
        &self,
        table: &str,
        key_column: &str,
        key: &Value,
        updates: &Map<String, Value>,
    ) -> Result<usize> {
        if updates.is_empty() {
            return Ok(0);
        }

        let assignments: Vec<String> = updates
            .keys()
            .enumerate()
            .map(|(i, column)| format!("{} = ?{}", quote_identifier(column), i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            quote_identifier(table),
            assignments.join(", "),
            quote_identifier(key_column),
            updates.len() + 1
        );

        let params: Vec<SqlValue> = updates
            .values()
            .chain(std::iter::once(key))
            .map(json_to_sql)
            .collect();

        self.db.execute(|conn| {
            let changed = conn
                .execute(&sql, params_from_iter(params))
                .with_context(|| format!("Failed to update row {} of table {}", key, table))?;
            Ok(changed)
        })
    }
}
