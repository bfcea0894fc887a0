/*!
 * Database module for inspecting and repairing translatable tables.
 *
 * This module provides SQLite access for:
 * - Table and column introspection
 * - Bulk reads of rows as attribute maps
 * - Per-row column updates
 */

pub mod connection;
pub mod repository;
pub mod schema;

// Re-export main types
pub use connection::DatabaseConnection;
pub use repository::{Condition, Repository};
pub use schema::ColumnInfo;
