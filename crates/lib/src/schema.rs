//! # Dataset Schema Introspection
//!
//! Types describing the shape of a warehouse dataset at introspection time.
//! A description is built fresh per request and never cached, so it may be
//! stale relative to concurrent DDL in the warehouse.

use serde::{Deserialize, Serialize};

/// A single column of a warehouse table: its name and declared type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnSchema {
    pub name: String,
    pub column_type: String,
}

/// The schema of one table in a dataset, with columns in warehouse order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSchema {
    pub table: String,
    pub columns: Vec<ColumnSchema>,
}

/// The outcome of introspecting a dataset.
///
/// Introspection is best-effort: a failure to reach the warehouse degrades
/// the prompt context instead of failing the whole request. `Degraded` is a
/// distinct variant rather than a sentinel string so callers can tell a
/// legitimately empty dataset (`Available` with no tables) apart from a
/// failed introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaContext {
    Available(Vec<TableSchema>),
    Degraded(String),
}

/// The text standing in for the schema block when introspection failed.
pub const SCHEMA_UNAVAILABLE: &str = "Schema information unavailable";

impl SchemaContext {
    /// Renders the schema as the multi-line text block embedded in prompts.
    ///
    /// One line `Table: <name>` per table, one line `  - <name>: <type>` per
    /// column, with a blank line separating tables. An empty dataset renders
    /// as the empty string; a degraded context renders as the fixed
    /// unavailable sentinel.
    pub fn render(&self) -> String {
        match self {
            SchemaContext::Available(tables) => {
                let mut lines = Vec::new();
                for table in tables {
                    lines.push(format!("Table: {}", table.table));
                    for column in &table.columns {
                        lines.push(format!("  - {}: {}", column.name, column.column_type));
                    }
                    lines.push(String::new());
                }
                lines.join("\n")
            }
            SchemaContext::Degraded(reason) => {
                tracing::warn!("Schema introspection degraded: {reason}");
                SCHEMA_UNAVAILABLE.to_string()
            }
        }
    }
}
