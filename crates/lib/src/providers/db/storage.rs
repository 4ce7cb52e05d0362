use crate::{errors::NlqError, schema::TableSchema, types::QueryResult};
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde_json::{Map, Value};
use std::fmt::Debug;

/// A trait for interacting with a warehouse backend.
///
/// This defines a common interface for executing statements, introspecting
/// dataset schemas, and loading rows into tables.
#[async_trait]
pub trait Storage: Send + Sync + DynClone + Debug {
    /// Returns the name of the storage provider (e.g., "BigQuery").
    fn name(&self) -> &str;

    /// Executes a SQL statement, blocking until completion, and materializes
    /// every result row in warehouse column order.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult, NlqError>;

    /// Enumerates every table in a dataset along with its column schemas.
    ///
    /// A dataset with no tables yields an empty list; only warehouse access
    /// failures produce an error.
    async fn describe_dataset(&self, dataset_id: &str) -> Result<Vec<TableSchema>, NlqError>;

    /// Replaces a table's contents with the given rows, returning the number
    /// of rows loaded. A repeated load of the same object must not append.
    async fn load_rows(
        &self,
        dataset_id: &str,
        table_id: &str,
        rows: Vec<Map<String, Value>>,
    ) -> Result<usize, NlqError>;
}

dyn_clone::clone_trait_object!(Storage);
