use crate::{
    errors::NlqError,
    providers::db::storage::Storage,
    schema::{ColumnSchema, TableSchema},
    types::QueryResult,
};
use async_trait::async_trait;
use gcp_bigquery_client::{
    model::{
        query_request::QueryRequest, query_response::ResultSet,
        table_data_insert_all_request::TableDataInsertAllRequest,
    },
    table::ListOptions,
    Client,
};
use serde_json::{Map, Value};
use std::fmt::{self, Debug};
use tracing::info;

/// A provider for interacting with Google BigQuery.
#[derive(Clone)]
pub struct BigQueryProvider {
    client: Client,
    project_id: String,
}

impl BigQueryProvider {
    /// Creates a new `BigQueryProvider` from application-default credentials.
    pub async fn new(project_id: String) -> Result<Self, NlqError> {
        let client = Client::from_application_default_credentials().await?;
        Ok(Self { client, project_id })
    }
}

impl Debug for BigQueryProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BigQueryProvider")
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Storage for BigQueryProvider {
    fn name(&self) -> &str {
        "BigQuery"
    }

    /// Executes a SQL statement on BigQuery and materializes every row.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult, NlqError> {
        info!("--> Executing BigQuery SQL: {sql}");
        let response = self
            .client
            .job()
            .query(
                &self.project_id,
                QueryRequest {
                    query: sql.to_string(),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| NlqError::Execution(e.to_string()))?;

        let mut results = ResultSet::new_from_query_response(response);
        let column_names = results.column_names();
        let mut rows: Vec<Map<String, Value>> = Vec::new();

        while results.next_row() {
            let mut row_map = Map::new();
            for name in &column_names {
                let value = results
                    .get_json_value_by_name(name)
                    .ok()
                    .flatten()
                    .unwrap_or(Value::Null);
                row_map.insert(name.clone(), value);
            }
            rows.push(row_map);
        }

        Ok(QueryResult::new(rows))
    }

    /// Enumerates the tables of a dataset and fetches each table's columns.
    async fn describe_dataset(&self, dataset_id: &str) -> Result<Vec<TableSchema>, NlqError> {
        let table_list = self
            .client
            .table()
            .list(&self.project_id, dataset_id, ListOptions::default())
            .await?;

        let mut tables = Vec::new();
        for entry in table_list.tables.unwrap_or_default() {
            let table_id = entry.table_reference.table_id;
            let table = self
                .client
                .table()
                .get(&self.project_id, dataset_id, &table_id, None)
                .await?;

            let columns = table
                .schema
                .fields
                .unwrap_or_default()
                .into_iter()
                .map(|field| ColumnSchema {
                    name: field.name,
                    column_type: format!("{:?}", field.r#type).to_uppercase(),
                })
                .collect();

            tables.push(TableSchema {
                table: table_id,
                columns,
            });
        }

        Ok(tables)
    }

    /// Replaces a table's contents via a truncate followed by `insertAll`.
    async fn load_rows(
        &self,
        dataset_id: &str,
        table_id: &str,
        rows: Vec<Map<String, Value>>,
    ) -> Result<usize, NlqError> {
        let row_count = rows.len();
        let mut request = TableDataInsertAllRequest::new();
        for row in rows {
            request.add_row(None, row)?;
        }

        // insertAll appends; truncating first gives a repeated upload the
        // write-truncate semantics of a CSV load job.
        let truncate = format!(
            "TRUNCATE TABLE `{}.{dataset_id}.{table_id}`",
            self.project_id
        );
        self.client
            .job()
            .query(
                &self.project_id,
                QueryRequest {
                    query: truncate,
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| NlqError::Execution(e.to_string()))?;

        info!("Loading {row_count} rows into {}.{dataset_id}.{table_id}", self.project_id);
        let response = self
            .client
            .tabledata()
            .insert_all(&self.project_id, dataset_id, table_id, request)
            .await
            .map_err(|e| NlqError::Execution(e.to_string()))?;

        if let Some(errors) = response.insert_errors {
            if !errors.is_empty() {
                return Err(NlqError::Execution(format!(
                    "insertAll reported {} row errors: {errors:?}",
                    errors.len()
                )));
            }
        }

        Ok(row_count)
    }
}
