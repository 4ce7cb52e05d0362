#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared mock providers for exercising the pipeline logic without touching
//! real external services.

use async_trait::async_trait;
use nlq::providers::{ai::AiProvider, db::storage::Storage};
use nlq::schema::{ColumnSchema, TableSchema};
use nlq::types::QueryResult;
use nlq::NlqError;
use serde_json::{Map, Value};
use std::sync::{Arc, Once, RwLock};

static INIT: Once = Once::new();

/// Initializes the tracing subscriber for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt::init();
    });
}

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    pub call_history: Arc<RwLock<Vec<String>>>,
    pub responses: Arc<RwLock<Vec<String>>>,
}

impl MockAiProvider {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            call_history: Arc::new(RwLock::new(Vec::new())),
            responses: Arc::new(RwLock::new(responses.into_iter().rev().collect())),
        }
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, NlqError> {
        self.call_history.write().unwrap().push(prompt.to_string());
        if let Some(response) = self.responses.write().unwrap().pop() {
            Ok(response)
        } else {
            Ok("SELECT 1".to_string())
        }
    }
}

// --- Mock Storage Provider ---

#[derive(Clone, Debug)]
pub struct MockStorageProvider {
    pub executed_sql: Arc<RwLock<Vec<String>>>,
    pub loaded_rows: Arc<RwLock<Vec<Map<String, Value>>>>,
    pub tables: Vec<TableSchema>,
    pub fail_introspection: bool,
    pub fail_execution: bool,
}

impl MockStorageProvider {
    pub fn new() -> Self {
        Self {
            executed_sql: Arc::new(RwLock::new(Vec::new())),
            loaded_rows: Arc::new(RwLock::new(Vec::new())),
            tables: vec![titanic_schema()],
            fail_introspection: false,
            fail_execution: false,
        }
    }

    pub fn with_tables(mut self, tables: Vec<TableSchema>) -> Self {
        self.tables = tables;
        self
    }

    pub fn failing_introspection(mut self) -> Self {
        self.fail_introspection = true;
        self
    }

    pub fn failing_execution(mut self) -> Self {
        self.fail_execution = true;
        self
    }
}

impl Default for MockStorageProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MockStorageProvider {
    fn name(&self) -> &str {
        "MockDB"
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult, NlqError> {
        self.executed_sql.write().unwrap().push(sql.to_string());
        if self.fail_execution {
            return Err(NlqError::Execution("Syntax error: Unexpected keyword".to_string()));
        }
        let mut row = Map::new();
        row.insert("f0_".to_string(), Value::from(1));
        Ok(QueryResult::new(vec![row]))
    }

    async fn describe_dataset(&self, _dataset_id: &str) -> Result<Vec<TableSchema>, NlqError> {
        if self.fail_introspection {
            return Err(NlqError::Execution("dataset not reachable".to_string()));
        }
        Ok(self.tables.clone())
    }

    async fn load_rows(
        &self,
        _dataset_id: &str,
        _table_id: &str,
        rows: Vec<Map<String, Value>>,
    ) -> Result<usize, NlqError> {
        let count = rows.len();
        // Replace semantics: a load overwrites whatever was there before.
        *self.loaded_rows.write().unwrap() = rows;
        Ok(count)
    }
}

/// The Titanic passenger table schema used across tests.
pub fn titanic_schema() -> TableSchema {
    TableSchema {
        table: "titanic".to_string(),
        columns: vec![
            ColumnSchema {
                name: "name".to_string(),
                column_type: "STRING".to_string(),
            },
            ColumnSchema {
                name: "age".to_string(),
                column_type: "FLOAT".to_string(),
            },
            ColumnSchema {
                name: "survived".to_string(),
                column_type: "INTEGER".to_string(),
            },
        ],
    }
}
