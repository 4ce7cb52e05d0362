#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Spawns the server on a random port with mock providers so the HTTP
//! contract can be exercised without real warehouse or generation services.

use async_trait::async_trait;
use nlq::providers::{ai::AiProvider, db::storage::Storage};
use nlq::schema::{ColumnSchema, TableSchema};
use nlq::types::QueryResult;
use nlq::{NlqClientBuilder, NlqError};
use nlq_server::{config::Config, router::create_router, state::AppState};
use serde_json::{Map, Value};
use std::sync::{Arc, RwLock};
use tokio::net::TcpListener;

// --- Mock providers ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    pub responses: Arc<RwLock<Vec<String>>>,
}

impl MockAiProvider {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(RwLock::new(responses.into_iter().rev().collect())),
        }
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, NlqError> {
        if let Some(response) = self.responses.write().unwrap().pop() {
            Ok(response)
        } else {
            Ok("SELECT 1".to_string())
        }
    }
}

#[derive(Clone, Debug)]
pub struct MockStorageProvider {
    pub executed_sql: Arc<RwLock<Vec<String>>>,
}

impl MockStorageProvider {
    pub fn new() -> Self {
        Self {
            executed_sql: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl Storage for MockStorageProvider {
    fn name(&self) -> &str {
        "MockDB"
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult, NlqError> {
        self.executed_sql.write().unwrap().push(sql.to_string());
        // A recognizably broken statement is rejected the way the warehouse
        // would reject it.
        if !sql.trim().to_uppercase().starts_with("SELECT")
            && !sql.trim().to_uppercase().starts_with("CREATE")
        {
            return Err(NlqError::Execution(format!(
                "Syntax error: Unexpected identifier {sql:?}"
            )));
        }
        let mut row = Map::new();
        row.insert("f0_".to_string(), Value::from(1));
        Ok(QueryResult::new(vec![row]))
    }

    async fn describe_dataset(&self, _dataset_id: &str) -> Result<Vec<TableSchema>, NlqError> {
        Ok(vec![TableSchema {
            table: "titanic".to_string(),
            columns: vec![ColumnSchema {
                name: "survived".to_string(),
                column_type: "INTEGER".to_string(),
            }],
        }])
    }

    async fn load_rows(
        &self,
        _dataset_id: &str,
        _table_id: &str,
        rows: Vec<Map<String, Value>>,
    ) -> Result<usize, NlqError> {
        Ok(rows.len())
    }
}

// --- Test harness ---

pub fn test_config(project_id: Option<&str>) -> Config {
    Config {
        port: 0,
        project_id: project_id.map(String::from),
        dataset_id: "test_dataset".to_string(),
        table_id: "titanic".to_string(),
        ai_api_url: "http://127.0.0.1:0/unused".to_string(),
        ai_api_key: String::new(),
    }
}

/// Builds an `AppState` wired to mock providers.
pub fn mock_app_state(ai_responses: Vec<String>) -> AppState {
    let client = NlqClientBuilder::new()
        .ai_provider(Box::new(MockAiProvider::new(ai_responses)))
        .storage_provider(Box::new(MockStorageProvider::new()))
        .project_id("test-project".to_string())
        .build()
        .expect("client should build");

    AppState {
        config: Arc::new(test_config(Some("test-project"))),
        client: Some(Arc::new(client)),
    }
}

/// An `AppState` with no project id configured and no pipeline client.
pub fn unconfigured_app_state() -> AppState {
    AppState {
        config: Arc::new(test_config(None)),
        client: None,
    }
}

/// Spawns the router on a random port and returns its base address.
pub async fn spawn_app(app_state: AppState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let app = create_router(app_state);
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("Server error: {e}");
        }
    });

    format!("http://{addr}")
}
