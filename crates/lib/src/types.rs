use crate::{
    errors::NlqError,
    providers::{ai::AiProvider, db::storage::Storage},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A request for the text-generation service, tagged by task kind.
///
/// Each variant carries exactly the fields needed to build one prompt and is
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    /// Generate a SQL query answering a natural-language question.
    SqlGeneration { question: String, dataset_id: String },
    /// Generate a `CREATE OR REPLACE MODEL` statement from a description.
    ModelGeneration {
        description: String,
        dataset_id: String,
    },
}

/// The materialized result of one executed query.
///
/// Rows preserve the warehouse's column order; `row_count` always equals
/// `rows.len()`. Created per call and serialized straight to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryResult {
    #[serde(rename = "data")]
    pub rows: Vec<Map<String, Value>>,
    pub row_count: usize,
}

impl QueryResult {
    pub fn new(rows: Vec<Map<String, Value>>) -> Self {
        let row_count = rows.len();
        Self { rows, row_count }
    }
}

/// The outcome of a successful model-creation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelCreation {
    pub model_sql: String,
    pub message: String,
}

/// A client that turns natural-language input into executed warehouse
/// statements via a configurable AI provider and storage provider.
pub struct NlqClient {
    pub ai_provider: Box<dyn AiProvider>,
    pub storage_provider: Box<dyn Storage>,
    pub project_id: String,
}

impl fmt::Debug for NlqClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NlqClient")
            .field("storage", &self.storage_provider.name())
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

/// A builder for creating `NlqClient` instances.
#[derive(Default)]
pub struct NlqClientBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    storage_provider: Option<Box<dyn Storage>>,
    project_id: String,
}

impl NlqClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AI provider used for statement generation.
    pub fn ai_provider(mut self, ai_provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(ai_provider);
        self
    }

    /// Sets the storage provider used for introspection and execution.
    pub fn storage_provider(mut self, storage_provider: Box<dyn Storage>) -> Self {
        self.storage_provider = Some(storage_provider);
        self
    }

    /// Sets the warehouse project id used to qualify table names in prompts.
    pub fn project_id(mut self, project_id: String) -> Self {
        self.project_id = project_id;
        self
    }

    /// Builds the `NlqClient`, failing if a provider is missing.
    pub fn build(self) -> Result<NlqClient, NlqError> {
        let ai_provider = self.ai_provider.ok_or(NlqError::MissingAiProvider)?;
        let storage_provider = self
            .storage_provider
            .ok_or(NlqError::MissingStorageProvider)?;
        Ok(NlqClient {
            ai_provider,
            storage_provider,
            project_id: self.project_id,
        })
    }
}
