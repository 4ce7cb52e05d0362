//! # Natural Language to Query
//!
//! This crate converts natural-language questions into executable BigQuery
//! statements using a configurable AI provider, runs them against a storage
//! provider, and materializes the results. It also generates and runs
//! BigQuery ML model statements from plain-language descriptions.

pub mod errors;
pub mod ingest;
pub mod prompts;
pub mod providers;
pub mod sanitize;
pub mod schema;
pub mod types;

pub use errors::NlqError;
pub use sanitize::sanitize;
pub use schema::SchemaContext;
pub use types::{GenerationRequest, ModelCreation, NlqClient, NlqClientBuilder, QueryResult};

use tracing::{debug, info};

impl NlqClient {
    /// Introspects a dataset, degrading to a fallback context on failure.
    ///
    /// Introspection errors are absorbed here so a flaky schema fetch never
    /// fails the request; the generator just works with less context.
    async fn schema_context(&self, dataset_id: &str) -> SchemaContext {
        match self.storage_provider.describe_dataset(dataset_id).await {
            Ok(tables) => SchemaContext::Available(tables),
            Err(e) => SchemaContext::Degraded(e.to_string()),
        }
    }

    /// Runs one generation request through the prompt/generate/sanitize
    /// pipeline and returns the resulting statement.
    async fn generate_statement(&self, request: &GenerationRequest) -> Result<String, NlqError> {
        let dataset_id = match request {
            GenerationRequest::SqlGeneration { dataset_id, .. } => dataset_id,
            GenerationRequest::ModelGeneration { dataset_id, .. } => dataset_id,
        };
        let schema = self.schema_context(dataset_id).await;
        let prompt = prompts::build_prompt(request, &schema, &self.project_id);

        debug!(%prompt, "--> Sending prompt to AI provider");
        let raw = self.ai_provider.generate(&prompt).await?;
        debug!("<-- Statement from AI: {raw}");

        Ok(sanitize(&raw))
    }

    /// Converts a natural-language question into a sanitized SQL query.
    pub async fn generate_sql(
        &self,
        question: &str,
        dataset_id: &str,
    ) -> Result<String, NlqError> {
        info!("[generate_sql] received question: {question:?}");
        let request = GenerationRequest::SqlGeneration {
            question: question.to_string(),
            dataset_id: dataset_id.to_string(),
        };
        self.generate_statement(&request).await
    }

    /// Answers a natural-language question: generates SQL, executes it, and
    /// returns both the statement and the materialized rows.
    pub async fn answer_question(
        &self,
        question: &str,
        dataset_id: &str,
    ) -> Result<(String, QueryResult), NlqError> {
        let sql = self.generate_sql(question, dataset_id).await?;
        let result = self.storage_provider.execute_query(&sql).await?;
        Ok((sql, result))
    }

    /// Creates a BigQuery ML model from a plain-language description.
    ///
    /// The generated `CREATE OR REPLACE MODEL` statement is executed
    /// immediately; the warehouse's blocking wait covers model creation.
    pub async fn create_model(
        &self,
        description: &str,
        dataset_id: &str,
    ) -> Result<ModelCreation, NlqError> {
        info!("[create_model] received description: {description:?}");
        let request = GenerationRequest::ModelGeneration {
            description: description.to_string(),
            dataset_id: dataset_id.to_string(),
        };
        let model_sql = self.generate_statement(&request).await?;
        self.storage_provider.execute_query(&model_sql).await?;

        Ok(ModelCreation {
            model_sql,
            message: "ML model created successfully".to_string(),
        })
    }

    /// Executes a caller-supplied SQL statement directly, with no generation
    /// step.
    pub async fn execute_query(&self, sql: &str) -> Result<QueryResult, NlqError> {
        self.storage_provider.execute_query(sql).await
    }
}
