use thiserror::Error;

/// Custom error types for the query pipeline.
#[derive(Error, Debug)]
pub enum NlqError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("BigQuery client error: {0}")]
    BigQueryClient(#[from] gcp_bigquery_client::error::BQError),
    #[error("Query execution failed: {0}")]
    Execution(String),
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
    #[error("An AI provider is required")]
    MissingAiProvider,
    #[error("A storage provider is required")]
    MissingStorageProvider,
}
