//! # Application Configuration
//!
//! Configuration comes entirely from environment variables (optionally via a
//! `.env` file), matching the serverless deployment this server fronts.

use std::env;

/// The server configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// The port for the server to listen on.
    pub port: u16,
    /// The warehouse project id. Absence is not a boot failure: requests are
    /// answered with a 500 until it is configured.
    pub project_id: Option<String>,
    /// The default dataset queried when a request names none.
    pub dataset_id: String,
    /// The table the CSV ingestion collaborator loads into.
    pub table_id: String,
    /// The Gemini generateContent endpoint URL.
    pub ai_api_url: String,
    /// The Gemini API key. An empty key surfaces as a generation failure per
    /// request rather than a boot failure.
    pub ai_api_key: String,
}

/// Reads the configuration from the environment.
pub fn get_config() -> anyhow::Result<Config> {
    let port = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .map_err(|e| anyhow::anyhow!("Invalid PORT: {e}"))?;

    let ai_api_url = env::var("AI_API_URL").unwrap_or_else(|_| {
        let model = env::var("AI_MODEL").unwrap_or_else(|_| "gemini-pro".to_string());
        format!("https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent")
    });

    Ok(Config {
        port,
        project_id: env::var("PROJECT_ID").ok(),
        dataset_id: env::var("DATASET_ID").unwrap_or_else(|_| "test_dataset".to_string()),
        table_id: env::var("TABLE_ID").unwrap_or_else(|_| "titanic".to_string()),
        ai_api_url,
        ai_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
    })
}
