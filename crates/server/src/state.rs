//! # Application State
//!
//! The shared state holds the configuration and the long-lived pipeline
//! client. The client handles are stateless with respect to request data, so
//! concurrent requests share them freely.

use crate::config::Config;
use nlq::providers::{ai::gemini::GeminiProvider, db::bigquery::BigQueryProvider};
use nlq::{NlqClient, NlqClientBuilder};
use std::sync::Arc;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when no project id is configured; every request then
    /// short-circuits with a configuration error.
    pub client: Option<Arc<NlqClient>>,
}

/// Builds the shared application state from the configuration.
///
/// The pipeline client is only constructed when a project id is present;
/// without one the server still boots and answers every request with a
/// configuration error, matching the serverless original.
pub async fn build_app_state(config: Config) -> anyhow::Result<AppState> {
    let client = match &config.project_id {
        Some(project_id) => {
            let ai_provider =
                GeminiProvider::new(config.ai_api_url.clone(), config.ai_api_key.clone())?;
            let storage_provider = BigQueryProvider::new(project_id.clone()).await?;
            let client = NlqClientBuilder::new()
                .ai_provider(Box::new(ai_provider))
                .storage_provider(Box::new(storage_provider))
                .project_id(project_id.clone())
                .build()?;
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!("PROJECT_ID not set; requests will fail until configured");
            None
        }
    };

    Ok(AppState {
        config: Arc::new(config),
        client,
    })
}
