//! # Endpoint Dispatch
//!
//! The server exposes a single entry point; the `endpoint` query parameter
//! selects the operation. Dispatch is a closed enum with a total match, so
//! an unknown endpoint is an explicit 404 rather than an implicit else.

use crate::{errors::AppError, state::AppState};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use nlq::{ModelCreation, NlqClient, QueryResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// The query parameters of the single entry point.
#[derive(Debug, Deserialize, Default)]
pub struct EndpointParams {
    pub endpoint: Option<String>,
}

/// The closed set of supported endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Health,
    NaturalLanguageQuery,
    CreateMlModel,
    ExecuteQuery,
}

impl Endpoint {
    /// The endpoint names advertised by `health`.
    pub const POST_ENDPOINTS: [&'static str; 3] =
        ["natural_language_query", "create_ml_model", "execute_query"];

    fn parse(name: &str) -> Option<Self> {
        match name {
            "health" => Some(Endpoint::Health),
            "natural_language_query" => Some(Endpoint::NaturalLanguageQuery),
            "create_ml_model" => Some(Endpoint::CreateMlModel),
            "execute_query" => Some(Endpoint::ExecuteQuery),
            _ => None,
        }
    }
}

// --- Response payloads ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    project_id: String,
    endpoints: [&'static str; 3],
}

#[derive(Serialize)]
struct QueryResponse {
    status: &'static str,
    #[serde(flatten)]
    result: QueryResult,
}

#[derive(Serialize)]
struct NaturalLanguageQueryResponse {
    status: &'static str,
    question: String,
    generated_sql: String,
    results: QueryResponse,
}

#[derive(Serialize)]
struct CreateModelResponse {
    status: &'static str,
    #[serde(flatten)]
    creation: ModelCreation,
}

/// The single entry point: routes a request to one endpoint based on the
/// `endpoint` query parameter (defaulting to `health`).
pub async fn dispatch(
    State(app_state): State<AppState>,
    Query(params): Query<EndpointParams>,
    method: Method,
    body: Bytes,
) -> Result<Response, AppError> {
    if method == Method::OPTIONS {
        return Ok(preflight_response());
    }

    // Configuration is checked before endpoint resolution: an unconfigured
    // server answers 500 for every endpoint, known or not.
    let Some(client) = app_state.client.as_deref() else {
        return Err(AppError::Config("PROJECT_ID not configured".to_string()));
    };

    let endpoint_name = params.endpoint.as_deref().unwrap_or("health");
    let endpoint = Endpoint::parse(endpoint_name)
        .ok_or_else(|| AppError::UnknownEndpoint(endpoint_name.to_string()))?;

    // Malformed or absent JSON is treated as an empty body: the missing
    // required field surfaces as a 400.
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    match endpoint {
        Endpoint::Health => health(&app_state),
        Endpoint::NaturalLanguageQuery => {
            require_post(&method)?;
            natural_language_query(&app_state, client, &payload).await
        }
        Endpoint::CreateMlModel => {
            require_post(&method)?;
            create_ml_model(&app_state, client, &payload).await
        }
        Endpoint::ExecuteQuery => {
            require_post(&method)?;
            execute_query(client, &payload).await
        }
    }
}

fn require_post(method: &Method) -> Result<(), AppError> {
    if method == Method::POST {
        Ok(())
    } else {
        Err(AppError::MethodNotAllowed)
    }
}

/// Extracts a required string field from the request body.
fn required_field<'a>(payload: &'a Value, field: &str) -> Result<&'a str, AppError> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Validation(field.to_string()))
}

/// The dataset a request targets: its own `dataset_id`, else the configured
/// default.
fn dataset_id<'a>(app_state: &'a AppState, payload: &'a Value) -> &'a str {
    payload
        .get("dataset_id")
        .and_then(Value::as_str)
        .unwrap_or(&app_state.config.dataset_id)
}

fn preflight_response() -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST"),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                "Content-Type, Authorization",
            ),
            (header::ACCESS_CONTROL_MAX_AGE, "3600"),
        ],
    )
        .into_response()
}

fn health(app_state: &AppState) -> Result<Response, AppError> {
    let project_id = app_state
        .config
        .project_id
        .clone()
        .unwrap_or_default();
    Ok(Json(HealthResponse {
        status: "healthy",
        project_id,
        endpoints: Endpoint::POST_ENDPOINTS,
    })
    .into_response())
}

async fn natural_language_query(
    app_state: &AppState,
    client: &NlqClient,
    payload: &Value,
) -> Result<Response, AppError> {
    let question = required_field(payload, "question")?;
    let dataset = dataset_id(app_state, payload);
    info!("Received natural language question: {question:?}");

    let (generated_sql, result) = client.answer_question(question, dataset).await?;

    Ok(Json(NaturalLanguageQueryResponse {
        status: "success",
        question: question.to_string(),
        generated_sql,
        results: QueryResponse {
            status: "success",
            result,
        },
    })
    .into_response())
}

async fn create_ml_model(
    app_state: &AppState,
    client: &NlqClient,
    payload: &Value,
) -> Result<Response, AppError> {
    let description = required_field(payload, "description")?;
    let dataset = dataset_id(app_state, payload);
    info!("Received model creation request: {description:?}");

    let creation = client.create_model(description, dataset).await?;

    Ok(Json(CreateModelResponse {
        status: "success",
        creation,
    })
    .into_response())
}

async fn execute_query(client: &NlqClient, payload: &Value) -> Result<Response, AppError> {
    let sql = required_field(payload, "sql_query")?;
    info!("Received direct query execution request");

    let result = client.execute_query(sql).await?;

    Ok(Json(QueryResponse {
        status: "success",
        result,
    })
    .into_response())
}
