use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nlq::NlqError;
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// Every failure a request can hit is funneled through here; the
/// `IntoResponse` impl is the single place exceptions become structured JSON
/// error bodies with a status code.
pub enum AppError {
    /// The server is missing required configuration (no project id).
    Config(String),
    /// A required body field is missing; holds the field name.
    Validation(String),
    /// A POST-only endpoint was called with another method.
    MethodNotAllowed,
    /// The `endpoint` query parameter named no known endpoint.
    UnknownEndpoint(String),
    /// Errors propagated from the `nlq` pipeline.
    Pipeline(NlqError),
}

impl From<NlqError> for AppError {
    fn from(err: NlqError) -> Self {
        AppError::Pipeline(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Config(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
            AppError::Validation(field) => (
                StatusCode::BAD_REQUEST,
                format!("Missing required field: {field}"),
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "POST method required".to_string(),
            ),
            AppError::UnknownEndpoint(name) => (
                StatusCode::NOT_FOUND,
                format!("Unknown endpoint: {name}"),
            ),
            AppError::Pipeline(err) => {
                error!("Pipeline error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
