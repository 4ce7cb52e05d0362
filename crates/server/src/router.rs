use super::{handlers, state::AppState};
use axum::http::{header, HeaderValue};
use axum::{routing::any, Router};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// Creates the Axum router.
///
/// A single route accepts every method; endpoint selection happens inside
/// the dispatcher. Every response, success or error, carries the permissive
/// CORS header the web dashboard relies on.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", any(handlers::dispatch))
        .with_state(app_state)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(TraceLayer::new_for_http())
}
