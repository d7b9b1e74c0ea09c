//! HTTP routes for the extraction endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::BoxError;
use axum::error_handling::HandleErrorLayer;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::HeaderName;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use gleaner_core::{ExtractionResult, Gleaner};
use serde::Deserialize;
use serde_json::json;
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    gleaner: Arc<Gleaner>,
}

impl AppState {
    pub fn new(gleaner: Gleaner) -> Self {
        Self { gleaner: Arc::new(gleaner) }
    }
}

/// Request body of `POST /fetch-url-content`.
#[derive(Debug, Deserialize)]
pub struct FetchUrlBody {
    #[serde(default)]
    pub url: Option<String>,
}

pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/fetch-url-content", post(fetch_url_content))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(move |err: BoxError| async move {
                    handle_layer_error(err, request_timeout)
                }))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                id = %Uuid::new_v4(),
                method = %request.method(),
                uri = %request.uri(),
            )
        }))
        .layer(cors())
        .with_state(state)
}

/// Turns a middleware failure into the usual JSON error response.
fn handle_layer_error(err: BoxError, request_timeout: Duration) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::RequestTimeout(request_timeout.as_secs())
    } else {
        ApiError::Internal(err.to_string())
    }
}

/// Any origin may call the endpoint; no credentials are involved.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ])
}

async fn fetch_url_content(
    State(state): State<AppState>, body: Result<Json<FetchUrlBody>, JsonRejection>,
) -> Result<Json<ExtractionResult>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    let url = body.url.unwrap_or_default();

    let result = state.gleaner.fetch_and_extract(&url).await?;
    tracing::info!(url = %result.source_url, chars = result.content.len(), "extracted content length");

    Ok(Json(result))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}
