//! HTTP relay for rebuttal generation.
//!
//! Exposes a single generation endpoint that validates the caller's
//! request, builds the upstream chat-completion call and relays the
//! upstream response verbatim: SSE bytes are piped through untouched for
//! streaming requests, the JSON body is returned as-is otherwise. All
//! parsing of the completion happens client-side; the relay never
//! rewrites upstream frames.

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use futures_util::TryStreamExt;
use retort_client::ApiConfig;
use retort_core::{ChatRequest, DEFAULT_INTENSITY, MAX_TOKENS, TEMPERATURE, conversation};
use retort_error::ClientError;
use serde_json::json;
use tracing::{debug, error, instrument, warn};

/// Relay server state.
#[derive(Clone)]
pub struct RelayState {
    /// Shared HTTP client for upstream calls.
    pub client: reqwest::Client,
    /// Upstream endpoint configuration.
    pub config: ApiConfig,
}

impl RelayState {
    /// Creates the relay state around an endpoint configuration.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

/// Creates the relay router.
pub fn create_router(config: ApiConfig) -> Router {
    let state = RelayState::new(config);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/argue", post(generate_argument))
        .with_state(state)
}

/// Health check endpoint.
#[instrument(skip_all)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

fn error_response(status: StatusCode, message: impl std::fmt::Display) -> Response {
    (status, Json(json!({ "error": message.to_string() }))).into_response()
}

/// Generation endpoint.
///
/// Accepts `{ "opponentMessage": …, "intensity": …, "stream": … }`.
/// A non-numeric or absent intensity falls back to the default; an absent
/// `stream` flag means a plain JSON response.
#[instrument(skip(state, payload))]
async fn generate_argument(
    State(state): State<RelayState>,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    let Some(opponent_message) = payload
        .get("opponentMessage")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
    else {
        return error_response(StatusCode::BAD_REQUEST, "参数缺失：opponentMessage");
    };

    let intensity = payload
        .get("intensity")
        .and_then(|v| v.as_u64())
        .and_then(|v| u8::try_from(v).ok())
        .unwrap_or(DEFAULT_INTENSITY);
    let streaming = payload
        .get("stream")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    if !state.config.is_valid() {
        warn!("generation request refused, endpoint configuration incomplete");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "环境变量缺失：API_BASE_URL, API_KEY, MODEL",
        );
    }

    let request = match ChatRequest::builder()
        .model(state.config.model().clone())
        .messages(conversation(opponent_message, intensity))
        .stream(Some(streaming))
        .max_tokens(Some(MAX_TOKENS))
        .temperature(Some(TEMPERATURE))
        .build()
    {
        Ok(request) => request,
        Err(e) => {
            error!(%e, "failed to build upstream request");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ClientError::Builder(e.to_string()),
            );
        }
    };

    debug!(intensity, streaming, "relaying generation request upstream");
    let response = match state
        .client
        .post(state.config.api_base_url())
        .header(
            "Authorization",
            format!("Bearer {}", state.config.api_key()),
        )
        .json(&request)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            error!(%e, "upstream request failed");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ClientError::Network(e.to_string()),
            );
        }
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(status = status.as_u16(), "upstream rejected relay request");
        return error_response(
            StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
            ClientError::upstream(status.as_u16(), &body),
        );
    }

    if streaming {
        relay_streaming_response(response)
    } else {
        relay_json_response(response).await
    }
}

/// Pipes the upstream SSE bytes through verbatim.
fn relay_streaming_response(response: reqwest::Response) -> Response {
    let body = Body::from_stream(response.bytes_stream().map_err(std::io::Error::other));

    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "text/event-stream; charset=utf-8")
        .header("cache-control", "no-cache, no-transform")
        .header("connection", "keep-alive")
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// Relays the upstream JSON body as-is.
async fn relay_json_response(response: reqwest::Response) -> Response {
    match response.bytes().await {
        Ok(bytes) => Response::builder()
            .status(StatusCode::OK)
            .header("content-type", "application/json")
            .body(Body::from(bytes))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        Err(e) => {
            error!(%e, "failed to read upstream response body");
            error_response(StatusCode::BAD_GATEWAY, ClientError::Network(e.to_string()))
        }
    }
}
