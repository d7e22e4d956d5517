//! # Cell-Watch HTTP Service
//!
//! HTTP server for receiving Smartsheet webhook callbacks.
//!
//! This library provides:
//! - the single callback endpoint (`POST /`) with shape-based dispatch
//!   (challenge echo, event batch, status notification),
//! - a liveness endpoint (`GET /health`),
//! - service configuration and the server lifecycle with graceful shutdown.

// Public modules
pub mod config;


use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use cell_watch_core::{CallbackKind, CallbackPayload, ChallengeResponse, EventProcessor};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, instrument};

pub use config::{ConfigError, LoggingConfig, ServerConfig, ServiceConfig, SmartsheetConfig};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration for the service
    pub config: ServiceConfig,

    /// Processor for event-batch callbacks
    pub processor: Arc<EventProcessor>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: ServiceConfig, processor: Arc<EventProcessor>) -> Self {
        Self { config, processor }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors that prevent the service from starting or keep it from serving.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Could not bind the listen address.
    #[error("Failed to bind {address}: {message}")]
    BindFailed { address: String, message: String },

    /// The server stopped with an error.
    #[error("Server failed: {message}")]
    ServerFailed { message: String },

    /// The configuration is invalid.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

/// Failure while handling a callback request.
///
/// Any of these yields HTTP 500 with no body; Smartsheet treats that as a
/// failed delivery and applies its own retry/disable policy.
#[derive(Debug, thiserror::Error)]
pub enum CallbackError {
    /// The request body was not valid JSON for any known callback shape.
    #[error("Malformed callback payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        error!(error = %self, "Callback handling failed");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

// ============================================================================
// HTTP Server
// ============================================================================

/// Create HTTP router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handle_callback))
        .route("/health", get(handle_health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start HTTP server
pub async fn start_server(state: AppState) -> Result<(), ServiceError> {
    let address = format!("{}:{}", state.config.server.host, state.config.server.port);
    let shutdown_timeout =
        std::time::Duration::from_secs(state.config.server.shutdown_timeout_seconds);

    let app = create_router(state);

    let listener =
        tokio::net::TcpListener::bind(&address)
            .await
            .map_err(|e| ServiceError::BindFailed {
                address: address.clone(),
                message: e.to_string(),
            })?;

    info!("Starting HTTP server on {}", address);

    let shutdown_signal = async move {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C signal handler");
        };

        #[cfg(unix)]
        let terminate = async {
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM signal handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!(
                    "Received SIGINT (Ctrl+C), initiating graceful shutdown with {}s timeout",
                    shutdown_timeout.as_secs()
                );
            },
            _ = terminate => {
                info!(
                    "Received SIGTERM, initiating graceful shutdown with {}s timeout",
                    shutdown_timeout.as_secs()
                );
            },
        }
    };

    // In-flight requests are allowed to complete; new connections are
    // refused as soon as the shutdown signal fires.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| ServiceError::ServerFailed {
            message: e.to_string(),
        })?;

    info!("HTTP server shutdown complete");
    Ok(())
}

// ============================================================================
// Callback Handler
// ============================================================================

/// Handle Smartsheet webhook callbacks.
///
/// This handler implements the immediate response pattern to meet
/// Smartsheet's few-second delivery timeout:
/// 1. Parse the body and classify the payload shape (fast path)
/// 2. For event batches, return HTTP 200 immediately
/// 3. Follow-up cell reads run in a spawned background task
///
/// Challenge and status callbacks involve no vendor calls and are answered
/// inline. A body that cannot be parsed yields HTTP 500; the server keeps
/// serving subsequent requests.
#[instrument(skip(state, body))]
pub async fn handle_callback(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, CallbackError> {
    let payload: CallbackPayload = serde_json::from_slice(&body)?;

    match payload.kind() {
        CallbackKind::Challenge(challenge) => {
            info!("Received verification callback");

            // Verify we are listening by echoing the challenge value.
            return Ok(Json(ChallengeResponse::new(challenge)).into_response());
        }
        CallbackKind::Events(events) => {
            info!(count = events.len(), "Received event callback");
        }
        CallbackKind::StatusChange(status) => {
            info!(new_status = %status, "Received status callback");
            return Ok(StatusCode::OK.into_response());
        }
        CallbackKind::Unknown => {
            debug!(payload = %String::from_utf8_lossy(&body), "Received unknown callback");
            return Ok(StatusCode::OK.into_response());
        }
    }

    // Acknowledge the event batch before processing it: the follow-up reads
    // go back to the vendor and must not hold up the delivery response.
    let processor = state.processor.clone();
    tokio::spawn(async move {
        let summary = processor.process(&payload).await;
        info!(
            cells_processed = summary.cells_processed,
            events_skipped = summary.events_skipped,
            failures = summary.failures,
            "Finished processing event callback"
        );
    });

    // The ack carries no content of its own, just an empty JSON object.
    Ok(Json(serde_json::json!({})).into_response())
}

// ============================================================================
// Health Check Handler
// ============================================================================

/// Health check response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Basic liveness check endpoint
#[instrument(skip_all)]
async fn handle_health_check(State(_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}
