//! # Clinker HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /` - Dashboard page
//! - `POST /predict` - Predict clinker phases from process readings
//! - `GET /api/status` - Readiness and loaded artifacts
//!
//! ## Configuration (Environment Variables)
//!
//! - `CLINKER_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)

mod handlers;
mod types;

// Re-export handlers and types for integration tests (via `clinker::api::*`)
pub use handlers::{index_handler, panic_response, predict_handler, status_for, status_handler};
pub use types::{
    API_VERSION, ErrorResponse, NO_DATA_MESSAGE, PhasesJson, PredictRequest, PredictResponse,
    StatusResponse,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use clinker_core::{ClinkerError, PredictionService};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum accepted request body (1 MB).
const MAX_BODY_BYTES: usize = 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the prediction service.
///
/// The service is immutable after startup, so no lock is needed.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
}

impl AppState {
    /// Create new app state around a service.
    #[must_use]
    pub fn new(service: PredictionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Environment variable holding the allowed browser origins.
const CORS_ORIGINS_ENV: &str = "CLINKER_CORS_ORIGINS";

/// Origins the dashboard is served from when nothing is configured.
const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost:5000",
    "http://localhost:8080",
    "http://127.0.0.1:5000",
    "http://127.0.0.1:8080",
];

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `*`: any origin.
    Any,
    /// An explicit allow-list.
    Listed(Vec<HeaderValue>),
}

impl CorsOrigins {
    /// Interpret the `CLINKER_CORS_ORIGINS` setting.
    ///
    /// Unset, blank or entirely invalid settings fall back to the local
    /// dashboard origins. Invalid entries in a list are skipped.
    pub fn from_setting(setting: Option<&str>) -> Self {
        let Some(setting) = setting.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::local();
        };
        if setting == "*" {
            return Self::Any;
        }

        let (valid, invalid): (Vec<_>, Vec<_>) = setting
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| (origin, origin.parse::<HeaderValue>()))
            .partition(|(_, parsed)| parsed.is_ok());

        for (origin, _) in &invalid {
            tracing::warn!("CORS: ignoring invalid origin '{}'", origin);
        }

        let origins: Vec<HeaderValue> = valid
            .into_iter()
            .filter_map(|(_, parsed)| parsed.ok())
            .collect();
        if origins.is_empty() {
            Self::local()
        } else {
            Self::Listed(origins)
        }
    }

    fn local() -> Self {
        Self::Listed(LOCAL_ORIGINS.into_iter().map(HeaderValue::from_static).collect())
    }

    /// Build the tower-http layer for this policy.
    pub fn into_layer(self) -> CorsLayer {
        match self {
            Self::Any => CorsLayer::permissive(),
            Self::Listed(origins) => CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        }
    }
}

/// CORS layer from the environment.
fn build_cors_layer() -> CorsLayer {
    let setting = std::env::var(CORS_ORIGINS_ENV).ok();
    let origins = CorsOrigins::from_setting(setting.as_deref());
    match &origins {
        CorsOrigins::Any => tracing::warn!("CORS: allowing all origins ({}=*)", CORS_ORIGINS_ENV),
        CorsOrigins::Listed(list) => tracing::info!("CORS: {} allowed origin(s)", list.len()),
    }
    origins.into_layer()
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Panic catching - turns handler panics into 500 JSON errors
/// 4. Body limit
pub fn create_router(state: AppState) -> Router {
    if state.service.is_ready() {
        tracing::info!(
            models = state.service.artifacts().models_loaded(),
            "Prediction service ready"
        );
    } else {
        tracing::warn!(
            "Prediction service NOT ready - /predict reports not-ready until artifacts exist under {}",
            state.service.artifacts().base_path().display()
        );
    }

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES));

    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/predict", post(handlers::predict_handler))
        .route("/api/status", get(handlers::status_handler))
        .layer(middleware)
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, service: PredictionService) -> Result<(), ClinkerError> {
    let state = AppState::new(service);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ClinkerError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Clinker HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ClinkerError::IoError(format!("Server error: {}", e)))
}

/// Resolve when Ctrl+C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server");
}

// =============================================================================
// TESTS
// =============================================================================
