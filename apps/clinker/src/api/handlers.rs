//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{ErrorResponse, PredictRequest, PredictResponse, StatusResponse},
};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use clinker_core::ClinkerError;
use std::any::Any;

/// The dashboard page served at `/`.
const DASHBOARD_HTML: &str = include_str!("../../static/index.html");

// =============================================================================
// DASHBOARD HANDLER
// =============================================================================

/// Static dashboard page.
pub async fn index_handler() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Report readiness and loaded artifacts.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let response = StatusResponse::from(state.service.status());
    (StatusCode::OK, Json(response))
}

// =============================================================================
// PREDICT HANDLER
// =============================================================================

/// Predict clinker phases for one set of process readings.
///
/// The body is read raw so that an empty body, a non-object body and a bad
/// field value each get their own error payload.
pub async fn predict_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match PredictRequest::from_body(&body) {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("Rejected prediction request: {}", e);
            return error_response(&e);
        }
    };

    match state.service.predict(&request.to_raw_reading()) {
        Ok(report) => {
            tracing::debug!(
                quality = report.assessment.quality.as_str(),
                total = report.assessment.total_phases,
                "Prediction complete"
            );
            (StatusCode::OK, Json(PredictResponse::from(report))).into_response()
        }
        Err(e) => {
            tracing::error!("Prediction error: {}", e);
            error_response(&e)
        }
    }
}

/// HTTP status for each error kind.
///
/// NotReady and Validation are prediction results, not transport failures:
/// they answer 200 with an `error` body and no prediction fields.
pub fn status_for(error: &ClinkerError) -> StatusCode {
    match error {
        ClinkerError::NotReady | ClinkerError::Validation(_) => StatusCode::OK,
        ClinkerError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
        ClinkerError::Internal(_)
        | ClinkerError::SerializationError(_)
        | ClinkerError::IoError(_)
        | ClinkerError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: &ClinkerError) -> Response {
    (status_for(error), Json(ErrorResponse::new(error.to_string()))).into_response()
}

// =============================================================================
// PANIC HANDLER
// =============================================================================

/// Turn a handler panic into a 500 with the panic message.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "Unknown internal error".to_string()
    };

    tracing::error!("Handler panicked: {}", detail);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(detail)),
    )
        .into_response()
}

// =============================================================================
// TESTS
// =============================================================================
