//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use clinker_core::{
    ClinkerError, FieldValue, PhasePrediction, PredictionReport, RawReading, SystemStatus,
    timestamp_now,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version string reported by `/api/status`.
pub const API_VERSION: &str = "1.0";

/// Message for a request that carries no data.
pub const NO_DATA_MESSAGE: &str = "No data provided";

// =============================================================================
// PREDICT REQUEST
// =============================================================================

/// Prediction request. Every field is optional and kept as raw JSON until
/// the core interprets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(rename = "calciner_temp_C", default, skip_serializing_if = "Option::is_none")]
    pub calciner_temp_c: Option<Value>,
    #[serde(rename = "kiln_exit_temp_C", default, skip_serializing_if = "Option::is_none")]
    pub kiln_exit_temp_c: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_coal_kg_h: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_rate_tph: Option<Value>,
}

impl PredictRequest {
    /// Parse a raw request body.
    ///
    /// An empty body or `null` carries no data; anything other than a JSON
    /// object is malformed. An empty object is valid and means all defaults.
    pub fn from_body(body: &[u8]) -> Result<Self, ClinkerError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ClinkerError::MalformedRequest(NO_DATA_MESSAGE.to_string()));
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ClinkerError::MalformedRequest(format!("Invalid JSON body: {}", e)))?;

        match value {
            Value::Null => Err(ClinkerError::MalformedRequest(NO_DATA_MESSAGE.to_string())),
            Value::Object(_) => serde_json::from_value(value).map_err(|e| {
                ClinkerError::MalformedRequest(format!("Invalid request body: {}", e))
            }),
            _ => Err(ClinkerError::MalformedRequest(
                "Request body must be a JSON object".to_string(),
            )),
        }
    }

    /// Hand the fields to the core without interpreting them.
    pub fn to_raw_reading(&self) -> RawReading {
        RawReading {
            calciner_temp_c: self.calciner_temp_c.as_ref().and_then(field_value),
            kiln_exit_temp_c: self.kiln_exit_temp_c.as_ref().and_then(field_value),
            fuel_coal_kg_h: self.fuel_coal_kg_h.as_ref().and_then(field_value),
            production_rate_tph: self.production_rate_tph.as_ref().and_then(field_value),
        }
    }
}

/// Map one JSON value to a core field value. `null` counts as absent.
fn field_value(value: &Value) -> Option<FieldValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(FieldValue::Flag(*b)),
        Value::Number(n) => Some(
            n.as_f64()
                .map(FieldValue::Number)
                .unwrap_or_else(|| FieldValue::Unsupported(format!("number {}", n))),
        ),
        Value::String(s) => Some(FieldValue::Text(s.clone())),
        Value::Array(_) => Some(FieldValue::Unsupported("array".to_string())),
        Value::Object(_) => Some(FieldValue::Unsupported("object".to_string())),
    }
}

// =============================================================================
// PREDICT RESPONSE
// =============================================================================

/// The four phase estimates under their target names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhasesJson {
    #[serde(rename = "clinker_XRD_alite_pct")]
    pub alite_pct: f64,
    #[serde(rename = "clinker_belite_pct")]
    pub belite_pct: f64,
    #[serde(rename = "clinker_aluminate_pct")]
    pub aluminate_pct: f64,
    #[serde(rename = "clinker_ferrite_pct")]
    pub ferrite_pct: f64,
}

impl From<PhasePrediction> for PhasesJson {
    fn from(p: PhasePrediction) -> Self {
        Self {
            alite_pct: p.alite_pct,
            belite_pct: p.belite_pct,
            aluminate_pct: p.aluminate_pct,
            ferrite_pct: p.ferrite_pct,
        }
    }
}

/// Successful prediction response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predictions: PhasesJson,
    pub total_phases: f64,
    pub quality_assessment: String,
    pub recommendations: Vec<String>,
    pub timestamp: String,
    pub model_info: String,
}

impl From<PredictionReport> for PredictResponse {
    fn from(report: PredictionReport) -> Self {
        let assessment = report.assessment;
        Self {
            predictions: assessment.predictions.into(),
            total_phases: assessment.total_phases,
            quality_assessment: assessment.quality.as_str().to_string(),
            recommendations: assessment
                .recommendations
                .iter()
                .map(ToString::to_string)
                .collect(),
            timestamp: report.timestamp,
            model_info: report.model_info,
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Error payload shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// System status response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub system_ready: bool,
    pub model_path: String,
    pub models_loaded: usize,
    pub timestamp: String,
    pub version: String,
}

impl From<SystemStatus> for StatusResponse {
    fn from(status: SystemStatus) -> Self {
        Self {
            system_ready: status.system_ready,
            model_path: status.model_path,
            models_loaded: status.models_loaded,
            timestamp: timestamp_now(),
            version: API_VERSION.to_string(),
        }
    }
}
