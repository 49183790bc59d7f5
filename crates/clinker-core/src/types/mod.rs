//! # Core Type Definitions
//!
//! This module contains all core types for the clinker phase predictor:
//! - Input representation (`FieldValue`, `RawReading`, `ProcessReading`)
//! - Output structures (`PhasePrediction`, `QualityLabel`, `Recommendation`,
//!   `Assessment`, `PredictionReport`, `SystemStatus`)
//! - Error types (`ClinkerError`)
//!
//! ## Numeric Semantics
//!
//! Text fields accept anything `f64` parses, including `nan` and `inf`. The
//! predictor saturates such values at its clamp bounds, so outputs stay finite.

use crate::primitives::{
    DEFAULT_CALCINER_TEMP_C, DEFAULT_FUEL_COAL_KG_H, DEFAULT_KILN_EXIT_TEMP_C,
    DEFAULT_PRODUCTION_RATE_TPH, EXCELLENT_BAND, GOOD_BAND,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// RAW INPUT
// =============================================================================

/// A field as it arrived on the wire, before numeric interpretation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A JSON number.
    Number(f64),
    /// A string that may hold a numeral, e.g. `"950"`.
    Text(String),
    /// A boolean, read as 1.0 or 0.0.
    Flag(bool),
    /// Anything else (array, object). Carries the kind name for the error.
    Unsupported(String),
}

impl FieldValue {
    /// Interpret the value as a float.
    pub fn to_f64(&self, field: &str) -> Result<f64, ClinkerError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Flag(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                ClinkerError::Validation(format!(
                    "{}: could not convert string to float: '{}'",
                    field, s
                ))
            }),
            Self::Unsupported(kind) => Err(ClinkerError::Validation(format!(
                "{}: expected a number, got {}",
                field, kind
            ))),
        }
    }
}

/// The four optional request fields, uninterpreted.
///
/// `None` means the field was absent (or null) and the default applies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawReading {
    pub calciner_temp_c: Option<FieldValue>,
    pub kiln_exit_temp_c: Option<FieldValue>,
    pub fuel_coal_kg_h: Option<FieldValue>,
    pub production_rate_tph: Option<FieldValue>,
}

// =============================================================================
// PROCESS READING
// =============================================================================

/// Kiln process readings for one prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessReading {
    /// Calciner temperature (°C).
    pub calciner_temp_c: f64,
    /// Kiln exit temperature (°C).
    pub kiln_exit_temp_c: f64,
    /// Fuel/coal feed rate (kg/h).
    pub fuel_coal_kg_h: f64,
    /// Production rate (t/h).
    pub production_rate_tph: f64,
}

impl Default for ProcessReading {
    fn default() -> Self {
        Self {
            calciner_temp_c: DEFAULT_CALCINER_TEMP_C,
            kiln_exit_temp_c: DEFAULT_KILN_EXIT_TEMP_C,
            fuel_coal_kg_h: DEFAULT_FUEL_COAL_KG_H,
            production_rate_tph: DEFAULT_PRODUCTION_RATE_TPH,
        }
    }
}

impl ProcessReading {
    /// Parse raw fields, substituting defaults for absent ones.
    ///
    /// Fields are checked in request order; the first bad one is reported.
    pub fn from_raw(raw: &RawReading) -> Result<Self, ClinkerError> {
        Ok(Self {
            calciner_temp_c: field_or(
                raw.calciner_temp_c.as_ref(),
                "calciner_temp_C",
                DEFAULT_CALCINER_TEMP_C,
            )?,
            kiln_exit_temp_c: field_or(
                raw.kiln_exit_temp_c.as_ref(),
                "kiln_exit_temp_C",
                DEFAULT_KILN_EXIT_TEMP_C,
            )?,
            fuel_coal_kg_h: field_or(
                raw.fuel_coal_kg_h.as_ref(),
                "fuel_coal_kg_h",
                DEFAULT_FUEL_COAL_KG_H,
            )?,
            production_rate_tph: field_or(
                raw.production_rate_tph.as_ref(),
                "production_rate_tph",
                DEFAULT_PRODUCTION_RATE_TPH,
            )?,
        })
    }

    /// Fuel per tonne of production.
    ///
    /// `None` when production is zero or negative; the ratio has no meaning
    /// there and the efficiency check is skipped.
    #[must_use]
    pub fn fuel_ratio(&self) -> Option<f64> {
        if self.production_rate_tph > 0.0 {
            Some(self.fuel_coal_kg_h / self.production_rate_tph)
        } else {
            None
        }
    }
}

fn field_or(value: Option<&FieldValue>, field: &str, default: f64) -> Result<f64, ClinkerError> {
    match value {
        Some(v) => v.to_f64(field),
        None => Ok(default),
    }
}

// =============================================================================
// PHASE PREDICTION
// =============================================================================

/// Predicted clinker mineral phases, as mass percentages rounded to 2 places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhasePrediction {
    pub alite_pct: f64,
    pub belite_pct: f64,
    pub aluminate_pct: f64,
    pub ferrite_pct: f64,
}

impl PhasePrediction {
    /// Sum of the four phases, rounded to 2 places.
    #[must_use]
    pub fn total(&self) -> f64 {
        round2(self.alite_pct + self.belite_pct + self.aluminate_pct + self.ferrite_pct)
    }
}

/// Round to 2 decimal places.
///
/// Rounds the exact binary value, so `50.005` (stored just above the half)
/// becomes `50.01`.
#[must_use]
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

// =============================================================================
// QUALITY LABEL
// =============================================================================

/// Quality verdict derived from the total of the four phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityLabel {
    Excellent,
    Good,
    CheckRequired,
}

impl QualityLabel {
    /// Classify a phase total. The EXCELLENT band is checked before GOOD.
    #[must_use]
    pub fn from_total(total: f64) -> Self {
        if (EXCELLENT_BAND.0..=EXCELLENT_BAND.1).contains(&total) {
            Self::Excellent
        } else if (GOOD_BAND.0..=GOOD_BAND.1).contains(&total) {
            Self::Good
        } else {
            Self::CheckRequired
        }
    }

    /// Wire name of the label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::CheckRequired => "CHECK_REQUIRED",
        }
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// RECOMMENDATIONS
// =============================================================================

/// Process advice attached to a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Alite is low; raise the calciner by this many degrees.
    RaiseCalcinerTemperature { degrees: f64 },
    /// Alite is high; fuel can probably be trimmed.
    OptimizeFuelConsumption,
    /// Fuel per tonne of production is above the limit.
    ImproveFuelEfficiency,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RaiseCalcinerTemperature { degrees } => write!(
                f,
                "Increase calciner temperature by {:.0}°C to boost alite formation",
                degrees
            ),
            Self::OptimizeFuelConsumption => f.write_str(
                "High alite content achieved - consider optimizing fuel consumption",
            ),
            Self::ImproveFuelEfficiency => {
                f.write_str("Fuel efficiency could be improved - current ratio is high")
            }
        }
    }
}

// =============================================================================
// ASSESSMENT & REPORT
// =============================================================================

/// Everything the predictor derives from one reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub predictions: PhasePrediction,
    pub total_phases: f64,
    pub quality: QualityLabel,
    pub recommendations: Vec<Recommendation>,
}

/// A completed prediction, stamped with its completion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub assessment: Assessment,
    /// Local completion time, `%Y-%m-%d %H:%M:%S`.
    pub timestamp: String,
    pub model_info: String,
}

/// Readiness snapshot of the prediction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub system_ready: bool,
    pub model_path: String,
    pub models_loaded: usize,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the clinker system.
#[derive(Debug, Error)]
pub enum ClinkerError {
    /// Model artifacts were not loaded at startup.
    #[error("Model system not ready - check model files in models/ directory")]
    NotReady,

    /// A provided input field could not be read as a number.
    #[error("Prediction failed: {0}")]
    Validation(String),

    /// The request carried no usable body.
    #[error("{0}")]
    MalformedRequest(String),

    /// Any other failure during prediction.
    #[error("{0}")]
    Internal(String),

    /// An artifact could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================
