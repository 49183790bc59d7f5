//! # clinker-core
//!
//! The clinker phase predictor - THE LOGIC.
//!
//! This crate turns a handful of cement-kiln readings (calciner temperature,
//! kiln exit temperature, fuel rate, production rate) into estimated clinker
//! mineral phases, a quality label and process advice.
//!
//! ## Layout
//!
//! - `types`: readings, predictions, labels, advice, errors
//! - `primitives`: fixed coefficients, thresholds and messages
//! - `noise`: injectable jitter for the minor phases
//! - `predictor`: the temperature correlation heuristic
//! - `artifacts` / `formats`: model artifacts that gate readiness
//! - `service`: the immutable startup state handed to request handlers
//!
//! ## Architectural Constraints
//!
//! - No async, no network, no file I/O (the app layer reads artifact files)
//! - Randomness only through a `NoiseSource`
//! - Nothing is mutated after the service is built

// =============================================================================
// MODULES
// =============================================================================

pub mod artifacts;
pub mod formats;
pub mod noise;
pub mod predictor;
pub mod primitives;
pub mod service;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Assessment, ClinkerError, FieldValue, PhasePrediction, PredictionReport, ProcessReading,
    QualityLabel, RawReading, Recommendation, SystemStatus,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use artifacts::{
    ArtifactBundle, ArtifactPaths, FeatureScaler, ModelArtifacts, ModelCollection,
    PipelineInfo, RegressionModel,
};
pub use noise::{GaussianNoise, NoiseSource, ZeroNoise};
pub use predictor::{advise, assess, predict_phases};
pub use service::{PredictionService, timestamp_now};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{ArtifactHeader, artifact_from_bytes, artifact_to_bytes};
