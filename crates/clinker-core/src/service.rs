//! # Prediction Service
//!
//! The process-wide prediction state, built once at startup.
//!
//! A `PredictionService` owns the loaded [`ModelArtifacts`] and the
//! [`NoiseSource`] used for jitter. It is never mutated after construction,
//! so request handlers share it behind an `Arc` without locking.

use crate::artifacts::ModelArtifacts;
use crate::noise::{GaussianNoise, NoiseSource};
use crate::predictor;
use crate::primitives::{MINOR_PHASE_NOISE_STD_DEV, MODEL_INFO, TIMESTAMP_FORMAT};
use crate::types::{ClinkerError, PredictionReport, ProcessReading, RawReading, SystemStatus};

/// Startup-constructed prediction state.
pub struct PredictionService {
    artifacts: ModelArtifacts,
    noise: Box<dyn NoiseSource>,
}

impl PredictionService {
    /// Create a service with an explicit noise source.
    pub fn new(artifacts: ModelArtifacts, noise: Box<dyn NoiseSource>) -> Self {
        Self { artifacts, noise }
    }

    /// Create a service with live Gaussian jitter, or seeded jitter when a
    /// seed is given.
    pub fn with_gaussian_noise(
        artifacts: ModelArtifacts,
        seed: Option<u64>,
    ) -> Result<Self, ClinkerError> {
        let noise = match seed {
            Some(seed) => GaussianNoise::seeded(MINOR_PHASE_NOISE_STD_DEV, seed)?,
            None => GaussianNoise::new(MINOR_PHASE_NOISE_STD_DEV)?,
        };
        Ok(Self::new(artifacts, Box::new(noise)))
    }

    /// Whether the artifacts were loaded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.artifacts.is_ready()
    }

    /// The loaded artifacts.
    #[must_use]
    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }

    /// Predict clinker phases for one request.
    ///
    /// Short-circuits with [`ClinkerError::NotReady`] before any parsing when
    /// the artifacts are missing.
    pub fn predict(&self, raw: &RawReading) -> Result<PredictionReport, ClinkerError> {
        if !self.is_ready() {
            return Err(ClinkerError::NotReady);
        }

        let reading = ProcessReading::from_raw(raw)?;
        let assessment = predictor::assess(&reading, self.noise.as_ref());

        let values = [
            assessment.predictions.alite_pct,
            assessment.predictions.belite_pct,
            assessment.predictions.aluminate_pct,
            assessment.predictions.ferrite_pct,
            assessment.total_phases,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ClinkerError::Internal(
                "phase estimate is not a finite number".to_string(),
            ));
        }

        Ok(PredictionReport {
            assessment,
            timestamp: timestamp_now(),
            model_info: MODEL_INFO.to_string(),
        })
    }

    /// Readiness snapshot.
    #[must_use]
    pub fn status(&self) -> SystemStatus {
        SystemStatus {
            system_ready: self.artifacts.is_ready(),
            model_path: self.artifacts.base_path().display().to_string(),
            models_loaded: self.artifacts.models_loaded(),
        }
    }
}

/// Current local time, `%Y-%m-%d %H:%M:%S`.
#[must_use]
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

// =============================================================================
// TESTS
// =============================================================================
