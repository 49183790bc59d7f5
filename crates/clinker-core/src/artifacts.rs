//! # Model Artifacts
//!
//! The trained-model artifacts that gate service readiness.
//!
//! Three files share a base path:
//! - `<base>_models.bin`: regression models keyed by target name
//! - `<base>_scaler.bin`: feature standardisation
//! - `<base>_info.bin`: feature/target name lists (optional)
//!
//! Models and scaler must both be present for the service to be ready. The
//! predictor itself runs on the temperature correlation in
//! [`crate::predictor`]; the artifacts are carried for status reporting.

use crate::primitives::{DEFAULT_FEATURE_NAMES, DEFAULT_TARGET_NAMES};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

// =============================================================================
// ARTIFACT CONTENTS
// =============================================================================

/// A fitted linear model over standardised features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionModel {
    /// Estimator family, e.g. `"linear"`.
    pub estimator: String,
    pub intercept: f64,
    /// One coefficient per feature, in feature-name order.
    pub coefficients: Vec<f64>,
}

/// Models keyed by target name.
pub type ModelCollection = BTreeMap<String, RegressionModel>;

/// Per-feature standardisation: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Names recorded by the training pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineInfo {
    #[serde(default)]
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub target_names: Vec<String>,
}

/// The decoded contents of an artifact set.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactBundle {
    pub models: ModelCollection,
    pub scaler: FeatureScaler,
    pub info: Option<PipelineInfo>,
}

impl ArtifactBundle {
    /// Artifacts that encode the temperature correlation itself.
    ///
    /// Features are centred on the default reading with unit scale, so the
    /// alite and belite coefficients are the raw ±0.05 %/°C sensitivity.
    #[must_use]
    pub fn baseline() -> Self {
        let intercepts = [61.0, 14.0, 10.0, 8.0];
        let calciner_coefficient = [0.05, -0.05, 0.0, 0.0];

        let models = DEFAULT_TARGET_NAMES
            .iter()
            .zip(intercepts.iter().zip(calciner_coefficient.iter()))
            .map(|(name, (&intercept, &slope))| {
                (
                    (*name).to_string(),
                    RegressionModel {
                        estimator: "linear".to_string(),
                        intercept,
                        coefficients: vec![slope, 0.0, 0.0, 0.0],
                    },
                )
            })
            .collect();

        Self {
            models,
            scaler: FeatureScaler {
                mean: vec![900.0, 1450.0, 5000.0, 180.0],
                scale: vec![1.0; DEFAULT_FEATURE_NAMES.len()],
            },
            info: Some(PipelineInfo {
                feature_names: DEFAULT_FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect(),
                target_names: DEFAULT_TARGET_NAMES.iter().map(|s| (*s).to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// ARTIFACT PATHS
// =============================================================================

/// File locations derived from a shared base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub models: PathBuf,
    pub scaler: PathBuf,
    pub info: PathBuf,
}

impl ArtifactPaths {
    /// Derive the three file paths by suffixing the base.
    #[must_use]
    pub fn for_base(base: &Path) -> Self {
        Self {
            models: with_suffix(base, "_models.bin"),
            scaler: with_suffix(base, "_scaler.bin"),
            info: with_suffix(base, "_info.bin"),
        }
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = base.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

// =============================================================================
// LOADED STATE
// =============================================================================

/// Startup-loaded artifact state. Immutable once built.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    base_path: PathBuf,
    bundle: Option<ArtifactBundle>,
    target_names: Vec<String>,
}

impl ModelArtifacts {
    /// State for a base path whose artifacts could not be loaded.
    #[must_use]
    pub fn unavailable(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            bundle: None,
            target_names: Vec::new(),
        }
    }

    /// State for a successfully decoded artifact set.
    ///
    /// Target names come from the info artifact; when it is missing or lists
    /// none, the four default phase targets are used.
    #[must_use]
    pub fn from_bundle(base_path: impl Into<PathBuf>, bundle: ArtifactBundle) -> Self {
        let target_names = bundle
            .info
            .as_ref()
            .map(|info| info.target_names.clone())
            .filter(|names| !names.is_empty())
            .unwrap_or_else(|| DEFAULT_TARGET_NAMES.iter().map(|s| (*s).to_string()).collect());

        Self {
            base_path: base_path.into(),
            bundle: Some(bundle),
            target_names,
        }
    }

    /// Whether models and scaler were both loaded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.bundle.is_some()
    }

    /// Number of entries in the models collection, 0 if not loaded.
    #[must_use]
    pub fn models_loaded(&self) -> usize {
        self.bundle.as_ref().map_or(0, |b| b.models.len())
    }

    /// Base path the artifacts were looked up under.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Names of the loaded models, in key order.
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.bundle
            .iter()
            .flat_map(|b| b.models.keys().map(String::as_str))
    }

    /// Target names from the info artifact or the defaults.
    #[must_use]
    pub fn target_names(&self) -> &[String] {
        &self.target_names
    }

    /// Feature names from the info artifact, empty if none were recorded.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        self.bundle
            .as_ref()
            .and_then(|b| b.info.as_ref())
            .map(|info| info.feature_names.as_slice())
            .unwrap_or_default()
    }
}

// =============================================================================
// TESTS
// =============================================================================
