//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands, plus the
//! artifact file I/O shared by the server and the CLI.

use crate::api::{self, PredictResponse};
use clinker_core::{
    ArtifactBundle, ArtifactPaths, ClinkerError, ModelArtifacts, PredictionService, RawReading,
    artifact_from_bytes, artifact_to_bytes, formats::MAX_ARTIFACT_SIZE,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

// =============================================================================
// FILE VALIDATION
// =============================================================================

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), ClinkerError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| ClinkerError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(ClinkerError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

// =============================================================================
// ARTIFACT I/O
// =============================================================================

/// Read and decode one artifact file.
fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ClinkerError> {
    validate_file_size(path, MAX_ARTIFACT_SIZE as u64)?;
    let data = std::fs::read(path)
        .map_err(|e| ClinkerError::IoError(format!("Read {}: {}", path.display(), e)))?;
    artifact_from_bytes(&data)
}

/// Encode and write one artifact file.
fn write_artifact<T: Serialize>(path: &Path, artifact: &T) -> Result<(), ClinkerError> {
    let data = artifact_to_bytes(artifact)?;
    std::fs::write(path, data)
        .map_err(|e| ClinkerError::IoError(format!("Write {}: {}", path.display(), e)))
}

/// Decode the artifact set. The info file is optional.
fn read_bundle(paths: &ArtifactPaths) -> Result<ArtifactBundle, ClinkerError> {
    let models = read_artifact(&paths.models)?;
    let scaler = read_artifact(&paths.scaler)?;
    let info = if paths.info.exists() {
        Some(read_artifact(&paths.info)?)
    } else {
        None
    };

    Ok(ArtifactBundle {
        models,
        scaler,
        info,
    })
}

/// Load the artifacts under `base`.
///
/// Never fails: missing or unreadable artifacts are logged and yield a
/// not-ready state, so the server still starts and reports its status.
pub fn load_artifacts(base: &Path) -> ModelArtifacts {
    let paths = ArtifactPaths::for_base(base);
    let models_present = paths.models.exists();
    let scaler_present = paths.scaler.exists();

    tracing::info!("Attempting to load: {}", paths.models.display());
    tracing::info!("File exists: {}", models_present);

    if !(models_present && scaler_present) {
        tracing::error!("Model files not found:");
        tracing::error!("  {}: {}", paths.models.display(), models_present);
        tracing::error!("  {}: {}", paths.scaler.display(), scaler_present);
        return ModelArtifacts::unavailable(base);
    }

    match read_bundle(&paths) {
        Ok(bundle) => {
            let artifacts = ModelArtifacts::from_bundle(base, bundle);
            tracing::info!("Models loaded successfully");
            tracing::info!(
                "Available targets: {:?}",
                artifacts.model_names().collect::<Vec<_>>()
            );
            artifacts
        }
        Err(e) => {
            tracing::error!("Error loading models: {}", e);
            ModelArtifacts::unavailable(base)
        }
    }
}

/// Write the baseline artifact set under `base`.
pub fn write_baseline_artifacts(base: &Path, force: bool) -> Result<ArtifactPaths, ClinkerError> {
    let paths = ArtifactPaths::for_base(base);

    if !force && (paths.models.exists() || paths.scaler.exists()) {
        return Err(ClinkerError::IoError(format!(
            "Artifacts already exist at {}. Use --force to overwrite.",
            base.display()
        )));
    }

    if let Some(parent) = paths.models.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ClinkerError::IoError(format!("Create {}: {}", parent.display(), e))
        })?;
    }

    let bundle = ArtifactBundle::baseline();
    write_artifact(&paths.models, &bundle.models)?;
    write_artifact(&paths.scaler, &bundle.scaler)?;
    if let Some(info) = &bundle.info {
        write_artifact(&paths.info, info)?;
    }

    Ok(paths)
}

/// Load artifacts and build the prediction service.
pub fn build_service(
    model_path: &Path,
    seed: Option<u64>,
) -> Result<PredictionService, ClinkerError> {
    let artifacts = load_artifacts(model_path);
    if let Some(seed) = seed {
        tracing::info!("Phase jitter seeded with {}", seed);
    }
    PredictionService::with_gaussian_noise(artifacts, seed)
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(
    model_path: &Path,
    seed: Option<u64>,
    host: &str,
    port: u16,
) -> Result<(), ClinkerError> {
    let service = build_service(model_path, seed)?;

    println!("Clinker Phase Prediction Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:       {}", host);
    println!("  Port:       {}", port);
    println!("  Model path: {}", model_path.display());
    println!("  Ready:      {}", service.is_ready());
    println!();
    println!("Endpoints:");
    println!("  GET  /           - Dashboard");
    println!("  POST /predict    - Predict clinker phases");
    println!("  GET  /api/status - System status");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, service).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show artifact readiness.
pub fn cmd_status(model_path: &Path, json_mode: bool) -> Result<(), ClinkerError> {
    let artifacts = load_artifacts(model_path);

    if json_mode {
        let output = serde_json::json!({
            "system_ready": artifacts.is_ready(),
            "model_path": model_path.display().to_string(),
            "models_loaded": artifacts.models_loaded(),
            "models": artifacts.model_names().collect::<Vec<_>>(),
            "feature_names": artifacts.feature_names(),
            "target_names": artifacts.target_names(),
            "version": api::API_VERSION
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Clinker System Status");
    println!("=====================");
    println!("Model path:    {}", model_path.display());
    println!(
        "Ready:         {}",
        if artifacts.is_ready() { "yes" } else { "no" }
    );
    println!("Models loaded: {}", artifacts.models_loaded());

    if artifacts.is_ready() {
        println!();
        println!("Targets:");
        for name in artifacts.target_names() {
            println!("  - {}", name);
        }
        if !artifacts.feature_names().is_empty() {
            println!("Features:");
            for name in artifacts.feature_names() {
                println!("  - {}", name);
            }
        }
    } else {
        println!();
        println!("Run `clinker init` to write a baseline artifact set.");
    }

    Ok(())
}

// =============================================================================
// PREDICT COMMAND
// =============================================================================

/// Run one prediction and print it.
pub fn cmd_predict(
    model_path: &Path,
    seed: Option<u64>,
    json_mode: bool,
    raw: &RawReading,
) -> Result<(), ClinkerError> {
    let service = build_service(model_path, seed)?;
    let response = PredictResponse::from(service.predict(raw)?);

    if json_mode {
        let output = serde_json::to_string_pretty(&response)
            .map_err(|e| ClinkerError::SerializationError(e.to_string()))?;
        println!("{}", output);
        return Ok(());
    }

    let p = &response.predictions;
    println!("Clinker Phase Prediction");
    println!("========================");
    println!("Alite:     {:>6.2} %", p.alite_pct);
    println!("Belite:    {:>6.2} %", p.belite_pct);
    println!("Aluminate: {:>6.2} %", p.aluminate_pct);
    println!("Ferrite:   {:>6.2} %", p.ferrite_pct);
    println!("Total:     {:>6.2} %", response.total_phases);
    println!();
    println!("Quality:   {}", response.quality_assessment);

    if !response.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for rec in &response.recommendations {
            println!("  - {}", rec);
        }
    }

    println!();
    println!("{} ({})", response.model_info, response.timestamp);

    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Write the baseline artifact set.
pub fn cmd_init(model_path: &Path, force: bool) -> Result<(), ClinkerError> {
    let paths = write_baseline_artifacts(model_path, force)?;

    println!("Wrote baseline artifacts:");
    println!("  {}", paths.models.display());
    println!("  {}", paths.scaler.display());
    println!("  {}", paths.info.display());

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_roundtrip_is_ready() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("models").join("kiln");

        write_baseline_artifacts(&base, false).expect("write");
        let artifacts = load_artifacts(&base);

        assert!(artifacts.is_ready());
        assert_eq!(artifacts.models_loaded(), 4);
        assert_eq!(artifacts.target_names().len(), 4);
    }

    #[test]
    fn missing_files_not_ready() {
        let dir = tempfile::tempdir().expect("tempdir");
        let artifacts = load_artifacts(&dir.path().join("absent"));
        assert!(!artifacts.is_ready());
        assert_eq!(artifacts.models_loaded(), 0);
    }

    #[test]
    fn missing_scaler_not_ready() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("kiln");
        let paths = write_baseline_artifacts(&base, false).expect("write");
        std::fs::remove_file(&paths.scaler).expect("remove");

        assert!(!load_artifacts(&base).is_ready());
    }

    #[test]
    fn missing_info_still_ready() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("kiln");
        let paths = write_baseline_artifacts(&base, false).expect("write");
        std::fs::remove_file(&paths.info).expect("remove");

        let artifacts = load_artifacts(&base);
        assert!(artifacts.is_ready());
        assert_eq!(artifacts.target_names().len(), 4);
        assert!(artifacts.feature_names().is_empty());
    }

    #[test]
    fn corrupt_models_not_ready() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("kiln");
        let paths = write_baseline_artifacts(&base, false).expect("write");
        std::fs::write(&paths.models, b"XXXXgarbage").expect("corrupt");

        assert!(!load_artifacts(&base).is_ready());
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("kiln");
        write_baseline_artifacts(&base, false).expect("write");

        assert!(write_baseline_artifacts(&base, false).is_err());
        assert!(write_baseline_artifacts(&base, true).is_ok());
    }
}
