//! # Artifact Format
//!
//! Binary serialization for model artifacts.
//!
//! File I/O operations are in the app layer; this module only maps values to
//! bytes and back.
//!
//! Format: Header (5 bytes) + postcard-serialized payload.
//! - 4 bytes: Magic ("CLNK")
//! - 1 byte: Version
//!
//! ## Validation
//!
//! Decoding checks the total size against `MAX_ARTIFACT_SIZE` and validates
//! the header before the payload is parsed.

use crate::{ClinkerError, primitives};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Maximum accepted artifact size (64 MB).
pub const MAX_ARTIFACT_SIZE: usize = 64 * 1024 * 1024;

/// Header length in bytes.
const HEADER_LEN: usize = 5;

// =============================================================================
// FILE HEADER
// =============================================================================

/// The header that precedes every artifact payload.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl ArtifactHeader {
    /// Create a new header with current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *primitives::MAGIC_BYTES,
            version: primitives::FORMAT_VERSION,
        }
    }

    /// Validate the header.
    pub fn validate(&self) -> Result<(), ClinkerError> {
        if &self.magic != primitives::MAGIC_BYTES {
            return Err(ClinkerError::SerializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != primitives::FORMAT_VERSION {
            return Err(ClinkerError::SerializationError(format!(
                "Unsupported version: {} (expected {})",
                self.version,
                primitives::FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Write header to bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    /// Read header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ClinkerError> {
        if bytes.len() < HEADER_LEN {
            return Err(ClinkerError::SerializationError(
                "Header too short".to_string(),
            ));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for ArtifactHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize an artifact to bytes (header + payload).
pub fn artifact_to_bytes<T: Serialize>(artifact: &T) -> Result<Vec<u8>, ClinkerError> {
    let payload = postcard::to_stdvec(artifact)
        .map_err(|e| ClinkerError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(HEADER_LEN + payload.len());
    result.extend_from_slice(&ArtifactHeader::new().to_bytes());
    result.extend_from_slice(&payload);

    Ok(result)
}

/// Deserialize an artifact from bytes.
pub fn artifact_from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ClinkerError> {
    if bytes.len() > MAX_ARTIFACT_SIZE {
        return Err(ClinkerError::SerializationError(format!(
            "Data size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_ARTIFACT_SIZE
        )));
    }

    let header = ArtifactHeader::from_bytes(bytes)?;
    header.validate()?;

    postcard::from_bytes(&bytes[HEADER_LEN..]).map_err(|e| {
        ClinkerError::SerializationError(format!("Failed to deserialize artifact: {}", e))
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{FeatureScaler, PipelineInfo};

    #[test]
    fn header_roundtrip() {
        let header = ArtifactHeader::new();
        let bytes = header.to_bytes();
        let restored = ArtifactHeader::from_bytes(&bytes).expect("parse header");

        assert_eq!(restored.magic, *primitives::MAGIC_BYTES);
        assert_eq!(restored.version, primitives::FORMAT_VERSION);
    }

    #[test]
    fn scaler_survives_encoding() {
        let scaler = FeatureScaler {
            mean: vec![900.0, 1450.0],
            scale: vec![25.0, 30.0],
        };
        let bytes = artifact_to_bytes(&scaler).expect("encode");
        assert_eq!(&bytes[0..4], b"CLNK");

        let restored: FeatureScaler = artifact_from_bytes(&bytes).expect("decode");
        assert_eq!(restored, scaler);
    }

    #[test]
    fn invalid_magic_rejected() {
        let mut bytes = vec![0u8; 10];
        bytes[0..4].copy_from_slice(b"XXXX");

        let result: Result<PipelineInfo, _> = artifact_from_bytes(&bytes);
        assert!(result.is_err());
    }

    #[test]
    fn future_version_rejected() {
        let mut bytes = artifact_to_bytes(&PipelineInfo::default()).expect("encode");
        bytes[4] = primitives::FORMAT_VERSION + 1;

        let result: Result<PipelineInfo, _> = artifact_from_bytes(&bytes);
        assert!(matches!(result, Err(ClinkerError::SerializationError(_))));
    }

    #[test]
    fn truncated_data_rejected() {
        let result: Result<PipelineInfo, _> = artifact_from_bytes(b"CLN");
        assert!(result.is_err());
    }
}
