//! # Innate Primitives
//!
//! Hardcoded constants for the clinker phase predictor.
//!
//! The predictor starts from fixed coefficients taken from the plant's
//! scenario analysis. These are compiled into the binary and are immutable at
//! runtime.

// =============================================================================
// INPUT DEFAULTS
// =============================================================================

/// Calciner temperature used when the field is absent (°C).
pub const DEFAULT_CALCINER_TEMP_C: f64 = 900.0;

/// Kiln exit temperature used when the field is absent (°C).
///
/// Carried through to the reading, not consulted by the heuristic.
pub const DEFAULT_KILN_EXIT_TEMP_C: f64 = 1450.0;

/// Fuel/coal feed rate used when the field is absent (kg/h).
pub const DEFAULT_FUEL_COAL_KG_H: f64 = 5000.0;

/// Production rate used when the field is absent (t/h).
pub const DEFAULT_PRODUCTION_RATE_TPH: f64 = 180.0;

// =============================================================================
// TEMPERATURE CORRELATION MODEL
// =============================================================================

/// Calciner temperature at which alite sits at its baseline.
pub const REFERENCE_CALCINER_TEMP_C: f64 = 900.0;

/// Alite gained per degree of calciner temperature (% per °C).
pub const ALITE_SENSITIVITY: f64 = 0.05;

/// Alite percentage at the reference temperature.
pub const BASE_ALITE_PCT: f64 = 61.0;

/// Alite + belite share; belite is derived from the clamped alite.
pub const ALITE_BELITE_SUM_PCT: f64 = 75.0;

pub const ALITE_MIN_PCT: f64 = 50.0;
pub const ALITE_MAX_PCT: f64 = 75.0;
pub const BELITE_MIN_PCT: f64 = 5.0;
pub const BELITE_MAX_PCT: f64 = 30.0;

/// Baseline of the stable minor phases.
pub const BASE_ALUMINATE_PCT: f64 = 10.0;
pub const BASE_FERRITE_PCT: f64 = 8.0;

/// Standard deviation of the jitter applied to aluminate and ferrite.
pub const MINOR_PHASE_NOISE_STD_DEV: f64 = 0.1;

// =============================================================================
// QUALITY & ADVICE THRESHOLDS
// =============================================================================

/// Inclusive total-phase band for an EXCELLENT assessment.
pub const EXCELLENT_BAND: (f64, f64) = (95.0, 105.0);

/// Inclusive total-phase band for a GOOD assessment.
pub const GOOD_BAND: (f64, f64) = (90.0, 110.0);

/// Below this alite level the predictor advises a hotter calciner.
pub const LOW_ALITE_PCT: f64 = 58.0;

/// Alite level the temperature advice aims for.
pub const TARGET_ALITE_PCT: f64 = 60.0;

/// Above this alite level the predictor suggests saving fuel.
pub const HIGH_ALITE_PCT: f64 = 65.0;

/// Fuel (kg/h) per tonne of production above which efficiency is flagged.
pub const MAX_FUEL_RATIO: f64 = 30.0;

// =============================================================================
// FIXED MESSAGES
// =============================================================================

/// Description attached to every prediction.
pub const MODEL_INFO: &str = "Using temperature correlation model (sensitivity: 0.05% alite/°C)";

/// Timestamp layout used in reports and status snapshots.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// ARTIFACT FORMAT
// =============================================================================

/// Magic bytes for the artifact file header.
pub const MAGIC_BYTES: &[u8; 4] = b"CLNK";

/// Current artifact format version.
///
/// Increment this when making breaking changes to the artifact layout.
pub const FORMAT_VERSION: u8 = 1;

/// Target names assumed when the info artifact does not list any.
pub const DEFAULT_TARGET_NAMES: [&str; 4] = [
    "clinker_XRD_alite_pct",
    "clinker_belite_pct",
    "clinker_aluminate_pct",
    "clinker_ferrite_pct",
];

/// Feature names the baseline artifacts are written with.
pub const DEFAULT_FEATURE_NAMES: [&str; 4] = [
    "calciner_temp_C",
    "kiln_exit_temp_C",
    "fuel_coal_kg_h",
    "production_rate_tph",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excellent_band_nested_in_good_band() {
        assert!(GOOD_BAND.0 <= EXCELLENT_BAND.0);
        assert!(EXCELLENT_BAND.1 <= GOOD_BAND.1);
    }

    #[test]
    fn reference_point_is_inside_clamp() {
        assert!((ALITE_MIN_PCT..=ALITE_MAX_PCT).contains(&BASE_ALITE_PCT));
        let belite = ALITE_BELITE_SUM_PCT - BASE_ALITE_PCT;
        assert!((BELITE_MIN_PCT..=BELITE_MAX_PCT).contains(&belite));
    }

    #[test]
    fn magic_bytes_correct() {
        assert_eq!(MAGIC_BYTES, b"CLNK");
    }
}
