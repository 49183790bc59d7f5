//! # Phase Predictor
//!
//! Maps a [`ProcessReading`] to clinker phase estimates.
//!
//! The model is a temperature correlation: alite rises 0.05% per degree of
//! calciner temperature above 900°C, belite takes what alite leaves of a 75%
//! share, and the minor phases sit at fixed baselines with a little jitter.
//!
//! ## Pipeline
//!
//! ```text
//! reading ──► predict_phases ──► PhasePrediction ──► total ──► QualityLabel
//!    │                                   │
//!    └───────────────► advise ◄──────────┘ (clamped alite)
//! ```
//!
//! Nothing here reads a clock or global state; with a seeded or zero
//! [`NoiseSource`] the output is fully reproducible.

use crate::noise::NoiseSource;
use crate::primitives::{
    ALITE_BELITE_SUM_PCT, ALITE_MAX_PCT, ALITE_MIN_PCT, ALITE_SENSITIVITY, BASE_ALITE_PCT,
    BASE_ALUMINATE_PCT, BASE_FERRITE_PCT, BELITE_MAX_PCT, BELITE_MIN_PCT, HIGH_ALITE_PCT,
    LOW_ALITE_PCT, MAX_FUEL_RATIO, REFERENCE_CALCINER_TEMP_C, TARGET_ALITE_PCT,
};
use crate::types::{
    Assessment, PhasePrediction, ProcessReading, QualityLabel, Recommendation, round2,
};

/// Cap at `hi`, then floor at `lo`.
///
/// Unlike `f64::clamp`, NaN never survives: a value that does not compare
/// below `hi` is replaced by `hi`, so NaN saturates at the upper bound.
fn saturate(value: f64, lo: f64, hi: f64) -> f64 {
    let capped = if value < hi { value } else { hi };
    if capped > lo { capped } else { lo }
}

/// Alite before rounding: the baseline shifted by calciner temperature, clamped.
#[must_use]
pub fn alite_estimate(calciner_temp_c: f64) -> f64 {
    let temp_effect = (calciner_temp_c - REFERENCE_CALCINER_TEMP_C) * ALITE_SENSITIVITY;
    saturate(BASE_ALITE_PCT + temp_effect, ALITE_MIN_PCT, ALITE_MAX_PCT)
}

/// Belite before rounding, derived from the already clamped alite.
#[must_use]
pub fn belite_estimate(alite_pct: f64) -> f64 {
    saturate(ALITE_BELITE_SUM_PCT - alite_pct, BELITE_MIN_PCT, BELITE_MAX_PCT)
}

/// Predict the four phases, rounded to 2 places.
///
/// Draws exactly two samples from `noise`: aluminate first, then ferrite.
pub fn predict_phases(reading: &ProcessReading, noise: &dyn NoiseSource) -> PhasePrediction {
    let alite = alite_estimate(reading.calciner_temp_c);
    let belite = belite_estimate(alite);
    let aluminate = BASE_ALUMINATE_PCT + noise.sample();
    let ferrite = BASE_FERRITE_PCT + noise.sample();

    PhasePrediction {
        alite_pct: round2(alite),
        belite_pct: round2(belite),
        aluminate_pct: round2(aluminate),
        ferrite_pct: round2(ferrite),
    }
}

/// Process advice for a clamped (unrounded) alite level and the reading.
///
/// Alite advice comes first; the fuel check is independent of it.
#[must_use]
pub fn advise(alite_pct: f64, reading: &ProcessReading) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if alite_pct < LOW_ALITE_PCT {
        let degrees = (TARGET_ALITE_PCT - alite_pct) / ALITE_SENSITIVITY;
        recommendations.push(Recommendation::RaiseCalcinerTemperature { degrees });
    } else if alite_pct > HIGH_ALITE_PCT {
        recommendations.push(Recommendation::OptimizeFuelConsumption);
    }

    if reading
        .fuel_ratio()
        .is_some_and(|ratio| ratio > MAX_FUEL_RATIO)
    {
        recommendations.push(Recommendation::ImproveFuelEfficiency);
    }

    recommendations
}

/// Run the whole heuristic for one reading.
pub fn assess(reading: &ProcessReading, noise: &dyn NoiseSource) -> Assessment {
    let predictions = predict_phases(reading, noise);
    let total_phases = predictions.total();
    let quality = QualityLabel::from_total(total_phases);
    let recommendations = advise(alite_estimate(reading.calciner_temp_c), reading);

    Assessment {
        predictions,
        total_phases,
        quality,
        recommendations,
    }
}

// =============================================================================
// TESTS
// =============================================================================
