//! # Property-Based Tests
//!
//! Invariants of the phase predictor checked with proptest.

use clinker_core::{
    GaussianNoise, ProcessReading, QualityLabel, Recommendation, ZeroNoise, advise, assess,
    predict_phases,
    predictor::{alite_estimate, belite_estimate},
    types::round2,
};
use proptest::prelude::*;

fn reading(calciner_temp_c: f64, fuel_coal_kg_h: f64, production_rate_tph: f64) -> ProcessReading {
    ProcessReading {
        calciner_temp_c,
        fuel_coal_kg_h,
        production_rate_tph,
        ..ProcessReading::default()
    }
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Alite stays inside [50, 75] for any plausible calciner temperature.
    #[test]
    fn alite_within_clamp(temp in 600.0f64..=1200.0) {
        let alite = alite_estimate(temp);
        prop_assert!((50.0..=75.0).contains(&alite));
    }

    /// Alite stays clamped far outside the operating range too.
    #[test]
    fn alite_clamped_everywhere(temp in -1.0e6f64..1.0e6) {
        let phases = predict_phases(&reading(temp, 5000.0, 180.0), &ZeroNoise);
        prop_assert!((50.0..=75.0).contains(&phases.alite_pct));
        prop_assert!((5.0..=30.0).contains(&phases.belite_pct));
    }

    /// Belite is 75 - alite wherever that lands inside its own range.
    #[test]
    fn belite_complements_alite(temp in 600.0f64..=1200.0) {
        let alite = alite_estimate(temp);
        let belite = belite_estimate(alite);
        let raw = 75.0 - alite;
        if (5.0..=30.0).contains(&raw) {
            prop_assert!((belite - raw).abs() < 1e-9);
        } else {
            prop_assert!(belite == 5.0 || belite == 30.0);
        }
    }

    /// Minor phases stay close to their baselines.
    #[test]
    fn minor_phases_near_baseline(seed in any::<u64>()) {
        let noise = GaussianNoise::seeded(0.1, seed).expect("noise");
        let phases = predict_phases(&ProcessReading::default(), &noise);
        prop_assert!((phases.aluminate_pct - 10.0).abs() < 1.0);
        prop_assert!((phases.ferrite_pct - 8.0).abs() < 1.0);
    }

    /// The same seed and reading always produce byte-identical output.
    #[test]
    fn seeded_assessment_is_reproducible(
        seed in any::<u64>(),
        temp in 700.0f64..1100.0,
        fuel in 0.0f64..20000.0,
        production in 1.0f64..400.0
    ) {
        let input = reading(temp, fuel, production);
        let first = assess(&input, &GaussianNoise::seeded(0.1, seed).expect("noise"));
        let second = assess(&input, &GaussianNoise::seeded(0.1, seed).expect("noise"));

        let bytes1 = serde_json::to_vec(&first).expect("serialize");
        let bytes2 = serde_json::to_vec(&second).expect("serialize");
        prop_assert_eq!(bytes1, bytes2);
    }

    /// The quality label always agrees with the reported total.
    #[test]
    fn quality_matches_total(seed in any::<u64>(), temp in 600.0f64..1200.0) {
        let noise = GaussianNoise::seeded(0.1, seed).expect("noise");
        let assessment = assess(&reading(temp, 5000.0, 180.0), &noise);
        prop_assert_eq!(assessment.quality, QualityLabel::from_total(assessment.total_phases));
    }

    /// Alite anywhere in [58, 65] never triggers alite advice.
    #[test]
    fn no_alite_advice_in_comfort_band(alite in 58.0f64..=65.0) {
        let recs = advise(alite, &reading(900.0, 1000.0, 100.0));
        prop_assert!(recs.is_empty());
    }

    /// Fuel advice appears exactly when the ratio exceeds 30.
    #[test]
    fn fuel_advice_tracks_ratio(fuel in 0.0f64..20000.0, production in 1.0f64..400.0) {
        let recs = advise(61.0, &reading(900.0, fuel, production));
        let flagged = recs.contains(&Recommendation::ImproveFuelEfficiency);
        prop_assert_eq!(flagged, fuel / production > 30.0);
    }

    /// Non-positive production never raises fuel advice and never panics.
    #[test]
    fn non_positive_production_is_safe(fuel in 0.0f64..20000.0, production in -100.0f64..=0.0) {
        let recs = advise(61.0, &reading(900.0, fuel, production));
        prop_assert!(!recs.contains(&Recommendation::ImproveFuelEfficiency));
    }

    /// Rounding lands within half a cent and is stable when repeated.
    #[test]
    fn round2_is_nearest_cent(value in -1.0e4f64..1.0e4) {
        let rounded = round2(value);
        prop_assert!((rounded - value).abs() <= 0.005 + 1e-9);
        prop_assert_eq!(round2(rounded), rounded);
    }

    /// Any float, NaN and infinities included, keeps both major phases in range.
    #[test]
    fn alite_saturates_for_any_float(temp in any::<f64>()) {
        let phases = predict_phases(&reading(temp, 5000.0, 180.0), &ZeroNoise);
        prop_assert!((50.0..=75.0).contains(&phases.alite_pct));
        prop_assert!((5.0..=30.0).contains(&phases.belite_pct));
    }
}
