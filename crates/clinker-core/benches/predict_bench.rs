//! # Predictor Benchmarks
//!
//! Performance benchmarks for the clinker phase predictor.
//!
//! Run with: `cargo bench -p clinker-core`

use clinker_core::{
    ArtifactBundle, FieldValue, GaussianNoise, ModelArtifacts, PredictionService, ProcessReading,
    RawReading, ZeroNoise, artifact_from_bytes, artifact_to_bytes, assess,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_assess(c: &mut Criterion) {
    let mut group = c.benchmark_group("assess");
    let zero = ZeroNoise;
    let gaussian = GaussianNoise::new(0.1).expect("noise");

    for temp in [700.0, 900.0, 1150.0].iter() {
        let reading = ProcessReading {
            calciner_temp_c: *temp,
            ..ProcessReading::default()
        };
        group.bench_with_input(BenchmarkId::new("zero_noise", temp), &reading, |b, r| {
            b.iter(|| black_box(assess(black_box(r), &zero)));
        });
        group.bench_with_input(BenchmarkId::new("gaussian", temp), &reading, |b, r| {
            b.iter(|| black_box(assess(black_box(r), &gaussian)));
        });
    }

    group.finish();
}

fn bench_service_predict(c: &mut Criterion) {
    let service = PredictionService::with_gaussian_noise(
        ModelArtifacts::from_bundle("models/bench", ArtifactBundle::baseline()),
        Some(42),
    )
    .expect("service");
    let raw = RawReading {
        calciner_temp_c: Some(FieldValue::Text("915.5".to_string())),
        fuel_coal_kg_h: Some(FieldValue::Number(6200.0)),
        ..RawReading::default()
    };

    c.bench_function("service_predict", |b| {
        b.iter(|| black_box(service.predict(black_box(&raw))));
    });
}

fn bench_artifact_decode(c: &mut Criterion) {
    let bytes = artifact_to_bytes(&ArtifactBundle::baseline().models).expect("encode");

    c.bench_function("artifact_decode_models", |b| {
        b.iter(|| {
            let models: clinker_core::ModelCollection =
                artifact_from_bytes(black_box(&bytes)).expect("decode");
            black_box(models)
        });
    });
}

criterion_group!(
    benches,
    bench_assess,
    bench_service_predict,
    bench_artifact_decode
);
criterion_main!(benches);
