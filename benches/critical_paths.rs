//! Criterion benchmarks for huecurve critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Easing: cubic-bezier evaluation
//! - Generator: palette generation across step counts
//! - Matcher: nearest swatch search for reference colors
//! - Codec: share state compression and decoding

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use huecurve::codec::{deserialize, serialize};
use huecurve::color::PaletteMath;
use huecurve::easing::{resolve, EasingSpec};
use huecurve::generator::generate_palettes;
use huecurve::matcher::{nearest_reference_colors, parse_reference_colors};
use huecurve::models::{PaletteParameterSet, Settings, SharedState};
use rand::rngs::StdRng;
use rand::SeedableRng;

// =============================================================================
// Test Data Generators
// =============================================================================

/// Parameter set holding `count` palettes of `steps` swatches
fn make_params(count: usize, steps: usize) -> PaletteParameterSet {
    let mut params = PaletteParameterSet::with_limits(steps, count.max(3));
    let mut rng = StdRng::seed_from_u64(7);
    while params.params.len() < count {
        params.add_with_rng(&mut rng);
    }
    params
}

/// Comma separated list of `n` reference hex colors
fn make_refs(n: usize) -> String {
    (0..n)
        .map(|i| format!("#{:02x}{:02x}{:02x}", (i * 37) % 256, (i * 91) % 256, (i * 53) % 256))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Easing Benchmarks
// =============================================================================

fn bench_easing(c: &mut Criterion) {
    let mut group = c.benchmark_group("easing");

    for name in ["linear", "quadIn", "backInOut", "0.4,0.64,0.6,0.91"] {
        let curve = resolve(&EasingSpec::from(name)).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| (0..=100).map(|i| curve.ease(black_box(i as f64 / 100.0))).sum::<f64>())
        });
    }

    group.finish();
}

// =============================================================================
// Generator Benchmarks
// =============================================================================

fn bench_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator");
    let settings = Settings::default();

    for steps in [5, 9, 20].iter() {
        let params = make_params(6, *steps);
        group.throughput(Throughput::Elements((6 * steps) as u64));
        group.bench_with_input(BenchmarkId::new("generate_palettes", steps), &params, |b, params| {
            b.iter(|| generate_palettes(black_box(params), &settings, &PaletteMath))
        });
    }

    group.finish();
}

// =============================================================================
// Matcher Benchmarks
// =============================================================================

fn bench_matcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("matcher");
    let settings = Settings::default();
    let palettes = generate_palettes(&make_params(6, 12), &settings, &PaletteMath).unwrap();

    for count in [1, 8, 32].iter() {
        let raw = make_refs(*count);
        let refs = parse_reference_colors(&raw, settings.color_space, &PaletteMath);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("nearest_reference_colors", count), &refs, |b, refs| {
            b.iter(|| nearest_reference_colors(black_box(refs), &palettes, &PaletteMath))
        });
    }

    group.finish();
}

// =============================================================================
// Codec Benchmarks
// =============================================================================

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let state = SharedState { settings: Settings::default(), palette_params: make_params(6, 9) };
    let token = serialize(&state).unwrap();

    group.bench_function("serialize", |b| b.iter(|| serialize(black_box(&state))));
    group.bench_function("deserialize", |b| b.iter(|| deserialize(black_box(&token))));

    group.finish();
}

criterion_group!(benches, bench_easing, bench_generator, bench_matcher, bench_codec);

criterion_main!(benches);
