//! Criterion benchmarks for heterodyne-analysis components.
//!
//! Run with: cargo bench -p heterodyne-analysis

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use heterodyne_analysis::{fft_peak_bin, magnitude_spectrum, power_db, Window};
use std::f32::consts::PI;

const SAMPLE_RATE: f32 = 48_000.0;

fn generate_sine(size: usize, frequency: f32) -> Vec<f32> {
    (0..size)
        .map(|i| (2.0 * PI * frequency * i as f32 / SAMPLE_RATE).sin())
        .collect()
}

fn bench_fft_peak_bin(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft_peak_bin");
    for size in [1024usize, 4096, 16384] {
        let signal = generate_sine(size, 1000.0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &signal, |b, signal| {
            b.iter(|| fft_peak_bin(black_box(signal), SAMPLE_RATE));
        });
    }
    group.finish();
}

fn bench_magnitude_spectrum(c: &mut Criterion) {
    let signal = generate_sine(4096, 1000.0);
    c.bench_function("magnitude_spectrum_4096", |b| {
        b.iter(|| magnitude_spectrum(black_box(&signal), 4096, Window::Hann));
    });
}

fn bench_power_db(c: &mut Criterion) {
    let signal = generate_sine(4096, 1000.0);
    c.bench_function("power_db_4096", |b| {
        b.iter(|| power_db(black_box(&signal)));
    });
}

criterion_group!(benches, bench_fft_peak_bin, bench_magnitude_spectrum, bench_power_db);
criterion_main!(benches);
