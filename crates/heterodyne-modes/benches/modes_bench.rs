//! Criterion benchmarks for heterodyne-modes demodulation pipelines
//!
//! Run with: cargo bench -p heterodyne-modes
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use heterodyne_core::{IqBlock, Sideband};
use heterodyne_modes::{
    AmParams, AmPipeline, CwParams, CwPipeline, NbfmParams, NbfmPipeline, Pipeline, SsbParams,
    SsbPipeline, WbfmParams, WbfmPipeline,
};

const RF_RATE: f32 = 960_000.0;
const AUDIO_RATE: f32 = 48_000.0;
const BLOCK_SIZES: &[usize] = &[960, 1920, 9600];

fn generate_tone_iq(sample_rate: f32, freq: f32, size: usize) -> IqBlock {
    let mut i = Vec::with_capacity(size);
    let mut q = Vec::with_capacity(size);
    for n in 0..size {
        let t = n as f32 / sample_rate;
        let phase = std::f32::consts::TAU * freq * t;
        i.push(0.4 * phase.cos());
        q.push(0.4 * phase.sin());
    }
    IqBlock::new(i, q, 100_000_000.0)
}

fn bench_wbfm(c: &mut Criterion) {
    let mut group = c.benchmark_group("WbfmPipeline");
    for &block_size in BLOCK_SIZES {
        let iq = generate_tone_iq(RF_RATE, 2000.0, block_size);
        group.bench_with_input(BenchmarkId::new("process", block_size), &block_size, |b, _| {
            let mut pipeline = WbfmPipeline::new(RF_RATE, AUDIO_RATE, WbfmParams::new());
            b.iter(|| black_box(pipeline.process(black_box(&iq))));
        });
    }
    group.finish();
}

fn bench_nbfm(c: &mut Criterion) {
    let mut group = c.benchmark_group("NbfmPipeline");
    for &block_size in BLOCK_SIZES {
        let iq = generate_tone_iq(RF_RATE, 1000.0, block_size);
        group.bench_with_input(BenchmarkId::new("process", block_size), &block_size, |b, _| {
            let mut pipeline = NbfmPipeline::new(RF_RATE, AUDIO_RATE, NbfmParams::new());
            b.iter(|| black_box(pipeline.process(black_box(&iq))));
        });
    }
    group.finish();
}

fn bench_am(c: &mut Criterion) {
    let mut group = c.benchmark_group("AmPipeline");
    for &block_size in BLOCK_SIZES {
        let iq = generate_tone_iq(RF_RATE, 500.0, block_size);
        group.bench_with_input(BenchmarkId::new("process", block_size), &block_size, |b, _| {
            let mut pipeline = AmPipeline::new(RF_RATE, AUDIO_RATE, AmParams::new());
            b.iter(|| black_box(pipeline.process(black_box(&iq))));
        });
    }
    group.finish();
}

fn bench_ssb(c: &mut Criterion) {
    let mut group = c.benchmark_group("SsbPipeline");
    for &block_size in BLOCK_SIZES {
        let iq = generate_tone_iq(RF_RATE, 800.0, block_size);
        group.bench_with_input(BenchmarkId::new("process", block_size), &block_size, |b, _| {
            let mut pipeline = SsbPipeline::new(RF_RATE, AUDIO_RATE, SsbParams::new(Sideband::Upper));
            b.iter(|| black_box(pipeline.process(black_box(&iq))));
        });
    }
    group.finish();
}

fn bench_cw(c: &mut Criterion) {
    let mut group = c.benchmark_group("CwPipeline");
    for &block_size in BLOCK_SIZES {
        let iq = generate_tone_iq(RF_RATE, 0.0, block_size);
        group.bench_with_input(BenchmarkId::new("process", block_size), &block_size, |b, _| {
            let mut pipeline = CwPipeline::new(RF_RATE, AUDIO_RATE, CwParams::new());
            b.iter(|| black_box(pipeline.process(black_box(&iq))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_wbfm, bench_nbfm, bench_am, bench_ssb, bench_cw);
criterion_main!(benches);
