use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pluck_tuner::{PitchDetector, TunerConfig};

fn bench_analyze(c: &mut Criterion) {
    let config = TunerConfig::default();
    let frame: Vec<f64> = (0..config.window_size)
        .map(|i| 0.5 * (2.0 * std::f64::consts::PI * 110.0 * i as f64 / config.sample_rate).sin())
        .collect();
    let raw: Vec<f32> = frame.iter().map(|&s| s as f32).collect();
    let silent = vec![0.0; config.window_size];

    let mut detector = PitchDetector::new(config).expect("valid config");

    c.bench_function("analyze_4096", |b| {
        b.iter(|| detector.analyze(black_box(&frame)))
    });
    c.bench_function("process_f32_4096", |b| {
        b.iter(|| detector.process(black_box(&raw)))
    });
    c.bench_function("analyze_silent_4096", |b| {
        b.iter(|| detector.analyze(black_box(&silent)))
    });
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
