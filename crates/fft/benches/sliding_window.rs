use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fft::Fft;

fn bench_spectrum(c: &mut Criterion) {
    let samples: Vec<f64> = (0..1960).map(|i| ((i as f64) * 2.0).sin() * 100.0).collect();
    let mut group = c.benchmark_group("fft_spectrum");

    for window_size in [64, 360, 512] {
        let fft = Fft::new(window_size).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(window_size), &samples, |b, samples| {
            b.iter(|| fft.spectrum(black_box(samples)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_spectrum);
criterion_main!(benches);
