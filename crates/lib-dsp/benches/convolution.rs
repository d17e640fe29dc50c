//! Convolution and surface generation benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lib_dsp::convolution::{convolve_continuous, ConvolutionConfig};
use lib_dsp::surface::magnitude_surface;
use lib_expr::SignalExpr;
use lib_types::{Complex64, Domain, PoleZeroSet, RocSide, TransformPlane};

fn bench_convolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("convolution");

    let x = SignalExpr::parse("u(t)-u(t-2)", Domain::Continuous).unwrap();
    let h = SignalExpr::parse("exp(-3t)u(t)", Domain::Continuous).unwrap();

    for tau_points in [200, 800, 3200].iter() {
        let config = ConvolutionConfig {
            tau_points: *tau_points,
            ..ConvolutionConfig::default()
        };

        group.bench_with_input(
            BenchmarkId::new("continuous", tau_points),
            &config,
            |b, cfg| {
                b.iter(|| convolve_continuous(black_box(&x), black_box(&h), cfg));
            },
        );
    }

    group.finish();
}

fn bench_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface");

    let pz = PoleZeroSet::new(
        vec![Complex64::new(-1.0, 2.0), Complex64::new(-1.0, -2.0)],
        vec![Complex64::new(0.0, 0.0)],
        1.0,
    );

    for half_range in [5.0, 50.0, 100.0].iter() {
        group.bench_with_input(
            BenchmarkId::new("laplace", half_range),
            half_range,
            |b, &range| {
                b.iter(|| {
                    magnitude_surface(
                        black_box(&pz),
                        TransformPlane::Laplace,
                        RocSide::Causal,
                        range,
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_convolution, bench_surface);
criterion_main!(benches);
