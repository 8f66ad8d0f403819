use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dsbuffer_core::RingBuffer;

// 1024 is masked addressing, 1000 falls back to modulo.
const CAPACITIES: [usize; 2] = [1024, 1000];

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");

    for &capacity in CAPACITIES.iter() {
        for transform in [false, true] {
            group.throughput(Throughput::Elements(capacity as u64));
            group.bench_with_input(
                BenchmarkId::new(if transform { "mirrored" } else { "plain" }, capacity),
                &capacity,
                |b, &capacity| {
                    let mut buffer = RingBuffer::new(capacity, transform).unwrap();
                    b.iter(|| {
                        for i in 0..capacity {
                            buffer.push(black_box(i as f32));
                        }
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_latest_fir_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("latest_fir_output");

    for &capacity in CAPACITIES.iter() {
        let taps = vec![1.0 / 64.0; 64];
        let mut buffer = RingBuffer::new(capacity, false).unwrap();
        buffer.setup_fir_taps(&taps).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, _| {
            b.iter(|| {
                buffer.push(black_box(0.5));
                black_box(buffer.latest_fir_output().unwrap())
            });
        });
    }

    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_transform");

    for &capacity in CAPACITIES.iter() {
        let mut buffer = RingBuffer::new(capacity, true).unwrap();
        for i in 0..capacity {
            buffer.push((i as f32 * 0.05).sin());
        }

        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, _| {
            b.iter(|| black_box(buffer.compute_transform().unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_push, bench_latest_fir_output, bench_transform);
criterion_main!(benches);
