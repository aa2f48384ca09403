use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BatchSize;
use criterion::Criterion;

use dendrite::core::extractor::Extractor;
use dendrite::core::volume::BinaryVolume;

fn line_volume(len: usize) -> BinaryVolume {
    let mut volume = BinaryVolume::new(len + 2, 5, 5);
    for x in 1..=len {
        volume.set(x, 2, 2, true);
    }
    volume
}

fn extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extractor");
    group.significance_level(0.05).measurement_time(std::time::Duration::new(10, 0));

    for len in [100, 1_000, 10_000] {
        group.bench_with_input(format!("line-{len}"), &len, |b, &len| {
            b.iter_batched(|| line_volume(len), Extractor::extract, BatchSize::SmallInput);
        });
    }

    group.finish();
}

criterion_group!(benches, extract);
criterion_main!(benches);
