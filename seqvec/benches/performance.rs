use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use seqvec::{Bounded, Global, SeqVec};

fn bench_sequential_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_push");

    for size in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("global", size), size, |b, &size| {
            b.iter(|| {
                let mut seq = SeqVec::new();
                for i in 0..size {
                    seq.push(black_box(i)).unwrap();
                }
                black_box(seq.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("bounded", size), size, |b, &size| {
            b.iter(|| {
                let mut seq = SeqVec::new_in(Bounded::unlimited());
                for i in 0..size {
                    seq.push(black_box(i)).unwrap();
                }
                black_box(seq.len())
            });
        });
    }
    group.finish();
}

fn bench_random_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_access");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("at", size), size, |b, &size| {
            let seq = SeqVec::try_from_iter_in(0..size, Global).unwrap();

            b.iter(|| {
                for i in 0..size {
                    black_box(seq.at(i).ok());
                }
            });
        });
    }
    group.finish();
}

fn bench_front_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("front_insert");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("insert_at_zero", size), size, |b, &size| {
            b.iter(|| {
                let mut seq = SeqVec::new();
                for i in 0..size {
                    seq.insert(0, black_box(i)).unwrap();
                }
                black_box(seq.len())
            });
        });
    }
    group.finish();
}

fn bench_block_insert_erase(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_insert_erase");

    for block in [16, 256].iter() {
        group.throughput(Throughput::Elements(*block as u64));
        group.bench_with_input(BenchmarkId::new("middle", block), block, |b, &block| {
            let items: Vec<u64> = (0..block as u64).collect();
            let mut seq = SeqVec::try_from_slice(&items).unwrap();

            b.iter(|| {
                let middle = seq.len() / 2;
                seq.insert_slice(middle, black_box(&items)).unwrap();
                seq.erase(middle..middle + block).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_iterator_performance(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterator");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("full_iteration", size), size, |b, &size| {
            let seq = SeqVec::try_from_iter_in(0..size, Global).unwrap();

            b.iter(|| {
                for item in black_box(&seq) {
                    black_box(item);
                }
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_push,
    bench_random_access,
    bench_front_insert,
    bench_block_insert_erase,
    bench_iterator_performance
);
criterion_main!(benches);
