use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dway::{DWayHeap, FrequencyTable, HuffmanBuilder};

const BRANCHING_FACTORS: [usize; 5] = [2, 3, 4, 5, 6];

fn priorities(n: usize) -> Vec<f64> {
    // Deterministic scramble, no RNG needed.
    (0..n).map(|i| ((i * 7919) % n) as f64).collect()
}

fn bench_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("dway_heap");
    let n = 10_000;
    let prios = priorities(n);
    let elements: Vec<usize> = (0..n).collect();

    for d in BRANCHING_FACTORS {
        group.bench_with_input(BenchmarkId::new("heapify", d), &d, |b, &d| {
            b.iter(|| DWayHeap::build(elements.clone(), prios.clone(), d).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("insert", d), &d, |b, &d| {
            b.iter(|| {
                let mut heap = DWayHeap::with_capacity(d, n).unwrap();
                for (i, &p) in prios.iter().enumerate() {
                    heap.insert(i, p);
                }
                heap
            })
        });

        let heap = DWayHeap::build(elements.clone(), prios.clone(), d).unwrap();
        group.bench_with_input(BenchmarkId::new("extract_max", d), &d, |b, _| {
            b.iter(|| {
                let mut heap = heap.clone();
                while heap.extract_max().is_ok() {}
            })
        });
    }
}

fn bench_huffman(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman");
    // Skewed byte stream over the full alphabet.
    let input = (0..100_000u32)
        .map(|i| ((i * i + 7 * i) % 251) as u8)
        .collect::<Vec<_>>();
    let frequencies: FrequencyTable<u8> = input.iter().copied().collect();

    group.bench_function("frequency_table", |b| {
        b.iter(|| input.iter().copied().collect::<FrequencyTable<u8>>())
    });

    for d in BRANCHING_FACTORS {
        let builder = HuffmanBuilder::new().with_branching_factor(d);
        group.bench_with_input(BenchmarkId::new("build_codes", d), &builder, |b, builder| {
            b.iter(|| builder.build_codes(&frequencies).unwrap())
        });
    }
}

criterion_group!(benches, bench_heap, bench_huffman);
criterion_main!(benches);
