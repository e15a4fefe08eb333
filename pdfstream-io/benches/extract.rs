use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pdfstream_io::{extract_stream, ExtractOptions};
use std::io::Cursor;

fn generate_stream(payload_len: usize) -> Vec<u8> {
    let mut buf: Vec<u8> = (0..payload_len).map(|i| (i % 64) as u8 + 0x80).collect();
    buf.extend_from_slice(b"\r\nendstream\nendobj\n");
    buf
}

fn bench_declared_vs_blind(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_extraction");
    let opts = ExtractOptions::default();

    for size in [4 * 1024, 256 * 1024, 4 * 1024 * 1024] {
        let bytes = generate_stream(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("declared", size), &bytes, |b, bytes| {
            b.iter(|| {
                let mut src = Cursor::new(bytes.as_slice());
                black_box(extract_stream(&mut src, size, &opts).unwrap())
            })
        });

        group.bench_with_input(BenchmarkId::new("blind", size), &bytes, |b, bytes| {
            b.iter(|| {
                let mut src = Cursor::new(bytes.as_slice());
                black_box(extract_stream(&mut src, 0, &opts).unwrap())
            })
        });

        group.bench_with_input(BenchmarkId::new("fallback", size), &bytes, |b, bytes| {
            b.iter(|| {
                let mut src = Cursor::new(bytes.as_slice());
                black_box(extract_stream(&mut src, size * 2, &opts).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_increment_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("blind_increment");
    let bytes = generate_stream(1024 * 1024);

    for increment in [256usize, 1024, 16 * 1024, 256 * 1024] {
        let opts = ExtractOptions {
            increment,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(increment), &bytes, |b, bytes| {
            b.iter(|| {
                let mut src = Cursor::new(bytes.as_slice());
                black_box(extract_stream(&mut src, 0, &opts).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_declared_vs_blind, bench_increment_sizes);
criterion_main!(benches);
