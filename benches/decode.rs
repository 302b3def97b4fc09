//! Benchmarks for the debug decoders.
//!
//! Measures decoding throughput for:
//! - The sequential method/variable debug stream
//! - The flattened address→line table reshape

extern crate debugscope;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use debugscope::debuginfo::{
    decode_debug_stream, decode_line_table, encode_debug_stream, DebugObjectFileInfo,
    MethodDebugInfo, VariableDebugInfo,
};
use std::hint::black_box;

/// Build a stream resembling a real object file: many methods, a handful of
/// variables each.
fn synthetic_stream(methods: usize, variables_per_method: usize) -> Vec<u8> {
    let info = DebugObjectFileInfo {
        methods: (0..methods)
            .map(|m| MethodDebugInfo {
                name: format!("[J]com.example.Class{}.method{}(II)V", m % 64, m),
                variables: (0..variables_per_method)
                    .map(|v| VariableDebugInfo {
                        name: format!("local{v}"),
                        is_register_relative: v % 2 == 0,
                        register: (v % 256) as u8,
                        offset: (v as i32) * -8,
                    })
                    .collect(),
            })
            .collect(),
    };

    encode_debug_stream(&info)
}

fn bench_decode_debug_stream(c: &mut Criterion) {
    let stream = synthetic_stream(1000, 6);

    let mut group = c.benchmark_group("debug_stream");
    group.throughput(Throughput::Bytes(stream.len() as u64));
    group.bench_function("decode_1000_methods", |b| {
        b.iter(|| {
            let decoded = decode_debug_stream(black_box(&stream)).unwrap();
            black_box(decoded)
        });
    });
    group.finish();
}

fn bench_decode_line_table(c: &mut Criterion) {
    let entries = 50_000u64;
    let pairs: Vec<u64> = (0..entries)
        .flat_map(|i| [0x40_0000 + i * 4, 100 + i % 500])
        .collect();

    let mut group = c.benchmark_group("line_table");
    group.throughput(Throughput::Bytes((pairs.len() * 8) as u64));
    group.bench_function("decode_50k_entries", |b| {
        b.iter(|| {
            let decoded = decode_line_table(black_box(&pairs), entries as u32).unwrap();
            black_box(decoded)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_decode_debug_stream, bench_decode_line_table);
criterion_main!(benches);
