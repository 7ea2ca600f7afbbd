//! Benchmarks for schema-driven packet decoding
//!
//! Measures:
//! - Schema lookup once the cache is warm
//! - Dynamic record decoding per payload type
//! - Full classify-and-decode and typed lifting
//! - Cursor throughput on raw primitives
//!
//! Platform: Cross-platform (fixtures are generated in memory)

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use slipstream::catalog::{classify_and_decode, decode_packet};
use slipstream::decoder::decode;
use slipstream::packets::{LapDataPacket, MotionPacket, SessionPacket};
use slipstream::schema::{preload, schema_for};
use slipstream::test_utils::{header_bytes, lap_data_fixture, motion_fixture, session_fixture};
use slipstream::types::ByteCursor;
use std::hint::black_box;

fn fixtures() -> [(&'static str, Vec<u8>); 3] {
    [("motion", motion_fixture()), ("session", session_fixture()), ("lapData", lap_data_fixture())]
}

fn bench_schema_lookup(c: &mut Criterion) {
    preload().expect("schemas derive");

    let mut group = c.benchmark_group("schema_lookup");
    group.bench_function("motion_cached", |b| {
        b.iter(|| black_box(schema_for::<MotionPacket>().unwrap()))
    });
    group.bench_function("session_cached", |b| {
        b.iter(|| black_box(schema_for::<SessionPacket>().unwrap()))
    });
    group.finish();
}

fn bench_payload_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload_decode");

    let payloads = [
        ("motion", schema_for::<MotionPacket>().unwrap(), motion_fixture()),
        ("session", schema_for::<SessionPacket>().unwrap(), session_fixture()),
        ("lapData", schema_for::<LapDataPacket>().unwrap(), lap_data_fixture()),
    ];

    for (name, schema, datagram) in &payloads {
        // Skip the 24-byte header; payload schemas start after it
        let payload = &datagram[24..];
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::new("record", name), payload, |b, payload| {
            b.iter(|| {
                let mut cursor = ByteCursor::new(black_box(payload));
                black_box(decode(schema, &mut cursor).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_and_decode");

    for (name, datagram) in fixtures() {
        group.throughput(Throughput::Bytes(datagram.len() as u64));
        group.bench_with_input(BenchmarkId::new("dynamic", name), &datagram, |b, datagram| {
            b.iter(|| black_box(classify_and_decode(black_box(datagram)).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("typed", name), &datagram, |b, datagram| {
            b.iter(|| black_box(decode_packet(black_box(datagram)).unwrap()))
        });
    }

    let unsupported = header_bytes(6);
    group.bench_function("unsupported_header_only", |b| {
        b.iter(|| black_box(classify_and_decode(black_box(&unsupported)).unwrap()))
    });

    group.finish();
}

fn bench_cursor(c: &mut Criterion) {
    let data: Vec<u8> = (0..4096u32).flat_map(|v| (v as f32).to_le_bytes()).collect();

    let mut group = c.benchmark_group("cursor");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("read_f32_4k", |b| {
        b.iter(|| {
            let mut cursor = ByteCursor::new(black_box(&data));
            let mut sum = 0.0f32;
            while !cursor.is_exhausted() {
                sum += cursor.read_f32().unwrap();
            }
            black_box(sum)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_schema_lookup, bench_payload_decode, bench_classify, bench_cursor);
criterion_main!(benches);
