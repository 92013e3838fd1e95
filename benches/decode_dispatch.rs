//! Benchmarks for the frame decode hot path.
//!
//! The transport reader calls into the dispatcher for every ACKed frame, so
//! header parse + table lookup + field decode + JSON encode is the latency
//! budget that matters. Workers are bypassed here: decoders run inline
//! against a drained channel so the numbers isolate decode cost from task
//! scheduling.

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use bebop_telemetry::commands::{ardrone3, common, project};
use bebop_telemetry::decode::decode_enum;
use bebop_telemetry::dispatch::DispatchTable;
use bebop_telemetry::{Emitter, NetworkFrame, TELEMETRY_CHANNEL_CAPACITY};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

fn battery_frame() -> NetworkFrame {
    NetworkFrame::new(vec![project::COMMON, common::COMMON_STATE, 0x01, 0x00, 0x55])
}

fn attitude_frame() -> NetworkFrame {
    let mut bytes = vec![project::ARDRONE3, ardrone3::PILOTING_STATE, 0x06, 0x00];
    for value in [0.12f32, -0.04, 1.8] {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    NetworkFrame::new(bytes)
}

fn wifi_scan_frame() -> NetworkFrame {
    let mut bytes = vec![project::ARDRONE3, ardrone3::NETWORK_STATE, 0x00, 0x00];
    bytes.extend_from_slice(b"BenchNetwork\0");
    bytes.extend_from_slice(&(-55i16).to_le_bytes());
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.push(36);
    NetworkFrame::new(bytes)
}

fn bench_header_parse(c: &mut Criterion) {
    let frame = attitude_frame();

    c.bench_function("command_header_parse", |b| {
        b.iter(|| black_box(&frame).command_header().unwrap())
    });
}

fn bench_enum_decode(c: &mut Criterion) {
    const STATES: &[&str] = &["landed", "takingoff", "hovering", "flying", "landing", "emergency"];
    let raw = 3u32.to_le_bytes();

    c.bench_function("enum_decode", |b| {
        b.iter(|| decode_enum(black_box(&raw), black_box(STATES)).unwrap())
    });
}

fn bench_decode_and_emit(c: &mut Criterion) {
    let table = DispatchTable::new();
    let (tx, mut rx) = mpsc::channel(TELEMETRY_CHANNEL_CAPACITY);
    let emitter = Emitter::new(tx, CancellationToken::new());

    let mut group = c.benchmark_group("decode_and_emit");
    for (name, frame) in
        [("battery", battery_frame()), ("attitude", attitude_frame()), ("wifi_scan", wifi_scan_frame())]
    {
        let header = frame.command_header().unwrap();
        let entry = table
            .project(header.project)
            .and_then(|p| p.class(header.class))
            .expect("benchmark frame must be dispatchable");

        group.throughput(Throughput::Bytes(frame.data.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                entry
                    .decode(black_box(&emitter), header.command_id(), black_box(&frame))
                    .unwrap();
                // Drain so the bounded channel never fills mid-measurement.
                while rx.try_recv().is_ok() {}
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_header_parse, bench_enum_decode, bench_decode_and_emit);
criterion_main!(benches);
