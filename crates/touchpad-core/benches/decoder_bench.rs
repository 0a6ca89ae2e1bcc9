//! Criterion benchmarks for record decoding and sub-event interpretation.
//!
//! Run with:
//! ```bash
//! cargo bench --package touchpad-core --bench decoder_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use touchpad_core::{
    decode_record, encode_record, EventDecoder, EventRecord, RecordLayout, TouchTracker,
};

/// One typical burst: slot select, begin, X, Y, sync.
fn burst_bytes(layout: RecordLayout) -> Vec<u8> {
    [
        EventRecord::new(3, 47, 0),
        EventRecord::new(3, 57, 12),
        EventRecord::new(3, 53, 726),
        EventRecord::new(3, 54, 296),
        EventRecord::sync(),
    ]
    .iter()
    .flat_map(|r| encode_record(r, layout))
    .collect()
}

fn bench_decode_record(c: &mut Criterion) {
    let bytes = encode_record(&EventRecord::new(3, 53, 726), RecordLayout::Wide);
    c.bench_function("decode_record_wide", |b| {
        b.iter(|| decode_record(black_box(&bytes), RecordLayout::Wide))
    });
}

fn bench_burst_through_tracker(c: &mut Criterion) {
    let layout = RecordLayout::Wide;
    let bytes = burst_bytes(layout);
    let size = layout.record_size();

    let mut group = c.benchmark_group("burst");
    group.throughput(Throughput::Elements(5));
    group.bench_function("decode_and_track", |b| {
        b.iter(|| {
            let mut decoder = EventDecoder::new();
            let mut tracker = TouchTracker::new();
            for chunk in bytes.chunks(size) {
                if let Ok(record) = decode_record(chunk, layout) {
                    if let Some(event) = decoder.decode(&record) {
                        black_box(tracker.apply(event));
                    }
                }
            }
            tracker.purge_ended()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_decode_record, bench_burst_through_tracker);
criterion_main!(benches);
