//! Benchmarks for CSV ingestion parsing

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use orderbook_depth::ingest::{parse_csv, FieldMapping};

const HEADER: &str = "ts_recv,ts_event,rtype,publisher_id,instrument_id,action,side,depth,price,size,flags,ts_in_delta,sequence,bid_px_00,ask_px_00,bid_sz_00,ask_sz_00,symbol";

fn create_payload(rows: usize) -> Vec<u8> {
    let mut text = String::from(HEADER);
    for i in 0..rows {
        let price = 6000.0 + (i % 40) as f64 * 0.25;
        text.push_str(&format!(
            "\n2025-06-11T10:00:00.000000000Z,2025-06-11T10:{:02}:{:02}.{:09}Z,10,1,5602,A,B,0,{},1,128,0,{},{},{},{},{},ESM5",
            (i / 60) % 60,
            i % 60,
            i,
            price,
            i,
            price - 0.25,
            price + 0.25,
            i % 17,
            i % 11,
        ));
        if i % 100 == 0 {
            text.push_str("\nmalformed,row");
        }
    }
    text.into_bytes()
}

fn bench_parse_csv(c: &mut Criterion) {
    let mapping = FieldMapping::default();
    let small = create_payload(1_000);
    let large = create_payload(100_000);

    c.bench_function("parse_csv_1k_rows", |b| {
        b.iter(|| parse_csv(black_box(&small), black_box(&mapping)))
    });

    c.bench_function("parse_csv_100k_rows", |b| {
        b.iter(|| parse_csv(black_box(&large), black_box(&mapping)))
    });
}

criterion_group!(benches, bench_parse_csv);
criterion_main!(benches);
