use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use nulled::{Decode, Encode, NullInt, NullString, NullTime, QueryValues};
use serde::Deserialize;

const DOCUMENT: &str =
    r#"{"id": 42, "parent": null, "name": "widget", "note": "", "at": "2023-10-27T10:00:00Z"}"#;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Data {
    id: NullInt,
    parent: NullInt,
    name: NullString,
    note: NullString,
    at: NullTime,
}

fn json(c: &mut Criterion) {
    c.bench_function("json document decode", |b| {
        b.iter(|| serde_json::from_str::<Data>(black_box(DOCUMENT)).unwrap())
    });
    c.bench_function("json int decode", |b| {
        b.iter(|| NullInt::decode_json(black_box(b"1234567")).unwrap())
    });
}

fn query(c: &mut Criterion) {
    let name = NullString::from_value("widget");
    let id = NullInt::from_value(42);
    c.bench_function("query encode", |b| {
        b.iter(|| {
            QueryValues::new()
                .val("id", black_box(id))
                .unwrap()
                .val("name", black_box(&name))
                .unwrap()
                .encode()
        })
    });
}

fn record(c: &mut Criterion) {
    let name = NullString::from_value("widget");
    let bytes = name.encode_record().unwrap();
    c.bench_function("record encode", |b| {
        b.iter(|| black_box(&name).encode_record().unwrap())
    });
    c.bench_function("record decode", |b| {
        b.iter(|| NullString::decode_record(black_box(&bytes)).unwrap())
    });
}

criterion_group!(benches, json, query, record);
criterion_main!(benches);
