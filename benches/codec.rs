use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_dotted::{flatten, from_str, to_string, unflatten, DottedMap, DottedValue, NestedMap};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct NestedData {
    id: u32,
    owner: User,
    metadata: Metadata,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone)]
struct Metadata {
    created: String,
    updated: String,
    version: u32,
}

fn nested_data() -> NestedData {
    NestedData {
        id: 42,
        owner: User {
            id: 123,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            active: true,
        },
        metadata: Metadata {
            created: "2023-01-01T00:00:00Z".to_string(),
            updated: "2023-12-31T23:59:59Z".to_string(),
            version: 3,
        },
        tags: vec![
            "important".to_string(),
            "verified".to_string(),
            "production".to_string(),
        ],
    }
}

/// A document `depth` levels deep with `width` entries per branch.
fn wide_document(depth: usize, width: usize) -> DottedMap {
    let mut map = DottedMap::new();
    for i in 0..width {
        let value = if depth <= 1 {
            DottedValue::String(format!("value {}", i))
        } else {
            DottedValue::Object(wide_document(depth - 1, width))
        };
        map.insert(format!("key{}", i), value);
    }
    map
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let user = nested_data().owner;

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let text = "id=\"123\"\nname=\"Alice\"\nemail=\"alice@example.com\"\nactive=\"true\"\n";

    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_str::<User>(black_box(text)))
    });
}

fn benchmark_nested_struct(c: &mut Criterion) {
    let data = nested_data();
    let text = to_string(&data).unwrap();

    c.bench_function("serialize_nested_struct", |b| {
        b.iter(|| to_string(black_box(&data)))
    });

    c.bench_function("deserialize_nested_struct", |b| {
        b.iter(|| from_str::<NestedData>(black_box(&text)))
    });
}

fn benchmark_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");

    for depth in [2, 4, 6].iter() {
        let doc = wide_document(*depth, 4);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &doc, |b, doc| {
            b.iter(|| flatten(black_box(doc), ".").count())
        });
    }
    group.finish();
}

fn benchmark_unflatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("unflatten");

    for depth in [2, 4, 6].iter() {
        let lines: Vec<String> = flatten(&wide_document(*depth, 4), ".").collect();
        group.bench_with_input(BenchmarkId::from_parameter(depth), &lines, |b, lines| {
            b.iter(|| unflatten(black_box(lines), "."))
        });
    }
    group.finish();
}

fn benchmark_nested_map_access(c: &mut Criterion) {
    let mut map = NestedMap::new();
    for i in 0..100 {
        map.set(&format!("section{}.group{}.key{}", i % 10, i % 7, i), i);
    }

    c.bench_function("nested_map_get", |b| {
        b.iter(|| map.get(black_box("section3.group2.key23")))
    });

    c.bench_function("nested_map_set", |b| {
        b.iter(|| {
            let mut map = map.clone();
            map.set(black_box("section3.group2.new"), 1)
        })
    });
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let data = nested_data();
    let mut group = c.benchmark_group("format_comparison");

    group.bench_function("dotted_serialize", |b| {
        b.iter(|| to_string(black_box(&data)))
    });

    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&data)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_nested_struct,
    benchmark_flatten,
    benchmark_unflatten,
    benchmark_nested_map_access,
    benchmark_comparison_with_json
);
criterion_main!(benches);
