use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hive_text::{to_row, RowWriter};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Serialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
    tags: Vec<String>,
}

fn benchmark_typed_row(c: &mut Criterion) {
    let mut writer = RowWriter::new();
    let counters: HashMap<String, i64> =
        HashMap::from([("clicks".to_string(), 3), ("scrolls".to_string(), 12)]);

    c.bench_function("typed_row", |b| {
        b.iter(|| {
            writer.write_string(black_box("alice@example.com"));
            writer.write_int(black_box(123));
            writer.write_bool(true);
            writer.write_str_int_map(black_box(&counters));
            writer.write_int_array(black_box(&[1i64, 2, 3]));
            writer.finish_row()
        })
    });
}

fn benchmark_escape_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape_string");
    let plain = "a".repeat(256);
    let heavy = "a,\\;:".repeat(64);

    for (name, input) in [("plain", &plain), ("heavy", &heavy)] {
        let mut writer = RowWriter::new();
        writer.set_delimiters(b',', b';', b':', b'\n').unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| {
                writer.write_string(black_box(input));
                writer.finish_row()
            })
        });
    }
    group.finish();
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_row(black_box(&user)))
    });
}

fn benchmark_serialize_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_rows");

    for size in [10, 100, 1000].iter() {
        let products: Vec<Product> = (0..*size)
            .map(|i| Product {
                sku: format!("SKU{}", i),
                name: format!("Product {}", i),
                price: 9.99 + f64::from(i),
                quantity: i,
                tags: vec!["sale".to_string(), format!("batch-{}", i % 7)],
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &products, |b, products| {
            let mut writer = RowWriter::new();
            b.iter(|| {
                let mut total = 0;
                for product in products {
                    total += writer.serialize_row(black_box(product)).map_or(0, |r| r.len());
                }
                total
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_typed_row,
    benchmark_escape_heavy,
    benchmark_serialize_simple,
    benchmark_serialize_rows
);
criterion_main!(benches);
