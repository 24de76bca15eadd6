use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gravl::{from_str, parse, to_node, to_string, to_string_minified, Attribute, Node};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
        })
        .collect()
}

/// A document `width` attributes wide and `depth` levels deep.
fn document(width: usize, depth: usize) -> Node {
    let attributes = (0..width)
        .map(|i| {
            let value = if depth == 0 {
                Node::leaf(format!("value {}", i))
            } else {
                document(width, depth - 1)
            };
            if i % 2 == 0 {
                Attribute::named(format!("key{}", i), value)
            } else {
                Attribute::unnamed(value)
            }
        })
        .collect();
    Node::composite(attributes)
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for depth in [1, 2, 3].iter() {
        let text = to_string(&document(8, *depth));

        group.bench_with_input(BenchmarkId::from_parameter(depth), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
    }

    group.finish();
}

fn benchmark_parse_comments(c: &mut Criterion) {
    let text: String = (0..200)
        .map(|i| format!("// entry {}\nkey{} = a, b, c // trailing\n", i, i))
        .collect();

    c.bench_function("parse_commented", |b| b.iter(|| parse(black_box(&text))));
}

fn benchmark_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");

    for depth in [1, 2, 3].iter() {
        let node = document(8, *depth);

        group.bench_with_input(BenchmarkId::new("aligned", depth), &node, |b, node| {
            b.iter(|| to_string(black_box(node)))
        });

        group.bench_with_input(BenchmarkId::new("minified", depth), &node, |b, node| {
            b.iter(|| to_string_minified(black_box(node)))
        });
    }

    group.finish();
}

fn benchmark_typed(c: &mut Criterion) {
    let mut group = c.benchmark_group("typed");

    for size in [10, 100, 500].iter() {
        let items = products(*size);
        let text = to_string(&to_node(&items).unwrap());

        group.bench_with_input(BenchmarkId::new("to_string", size), &items, |b, items| {
            b.iter(|| to_string(&to_node(black_box(items)).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("from_str", size), &text, |b, text| {
            b.iter(|| from_str::<Vec<Product>>(black_box(text)))
        });
    }

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let items = products(100);
    let mut group = c.benchmark_group("comparison");

    let gravl_str = to_string_minified(&to_node(&items).unwrap());
    let json_str = serde_json::to_string(&items).unwrap();

    group.bench_function("gravl_deserialize", |b| {
        b.iter(|| from_str::<Vec<Product>>(black_box(&gravl_str)))
    });

    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<Vec<Product>>(black_box(&json_str)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_parse_comments,
    benchmark_serialize,
    benchmark_typed,
    benchmark_comparison_with_json
);
criterion_main!(benches);
