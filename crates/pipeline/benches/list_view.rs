//! Benchmarks for list recomputation
//!
//! Run with: cargo bench --package pipeline
//!
//! Measures a full filter + sort + paginate pass over a synthetic order list.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pipeline::filters::{EnumFilter, Selection, TextSearchFilter};
use pipeline::{ListView, SortOrder};
use std::cmp::Ordering;

#[derive(Debug, Clone)]
struct Row {
    id: String,
    name: String,
    status: &'static str,
    total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RowSort {
    #[default]
    TotalDesc,
}

impl SortOrder<Row> for RowSort {
    fn all() -> &'static [Self] {
        &[RowSort::TotalDesc]
    }

    fn name(&self) -> &'static str {
        "amount-desc"
    }

    fn compare(&self, a: &Row, b: &Row) -> Ordering {
        b.total.total_cmp(&a.total)
    }
}

fn row_fields(r: &Row) -> Vec<&str> {
    vec![&r.id, &r.name]
}

fn row_status(r: &Row) -> &str {
    r.status
}

fn create_rows(n: usize) -> Vec<Row> {
    const STATUSES: [&str; 4] = ["pending", "processing", "delivered", "cancelled"];
    (0..n)
        .map(|i| Row {
            id: format!("ORD-{:06}", i + 1),
            name: format!("Customer {}", i % 97),
            status: STATUSES[i % 4],
            total: ((i * 7919) % 1000) as f64 / 10.0,
        })
        .collect()
}

fn bench_search_and_status(c: &mut Criterion) {
    let rows = create_rows(10_000);

    c.bench_function("list_view_search_status_10k", |b| {
        b.iter(|| {
            let view: ListView<Row, RowSort> = ListView::new(black_box(rows.clone()))
                .with_filter(TextSearchFilter::new("search", "customer 4", row_fields))
                .with_filter(EnumFilter::new("status", Selection::from("pending"), row_status));
            black_box(view.current_page())
        })
    });
}

fn bench_page_walk(c: &mut Criterion) {
    let mut view: ListView<Row, RowSort> = ListView::new(create_rows(10_000));
    let _ = view.set_page_size(50);

    c.bench_function("list_view_page_walk_10k", |b| {
        b.iter(|| {
            for page in 1..=view.total_pages() {
                let _ = view.go_to_page(page);
                black_box(view.current_page());
            }
        })
    });
}

criterion_group!(benches, bench_search_and_status, bench_page_walk);
criterion_main!(benches);
