use core_table::{Align, CellValue, Column, ColumnWidth, TableOptions, TableState, TableView};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

#[derive(Debug, Clone)]
struct Record {
    id: i64,
    name: String,
    active: bool,
}

fn dataset(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| Record {
            id: i as i64,
            name: format!("record number {i}"),
            active: i % 3 == 0,
        })
        .collect()
}

fn columns() -> Vec<Column<Record>> {
    vec![
        Column::new("id", "ID", |r: &Record| CellValue::Int(r.id))
            .width(ColumnWidth::Fixed(8))
            .align(Align::Right),
        Column::new("name", "Name", |r: &Record| {
            CellValue::Text(r.name.clone())
        }),
        Column::new("active", "Active", |r: &Record| CellValue::Bool(r.active))
            .width(ColumnWidth::Fixed(6)),
    ]
}

/// Render cost must track the 15-row page, not the dataset: the curves for
/// 100 through 100k rows should be flat.
fn bench_virtualized_render(c: &mut Criterion) {
    let options = TableOptions::default().page_size(15);
    let cols = columns();
    let view = TableView::new(100);

    let mut group = c.benchmark_group("table_render");
    for &n in &[100usize, 1_000, 10_000, 100_000] {
        let state = TableState::new(dataset(n), &cols, &options).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &state, |b, state| {
            b.iter(|| view.render(state, &cols, &options));
        });
    }
    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let options = TableOptions::default().page_size(15);
    let cols = columns();

    c.bench_function("navigate_down_10k", |b| {
        b.iter_batched(
            || TableState::new(dataset(10_000), &cols, &options).unwrap(),
            |state| state.navigate_down(),
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_virtualized_render, bench_navigation);
criterion_main!(benches);
