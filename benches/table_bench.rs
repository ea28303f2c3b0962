//! Benchmarks for rowstore table operations

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rowstore::execution::{execute_insert, execute_select};
use rowstore::{Row, Table, LEAF_NODE_MAX_CELLS};
use tempfile::tempdir;

fn rows() -> Vec<Row> {
    // Reverse order so every insert shifts the existing cells
    (0..LEAF_NODE_MAX_CELLS as u32)
        .rev()
        .map(|id| Row::new(id, format!("user{}", id), format!("person{}@example.com", id)))
        .collect::<Result<_, _>>()
        .unwrap()
}

fn table_benchmarks(c: &mut Criterion) {
    let rows = rows();

    c.bench_function("fill_leaf_reverse_order", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let table = Table::open(dir.path().join("bench.db")).unwrap();
                (table, dir)
            },
            |(mut table, _dir)| {
                for row in &rows {
                    execute_insert(&mut table, row).unwrap();
                }
                table
            },
            BatchSize::SmallInput,
        )
    });

    let dir = tempdir().unwrap();
    let mut table = Table::open(dir.path().join("bench.db")).unwrap();
    for row in &rows {
        execute_insert(&mut table, row).unwrap();
    }

    c.bench_function("select_full_leaf", |b| {
        b.iter(|| black_box(execute_select(&mut table).unwrap()))
    });

    c.bench_function("close_and_reopen", |b| {
        let path = dir.path().join("reopen.db");
        b.iter(|| {
            let table = Table::open(&path).unwrap();
            table.close().unwrap();
        })
    });
}

criterion_group!(benches, table_benchmarks);
criterion_main!(benches);
