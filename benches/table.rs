//! Table benchmarks for leafdb
//!
//! Measures the three paths a REPL session exercises: filling the root leaf,
//! scanning it, and the record codec underneath both. The leaf holds at most
//! `LEAF_NODE_MAX_CELLS` records, so every insert run starts from a fresh
//! file.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tempfile::tempdir;
use leafdb::btree::LeafNodeMut;
use leafdb::config::{LEAF_NODE_MAX_CELLS, PAGE_SIZE};
use leafdb::{Record, Table};

fn record(id: u32) -> Record {
    Record::new(id, &format!("user{}", id), &format!("person{}@example.com", id)).unwrap()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_insert");
    let count = LEAF_NODE_MAX_CELLS as u32;
    let records: Vec<Record> = (0..count).map(record).collect();

    group.throughput(Throughput::Elements(count as u64));
    group.bench_function(BenchmarkId::new("fill_root_leaf", count), |b| {
        b.iter_with_setup(
            || {
                let dir = tempdir().unwrap();
                let table = Table::open(dir.path().join("bench.db")).unwrap();
                (dir, table)
            },
            |(dir, mut table)| {
                for r in &records {
                    black_box(table.insert(r).unwrap());
                }
                (dir, table)
            },
        );
    });

    group.bench_function("leaf_insert_at_front", |b| {
        let mut page = vec![0u8; PAGE_SIZE];
        b.iter(|| {
            let mut leaf = LeafNodeMut::init(&mut page).unwrap();
            for r in &records {
                leaf.insert_cell_at(0, r.id, r).unwrap();
            }
            black_box(leaf.cell_count())
        });
    });

    group.finish();
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_select");
    let count = LEAF_NODE_MAX_CELLS as u32;

    let dir = tempdir().unwrap();
    let mut table = Table::open(dir.path().join("bench.db")).unwrap();
    for id in 0..count {
        table.insert(&record(id)).unwrap();
    }

    group.throughput(Throughput::Elements(count as u64));
    group.bench_function("full_scan", |b| {
        b.iter(|| {
            let mut n = 0;
            for row in table.select().unwrap() {
                black_box(row.unwrap());
                n += 1;
            }
            n
        });
    });

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_codec");
    let r = record(42);
    let encoded = r.encode();

    group.bench_function("encode", |b| b.iter(|| black_box(black_box(&r).encode())));
    group.bench_function("decode", |b| {
        b.iter(|| black_box(Record::decode(black_box(&encoded)).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_select, bench_codec);
criterion_main!(benches);
