//! Throughput Benchmark for commentd
//!
//! This benchmark measures the in-memory document store and the comment
//! repository on top of it.

use commentd::comments::{CommentInput, CommentRepository};
use commentd::store::{DocumentStore, Fields, MemoryStore};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use serde_json::json;
use std::sync::Arc;
use tokio::runtime::Runtime;

fn fields(text: &str) -> Fields {
    let mut fields = Fields::new();
    fields.insert("text".to_string(), json!(text));
    fields.insert("author".to_string(), json!("bench"));
    fields
}

/// Benchmark insert operations
fn bench_insert(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let store = Arc::new(MemoryStore::new());

    let mut group = c.benchmark_group("insert");
    group.throughput(Throughput::Elements(1));

    group.bench_function("insert_small", |b| {
        b.iter(|| rt.block_on(store.insert("comments", fields("small"))).unwrap());
    });

    group.bench_function("insert_large", |b| {
        let text = "x".repeat(64 * 1024);
        b.iter(|| rt.block_on(store.insert("comments", fields(&text))).unwrap());
    });

    group.finish();
}

/// Benchmark update and delete by id
fn bench_by_id(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let store = Arc::new(MemoryStore::new());

    // Pre-populate with data
    let ids: Vec<String> = (0..100_000)
        .map(|i| {
            rt.block_on(store.insert("comments", fields(&format!("c{}", i))))
                .unwrap()
                .id
                .to_string()
        })
        .collect();

    let mut group = c.benchmark_group("by_id");
    group.throughput(Throughput::Elements(1));

    group.bench_function("update_existing", |b| {
        let mut i = 0usize;
        b.iter(|| {
            let id = &ids[i % ids.len()];
            black_box(
                rt.block_on(store.find_by_id_and_update("comments", id, fields("edited")))
                    .unwrap(),
            );
            i += 1;
        });
    });

    group.bench_function("delete_missing", |b| {
        let missing = commentd::store::DocumentId::generate().to_string();
        b.iter(|| black_box(rt.block_on(store.find_by_id_and_delete("comments", &missing)).unwrap()));
    });

    group.finish();
}

/// Benchmark listing through the repository
fn bench_list(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let repo = CommentRepository::new(Arc::new(MemoryStore::new()));

    for i in 0..1_000 {
        rt.block_on(repo.create(CommentInput::new(format!("comment {}", i), "bench")))
            .unwrap();
    }

    let mut group = c.benchmark_group("list");
    group.throughput(Throughput::Elements(1_000));

    group.bench_function("list_1000", |b| {
        b.iter(|| black_box(rt.block_on(repo.list_all()).unwrap()));
    });

    group.finish();
}

/// Benchmark concurrent creates from many tasks
fn bench_concurrent(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("concurrent");
    group.throughput(Throughput::Elements(1_000));

    group.bench_function("create_10x100", |b| {
        b.iter(|| {
            let repo = CommentRepository::new(Arc::new(MemoryStore::new()));
            rt.block_on(async {
                let tasks: Vec<_> = (0..10)
                    .map(|t| {
                        let repo = repo.clone();
                        tokio::spawn(async move {
                            for j in 0..100 {
                                repo.create(CommentInput::new(format!("{}-{}", t, j), "bench"))
                                    .await
                                    .unwrap();
                            }
                        })
                    })
                    .collect();
                for task in tasks {
                    task.await.unwrap();
                }
            });
        });
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_by_id, bench_list, bench_concurrent);
criterion_main!(benches);
