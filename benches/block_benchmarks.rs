//! Criterion benchmarks for block store and editor operations.
//!
//! Run with: `cargo bench`
//!
//! Every mutation copies the sequence into a fresh snapshot, so these
//! measure how that cost grows with flow length and observer count.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

use test_flow_builder::core::settings::ChoiceSettings;
use test_flow_builder::core::{Block, BlockKind, BlockPatch, BlockStore, BlockType};
use test_flow_builder::editor::{apply_edit, BlockEdit};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_flow(len: usize) -> Vec<Block> {
    (0..len)
        .map(|i| {
            let block_type = BlockType::ALL[i % BlockType::ALL.len()];
            Block::new(format!("block-{}", i), BlockKind::default_for(block_type))
                .with_title(format!("Question {}", i))
        })
        .collect()
}

fn make_store(len: usize) -> BlockStore {
    let mut store = BlockStore::new();
    store.set_blocks(make_flow(len));
    store
}

// ---------------------------------------------------------------------------
// Store Benchmarks
// ---------------------------------------------------------------------------

fn bench_set_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_blocks");

    for len in [10, 100, 1_000] {
        let flow = make_flow(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &flow, |b, flow| {
            let mut store = BlockStore::new();
            b.iter(|| {
                store.set_blocks(flow.clone());
                black_box(store.revision())
            });
        });
    }
    group.finish();
}

fn bench_move_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_block");

    for len in [10, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &n| {
            let mut store = make_store(n);
            b.iter(|| {
                store.move_block(0, n - 1).ok();
                black_box(store.len())
            });
        });
    }
    group.finish();
}

fn bench_update_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_block");

    for len in [10, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &n| {
            let mut store = make_store(n);
            let id = format!("block-{}", n / 2);
            let patch = BlockPatch::new().title("Renamed").required(true);
            b.iter(|| black_box(store.update_block(&id, &patch)));
        });
    }
    group.finish();
}

/// Notification fan-out: one move with N observers subscribed
fn bench_observer_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("observer_fanout");

    for observers in [1, 10, 100] {
        group.bench_with_input(
            BenchmarkId::from_parameter(observers),
            &observers,
            |b, &n| {
                let mut store = make_store(50);
                let subs: Vec<_> = (0..n)
                    .map(|_| store.subscribe(|snapshot| {
                        black_box(snapshot.len());
                    }))
                    .collect();
                b.iter(|| store.move_block(0, 49).ok());
                drop(subs);
            },
        );
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Editor Benchmarks
// ---------------------------------------------------------------------------

fn bench_option_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("option_edits");

    for count in [5, 50, 500] {
        let block = Block::new(
            "choice",
            BlockKind::MultipleChoice(ChoiceSettings::new((0..count).map(|i| format!("Option {}", i)))),
        );
        group.bench_with_input(BenchmarkId::new("remove_first", count), &block, |b, block| {
            b.iter(|| black_box(apply_edit(block, BlockEdit::RemoveOption { index: 0 })))
        });
        group.bench_with_input(BenchmarkId::new("append", count), &block, |b, block| {
            b.iter(|| black_box(apply_edit(block, BlockEdit::AddOption)))
        });
    }
    group.finish();
}

fn bench_json_patch(c: &mut Criterion) {
    let block = Block::instantiate(BlockType::Likert);
    let value = json!({
        "title": "How do you feel about checkout?",
        "settings": { "statements": ["Fast", "Clear", "Trustworthy"], "scale": 7 }
    });

    c.bench_function("json_patch_parse", |b| {
        b.iter(|| black_box(BlockPatch::from_json(value.clone(), &block)))
    });
}

criterion_group!(
    store_benches,
    bench_set_blocks,
    bench_move_block,
    bench_update_block,
    bench_observer_fanout,
);

criterion_group!(editor_benches, bench_option_edits, bench_json_patch);

criterion_main!(store_benches, editor_benches);
