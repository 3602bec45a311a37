use std::sync::Arc;

use budget_ledger::core::{LedgerDerivations, LedgerStore, SortKey};
use budget_ledger::currency::LocaleConfig;
use budget_ledger::export::{self, ExportFormat};
use budget_ledger::ledger::{Category, CategoryLimits, Expense, LedgerState};
use budget_ledger::storage::JsonFileStore;
use chrono::{Duration, NaiveDate, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::tempdir;

fn build_sample_ledger(record_count: usize) -> LedgerState {
    let start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let records = (0..record_count)
        .map(|idx| Expense {
            id: idx as u64 + 1,
            name: format!("Expense {idx}"),
            amount: 5.0 + (idx % 100) as f64,
            category: Category::ALL[idx % Category::ALL.len()],
            date: start_date + Duration::days((idx % 365) as i64),
            recurring: idx % 7 == 0,
        })
        .collect();
    LedgerState {
        records,
        goal: 50_000.0,
        ..LedgerState::default()
    }
}

fn bench_derivations(c: &mut Criterion) {
    let state = build_sample_ledger(black_box(10_000));
    let mut limits = CategoryLimits::new();
    limits.set(Category::Food, Some(1_000.0));
    limits.set(Category::Transport, Some(250_000.0));

    c.bench_function("summary_10k", |b| {
        b.iter(|| black_box(state.summary(&limits, 15.0)))
    });

    c.bench_function("filter_sort_amount_10k", |b| {
        b.iter(|| black_box(state.filter_sort("food", SortKey::AmountDesc).len()))
    });
}

fn bench_exports(c: &mut Criterion) {
    let state = build_sample_ledger(black_box(1_000));
    let locale = LocaleConfig::default();

    for format in ExportFormat::ALL {
        c.bench_function(&format!("render_{format}_1k"), |b| {
            b.iter(|| {
                let bytes = export::render(format, &state, &locale, Utc::now()).expect("render");
                black_box(bytes.len())
            })
        });
    }
}

fn bench_persistence(c: &mut Criterion) {
    let dir = tempdir().expect("tempdir");
    let storage = Arc::new(JsonFileStore::new(Some(dir.path().to_path_buf())).expect("store"));
    let seed = build_sample_ledger(1_000);

    c.bench_function("ledger_reload_1k", |b| {
        let mut store = LedgerStore::open(storage.clone(), LedgerState::default);
        store.replace(seed.clone());
        b.iter(|| {
            let reloaded = LedgerStore::open(storage.clone(), LedgerState::default);
            black_box(reloaded.records().len())
        })
    });
}

criterion_group!(benches, bench_derivations, bench_exports, bench_persistence);
criterion_main!(benches);
