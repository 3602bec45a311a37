#![doc(test(attr(deny(warnings))))]

//! Budget Ledger keeps a list of trip or monthly expenses, derives totals,
//! goal progress and per-category limits from it, and exports the result as
//! CSV, JSON or a printable PDF report.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!(version = env!("CARGO_PKG_VERSION"), "budget ledger starting");
    });
}
