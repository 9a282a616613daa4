//! Shared test helpers for integration tests.

use std::sync::Arc;

use accrue_core::constants::DECIMAL;
use accrue_core::U256;
use accrue_keeper::{ManualClock, RecordingSink, SharedKeeper};

/// Fixed-point `1 + bps / 10_000`.
pub fn rate_bps(bps: u64) -> U256 {
    DECIMAL + DECIMAL * U256::from(bps) / U256::from(10_000u64)
}

/// Fixed-point `1 - bps / 10_000`.
pub fn decay_bps(bps: u64) -> U256 {
    DECIMAL - DECIMAL * U256::from(bps) / U256::from(10_000u64)
}

/// Fixed-point whole number.
pub fn whole(n: u64) -> U256 {
    DECIMAL * U256::from(n)
}

/// Shared keeper wired to a manual clock and a recording sink.
pub type TestKeeper = SharedKeeper<Arc<ManualClock>, Arc<RecordingSink>>;

/// Build a [`TestKeeper`] starting at `start`, returning handles to its
/// clock and sink.
pub fn shared_keeper(rate: U256, period: u64, start: u64) -> (TestKeeper, Arc<ManualClock>, Arc<RecordingSink>) {
    let clock = Arc::new(ManualClock::new(start));
    let sink = Arc::new(RecordingSink::new());
    let keeper = SharedKeeper::init(rate, period, Arc::clone(&clock), Arc::clone(&sink));
    (keeper, clock, sink)
}
