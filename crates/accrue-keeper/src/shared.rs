//! Thread-safe keeper for multi-threaded hosts.
//!
//! [`SharedKeeper`] serializes every call behind one mutex and reads the
//! clock while holding it, so the order in which calls take effect matches
//! the order of the timestamps they observe. Events go to an [`EventSink`]
//! after the state change has been committed but before the lock is
//! released; a sink must therefore never call back into the keeper.

use accrue_core::error::AccrualError;
use accrue_core::traits::{Clock, CompoundingRate, EventSink};
use accrue_core::types::{CapitalizationEvent, CapitalizationState};
use alloy_primitives::U256;
use parking_lot::Mutex;
use tracing::warn;

use crate::keeper::CapitalizationKeeper;

/// A [`CapitalizationKeeper`] with its own clock and event sink.
#[derive(Debug)]
pub struct SharedKeeper<C: Clock, S: EventSink = ()> {
    keeper: Mutex<CapitalizationKeeper>,
    clock: C,
    sink: S,
}

impl<C: Clock, S: EventSink> SharedKeeper<C, S> {
    /// Initialize a keeper at the clock's current time.
    pub fn init(rate: U256, period: u64, clock: C, sink: S) -> Self {
        let keeper = CapitalizationKeeper::init(rate, period, clock.now());
        Self {
            keeper: Mutex::new(keeper),
            clock,
            sink,
        }
    }

    /// Wrap a restored snapshot, validating it against the clock.
    pub fn from_state(state: CapitalizationState, clock: C, sink: S) -> Result<Self, AccrualError> {
        let keeper = CapitalizationKeeper::from_state(state, clock.now())?;
        Ok(Self {
            keeper: Mutex::new(keeper),
            clock,
            sink,
        })
    }

    /// Accrued value at the current time. Does not mutate state.
    pub fn current_rate(&self) -> Result<U256, AccrualError> {
        let keeper = self.keeper.lock();
        let now = self.clock.now();
        keeper.current_rate_at(now).inspect_err(|e| log_failure("current_rate", e))
    }

    /// Fold whole elapsed periods, keeping the partial one. Returns the
    /// stored value afterwards.
    pub fn checkpoint(&self) -> Result<U256, AccrualError> {
        self.mutate("checkpoint", |k, now| k.checkpoint(now))
    }

    /// Same fold as [`checkpoint`](Self::checkpoint). Returns the stored
    /// value afterwards.
    pub fn accrue(&self) -> Result<U256, AccrualError> {
        self.mutate("accrue", |k, now| k.accrue(now))
    }

    /// Settle pending growth at now, then replace the rate.
    pub fn set_rate(&self, new_rate: U256) -> Result<(), AccrualError> {
        self.mutate("set_rate", |k, now| k.set_rate(new_rate, now).map(Some))?;
        Ok(())
    }

    /// Settle pending growth at now, then replace the period. Zero freezes
    /// accrual.
    pub fn set_period(&self, new_period: u64) -> Result<(), AccrualError> {
        self.mutate("set_period", |k, now| k.set_period(new_period, now).map(Some))?;
        Ok(())
    }

    /// Snapshot of the stored state.
    pub fn snapshot(&self) -> CapitalizationState {
        self.keeper.lock().state()
    }

    /// The clock this keeper reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The sink this keeper notifies.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run one mutation under the lock and emit its event before releasing
    /// it, so sink order matches commit order. Returns the stored value.
    fn mutate<F>(&self, op: &'static str, f: F) -> Result<U256, AccrualError>
    where
        F: FnOnce(&mut CapitalizationKeeper, u64) -> Result<Option<CapitalizationEvent>, AccrualError>,
    {
        let mut keeper = self.keeper.lock();
        let now = self.clock.now();
        let event = f(&mut keeper, now).inspect_err(|e| log_failure(op, e))?;
        if let Some(event) = event {
            self.sink.emit(&event);
        }
        Ok(keeper.stored_rate())
    }
}

impl<C: Clock, S: EventSink> CompoundingRate for SharedKeeper<C, S> {
    fn state(&self) -> CapitalizationState {
        self.snapshot()
    }
}

fn log_failure(op: &str, err: &AccrualError) {
    match err {
        AccrualError::ClockRegression { now, last_update } => {
            warn!(op, now, last_update, "clock went backwards; call rejected")
        }
        other => warn!(op, error = %other, "call rejected"),
    }
}
