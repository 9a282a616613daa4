//! Trait interfaces for capitalization accrual.
//!
//! These traits define the seams between the kernel and its host:
//! - [`CompoundingRate`] — read surface of an accruing rate (accrue-keeper implements)
//! - [`Clock`] — host-supplied wall clock
//! - [`EventSink`] — receiver for state-change notifications

use std::sync::Arc;

use alloy_primitives::U256;

use crate::constants::DECIMAL;
use crate::error::AccrualError;
use crate::math::{rmul, rpow};
use crate::types::{CapitalizationEvent, CapitalizationState};

/// Read-only view of a periodically compounding rate.
///
/// Implementors only expose their stored state; the accrual arithmetic is
/// shared through the default methods so every implementation compounds
/// identically.
pub trait CompoundingRate {
    /// Snapshot of the stored state.
    fn state(&self) -> CapitalizationState;

    /// Whole capitalization periods elapsed at `now` since the last checkpoint.
    fn periods_elapsed(&self, now: u64) -> Result<u64, AccrualError> {
        self.state().periods_elapsed(now)
    }

    /// Compounded value at `now`, scaled by [`DECIMAL`].
    ///
    /// Default implementation: `current_rate * rpow(rate, periods, DECIMAL) / DECIMAL`,
    /// returning the stored value unchanged when no whole period elapsed.
    /// Never mutates state.
    fn current_rate_at(&self, now: u64) -> Result<U256, AccrualError> {
        let state = self.state();
        let periods = state.periods_elapsed(now)?;
        if periods == 0 {
            return Ok(state.current_rate);
        }
        let growth = rpow(state.rate, periods, DECIMAL)?;
        rmul(state.current_rate, growth, DECIMAL)
    }

    /// Timestamp at which the next whole period completes, or `None` while frozen.
    fn next_capitalization_at(&self, now: u64) -> Result<Option<u64>, AccrualError> {
        let state = self.state();
        if state.is_frozen() {
            return Ok(None);
        }
        let periods = state.periods_elapsed(now)?;
        let offset = periods
            .checked_add(1)
            .and_then(|p| p.checked_mul(state.period))
            .ok_or(AccrualError::ArithmeticOverflow)?;
        state
            .last_update
            .checked_add(offset)
            .map(Some)
            .ok_or(AccrualError::ArithmeticOverflow)
    }

    /// Seconds from `now` until the next whole period completes, or `None`
    /// while frozen.
    fn seconds_until_next(&self, now: u64) -> Result<Option<u64>, AccrualError> {
        // the returned boundary is strictly after now
        Ok(self.next_capitalization_at(now)?.map(|next| next - now))
    }
}

/// Source of the current time in unix seconds.
pub trait Clock: Send + Sync {
    /// Current time. Must not go backwards between calls.
    fn now(&self) -> u64;
}

/// Receiver for keeper notifications.
pub trait EventSink: Send + Sync {
    /// Deliver one event. Must not fail or block for long.
    fn emit(&self, event: &CapitalizationEvent);
}

/// Sink that drops every event.
impl EventSink for () {
    fn emit(&self, _event: &CapitalizationEvent) {}
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn emit(&self, event: &CapitalizationEvent) {
        (**self).emit(event)
    }
}
