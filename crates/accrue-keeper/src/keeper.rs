//! Capitalization keeper implementing the [`CompoundingRate`] trait.
//!
//! The keeper stores the compounded value as of its last checkpoint and
//! derives growth for later timestamps with a single `rpow` call. Only
//! whole periods are credited; a partial period contributes nothing until
//! it completes.

use accrue_core::error::AccrualError;
use accrue_core::traits::CompoundingRate;
use accrue_core::types::{CapitalizationEvent, CapitalizationState};
use alloy_primitives::U256;
use tracing::{debug, info};

/// Single-owner capitalization state machine.
///
/// All operations take the host timestamp explicitly. Authorization of the
/// mutating calls is the embedder's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapitalizationKeeper {
    state: CapitalizationState,
}

impl CapitalizationKeeper {
    /// Start accruing `rate` every `period` seconds from `now`.
    ///
    /// The stored value starts at fixed-point one. A zero period is
    /// accepted and leaves accrual frozen until a nonzero period is set.
    pub fn init(rate: U256, period: u64, now: u64) -> Self {
        info!(%rate, period, now, "capitalization initialized");
        Self {
            state: CapitalizationState::new(rate, period, now),
        }
    }

    /// Restore a keeper from a previously taken snapshot.
    ///
    /// Rejects a snapshot whose `last_update` lies after `now`.
    pub fn from_state(state: CapitalizationState, now: u64) -> Result<Self, AccrualError> {
        state.seconds_elapsed(now)?;
        Ok(Self { state })
    }

    /// Per-period growth factor.
    pub fn rate(&self) -> U256 {
        self.state.rate
    }

    /// Capitalization period in seconds.
    pub fn period(&self) -> u64 {
        self.state.period
    }

    /// Timestamp of the last checkpoint.
    pub fn last_update(&self) -> u64 {
        self.state.last_update
    }

    /// Compounded value as of the last checkpoint.
    pub fn stored_rate(&self) -> U256 {
        self.state.current_rate
    }

    /// Fold pending growth into the stored value.
    ///
    /// Credits whole periods only and carries the partial period in progress
    /// forward, so checkpointing more often than once per period never loses
    /// accrual. Same as [`accrue`](Self::accrue).
    pub fn checkpoint(&mut self, now: u64) -> Result<Option<CapitalizationEvent>, AccrualError> {
        self.accrue(now)
    }

    /// Fold only the whole periods elapsed at `now`, advancing the marker by
    /// exactly that many periods so the fractional remainder carries over.
    ///
    /// Returns `None` when no whole period has elapsed (or accrual is frozen).
    pub fn accrue(&mut self, now: u64) -> Result<Option<CapitalizationEvent>, AccrualError> {
        let periods = self.state.periods_elapsed(now)?;
        if periods == 0 {
            return Ok(None);
        }
        let folded = self.current_rate_at(now)?;
        // periods * period <= now - last_update, so neither step can overflow
        let advanced = self.state.last_update + periods * self.state.period;

        self.state.current_rate = folded;
        self.state.last_update = advanced;
        debug!(current_rate = %folded, periods, last_update = advanced, "accrued");
        Ok(Some(CapitalizationEvent::Checkpointed {
            current_rate: folded,
            at: advanced,
        }))
    }

    /// Fold all pending growth and move the marker to `now`, dropping the
    /// partial period. Only setters call this, so the old parameters stop
    /// applying exactly at `now`.
    fn settle(&mut self, now: u64) -> Result<(), AccrualError> {
        let folded = self.current_rate_at(now)?;
        self.state.current_rate = folded;
        self.state.last_update = now;
        debug!(current_rate = %folded, now, "settled");
        Ok(())
    }

    /// Settle pending growth, then replace the per-period rate.
    ///
    /// No bound is imposed on `new_rate`: values below fixed-point one decay.
    pub fn set_rate(&mut self, new_rate: U256, now: u64) -> Result<CapitalizationEvent, AccrualError> {
        self.settle(now)?;
        let old = std::mem::replace(&mut self.state.rate, new_rate);
        info!(%old, new = %new_rate, now, "rate changed");
        Ok(CapitalizationEvent::RateChanged {
            old,
            new: new_rate,
            at: now,
        })
    }

    /// Settle pending growth, then replace the capitalization period.
    ///
    /// A zero period freezes the stored value until a nonzero period is set.
    pub fn set_period(&mut self, new_period: u64, now: u64) -> Result<CapitalizationEvent, AccrualError> {
        self.settle(now)?;
        let old = std::mem::replace(&mut self.state.period, new_period);
        info!(old, new = new_period, now, "period changed");
        Ok(CapitalizationEvent::PeriodChanged {
            old,
            new: new_period,
            at: now,
        })
    }
}

impl CompoundingRate for CapitalizationKeeper {
    fn state(&self) -> CapitalizationState {
        self.state
    }
}
