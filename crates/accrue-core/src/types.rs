//! Core data types: the capitalization state and its change events.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::constants::{DECIMAL, FROZEN_PERIOD};
use crate::error::AccrualError;

/// Mutable state owned by a single capitalization keeper.
///
/// `current_rate` is the compounded value as of `last_update`; growth that
/// accrued after `last_update` is derived on read and only persisted by a
/// checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalizationState {
    /// Per-period growth factor scaled by [`DECIMAL`]. Below `DECIMAL` decays.
    pub rate: U256,
    /// Capitalization interval in seconds. Zero freezes accrual.
    pub period: u64,
    /// Unix seconds of the last checkpoint.
    pub last_update: u64,
    /// Compounded value as of `last_update`, scaled by [`DECIMAL`].
    pub current_rate: U256,
}

impl CapitalizationState {
    /// Fresh state starting at fixed-point one.
    pub fn new(rate: U256, period: u64, now: u64) -> Self {
        Self {
            rate,
            period,
            last_update: now,
            current_rate: DECIMAL,
        }
    }

    /// Whether periodic accrual is disabled.
    pub fn is_frozen(&self) -> bool {
        self.period == FROZEN_PERIOD
    }

    /// Seconds elapsed since the last checkpoint.
    ///
    /// Fails with [`AccrualError::ClockRegression`] if `now` precedes it.
    pub fn seconds_elapsed(&self, now: u64) -> Result<u64, AccrualError> {
        now.checked_sub(self.last_update)
            .ok_or(AccrualError::ClockRegression {
                now,
                last_update: self.last_update,
            })
    }

    /// Whole periods elapsed since the last checkpoint. Zero when frozen.
    pub fn periods_elapsed(&self, now: u64) -> Result<u64, AccrualError> {
        let elapsed = self.seconds_elapsed(now)?;
        if self.is_frozen() {
            return Ok(0);
        }
        Ok(elapsed / self.period)
    }
}

/// Notification emitted when a keeper's state changes.
///
/// Events are informational; nothing in the accrual math depends on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CapitalizationEvent {
    /// Pending growth was folded into the stored value.
    Checkpointed { current_rate: U256, at: u64 },
    /// The per-period rate was replaced.
    RateChanged { old: U256, new: U256, at: u64 },
    /// The capitalization period was replaced.
    PeriodChanged { old: u64, new: u64, at: u64 },
}

impl CapitalizationEvent {
    /// Timestamp at which the event took effect.
    pub fn at(&self) -> u64 {
        match self {
            Self::Checkpointed { at, .. }
            | Self::RateChanged { at, .. }
            | Self::PeriodChanged { at, .. } => *at,
        }
    }
}
