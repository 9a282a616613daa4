//! # accrue-keeper — Capitalization state keeper.
//!
//! Owns the rate, period, and last-update marker of one compounding rate and
//! folds elapsed whole periods into the stored value on checkpoint.
//!
//! - **Reads never mutate**: the accrued value is derived from the stored
//!   state and the caller's timestamp.
//! - **Setters settle first**: a new rate or period never applies to
//!   time that elapsed before the change.
//! - **All-or-nothing**: the folded value is computed before any field is
//!   written, so a failed call leaves the state untouched.
//! - **Shared access**: [`SharedKeeper`] serializes calls behind a mutex and
//!   reads time from a [`Clock`](accrue_core::traits::Clock).

pub mod clock;
pub mod events;
pub mod keeper;
pub mod shared;

pub use clock::{ManualClock, SystemClock};
pub use events::{RecordingSink, TracingSink};
pub use keeper::CapitalizationKeeper;
pub use shared::SharedKeeper;
