//! Integration test suite for the accrual engine.
//!
//! Exercises the kernel and keeper together through their public APIs:
//! end-to-end schedules, cross-width agreement, and concurrent access.

pub mod helpers;
