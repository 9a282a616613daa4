//! # accrue-core
//! Foundation types, traits, and the fixed-point exponentiation kernel for
//! compound capitalization accrual.
//!
//! All arithmetic is integer-only and width-checked: a product that does not
//! fit the chosen width fails the call instead of wrapping.

pub mod constants;
pub mod error;
pub mod fixed;
pub mod math;
pub mod traits;
pub mod types;

pub use alloy_primitives::U256;
pub use error::AccrualError;
pub use math::{rdiv, rmul, rpow};
