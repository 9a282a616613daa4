//! Text form of fixed-point values.
//!
//! Values are written as plain decimals with up to [`DECIMAL_PLACES`]
//! fractional digits, e.g. `"1.0001"` for a rate of one basis point per
//! period. Parsing is exact: input with more fractional digits than the
//! scale can hold is rejected rather than rounded.

use alloy_primitives::U256;

use crate::constants::{DECIMAL, DECIMAL_PLACES};
use crate::error::AccrualError;

/// Parse a decimal string into a fixed-point value scaled by [`DECIMAL`].
///
/// # Examples
///
/// ```
/// use accrue_core::constants::DECIMAL;
/// use accrue_core::fixed::parse_fixed;
/// use accrue_core::U256;
/// assert_eq!(parse_fixed("1").unwrap(), DECIMAL);
/// assert_eq!(parse_fixed("0.5").unwrap(), DECIMAL / U256::from(2u64));
/// assert!(parse_fixed("-1").is_err());
/// ```
pub fn parse_fixed(text: &str) -> Result<U256, AccrualError> {
    let text = text.trim();
    let invalid = || AccrualError::InvalidDecimal(text.to_string());

    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().all(|c| c.is_ascii_digit()) || !frac.bytes().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if frac.len() > DECIMAL_PLACES {
        return Err(invalid());
    }

    let whole = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10).map_err(|_| invalid())?
    };
    let padded = format!("{frac:0<DECIMAL_PLACES$}");
    let frac = U256::from_str_radix(&padded, 10).map_err(|_| invalid())?;

    whole
        .checked_mul(DECIMAL)
        .and_then(|w| w.checked_add(frac))
        .ok_or(AccrualError::ArithmeticOverflow)
}

/// Render a fixed-point value as a decimal string with trailing zeros
/// trimmed (at least one fractional digit is kept).
///
/// # Examples
///
/// ```
/// use accrue_core::constants::DECIMAL;
/// use accrue_core::fixed::format_fixed;
/// use accrue_core::U256;
/// assert_eq!(format_fixed(DECIMAL), "1.0");
/// assert_eq!(format_fixed(U256::from(1u64)), "0.0000000000000000000000001");
/// ```
pub fn format_fixed(value: U256) -> String {
    let whole = value / DECIMAL;
    let frac = (value % DECIMAL).to_string();
    let frac = format!("{frac:0>DECIMAL_PLACES$}");
    let trimmed = frac.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{trimmed}")
    }
}
