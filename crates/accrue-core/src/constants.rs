//! Protocol constants. Fixed-point values are scaled by [`DECIMAL`].

use alloy_primitives::U256;

/// Number of fractional decimal digits carried by a fixed-point value.
pub const DECIMAL_PLACES: usize = 25;

/// Fixed-point one: `10^25`.
///
/// A rate equal to `DECIMAL` compounds to itself (no growth).
///
/// # Examples
///
/// ```
/// use accrue_core::constants::DECIMAL;
/// use accrue_core::U256;
/// assert_eq!(DECIMAL, U256::from(10u64).pow(U256::from(25u64)));
/// ```
pub const DECIMAL: U256 = U256::from_limbs([1_590_897_978_359_414_784, 542_101, 0, 0]);

/// Seconds in one day. The conventional capitalization period.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Seconds in a 365-day year.
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// Period value that disables periodic accrual.
///
/// While the period is zero no whole period can elapse, so the accrued
/// value stays frozen at its last checkpoint.
pub const FROZEN_PERIOD: u64 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_is_ten_pow_places() {
        let expected = U256::from(10u64).pow(U256::from(DECIMAL_PLACES as u64));
        assert_eq!(DECIMAL, expected);
    }

    #[test]
    fn decimal_string_form() {
        assert_eq!(DECIMAL.to_string(), format!("1{}", "0".repeat(DECIMAL_PLACES)));
    }

    #[test]
    fn year_is_365_days() {
        assert_eq!(SECONDS_PER_YEAR, 31_536_000);
    }
}
