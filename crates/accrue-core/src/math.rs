//! Fixed-point arithmetic kernel.
//!
//! [`rpow`] raises a fixed-point number to an integer power by binary
//! exponentiation, flooring after every multiplication. All helpers are
//! generic over the `ruint` width so the canonical 256-bit domain can be
//! emulated bit-exactly while embedders needing more headroom can choose a
//! wider integer. Every product is checked; overflow is an error.

use alloy_primitives::ruint::Uint;

use crate::error::AccrualError;

/// Fixed-point exponentiation: computes `x^n` expressed in scale `b`.
///
/// The exact value is `x^n / b^(n-1)`; the result is that value truncated
/// by one floor per multiplication, so it never exceeds the exact quotient.
/// Uses O(log n) multiplications.
///
/// Returns [`AccrualError::DivisionByZero`] when `b == 0` and
/// [`AccrualError::ArithmeticOverflow`] when any intermediate product does
/// not fit in `BITS` bits.
///
/// # Examples
///
/// ```
/// use accrue_core::{rpow, U256};
/// let b = U256::from(1_000u64);
/// // 1.5^2 = 2.25
/// assert_eq!(rpow(U256::from(1_500u64), 2, b).unwrap(), U256::from(2_250u64));
/// assert_eq!(rpow(U256::from(7u64), 0, b).unwrap(), b);
/// ```
pub fn rpow<const BITS: usize, const LIMBS: usize>(
    x: Uint<BITS, LIMBS>,
    n: u64,
    b: Uint<BITS, LIMBS>,
) -> Result<Uint<BITS, LIMBS>, AccrualError> {
    if b.is_zero() {
        return Err(AccrualError::DivisionByZero);
    }
    if n == 0 {
        return Ok(b);
    }
    if x.is_zero() {
        return Ok(Uint::ZERO);
    }

    let mut z = if n & 1 == 0 { b } else { x };
    let mut square = x;
    let mut e = n >> 1;

    while e > 0 {
        square = rmul(square, square, b)?;
        if e & 1 == 1 {
            z = rmul(z, square, b)?;
        }
        e >>= 1;
    }

    Ok(z)
}

/// Fixed-point multiply: `floor(a * b / scale)`.
pub fn rmul<const BITS: usize, const LIMBS: usize>(
    a: Uint<BITS, LIMBS>,
    b: Uint<BITS, LIMBS>,
    scale: Uint<BITS, LIMBS>,
) -> Result<Uint<BITS, LIMBS>, AccrualError> {
    if scale.is_zero() {
        return Err(AccrualError::DivisionByZero);
    }
    let product = a.checked_mul(b).ok_or(AccrualError::ArithmeticOverflow)?;
    Ok(product / scale)
}

/// Fixed-point divide: `floor(a * scale / b)`.
pub fn rdiv<const BITS: usize, const LIMBS: usize>(
    a: Uint<BITS, LIMBS>,
    b: Uint<BITS, LIMBS>,
    scale: Uint<BITS, LIMBS>,
) -> Result<Uint<BITS, LIMBS>, AccrualError> {
    if b.is_zero() {
        return Err(AccrualError::DivisionByZero);
    }
    let scaled = a.checked_mul(scale).ok_or(AccrualError::ArithmeticOverflow)?;
    Ok(scaled / b)
}
