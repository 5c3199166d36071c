//! Bin id to price conversion.

use super::{
    mul_shift_round_down, shift_div_round_down, BASIS_POINT_MAX, PRECISION, REAL_ID_SHIFT, SCALE,
    SCALE_OFFSET,
};
use crate::errors::MathError;
use alloy::primitives::U256;

/// Exponents must stay below this magnitude (20 bits).
const MAX_EXPONENT: u64 = 0x100000;

/// Price of token X in token Y at bin `id`, as a 128.128 fixed-point number.
///
/// Monotonically increasing in `id` for a fixed `bin_step`.
pub fn price_from_id(id: u32, bin_step: u16) -> Result<U256, MathError> {
    let base = base_from_bin_step(bin_step);
    let exponent = i64::from(id) - REAL_ID_SHIFT;

    pow(base, exponent)
}

/// `1 + bin_step / 10_000` in 128.128.
pub fn base_from_bin_step(bin_step: u16) -> U256 {
    SCALE + (U256::from(bin_step) << SCALE_OFFSET) / U256::from(BASIS_POINT_MAX)
}

/// Raise a 128.128 number to a signed integer power.
///
/// Squares over the bits of `|y|`. A base above `2^128 - 1` would overflow
/// the 256-bit square, so it is inverted first and the final result inverted
/// back; inversions are `U256::MAX / v`.
pub fn pow(x: U256, y: i64) -> Result<U256, MathError> {
    if y == 0 {
        return Ok(SCALE);
    }

    let abs_y = y.unsigned_abs();
    if abs_y >= MAX_EXPONENT {
        return Err(MathError::ExponentTooLarge { exponent: y });
    }

    let mut invert = y < 0;
    let mut squared = x;
    if x > U256::from(u128::MAX) {
        squared = U256::MAX / squared;
        invert = !invert;
    }

    let mut result = SCALE;
    let mut remaining = abs_y;
    while remaining != 0 {
        if remaining & 1 == 1 {
            result = (result * squared) >> SCALE_OFFSET;
        }
        squared = (squared * squared) >> SCALE_OFFSET;
        remaining >>= 1;
    }

    if result.is_zero() {
        return Err(MathError::PowUnderflow {
            base: x.to_string(),
            exponent: y,
        });
    }

    Ok(if invert { U256::MAX / result } else { result })
}

/// 128.128 price to an 18-decimal fixed-point price, rounded down.
pub fn price_to_decimal(price: U256) -> Result<U256, MathError> {
    mul_shift_round_down(price, U256::from(PRECISION), SCALE_OFFSET)
}

/// 18-decimal fixed-point price to a 128.128 price, rounded down.
pub fn decimal_to_price(decimal: U256) -> Result<U256, MathError> {
    shift_div_round_down(decimal, SCALE_OFFSET, U256::from(PRECISION))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: u32 = 1 << 23;

    fn close(a: U256, b: U256, tolerance: U256) -> bool {
        if a > b {
            a - b <= tolerance
        } else {
            b - a <= tolerance
        }
    }

    #[test]
    fn test_price_at_real_id_shift_is_one() {
        for bin_step in [1u16, 10, 25, 100] {
            assert_eq!(price_from_id(ONE, bin_step).unwrap(), SCALE);
        }
    }

    #[test]
    fn test_price_one_bin_above() {
        let price = price_from_id(ONE + 1, 25).unwrap();
        let expected = base_from_bin_step(25);
        assert!(close(price, expected, U256::from(1u64 << 20)), "{price} vs {expected}");
    }

    #[test]
    fn test_price_symmetry_around_one() {
        let above = price_from_id(ONE + 50, 20).unwrap();
        let below = price_from_id(ONE - 50, 20).unwrap();
        let product = mul_shift_round_down(above, below, SCALE_OFFSET).unwrap();
        assert!(close(product, SCALE, U256::from(1u64 << 32)), "{product}");
    }

    #[test]
    fn test_price_monotonic_in_id() {
        let ids = [ONE - 1_000, ONE - 3, ONE - 1, ONE, ONE + 1, ONE + 7, ONE + 2_500];
        let prices: Vec<U256> = ids.iter().map(|id| price_from_id(*id, 15).unwrap()).collect();
        for window in prices.windows(2) {
            assert!(window[0] < window[1]);
        }
    }

    #[test]
    fn test_price_with_hundred_percent_step() {
        // base 2: two bins above 1.0 is ~4.0
        let price = price_from_id(ONE + 2, 10_000).unwrap();
        let expected = SCALE * U256::from(4u8);
        assert!(close(price, expected, U256::from(1u64 << 20)));
    }

    #[test]
    fn test_pow_exponent_too_large() {
        let err = pow(base_from_bin_step(1), 1 << 20).unwrap_err();
        assert!(matches!(err, MathError::ExponentTooLarge { .. }));
    }

    #[test]
    fn test_pow_underflow() {
        // 2^-(2^19) is far below the smallest representable 128.128 value
        let err = pow(SCALE * U256::from(2u8), -(1 << 19)).unwrap_err();
        assert!(matches!(err, MathError::PowUnderflow { .. }));
    }

    #[test]
    fn test_decimal_round_trip_at_one() {
        assert_eq!(price_to_decimal(SCALE).unwrap(), U256::from(PRECISION));
        assert_eq!(decimal_to_price(U256::from(PRECISION)).unwrap(), SCALE);
    }
}
