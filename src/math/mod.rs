//! Fixed-point price math for bin-based liquidity.
//!
//! Prices are 128.128 unsigned fixed-point numbers (`SCALE` is 1.0) quoting
//! token Y per token X. A pair's price at bin `id` is
//! `(1 + bin_step / 10_000) ^ (id - 2^23)`.
//!
//! Every conversion in this module rounds in an explicit direction and every
//! narrowing is checked. The constants below are part of the numeric contract
//! of quotes: changing a scale or a rounding direction is a compatibility
//! break, not a refactor.

pub mod price;
pub mod uint;

pub use price::{decimal_to_price, price_from_id, price_to_decimal};
pub use uint::{mul_shift_round_down, mul_shift_round_up, shift_div_round_down, shift_div_round_up};

use crate::errors::MathError;
use crate::utils::narrow;
use alloy::primitives::U256;

/// Number of fractional bits in a 128.128 price.
pub const SCALE_OFFSET: usize = 128;

/// 1.0 in 128.128 fixed point.
pub const SCALE: U256 = U256::from_limbs([0, 0, 1, 0]);

/// Bin id whose price is exactly 1.0.
pub const REAL_ID_SHIFT: i64 = 1 << 23;

/// Bin steps are expressed in basis points of this denominator.
pub const BASIS_POINT_MAX: u64 = 10_000;

/// Scale of fees and fee ratios (1e18 == 100%).
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Convert `amount` through a pair at `price`, rounding down.
///
/// With `swap_for_y` the amount is in token X and the result is in token Y
/// (`amount * price`), otherwise the amount is in token Y and the result is in
/// token X (`amount / price`). Both directions are computed at full precision
/// before truncation.
pub fn convert(amount: u128, price: U256, swap_for_y: bool) -> Result<u128, MathError> {
    let wide = if swap_for_y {
        mul_shift_round_down(U256::from(amount), price, SCALE_OFFSET)?
    } else {
        shift_div_round_down(U256::from(amount), SCALE_OFFSET, price)?
    };
    narrow(wide, "slippage-free amount")
}

/// Same as [`convert`] but rounding up.
///
/// Used when computing how much must be paid for a given output, where
/// rounding down would under-charge.
pub fn convert_round_up(amount: u128, price: U256, swap_for_y: bool) -> Result<u128, MathError> {
    let wide = if swap_for_y {
        mul_shift_round_up(U256::from(amount), price, SCALE_OFFSET)?
    } else {
        shift_div_round_up(U256::from(amount), SCALE_OFFSET, price)?
    };
    narrow(wide, "rounded-up amount")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_is_two_pow_128() {
        assert_eq!(SCALE, U256::from(1u8) << 128);
    }

    #[test]
    fn test_convert_at_unit_price_is_identity() {
        assert_eq!(convert(1_000, SCALE, true).unwrap(), 1_000);
        assert_eq!(convert(1_000, SCALE, false).unwrap(), 1_000);
    }

    #[test]
    fn test_convert_both_directions() {
        let two = SCALE * U256::from(2u8);
        assert_eq!(convert(1_000, two, true).unwrap(), 2_000);
        assert_eq!(convert(1_000, two, false).unwrap(), 500);
    }

    #[test]
    fn test_convert_rounds_down() {
        let half = SCALE / U256::from(2u8);
        // 3 * 0.5 = 1.5
        assert_eq!(convert(3, half, true).unwrap(), 1);
        // 3 / 2 = 1.5
        assert_eq!(convert(3, SCALE * U256::from(2u8), false).unwrap(), 1);
    }

    #[test]
    fn test_convert_round_up() {
        let half = SCALE / U256::from(2u8);
        assert_eq!(convert_round_up(3, half, true).unwrap(), 2);
        assert_eq!(convert_round_up(3, SCALE * U256::from(2u8), false).unwrap(), 2);
        assert_eq!(convert_round_up(4, half, true).unwrap(), 2);
    }

    #[test]
    fn test_convert_overflow_is_reported() {
        let four = SCALE * U256::from(4u8);
        let err = convert(u128::MAX / 2, four, true).unwrap_err();
        assert!(matches!(err, MathError::Overflow { .. }));
    }

    #[test]
    fn test_convert_zero_price_is_division_by_zero() {
        let err = convert(10, U256::ZERO, false).unwrap_err();
        assert!(matches!(err, MathError::DivisionByZero { .. }));
    }
}
