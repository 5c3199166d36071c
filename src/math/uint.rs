//! Full-precision multiply/shift and shift/divide on 256-bit values.
//!
//! Intermediate results are held in 512 bits so that `x * y` and `x << offset`
//! can never wrap; only the final value is narrowed back to 256 bits.

use crate::errors::MathError;
use alloy::primitives::{U256, U512};

fn widen(x: U256) -> U512 {
    U512::from_limbs_slice(x.as_limbs())
}

fn narrow_wide(x: U512, context: &'static str) -> Result<U256, MathError> {
    let limbs = x.as_limbs();
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return Err(MathError::overflow(context));
    }
    Ok(U256::from_limbs_slice(&limbs[..4]))
}

fn low_bits_mask(offset: usize) -> U512 {
    (U512::from(1u8) << offset) - U512::from(1u8)
}

/// `(x * y) >> offset`, rounded down.
pub fn mul_shift_round_down(x: U256, y: U256, offset: usize) -> Result<U256, MathError> {
    let product = widen(x) * widen(y);
    narrow_wide(product >> offset, "mul_shift")
}

/// `(x * y) >> offset`, rounded up.
pub fn mul_shift_round_up(x: U256, y: U256, offset: usize) -> Result<U256, MathError> {
    let product = widen(x) * widen(y);
    let mut result = product >> offset;
    if !(product & low_bits_mask(offset)).is_zero() {
        result += U512::from(1u8);
    }
    narrow_wide(result, "mul_shift")
}

/// `(x << offset) / y`, rounded down.
pub fn shift_div_round_down(x: U256, offset: usize, y: U256) -> Result<U256, MathError> {
    if y.is_zero() {
        return Err(MathError::DivisionByZero { context: "shift_div" });
    }
    let numerator = widen(x) << offset;
    narrow_wide(numerator / widen(y), "shift_div")
}

/// `(x << offset) / y`, rounded up.
pub fn shift_div_round_up(x: U256, offset: usize, y: U256) -> Result<U256, MathError> {
    if y.is_zero() {
        return Err(MathError::DivisionByZero { context: "shift_div" });
    }
    let numerator = widen(x) << offset;
    let denominator = widen(y);
    let mut result = numerator / denominator;
    if !(numerator % denominator).is_zero() {
        result += U512::from(1u8);
    }
    narrow_wide(result, "shift_div")
}
