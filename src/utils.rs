//! Checked conversions and parsing helpers.
//!
//! Every number that ends up in a [`Quote`](crate::quote::Quote) passes through
//! one of the narrowing functions here; they are the only guard against a
//! consumer receiving a silently wrapped amount or fee ratio.

use crate::errors::{ConfigError, MathError, Result};
use crate::math::PRECISION;
use alloy::primitives::{Address, U256};
use std::str::FromStr;

/// Narrow a 256-bit value to the `u128` output width.
///
/// # Errors
///
/// Returns `MathError::Overflow` tagged with `context` if `value` exceeds `u128::MAX`.
pub fn narrow(value: U256, context: &'static str) -> std::result::Result<u128, MathError> {
    u128::try_from(value).map_err(|_| MathError::overflow(context))
}

/// Fee as a fraction of `amount`, scaled by 1e18 and rounded down.
///
/// # Errors
///
/// - `MathError::DivisionByZero` if `amount` is zero
/// - `MathError::Overflow` if the ratio does not fit in `u128` (fee far larger than amount)
pub fn fee_ratio(fee: u128, amount: u128) -> std::result::Result<u128, MathError> {
    if amount == 0 {
        return Err(MathError::DivisionByZero { context: "fee ratio" });
    }
    let ratio = U256::from(fee) * U256::from(PRECISION) / U256::from(amount);
    narrow(ratio, "fee ratio")
}

/// `a + b` in the output width.
pub fn checked_add(a: u128, b: u128, context: &'static str) -> std::result::Result<u128, MathError> {
    a.checked_add(b).ok_or_else(|| MathError::overflow(context))
}

/// `a - b` in the output width; a negative result is not representable either.
pub fn checked_sub(a: u128, b: u128, context: &'static str) -> std::result::Result<u128, MathError> {
    a.checked_sub(b).ok_or_else(|| MathError::overflow(context))
}

/// Parse a string representation of an Ethereum address.
///
/// Accepts addresses with or without the "0x" prefix.
pub fn parse_address(s: &str) -> Result<Address> {
    let trimmed = s.trim();
    Address::from_str(trimmed.trim_start_matches("0x")).map_err(|source| {
        ConfigError::AddressParsingFailed {
            input: trimmed.to_string(),
            source,
        }
        .into()
    })
}

/// Parse a comma-separated list of token addresses into a route.
///
/// Length is not validated here; the quoting engine rejects short routes.
pub fn parse_route(s: &str) -> Result<Vec<Address>> {
    s.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_address)
        .collect()
}
