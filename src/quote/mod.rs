//! Route quotes and the engine that builds them.
//!
//! A [`Quote`] describes one pass over a caller-supplied token route: for each
//! hop, which pair (if any) was chosen, and the amounts flowing at every point
//! of the route, both as simulated and as they would be at the pairs'
//! reference prices with no slippage.

mod candidate;
pub mod engine;

pub use engine::RouteQuoter;

use crate::math::BASIS_POINT_MAX;
use crate::pairs::Version;
use alloy::primitives::{Address, U256};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which endpoint of the route the caller fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteKind {
    /// `amounts[0]` was given; later amounts are outputs.
    ExactIn,
    /// `amounts[last]` was given; earlier amounts are required inputs.
    ExactOut,
}

/// Result of quoting a route.
///
/// Invariants: `amounts` and `virtual_amounts_without_slippage` have one entry
/// per token of `route`; `pairs`, `bin_steps`, `versions` and `fees` have one
/// entry per hop. A hop without a usable pair keeps the zero address, a zero
/// bin step, the default version, a zero fee and a zero amount on its far side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub(crate) kind: QuoteKind,
    pub(crate) route: Vec<Address>,
    pub(crate) pairs: Vec<Address>,
    pub(crate) bin_steps: Vec<u16>,
    pub(crate) versions: Vec<Version>,
    pub(crate) amounts: Vec<u128>,
    pub(crate) virtual_amounts_without_slippage: Vec<u128>,
    pub(crate) fees: Vec<u128>,
}

impl Quote {
    /// An empty quote for `route`; the route must already be validated.
    pub(crate) fn empty(kind: QuoteKind, route: &[Address]) -> Self {
        let hop_count = route.len().saturating_sub(1);
        Self {
            kind,
            route: route.to_vec(),
            pairs: vec![Address::ZERO; hop_count],
            bin_steps: vec![0; hop_count],
            versions: vec![Version::default(); hop_count],
            amounts: vec![0; route.len()],
            virtual_amounts_without_slippage: vec![0; route.len()],
            fees: vec![0; hop_count],
        }
    }

    pub fn kind(&self) -> QuoteKind {
        self.kind
    }

    pub fn route(&self) -> &[Address] {
        &self.route
    }

    /// Chosen pair per hop; the zero address marks a hop with no usable pair.
    pub fn pairs(&self) -> &[Address] {
        &self.pairs
    }

    pub fn bin_steps(&self) -> &[u16] {
        &self.bin_steps
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// Amount of `route[k]` flowing at point `k`.
    pub fn amounts(&self) -> &[u128] {
        &self.amounts
    }

    /// Amount at point `k` if every hop executed at its reference price, fees included.
    pub fn virtual_amounts_without_slippage(&self) -> &[u128] {
        &self.virtual_amounts_without_slippage
    }

    /// Fee per hop as a fraction of the hop input, scaled by 1e18.
    pub fn fees(&self) -> &[u128] {
        &self.fees
    }

    pub fn hop_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn amount_in(&self) -> u128 {
        self.amounts.first().copied().unwrap_or_default()
    }

    pub fn amount_out(&self) -> u128 {
        self.amounts.last().copied().unwrap_or_default()
    }

    /// Whether a pair was chosen for hop `index`.
    pub fn is_hop_routed(&self, index: usize) -> bool {
        self.pairs.get(index).is_some_and(|pair| *pair != Address::ZERO)
    }

    /// Whether every hop of the route was routed.
    pub fn is_complete(&self) -> bool {
        (0..self.hop_count()).all(|index| self.is_hop_routed(index))
    }

    /// Price impact of the whole route, in basis points.
    ///
    /// For exact-in quotes this compares the final output with its
    /// slippage-free counterpart; for exact-out quotes it compares the required
    /// input. Returns `None` for incomplete routes or a zero reference amount,
    /// and zero when the simulated amount is at least as good as the reference.
    /// An impact too large for `u128` saturates at `u128::MAX`.
    pub fn price_impact_bps(&self) -> Option<u128> {
        if !self.is_complete() {
            return None;
        }

        let (actual, reference) = match self.kind {
            QuoteKind::ExactIn => (
                *self.amounts.last()?,
                *self.virtual_amounts_without_slippage.last()?,
            ),
            QuoteKind::ExactOut => (
                *self.amounts.first()?,
                *self.virtual_amounts_without_slippage.first()?,
            ),
        };
        if reference == 0 {
            return None;
        }

        let shortfall = match self.kind {
            QuoteKind::ExactIn => reference.saturating_sub(actual),
            QuoteKind::ExactOut => actual.saturating_sub(reference),
        };
        let impact = U256::from(shortfall) * U256::from(BASIS_POINT_MAX) / U256::from(reference);

        Some(u128::try_from(impact).unwrap_or(u128::MAX))
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quote {{ kind: {:?}, route: [{}], amounts: [{}], pairs: [{}] }}",
            self.kind,
            self.route.iter().join(" -> "),
            self.amounts.iter().join(", "),
            self.pairs.iter().join(", "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(n: u8) -> Address {
        Address::with_last_byte(n)
    }

    fn routed(kind: QuoteKind, amounts: Vec<u128>, virtual_amounts: Vec<u128>) -> Quote {
        let mut quote = Quote::empty(kind, &[token(1), token(2)]);
        quote.pairs[0] = Address::repeat_byte(0xaa);
        quote.bin_steps[0] = 10;
        quote.versions[0] = Version::V2_1;
        quote.amounts = amounts;
        quote.virtual_amounts_without_slippage = virtual_amounts;
        quote
    }

    #[test]
    fn test_empty_quote_shape() {
        let quote = Quote::empty(QuoteKind::ExactIn, &[token(1), token(2), token(3)]);
        assert_eq!(quote.hop_count(), 2);
        assert_eq!(quote.amounts().len(), 3);
        assert_eq!(quote.virtual_amounts_without_slippage().len(), 3);
        assert_eq!(quote.pairs().len(), 2);
        assert_eq!(quote.bin_steps().len(), 2);
        assert_eq!(quote.versions().len(), 2);
        assert_eq!(quote.fees().len(), 2);
        assert!(!quote.is_complete());
        assert!(!quote.is_hop_routed(0));
        assert!(!quote.is_hop_routed(5));
    }

    #[test]
    fn test_price_impact_exact_in() {
        let quote = routed(QuoteKind::ExactIn, vec![1_000, 990], vec![1_000, 995]);
        // (995 - 990) * 10_000 / 995
        assert_eq!(quote.price_impact_bps(), Some(50));
    }

    #[test]
    fn test_price_impact_exact_out() {
        let quote = routed(QuoteKind::ExactOut, vec![520, 500], vec![503, 500]);
        // (520 - 503) * 10_000 / 503
        assert_eq!(quote.price_impact_bps(), Some(337));
    }

    #[test]
    fn test_price_impact_saturates_at_zero() {
        let quote = routed(QuoteKind::ExactIn, vec![1_000, 1_001], vec![1_000, 995]);
        assert_eq!(quote.price_impact_bps(), Some(0));
    }

    #[test]
    fn test_price_impact_saturates_at_max() {
        let quote = routed(QuoteKind::ExactOut, vec![u128::MAX, 500], vec![1, 500]);
        assert_eq!(quote.price_impact_bps(), Some(u128::MAX));
    }

    #[test]
    fn test_price_impact_incomplete_route() {
        let quote = Quote::empty(QuoteKind::ExactIn, &[token(1), token(2)]);
        assert_eq!(quote.price_impact_bps(), None);
    }

    #[test]
    fn test_display_lists_route() {
        let quote = routed(QuoteKind::ExactIn, vec![1_000, 990], vec![1_000, 995]);
        let rendered = quote.to_string();
        assert!(rendered.contains("ExactIn"));
        assert!(rendered.contains("1000, 990"));
        assert!(rendered.contains(" -> "));
    }

    #[test]
    fn test_quote_serializes_to_json() {
        let quote = routed(QuoteKind::ExactIn, vec![1_000, 990], vec![1_000, 995]);
        let json = serde_json::to_string(&quote).unwrap();
        let decoded: Quote = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, quote);
    }
}
