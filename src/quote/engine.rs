//! The route quoting engine.
//!
//! Quotes are greedy: each hop keeps the best fully-filled pair for the amount
//! reaching it, and earlier choices are never revisited in light of later
//! hops. The result is a per-hop optimum, not the best path through every
//! combination of pairs.

use super::candidate::{evaluate_backward, evaluate_forward, scan, BackwardFill, Candidate, ForwardFill};
use super::{Quote, QuoteKind};
use crate::config::QuoterConfig;
use crate::errors::{QuoteError, Result};
use crate::math::{convert, price_from_id};
use crate::pairs::{LbPairInformation, PairOracle, PairRegistry};
use crate::utils::{checked_add, checked_sub, fee_ratio};
use alloy::primitives::Address;

/// Quotes swaps along fixed token routes.
///
/// The quoter only reads through its registry and oracle; it holds no state
/// between calls, so repeated calls against the same snapshot return equal
/// quotes.
#[derive(Debug, Clone)]
pub struct RouteQuoter<R, O> {
    registry: R,
    oracle: O,
    config: QuoterConfig,
}

impl<R: PairRegistry, O: PairOracle> RouteQuoter<R, O> {
    /// Create a quoter with the default configuration.
    pub fn new(registry: R, oracle: O) -> Self {
        Self::with_config(registry, oracle, QuoterConfig::default())
    }

    pub fn with_config(registry: R, oracle: O, config: QuoterConfig) -> Self {
        Self {
            registry,
            oracle,
            config,
        }
    }

    pub fn config(&self) -> &QuoterConfig {
        &self.config
    }

    /// Best output obtainable for selling `amount_in` of `route[0]` along `route`.
    ///
    /// Hops are quoted front to back. A hop with no pair able to absorb the
    /// whole incoming amount records a zero output, which leaves every later
    /// hop unrouted as well.
    ///
    /// # Errors
    ///
    /// - `QuoteError::InvalidLength` if the route has fewer than 2 tokens
    /// - `MathError::Overflow` if an amount or fee ratio does not fit in `u128`
    pub fn quote_from_amount_in(&self, route: &[Address], amount_in: u128) -> Result<Quote> {
        validate_route(route)?;

        tracing::debug!(
            route_length = route.len(),
            amount_in = amount_in,
            "Quoting route from amount in"
        );

        let mut quote = Quote::empty(QuoteKind::ExactIn, route);
        quote.amounts[0] = amount_in;
        quote.virtual_amounts_without_slippage[0] = amount_in;

        for hop in 0..quote.hop_count() {
            let (token_in, token_out) = (route[hop], route[hop + 1]);
            let pairs = self.registry.available_pairs(token_in, token_out);
            let amount = quote.amounts[hop];

            if pairs.is_empty() || amount == 0 {
                tracing::debug!(
                    hop = hop,
                    pair_count = pairs.len(),
                    amount = amount,
                    "Hop not routable, leaving it unset"
                );
                continue;
            }

            let candidates = scan(&pairs, self.parallel(&pairs), |info| {
                evaluate_forward(&self.oracle, info, token_out, amount)
            });

            for (info, candidate) in candidates {
                match candidate {
                    Candidate::Quoted(fill) if fill.amount_out > quote.amounts[hop + 1] => {
                        self.accept_forward(&mut quote, hop, fill)?;
                    }
                    Candidate::Quoted(fill) => {
                        tracing::trace!(
                            hop = hop,
                            pair = %info.pair,
                            amount_out = fill.amount_out,
                            best = quote.amounts[hop + 1],
                            "Candidate does not improve on best output"
                        );
                    }
                    Candidate::Unavailable(reason) => {
                        tracing::debug!(hop = hop, pair = %info.pair, reason = %reason, "Candidate unavailable");
                    }
                }
            }
        }

        tracing::debug!(
            amount_in = quote.amount_in(),
            amount_out = quote.amount_out(),
            complete = quote.is_complete(),
            "Route quoted from amount in"
        );

        Ok(quote)
    }

    /// Smallest input of `route[0]` needed to receive `amount_out` of the last token.
    ///
    /// Hops are quoted back to front. A hop with no pair able to provide the
    /// whole requested output records a zero input, which leaves every earlier
    /// hop unrouted as well.
    ///
    /// # Errors
    ///
    /// - `QuoteError::InvalidLength` if the route has fewer than 2 tokens
    /// - `MathError::Overflow` if an amount or fee ratio does not fit in `u128`
    pub fn quote_from_amount_out(&self, route: &[Address], amount_out: u128) -> Result<Quote> {
        validate_route(route)?;

        tracing::debug!(
            route_length = route.len(),
            amount_out = amount_out,
            "Quoting route from amount out"
        );

        let mut quote = Quote::empty(QuoteKind::ExactOut, route);
        let last = quote.hop_count();
        quote.amounts[last] = amount_out;
        quote.virtual_amounts_without_slippage[last] = amount_out;

        for hop in (1..=last).rev() {
            let (token_in, token_out) = (route[hop - 1], route[hop]);
            let pairs = self.registry.available_pairs(token_in, token_out);
            let amount = quote.amounts[hop];

            if pairs.is_empty() || amount == 0 {
                tracing::debug!(
                    hop = hop - 1,
                    pair_count = pairs.len(),
                    amount = amount,
                    "Hop not routable, leaving it unset"
                );
                continue;
            }

            let candidates = scan(&pairs, self.parallel(&pairs), |info| {
                evaluate_backward(&self.oracle, info, token_out, amount)
            });

            for (info, candidate) in candidates {
                match candidate {
                    Candidate::Quoted(fill)
                        if quote.amounts[hop - 1] == 0 || fill.amount_in < quote.amounts[hop - 1] =>
                    {
                        self.accept_backward(&mut quote, hop, fill)?;
                    }
                    Candidate::Quoted(fill) => {
                        tracing::trace!(
                            hop = hop - 1,
                            pair = %info.pair,
                            amount_in = fill.amount_in,
                            best = quote.amounts[hop - 1],
                            "Candidate does not improve on best input"
                        );
                    }
                    Candidate::Unavailable(reason) => {
                        tracing::debug!(hop = hop - 1, pair = %info.pair, reason = %reason, "Candidate unavailable");
                    }
                }
            }
        }

        tracing::debug!(
            amount_in = quote.amount_in(),
            amount_out = quote.amount_out(),
            complete = quote.is_complete(),
            "Route quoted from amount out"
        );

        Ok(quote)
    }

    fn parallel(&self, pairs: &[LbPairInformation]) -> bool {
        let eligible = pairs.iter().filter(|info| !info.ignored_for_routing).count();
        self.config.scans_in_parallel(eligible)
    }

    /// Record `fill` for hop `hop` (`route[hop] -> route[hop + 1]`).
    fn accept_forward(&self, quote: &mut Quote, hop: usize, fill: ForwardFill) -> Result<()> {
        tracing::trace!(hop = hop, pair = %fill.info.pair, amount_out = fill.amount_out, "New best candidate");

        quote.pairs[hop] = fill.info.pair;
        quote.bin_steps[hop] = fill.info.bin_step;
        quote.versions[hop] = self.config.version;
        quote.amounts[hop + 1] = fill.amount_out;

        // Fee comes off the input before the reference price applies.
        let price = price_from_id(fill.active_id, fill.info.bin_step)?;
        let after_fee = checked_sub(quote.virtual_amounts_without_slippage[hop], fill.fee, "virtual amount")?;
        quote.virtual_amounts_without_slippage[hop + 1] = convert(after_fee, price, fill.swap_for_y)?;

        // amounts[hop] is non-zero here, the hop would have been skipped otherwise.
        quote.fees[hop] = fee_ratio(fill.fee, quote.amounts[hop])?;

        Ok(())
    }

    /// Record `fill` for the hop ending at `route[hop]` (`route[hop - 1] -> route[hop]`).
    fn accept_backward(&self, quote: &mut Quote, hop: usize, fill: BackwardFill) -> Result<()> {
        tracing::trace!(hop = hop - 1, pair = %fill.info.pair, amount_in = fill.amount_in, "New best candidate");

        quote.pairs[hop - 1] = fill.info.pair;
        quote.bin_steps[hop - 1] = fill.info.bin_step;
        quote.versions[hop - 1] = self.config.version;
        quote.amounts[hop - 1] = fill.amount_in;

        // Reference price converts towards the input side, then the fee is added on top.
        let price = price_from_id(fill.active_id, fill.info.bin_step)?;
        let converted = convert(quote.virtual_amounts_without_slippage[hop], price, !fill.swap_for_y)?;
        quote.virtual_amounts_without_slippage[hop - 1] = checked_add(converted, fill.fee, "virtual amount")?;

        // amounts[hop - 1] was just set to a non-zero input.
        quote.fees[hop - 1] = fee_ratio(fill.fee, quote.amounts[hop - 1])?;

        Ok(())
    }
}

fn validate_route(route: &[Address]) -> std::result::Result<(), QuoteError> {
    if route.len() < 2 {
        return Err(QuoteError::InvalidLength { actual: route.len() });
    }
    Ok(())
}
