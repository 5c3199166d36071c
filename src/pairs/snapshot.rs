//! In-memory market snapshot implementing both pair seams.
//!
//! A snapshot is a frozen view of a set of pairs, each reduced to its active
//! bin: a price, a base fee and the reserves of both tokens in that bin. Swaps
//! are simulated against that single bin, and whatever the bin cannot fill is
//! reported as a leftover. This is enough to drive the quoting engine from a
//! JSON file in tests and in the demo binary; it does not model bin crossing.

use crate::errors::{MathError, Result, SimulationError, SnapshotError};
use crate::math::{convert, convert_round_up, price_from_id, PRECISION};
use crate::pairs::{LbPairInformation, PairOracle, PairRegistry, SwapIn, SwapOut};
use crate::utils::{checked_add, narrow};
use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// State of one pair, as stored in a snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSnapshot {
    pub address: Address,
    pub token_x: Address,
    pub token_y: Address,
    pub bin_step: u16,
    pub active_id: u32,
    /// Fee taken on input, 1e18 == 100%
    #[serde(default)]
    pub base_fee: u128,
    pub reserve_x: u128,
    pub reserve_y: u128,
    #[serde(default)]
    pub ignored_for_routing: bool,
}

impl PairSnapshot {
    /// Whether this pair trades `token_a` against `token_b`, in either order.
    pub fn connects(&self, token_a: Address, token_b: Address) -> bool {
        (self.token_x == token_a && self.token_y == token_b)
            || (self.token_x == token_b && self.token_y == token_a)
    }

    fn reserve_out(&self, swap_for_y: bool) -> u128 {
        if swap_for_y {
            self.reserve_y
        } else {
            self.reserve_x
        }
    }

    fn validate(&self) -> std::result::Result<(), SnapshotError> {
        if self.token_x == self.token_y {
            return Err(SnapshotError::IdenticalTokens { pair: self.address });
        }
        if self.bin_step == 0 {
            return Err(SnapshotError::ZeroBinStep { pair: self.address });
        }
        if self.base_fee >= PRECISION {
            return Err(SnapshotError::FeeTooLarge {
                pair: self.address,
                base_fee: self.base_fee,
            });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct SnapshotFile {
    pairs: Vec<PairSnapshot>,
}

/// A validated, indexed set of pair snapshots.
#[derive(Debug, Clone, Default)]
pub struct MarketSnapshot {
    pairs: Vec<PairSnapshot>,
    index: HashMap<Address, usize>,
}

impl MarketSnapshot {
    /// Build a snapshot from pairs; their order is the registry order.
    ///
    /// # Errors
    ///
    /// Fails on duplicate pair addresses, pairs whose two tokens are equal,
    /// zero bin steps and base fees of 100% or more.
    pub fn new(pairs: Vec<PairSnapshot>) -> Result<Self> {
        let mut index = HashMap::with_capacity(pairs.len());

        for (position, pair) in pairs.iter().enumerate() {
            pair.validate()?;
            if index.insert(pair.address, position).is_some() {
                return Err(SnapshotError::DuplicatePair { pair: pair.address }.into());
            }
        }

        tracing::debug!(pair_count = pairs.len(), "Market snapshot built");

        Ok(Self { pairs, index })
    }

    /// Parse a snapshot from a JSON document of the form `{ "pairs": [...] }`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(json)?;
        Self::new(file.pairs)
    }

    /// Load a snapshot from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        tracing::info!(path = %path.display(), "Loading market snapshot");

        Self::from_json_str(&contents)
    }

    pub fn pairs(&self) -> &[PairSnapshot] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pair(&self, address: Address) -> Option<&PairSnapshot> {
        self.index.get(&address).map(|position| &self.pairs[*position])
    }

    fn lookup(&self, address: Address) -> std::result::Result<&PairSnapshot, SimulationError> {
        self.pair(address)
            .ok_or(SimulationError::PairNotFound { pair: address })
    }
}

fn simulation_failed(pair: Address, error: MathError) -> SimulationError {
    SimulationError::SimulationFailed {
        pair,
        reason: error.to_string(),
    }
}

fn ceil_div(numerator: U256, denominator: U256) -> U256 {
    let quotient = numerator / denominator;
    if (numerator % denominator).is_zero() {
        quotient
    } else {
        quotient + U256::from(1u8)
    }
}

/// Fee contained in an amount that already includes it: `ceil(amount * fee / 1e18)`.
pub fn fee_from_amount_with_fees(amount_with_fees: u128, fee: u128) -> std::result::Result<u128, MathError> {
    let numerator = U256::from(amount_with_fees) * U256::from(fee);
    narrow(ceil_div(numerator, U256::from(PRECISION)), "fee amount")
}

/// Fee to add on top of `amount`: `ceil(amount * fee / (1e18 - fee))`.
pub fn fee_for_amount(amount: u128, fee: u128) -> std::result::Result<u128, MathError> {
    let denominator = PRECISION
        .checked_sub(fee)
        .filter(|d| *d != 0)
        .ok_or(MathError::DivisionByZero { context: "fee amount" })?;
    let numerator = U256::from(amount) * U256::from(fee);
    narrow(ceil_div(numerator, U256::from(denominator)), "fee amount")
}

impl PairRegistry for MarketSnapshot {
    fn available_pairs(&self, token_a: Address, token_b: Address) -> Vec<LbPairInformation> {
        self.pairs
            .iter()
            .filter(|pair| pair.connects(token_a, token_b))
            .map(|pair| LbPairInformation {
                pair: pair.address,
                bin_step: pair.bin_step,
                ignored_for_routing: pair.ignored_for_routing,
            })
            .collect()
    }
}

impl PairOracle for MarketSnapshot {
    fn swap_out(&self, pair: Address, amount_in: u128, swap_for_y: bool) -> std::result::Result<SwapOut, SimulationError> {
        let snapshot = self.lookup(pair)?;
        let reserve_out = snapshot.reserve_out(swap_for_y);

        if amount_in == 0 || reserve_out == 0 {
            return Ok(SwapOut {
                amount_in_left: amount_in,
                ..SwapOut::default()
            });
        }

        let fail = |e| simulation_failed(pair, e);
        let price = price_from_id(snapshot.active_id, snapshot.bin_step).map_err(fail)?;
        let fee = fee_from_amount_with_fees(amount_in, snapshot.base_fee).map_err(fail)?;
        let amount_out = convert(amount_in - fee, price, swap_for_y).map_err(fail)?;

        if amount_out <= reserve_out {
            return Ok(SwapOut {
                amount_in_left: 0,
                amount_out,
                fee,
            });
        }

        // The bin drains: charge only for its reserve.
        let max_in = convert_round_up(reserve_out, price, !swap_for_y).map_err(fail)?;
        let max_fee = fee_for_amount(max_in, snapshot.base_fee).map_err(fail)?;
        let consumed = checked_add(max_in, max_fee, "consumed input").map_err(fail)?;

        tracing::trace!(
            pair = %pair,
            amount_in = amount_in,
            reserve_out = reserve_out,
            consumed = consumed,
            "Active bin drained during simulation"
        );

        Ok(SwapOut {
            amount_in_left: amount_in.saturating_sub(consumed),
            amount_out: reserve_out,
            fee: max_fee,
        })
    }

    fn swap_in(&self, pair: Address, amount_out: u128, swap_for_y: bool) -> std::result::Result<SwapIn, SimulationError> {
        let snapshot = self.lookup(pair)?;
        let filled = amount_out.min(snapshot.reserve_out(swap_for_y));
        let amount_out_left = amount_out - filled;

        if filled == 0 {
            return Ok(SwapIn {
                amount_out_left,
                ..SwapIn::default()
            });
        }

        let fail = |e| simulation_failed(pair, e);
        let price = price_from_id(snapshot.active_id, snapshot.bin_step).map_err(fail)?;
        let amount_in_without_fee = convert_round_up(filled, price, !swap_for_y).map_err(fail)?;
        let fee = fee_for_amount(amount_in_without_fee, snapshot.base_fee).map_err(fail)?;
        let amount_in = checked_add(amount_in_without_fee, fee, "required input").map_err(fail)?;

        Ok(SwapIn {
            amount_in,
            amount_out_left,
            fee,
        })
    }

    fn active_id(&self, pair: Address) -> std::result::Result<u32, SimulationError> {
        self.lookup(pair).map(|snapshot| snapshot.active_id)
    }

    fn token_y(&self, pair: Address) -> std::result::Result<Address, SimulationError> {
        self.lookup(pair).map(|snapshot| snapshot.token_y)
    }
}
