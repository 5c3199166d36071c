//! Liquidity pair discovery and swap simulation seams.
//!
//! The quoting engine never owns pairs. It reaches them through two read-only
//! traits:
//!
//! - [`PairRegistry`] lists the pairs connecting two tokens, in registry order
//! - [`PairOracle`] simulates swaps through a pair and reports its state
//!
//! Both are expected to observe one consistent snapshot of pair state for the
//! duration of a quote. [`MarketSnapshot`] is an in-memory implementation of
//! both, loadable from JSON.

pub mod snapshot;
pub mod types;

pub use snapshot::{MarketSnapshot, PairSnapshot};
pub use types::{LbPairInformation, SwapIn, SwapOut, Version};

use crate::errors::SimulationError;
use alloy::primitives::Address;

/// Lists the liquidity pairs available between two tokens.
pub trait PairRegistry: Sync {
    /// All known pairs between `token_a` and `token_b`, in either token order.
    ///
    /// The returned order is the candidate scan order of the engine.
    fn available_pairs(&self, token_a: Address, token_b: Address) -> Vec<LbPairInformation>;
}

/// Read-only swap simulation against a pair.
pub trait PairOracle: Sync {
    /// Simulate selling `amount_in` through `pair`.
    ///
    /// `swap_for_y` is true when the input is token X and the output token Y.
    fn swap_out(&self, pair: Address, amount_in: u128, swap_for_y: bool) -> Result<SwapOut, SimulationError>;

    /// Simulate buying `amount_out` from `pair`.
    fn swap_in(&self, pair: Address, amount_out: u128, swap_for_y: bool) -> Result<SwapIn, SimulationError>;

    /// Active bin id of `pair`.
    fn active_id(&self, pair: Address) -> Result<u32, SimulationError>;

    /// The token Y of `pair`.
    fn token_y(&self, pair: Address) -> Result<Address, SimulationError>;
}

impl<T: PairRegistry + ?Sized> PairRegistry for &T {
    fn available_pairs(&self, token_a: Address, token_b: Address) -> Vec<LbPairInformation> {
        (**self).available_pairs(token_a, token_b)
    }
}

impl<T: PairOracle + ?Sized> PairOracle for &T {
    fn swap_out(&self, pair: Address, amount_in: u128, swap_for_y: bool) -> Result<SwapOut, SimulationError> {
        (**self).swap_out(pair, amount_in, swap_for_y)
    }

    fn swap_in(&self, pair: Address, amount_out: u128, swap_for_y: bool) -> Result<SwapIn, SimulationError> {
        (**self).swap_in(pair, amount_out, swap_for_y)
    }

    fn active_id(&self, pair: Address) -> Result<u32, SimulationError> {
        (**self).active_id(pair)
    }

    fn token_y(&self, pair: Address) -> Result<Address, SimulationError> {
        (**self).token_y(pair)
    }
}
