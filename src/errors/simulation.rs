//! Pricing oracle errors.

use alloy::primitives::Address;

/// Errors a pricing oracle can report for a single pair.
///
/// The engine treats every variant the same way: the pair is not a candidate
/// for the hop being scanned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("Pair not found: {pair:?}")]
    PairNotFound { pair: Address },

    #[error("Insufficient liquidity in pair {pair:?}")]
    InsufficientLiquidity { pair: Address },

    #[error("Simulation failed for pair {pair:?}: {reason}")]
    SimulationFailed { pair: Address, reason: String },
}
