//! Market snapshot loading errors.

use alloy::primitives::Address;

/// Errors that can occur while building a market snapshot
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Duplicate pair in snapshot: {pair:?}")]
    DuplicatePair { pair: Address },

    #[error("Pair {pair:?} trades a token against itself")]
    IdenticalTokens { pair: Address },

    #[error("Pair {pair:?} has a zero bin step")]
    ZeroBinStep { pair: Address },

    #[error("Pair {pair:?} has a base fee of {base_fee}, which must be below 1e18")]
    FeeTooLarge { pair: Address, base_fee: u128 },
}
