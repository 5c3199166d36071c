//! Pair-level types shared by the registry, the oracle and the engine.

use crate::errors::ConfigError;
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A registry entry for one pair between two tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LbPairInformation {
    /// Handle of the pair
    pub pair: Address,
    /// Price step between adjacent bins, in basis points
    pub bin_step: u16,
    /// Pairs flagged here are never considered as candidates
    pub ignored_for_routing: bool,
}

/// Result of simulating an exact-input swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwapOut {
    /// Input that the pair could not absorb
    pub amount_in_left: u128,
    /// Output received for the absorbed input
    pub amount_out: u128,
    /// Fee charged, in the input token
    pub fee: u128,
}

/// Result of simulating an exact-output swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwapIn {
    /// Input required, fee included
    pub amount_in: u128,
    /// Output that the pair could not provide
    pub amount_out_left: u128,
    /// Fee charged, in the input token
    pub fee: u128,
}

/// Family of liquidity source a hop was routed through.
///
/// Only one family is queried by this crate; the tag is carried so quotes stay
/// comparable with multi-family routers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Version {
    #[default]
    V1,
    V2,
    V2_1,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::V1 => write!(f, "v1"),
            Version::V2 => write!(f, "v2"),
            Version::V2_1 => write!(f, "v2.1"),
        }
    }
}

impl FromStr for Version {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(Version::V1),
            "v2" | "2" => Ok(Version::V2),
            "v2.1" | "v2_1" | "2.1" => Ok(Version::V2_1),
            _ => Err(ConfigError::UnknownVersion { tag: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_round_trip_through_display() {
        for version in [Version::V1, Version::V2, Version::V2_1] {
            assert_eq!(version.to_string().parse::<Version>().unwrap(), version);
        }
    }

    #[test]
    fn test_version_parse_rejects_unknown() {
        assert!(matches!("v3".parse::<Version>(), Err(ConfigError::UnknownVersion { .. })));
    }

    #[test]
    fn test_version_default_is_unset_tag() {
        assert_eq!(Version::default(), Version::V1);
    }
}
