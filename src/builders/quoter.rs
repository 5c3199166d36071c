//! Builder pattern for RouteQuoter

use crate::config::QuoterConfig;
use crate::errors::{ConfigError, Result};
use crate::pairs::{PairOracle, PairRegistry};
use crate::quote::RouteQuoter;

/// Builder for creating RouteQuoter instances with a fluent API
pub struct RouteQuoterBuilder<R, O> {
    registry: Option<R>,
    oracle: Option<O>,
    config: QuoterConfig,
}

impl<R: PairRegistry, O: PairOracle> RouteQuoterBuilder<R, O> {
    /// Create a new RouteQuoterBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            registry: None,
            oracle: None,
            config: QuoterConfig::default(),
        }
    }

    /// Set the registry used to discover pairs between tokens
    pub fn with_registry(mut self, registry: R) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set the oracle used to simulate swaps through pairs
    pub fn with_oracle(mut self, oracle: O) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn with_config(mut self, config: QuoterConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the RouteQuoter
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingComponent` if the registry or the oracle was not set
    pub fn build(self) -> Result<RouteQuoter<R, O>> {
        let registry = self.registry.ok_or(ConfigError::MissingComponent { name: "registry" })?;
        let oracle = self.oracle.ok_or(ConfigError::MissingComponent { name: "oracle" })?;

        Ok(RouteQuoter::with_config(registry, oracle, self.config))
    }
}

impl<R: PairRegistry, O: PairOracle> Default for RouteQuoterBuilder<R, O> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::QuoterError;
    use crate::pairs::{MarketSnapshot, PairSnapshot};
    use alloy::primitives::Address;

    fn market() -> MarketSnapshot {
        MarketSnapshot::new(vec![PairSnapshot {
            address: Address::repeat_byte(0xa1),
            token_x: Address::with_last_byte(1),
            token_y: Address::with_last_byte(2),
            bin_step: 10,
            active_id: 1 << 23,
            base_fee: 0,
            reserve_x: 1_000,
            reserve_y: 1_000,
            ignored_for_routing: false,
        }])
        .unwrap()
    }

    #[test]
    fn test_build_requires_registry_and_oracle() {
        let market = market();

        let missing_registry = RouteQuoterBuilder::<&MarketSnapshot, &MarketSnapshot>::new()
            .with_oracle(&market)
            .build();
        assert!(matches!(
            missing_registry,
            Err(QuoterError::Config(ConfigError::MissingComponent { name: "registry" }))
        ));

        let missing_oracle = RouteQuoterBuilder::<&MarketSnapshot, &MarketSnapshot>::new()
            .with_registry(&market)
            .build();
        assert!(matches!(
            missing_oracle,
            Err(QuoterError::Config(ConfigError::MissingComponent { name: "oracle" }))
        ));
    }

    #[test]
    fn test_build_carries_config() {
        let market = market();
        let config = QuoterConfig::default().with_parallel_scan(true);

        let quoter = RouteQuoterBuilder::new()
            .with_registry(&market)
            .with_oracle(&market)
            .with_config(config.clone())
            .build()
            .unwrap();

        assert_eq!(quoter.config(), &config);
        let quote = quoter
            .quote_from_amount_in(&[Address::with_last_byte(1), Address::with_last_byte(2)], 100)
            .unwrap();
        assert_eq!(quote.amounts(), &[100, 100]);
    }
}
