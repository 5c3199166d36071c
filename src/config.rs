//! Configuration for the route quoter.
//!
//! Defaults reproduce the plain sequential engine. Values can be overridden
//! from environment variables (see [`QuoterConfig::from_env`]).

use crate::errors::{ConfigError, Result};
use crate::pairs::Version;
use serde::{Deserialize, Serialize};
use std::env;

pub const ENV_PARALLEL_SCAN: &str = "LB_QUOTER_PARALLEL_SCAN";
pub const ENV_PARALLEL_THRESHOLD: &str = "LB_QUOTER_PARALLEL_THRESHOLD";
pub const ENV_VERSION: &str = "LB_QUOTER_VERSION";

/// Main configuration structure for the quoting engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoterConfig {
    /// Evaluate the candidate pairs of a hop on the rayon thread pool
    pub parallel_scan: bool,
    /// Minimum number of candidates in a hop before the scan goes parallel
    pub parallel_threshold: usize,
    /// Version tag recorded for every routed hop
    pub version: Version,
}

impl Default for QuoterConfig {
    fn default() -> Self {
        Self {
            parallel_scan: false,
            parallel_threshold: 4,
            version: Version::V2_1,
        }
    }
}

impl QuoterConfig {
    /// Create a configuration from environment variables
    ///
    /// # Environment Variables
    ///
    /// - `LB_QUOTER_PARALLEL_SCAN`: `true`/`false` (default: false)
    /// - `LB_QUOTER_PARALLEL_THRESHOLD`: positive integer (default: 4)
    /// - `LB_QUOTER_VERSION`: `v1`, `v2` or `v2.1` (default: v2.1)
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that does not parse.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let parallel_scan = match env::var(ENV_PARALLEL_SCAN) {
            Ok(value) => Self::parse_bool(ENV_PARALLEL_SCAN, &value)?,
            Err(_) => defaults.parallel_scan,
        };

        let parallel_threshold = match env::var(ENV_PARALLEL_THRESHOLD) {
            Ok(value) => match value.trim().parse::<usize>() {
                Ok(threshold) if threshold > 0 => threshold,
                Ok(_) => {
                    return Err(ConfigError::InvalidValue {
                        name: ENV_PARALLEL_THRESHOLD,
                        value,
                        reason: "must be at least 1",
                    }
                    .into())
                }
                Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        name: ENV_PARALLEL_THRESHOLD,
                        value,
                        reason: "must be an unsigned integer",
                    }
                    .into())
                }
            },
            Err(_) => defaults.parallel_threshold,
        };

        let version = match env::var(ENV_VERSION) {
            Ok(value) => value.parse::<Version>()?,
            Err(_) => defaults.version,
        };

        let config = Self {
            parallel_scan,
            parallel_threshold,
            version,
        };

        tracing::debug!(
            parallel_scan = config.parallel_scan,
            parallel_threshold = config.parallel_threshold,
            version = %config.version,
            "Quoter configuration loaded"
        );

        Ok(config)
    }

    /// Enable or disable parallel candidate evaluation.
    pub fn with_parallel_scan(mut self, enabled: bool) -> Self {
        self.parallel_scan = enabled;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Whether a hop with `candidate_count` eligible pairs is scanned in parallel.
    pub fn scans_in_parallel(&self, candidate_count: usize) -> bool {
        self.parallel_scan && candidate_count >= self.parallel_threshold
    }

    fn parse_bool(name: &'static str, value: &str) -> Result<bool> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                name,
                value: value.to_string(),
                reason: "must be a boolean",
            }
            .into()),
        }
    }
}
