//! Configuration errors.

use thiserror::Error;

/// Errors that can occur while resolving quoter configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}' ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Unknown version tag: '{tag}'. Must be one of: v1, v2, v2.1")]
    UnknownVersion { tag: String },

    #[error("Missing component: {name} is required to build a quoter")]
    MissingComponent { name: &'static str },

    #[error("Failed to parse address from string '{input}': {source}")]
    AddressParsingFailed {
        input: String,
        #[source]
        source: alloy::hex::FromHexError,
    },
}
