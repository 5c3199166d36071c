//! Error handling for the route quoter.
//!
//! Errors are grouped by the component that raises them:
//!
//! - **`QuoteError`**: malformed quote requests (e.g. a route that is too short)
//! - **`MathError`**: fixed-point arithmetic that cannot be represented in the output width
//! - **`SimulationError`**: a pricing oracle could not simulate a swap through a pair
//! - **`ConfigError`**: invalid quoter configuration
//! - **`SnapshotError`**: a market snapshot could not be loaded or failed validation
//!
//! # Top-Level Error Type
//!
//! `QuoterError` wraps every domain error plus the external errors the crate can
//! surface, so that callers can use a single `Result<T>` with the `?` operator.
//!
//! # Which Errors Abort a Quote
//!
//! Only `QuoteError` and `MathError` ever abort a quote. A `SimulationError`
//! raised while evaluating a candidate pair is absorbed by the engine: the
//! candidate is dropped and the scan of that hop continues.

pub mod config;
pub mod math;
pub mod quote;
pub mod simulation;
pub mod snapshot;

pub use config::ConfigError;
pub use math::MathError;
pub use quote::QuoteError;
pub use simulation::SimulationError;
pub use snapshot::SnapshotError;

/// Main result type for the library
pub type Result<T> = std::result::Result<T, QuoterError>;

/// Top-level error enum that encompasses all possible errors in the quoter.
#[derive(Debug, thiserror::Error)]
pub enum QuoterError {
    /// The quote request itself was rejected before any pair was queried.
    #[error("Quote request rejected: {0}")]
    Quote(#[from] QuoteError),

    /// A computed value could not be represented in the bounded output width.
    #[error("Arithmetic error: {0}")]
    Math(#[from] MathError),

    /// A pricing oracle failure that escaped candidate evaluation.
    ///
    /// The engine never returns this variant; it exists for callers that drive
    /// an oracle directly (the snapshot loader, the demo binary).
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    /// Invalid configuration values.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Market snapshot could not be loaded or validated.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Filesystem error while reading snapshots.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error for cases not covered by specific error types.
    #[error("Generic error: {0}")]
    Other(#[from] anyhow::Error),
}

impl QuoterError {
    /// Whether this error is the bounded-width overflow condition.
    pub fn is_overflow(&self) -> bool {
        matches!(self, QuoterError::Math(MathError::Overflow { .. }))
    }

    /// Whether this error is the short-route rejection.
    pub fn is_invalid_length(&self) -> bool {
        matches!(self, QuoterError::Quote(QuoteError::InvalidLength { .. }))
    }
}
