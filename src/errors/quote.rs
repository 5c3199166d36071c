//! Quote request errors.

/// Errors that reject a quote request as a whole
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    #[error("Invalid route length: a route needs at least 2 tokens, got {actual}")]
    InvalidLength { actual: usize },
}
