//! Fixed-point arithmetic errors.

/// Errors raised by price math and bounded-width conversions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    #[error("Overflow: {context} does not fit in the output width")]
    Overflow { context: &'static str },

    #[error("Price underflow: base {base} raised to {exponent} rounds to zero")]
    PowUnderflow { base: String, exponent: i64 },

    #[error("Exponent too large: |{exponent}| must be below 2^20")]
    ExponentTooLarge { exponent: i64 },

    #[error("Division by zero while computing {context}")]
    DivisionByZero { context: &'static str },
}

impl MathError {
    pub(crate) fn overflow(context: &'static str) -> Self {
        MathError::Overflow { context }
    }
}
