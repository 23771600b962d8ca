use alloy_primitives::U256;
use thiserror::Error;

/// Errors produced by the arbitrage core.
///
/// Overflow is local to a single candidate conversion and causes that edge
/// to be skipped; an invariant violation means the search contract was
/// broken and fails the whole origin loudly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArbError {
    /// A fixed-point conversion would exceed 256 bits.
    #[error("arithmetic overflow converting {src_amount} units at rate {rate}")]
    ArithmeticOverflow {
        /// The amount that was being converted.
        src_amount: U256,
        /// The scaled exchange rate applied to it.
        rate: U256,
    },

    /// A non-empty route came back that does not close on its origin.
    #[error("route invariant violated: {0}")]
    InvariantViolation(String),
}
