//! Fixed-point conversion of amounts between tokens of differing precision.
//!
//! Rates are integers scaled by `10^18`; amounts are integers scaled by the
//! token's own decimals. Multiplying before dividing keeps the result exact
//! up to the final truncating division, which matters when decimals differ
//! widely (6 vs 18).

use alloy_primitives::U256;

use crate::errors::ArbError;
use crate::utils::constants::RATE_PRECISION;

/// Converts `src_amount` base units of the source token into base units of
/// the destination token at the given scaled rate.
///
/// # Errors
/// Returns [`ArbError::ArithmeticOverflow`] when an intermediate product
/// exceeds 256 bits; the caller treats that as a failed candidate, not a
/// scan failure.
pub fn convert(
    src_decimals: u8,
    dst_decimals: u8,
    rate: U256,
    src_amount: U256,
) -> Result<U256, ArbError> {
    let overflow = || ArbError::ArithmeticOverflow { src_amount, rate };

    if dst_decimals >= src_decimals {
        let shift = pow10(u32::from(dst_decimals - src_decimals)).ok_or_else(overflow)?;
        let product = src_amount
            .checked_mul(rate)
            .and_then(|value| value.checked_mul(shift))
            .ok_or_else(overflow)?;
        Ok(product / pow10(u32::from(RATE_PRECISION)).ok_or_else(overflow)?)
    } else {
        let divisor = pow10(u32::from(src_decimals - dst_decimals) + u32::from(RATE_PRECISION))
            .ok_or_else(overflow)?;
        let product = src_amount.checked_mul(rate).ok_or_else(overflow)?;
        Ok(product / divisor)
    }
}

/// `10^exp` as a U256, or `None` when it does not fit.
fn pow10(exp: u32) -> Option<U256> {
    U256::from(10).checked_pow(U256::from(exp))
}
