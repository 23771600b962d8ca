use alloy_primitives::{address, Address};

/// Number of decimal digits a scaled exchange rate carries.
/// A rate of 1.0 is stored as `10^18`.
pub const RATE_PRECISION: u8 = 18;

/// Sentinel address for the chain's native currency, which has no token
/// contract of its own.
pub const NATIVE_ASSET: Address = address!("0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// Decimal places shown when formatting token amounts and rates.
pub const DISPLAY_DECIMALS: u8 = 4;

/// Column width used for route output.
pub const DISPLAY_PADDING: usize = 18;

/// ANSI escape for green console output.
pub const CONSOLE_GREEN: &str = "\x1b[32m";
/// ANSI escape for red console output.
pub const CONSOLE_RED: &str = "\x1b[31m";
/// ANSI escape resetting console colors.
pub const CONSOLE_RESET: &str = "\x1b[0m";
