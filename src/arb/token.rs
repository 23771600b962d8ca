//! Token identity and metadata.
//!
//! A [`Token`] carries the decimals and USD price the scanner needs; identity
//! is the contract address (or the native-currency sentinel). Tokens are
//! immutable once constructed and owned by the [`crate::tokens`] registry.

use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};

use alloy_primitives::{Address, U256};
use bigdecimal::num_bigint::{BigInt, Sign};
use bigdecimal::{BigDecimal, RoundingMode, Zero};

use crate::utils::constants::{DISPLAY_DECIMALS, NATIVE_ASSET};

/// A unique identifier for a token: its contract address, or the
/// native-currency sentinel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(Address);

impl TokenId {
    /// Wraps an address as a token identifier.
    #[must_use]
    pub const fn new(address: Address) -> Self {
        Self(address)
    }

    /// The underlying address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.0
    }

    /// Whether this identifies the chain's native currency.
    #[must_use]
    pub fn is_native(&self) -> bool {
        self.0 == NATIVE_ASSET
    }
}

impl From<Address> for TokenId {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// A fungible token or the native currency.
///
/// Equality and hashing are by [`TokenId`] only; the remaining fields are
/// display metadata and pricing supplied by the token registry.
#[derive(Clone)]
pub struct Token {
    /// Unique identifier of the token.
    id: TokenId,
    /// Display symbol, falling back to the address when unknown.
    symbol: String,
    /// Number of fractional digits of the token's native unit.
    decimals: u8,
    /// USD price; zero means unknown and excludes the token as a scan origin.
    price_usd: BigDecimal,
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}, {} decimals)", self.symbol, self.decimals)
    }
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(id: TokenId, symbol: String, decimals: u8, price_usd: BigDecimal) -> Self {
        Self {
            id,
            symbol,
            decimals,
            price_usd,
        }
    }

    /// The token's identifier.
    #[must_use]
    pub const fn id(&self) -> TokenId {
        self.id
    }

    /// The token's display symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of fractional digits of the token's native unit.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// The token's USD price; zero when unknown.
    #[must_use]
    pub const fn price_usd(&self) -> &BigDecimal {
        &self.price_usd
    }

    /// Whether a USD price is known for this token.
    #[must_use]
    pub fn has_price(&self) -> bool {
        !self.price_usd.is_zero()
    }

    /// The amount of this token worth `notional` USD, floored to base units.
    ///
    /// Returns `None` when the price is unknown or the amount does not fit
    /// in 256 bits.
    #[must_use]
    pub fn amount_for_usd(&self, notional: u32) -> Option<U256> {
        if self.price_usd.is_zero() {
            return None;
        }

        let unit_scale = BigDecimal::new(BigInt::from(1), -i64::from(self.decimals));
        let amount = (BigDecimal::from(notional) / &self.price_usd * unit_scale)
            .with_scale_round(0, RoundingMode::Floor);

        let (digits, _) = amount.into_bigint_and_exponent();
        if digits.sign() == Sign::Minus {
            return None;
        }

        U256::from_str_radix(&digits.to_str_radix(10), 10).ok()
    }

    /// Formats a base-unit amount of this token as a decimal string.
    #[must_use]
    pub fn format_amount(&self, amount: U256) -> String {
        format_scaled(amount, self.decimals)
    }
}

/// Formats `amount / 10^decimals` with [`DISPLAY_DECIMALS`] fractional digits.
pub(crate) fn format_scaled(amount: U256, decimals: u8) -> String {
    let scale = U256::from(10).pow(U256::from(decimals));
    let whole = amount / scale;

    let shown = u32::from(DISPLAY_DECIMALS.min(decimals));
    if shown == 0 {
        return format!("{whole}.0000");
    }

    // Keep only the leading DISPLAY_DECIMALS digits of the fraction.
    let frac = amount % scale / U256::from(10).pow(U256::from(u32::from(decimals) - shown));
    format!("{whole}.{frac:0>width$}", width = shown as usize)
}
