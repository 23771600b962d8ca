//! Token metadata registry.
//!
//! Loads token metadata (address, symbol, decimals, USD price) from a JSON
//! config file and keeps it in insertion order, which also fixes the order
//! in which the scanner tries origins. The native currency uses the
//! `0xEeee...EEeE` sentinel address in the config file.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use alloy_primitives::Address;
use bigdecimal::BigDecimal;
use eyre::{bail, Result, WrapErr};
use serde::Deserialize;

use crate::arb::token::{Token, TokenId};

/// One token entry as written in the JSON config file.
#[derive(Debug, Deserialize)]
pub struct TokenConfig {
    /// Contract address, or the native-currency sentinel.
    pub address: String,
    /// Display symbol.
    pub symbol: String,
    /// Number of fractional digits of the token's native unit.
    pub decimals: u8,
    /// USD price; omitted or zero means unknown.
    #[serde(default)]
    pub price_usd: f64,
}

/// Insertion-ordered collection of known tokens, indexed by id.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    /// Tokens in insertion order.
    tokens: Vec<Token>,
    /// Position of each token id in `tokens`.
    index: HashMap<TokenId, usize>,
}

impl TokenRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a registry from a JSON file of [`TokenConfig`] entries.
    ///
    /// # Errors
    /// * If the file cannot be read or parsed
    /// * If an address is malformed or a price is negative
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading token file {}", path.display()))?;
        let configs: Vec<TokenConfig> =
            serde_json::from_str(&raw).wrap_err("parsing token file")?;

        let mut registry = Self::new();
        for config in configs {
            registry.insert(config.try_into()?);
        }
        Ok(registry)
    }

    /// Adds or replaces a token; replacing keeps the original position.
    pub fn insert(&mut self, token: Token) {
        if let Some(&position) = self.index.get(&token.id()) {
            self.tokens[position] = token;
        } else {
            self.index.insert(token.id(), self.tokens.len());
            self.tokens.push(token);
        }
    }

    /// Looks a token up by id.
    #[must_use]
    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.index.get(&id).map(|&position| &self.tokens[position])
    }

    /// Iterates tokens in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Number of known tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TryFrom<TokenConfig> for Token {
    type Error = eyre::Error;

    fn try_from(config: TokenConfig) -> Result<Self> {
        let address = Address::from_str(&config.address)
            .wrap_err_with(|| format!("token {} has a bad address", config.symbol))?;

        let price = BigDecimal::try_from(config.price_usd)
            .map_err(|_| eyre::eyre!("token {} has a non-finite price", config.symbol))?;
        if price < BigDecimal::from(0) {
            bail!("token {} has a negative price", config.symbol);
        }

        Ok(Self::new(
            TokenId::new(address),
            config.symbol,
            config.decimals,
            price,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bigdecimal::Zero;

    use super::*;
    use crate::arb::test_helpers::*;
    use crate::utils::constants::NATIVE_ASSET;

    #[test]
    fn test_insert_keeps_order_and_replaces_in_place() {
        let mut registry = TokenRegistry::new();
        registry.insert(token("A", 18, 1.0));
        registry.insert(token("B", 6, 2.0));
        registry.insert(token("A", 18, 3.0));

        let order: Vec<&str> = registry.iter().map(Token::symbol).collect();
        assert_eq!(order, vec!["A", "B"]);
        assert_eq!(
            registry.get(id("A")).unwrap().price_usd(),
            &BigDecimal::from(3)
        );
    }

    #[test]
    fn test_config_parsing() {
        let config = TokenConfig {
            address: format!("{NATIVE_ASSET}"),
            symbol: "ETH".to_string(),
            decimals: 18,
            price_usd: 2100.0,
        };
        let token = Token::try_from(config).unwrap();

        assert!(token.id().is_native());
        assert_eq!(token.decimals(), 18);
        assert!(token.has_price());
    }

    #[test]
    fn test_config_rejects_bad_address() {
        let config = TokenConfig {
            address: "not-an-address".to_string(),
            symbol: "X".to_string(),
            decimals: 18,
            price_usd: 1.0,
        };
        assert!(Token::try_from(config).is_err());
    }

    #[test]
    fn test_missing_price_defaults_to_unknown() {
        let raw = r#"[{"address": "0x0000000000000000000000000000000000000001",
                       "symbol": "X", "decimals": 8}]"#;
        let configs: Vec<TokenConfig> = serde_json::from_str(raw).unwrap();
        let token = Token::try_from(configs.into_iter().next().unwrap()).unwrap();

        assert!(token.price_usd().is_zero());
        assert!(!token.has_price());
    }
}
