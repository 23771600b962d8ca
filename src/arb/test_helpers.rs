//! Shared constructors for unit tests.

use alloy_primitives::{Address, U256};
use bigdecimal::BigDecimal;
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::rates::{QuoteRequest, RateUpdate};
use crate::tokens::TokenRegistry;

use super::route::Trade;
use super::scanner::Scanner;
use super::token::{Token, TokenId};

/// One whole unit at 18 decimals, also the rate scale: a rate of 1.0.
pub const E18: u128 = 1_000_000_000_000_000_000;

/// A deterministic token id derived from a short symbol.
pub fn id(symbol: &str) -> TokenId {
    let mut bytes = [0u8; 20];
    for (i, byte) in symbol.bytes().enumerate().take(20) {
        bytes[i] = byte;
    }
    TokenId::new(Address::new(bytes))
}

/// A token whose id is derived from its symbol.
#[allow(clippy::unwrap_used)]
pub fn token(symbol: &str, decimals: u8, price_usd: f64) -> Token {
    Token::new(
        id(symbol),
        symbol.to_string(),
        decimals,
        BigDecimal::try_from(price_usd).unwrap(),
    )
}

/// A registry over `(symbol, decimals, price_usd)` tuples.
pub fn registry(tokens: &[(&str, u8, f64)]) -> TokenRegistry {
    let mut registry = TokenRegistry::new();
    for (symbol, decimals, price) in tokens {
        registry.insert(token(symbol, *decimals, *price));
    }
    registry
}

/// A trade between symbol-derived tokens with raw base-unit amounts.
pub fn trade(src: &str, dst: &str, src_amount: u128, dst_amount: u128, rate: u128) -> Trade {
    Trade {
        src: id(src),
        dst: id(dst),
        src_amount: U256::from(src_amount),
        dst_amount: U256::from(dst_amount),
        rate: U256::from(rate),
    }
}

/// A scanner with hop budget 1 and a $100 notional, its graph seeded with
/// `edges` through the update channel the way resolved fetches arrive.
/// Returns the request receiver and update sender so tests can observe the
/// lazy-fetch side.
#[allow(clippy::unwrap_used)]
pub fn scanner(
    tokens: &[(&str, u8, f64)],
    edges: &[(&str, &str, u128)],
) -> (
    Scanner,
    UnboundedReceiver<QuoteRequest>,
    UnboundedSender<RateUpdate>,
) {
    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();

    for (src, dst, rate) in edges {
        update_tx
            .send(RateUpdate {
                src: id(src),
                dst: id(dst),
                rate: U256::from(*rate),
            })
            .unwrap();
    }

    let scanner = Scanner::new(registry(tokens), request_tx, update_rx, 1, 100);
    (scanner, request_rx, update_tx)
}
