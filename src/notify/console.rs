//! Console reporter: prints each closing route as a fixed-width trade table
//! followed by a colored profit line.

use std::str::FromStr;

use alloy_primitives::U256;
use bigdecimal::{BigDecimal, num_bigint::BigInt};

use crate::arb::scanner::ScanResult;
use crate::arb::token::{format_scaled, TokenId};
use crate::tokens::TokenRegistry;
use crate::utils::constants::{
    CONSOLE_GREEN, CONSOLE_RED, CONSOLE_RESET, DISPLAY_PADDING, RATE_PRECISION,
};

/// Prints every scan result to stdout.
pub fn report(registry: &TokenRegistry, results: &[ScanResult]) {
    for result in results {
        report_route(registry, result);
    }
}

/// Prints one route and its profit line.
fn report_route(registry: &TokenRegistry, result: &ScanResult) {
    for trade in &result.route {
        println!(
            "=> {src_amount:<pad$} {src_symbol}\t@{rate:<pad$} => {dst_amount:<pad$} {dst_symbol}",
            src_amount = format_token_amount(registry, trade.src, trade.src_amount),
            src_symbol = symbol(registry, trade.src),
            rate = format_scaled(trade.rate, RATE_PRECISION),
            dst_amount = format_token_amount(registry, trade.dst, trade.dst_amount),
            dst_symbol = symbol(registry, trade.dst),
            pad = DISPLAY_PADDING,
        );
    }

    let origin = registry.get(result.origin);
    let profit_fmt = origin.map_or_else(
        || result.profit.to_string(),
        |token| {
            let sign = if result.profit.is_negative() { "-" } else { "" };
            format!("{sign}{}", token.format_amount(result.profit.unsigned_abs()))
        },
    );
    let profit_usd = origin
        .and_then(|token| profit_in_usd(result, token.decimals(), token.price_usd()))
        .map_or_else(|| "?".to_string(), |usd| usd.with_scale(2).to_string());

    let color = if result.profit.is_negative() {
        CONSOLE_RED
    } else {
        CONSOLE_GREEN
    };
    println!(
        "{color}++ {profit_fmt:<pad$} {origin_symbol}\t${profit_usd}{CONSOLE_RESET}",
        origin_symbol = symbol(registry, result.origin),
        pad = DISPLAY_PADDING,
    );
    println!("{}", "-".repeat(80));
}

/// The token's symbol, or its address when unknown.
fn symbol(registry: &TokenRegistry, id: TokenId) -> String {
    registry
        .get(id)
        .map_or_else(|| id.to_string(), |token| token.symbol().to_string())
}

/// Formats an amount in the token's own decimals, falling back to base
/// units when the token is unknown.
fn format_token_amount(registry: &TokenRegistry, id: TokenId, amount: U256) -> String {
    registry
        .get(id)
        .map_or_else(|| amount.to_string(), |token| token.format_amount(amount))
}

/// The profit expressed in USD at the origin's price.
fn profit_in_usd(
    result: &ScanResult,
    decimals: u8,
    price_usd: &BigDecimal,
) -> Option<BigDecimal> {
    let base_units = BigDecimal::from_str(&result.profit.to_string()).ok()?;
    let unit = BigDecimal::new(BigInt::from(1), i64::from(decimals));
    Some(base_units * unit * price_usd)
}
