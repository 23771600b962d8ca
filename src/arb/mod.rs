//! # Arbitrage Module
//!
//! Core of the scanner: the rate graph, fixed-point conversion, the
//! depth-bounded cycle search, and the per-origin scan driver.

/// Fixed-point amount conversion across token decimals
pub mod convert;
/// Directed graph of scaled exchange rates
pub mod graph;
/// Trades and routes
pub mod route;
/// Scan driver over all priced origins
pub mod scanner;
/// Depth-bounded best-closing-route search
pub mod search;
/// Test helpers and utilities
#[cfg(test)]
pub mod test_helpers;
/// Token identity and metadata
pub mod token;
