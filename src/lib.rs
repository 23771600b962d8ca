/*!
 * # Swoop - Closed-Loop Arbitrage Scanner
 *
 * Swoop searches a directed graph of exchange rates for the most profitable
 * closed trade sequence per origin token: start with a fixed USD notional of
 * one asset, hop through others, and come back to where you started with
 * more than you put in.
 *
 * ## Core Features
 *
 * - **Rate Graph**: incrementally updated directed graph of scaled rates
 * - **Exact Arithmetic**: fixed-point conversion across token decimals
 * - **Cycle Search**: depth-bounded recursive search for the best closing
 *   route per origin
 * - **Self-Healing Cache**: graph misses trigger non-blocking quote fetches
 *   that populate the graph for later scans
 *
 * ## Module Structure
 *
 * - `arb`: core graph, conversion, search, and scan driver
 * - `bot`: the periodic scan service
 * - `config`: configuration management for the system
 * - `errors`: the core error taxonomy
 * - `notify`: reporting collaborators
 * - `rates`: rate source collaborator and lazy-fetch plumbing
 * - `tokens`: token metadata registry
 * - `utils`: utility functions and helpers
 */

/// Core arbitrage graph and search logic
pub mod arb;
/// The periodic scan service
pub mod bot;
/// Configuration management for the system
pub mod config;
/// The core error taxonomy
pub mod errors;
/// Reporting collaborators
pub mod notify;
/// Rate source collaborator and lazy-fetch plumbing
pub mod rates;
/// Token metadata registry
pub mod tokens;
/// Utility functions and helpers
pub mod utils;
