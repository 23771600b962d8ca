//! Scan driver: one pass over every priced token as a potential origin.
//!
//! The scanner owns the rate graph and the token registry, applies rate
//! updates resolved since the previous pass, and runs the cycle search per
//! origin with a fixed USD notional. Losing and break-even results are
//! reported as-is; only the search's own acceptance filter discards routes.

use alloy_primitives::I256;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::rates::{QuoteRequest, RateUpdate};
use crate::tokens::TokenRegistry;

use super::graph::RateGraph;
use super::route::Route;
use super::search::CycleSearch;
use super::token::TokenId;

/// The outcome of one origin's search: a closing route and its profit in
/// origin base units (positive, zero, or negative).
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// The origin token of the cycle.
    pub origin: TokenId,
    /// The closing route that was found.
    pub route: Route,
    /// Final amount minus starting amount, in origin base units.
    pub profit: I256,
}

/// Iterates all priced tokens and searches each for its best cycle.
pub struct Scanner {
    /// The shared rate graph, mutated only between searches.
    graph: RateGraph,
    /// Token metadata in registry insertion order.
    registry: TokenRegistry,
    /// Outbound quote requests from the search.
    requests: UnboundedSender<QuoteRequest>,
    /// Inbound resolved rates, drained at the start of each scan.
    updates: UnboundedReceiver<RateUpdate>,
    /// Intermediate trades allowed before a route must close.
    hop_budget: u32,
    /// USD value every origin starts with.
    usd_notional: u32,
}

impl Scanner {
    /// Creates a scanner over `registry` wired to the lazy-fetch channels.
    #[must_use]
    pub fn new(
        registry: TokenRegistry,
        requests: UnboundedSender<QuoteRequest>,
        updates: UnboundedReceiver<RateUpdate>,
        hop_budget: u32,
        usd_notional: u32,
    ) -> Self {
        Self {
            graph: RateGraph::new(),
            registry,
            requests,
            updates,
            hop_budget,
            usd_notional,
        }
    }

    /// The token registry this scanner iterates.
    #[must_use]
    pub const fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// The current rate graph.
    #[must_use]
    pub const fn graph(&self) -> &RateGraph {
        &self.graph
    }

    /// Applies all rate updates resolved since the last drain. Returns how
    /// many were applied.
    pub fn drain_updates(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(update) = self.updates.try_recv() {
            self.graph.update_rate(update.src, update.dst, update.rate);
            applied += 1;
        }
        applied
    }

    /// Runs one full pass and returns the per-origin results.
    ///
    /// An origin whose search breaks the closing invariant is logged as an
    /// error and skipped; the remaining origins still run.
    pub fn scan(&mut self) -> Vec<ScanResult> {
        let applied = self.drain_updates();
        if applied > 0 {
            log::info!("scanner: applied {applied} resolved rate updates");
        }

        let search = CycleSearch::new(&self.graph, &self.registry, &self.requests);
        let mut results = Vec::new();

        for token in self.registry.iter() {
            if !token.has_price() {
                continue;
            }

            let Some(src_amount) = token.amount_for_usd(self.usd_notional) else {
                log::warn!(
                    "scanner: cannot size {} USD of {}, skipping origin",
                    self.usd_notional,
                    token.symbol()
                );
                continue;
            };

            let route = match search.best_route(token, src_amount, self.hop_budget) {
                Ok(route) => route,
                Err(error) => {
                    log::error!("scanner: origin {} failed: {error}", token.symbol());
                    continue;
                }
            };

            if route.is_empty() {
                continue;
            }

            if !route.is_closing() {
                log::error!(
                    "scanner: origin {} produced a non-closing route: {route:?}",
                    token.symbol()
                );
                continue;
            }

            let profit = route.profit();
            results.push(ScanResult {
                origin: token.id(),
                route,
                profit,
            });
        }

        log::info!(
            "scanner: pass complete, {} of {} origins produced closing routes",
            results.len(),
            self.registry.len()
        );
        results
    }
}
