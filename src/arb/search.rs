//! Depth-bounded search for the best closing route from an origin token.
//!
//! Each recursive call is in one of three states:
//! - unresolved: the graph has never seen the current token as a source, so
//!   a quote for `current -> origin` is requested fire-and-forget and the
//!   call returns empty. Later scans observe the resolved rate; this one
//!   does not.
//! - closing: the hop budget is spent, the route can only close on the
//!   direct `current -> origin` edge or not at all.
//! - exploring: every outgoing edge is tried in graph iteration order,
//!   skipping tokens already visited as a source.
//!
//! A candidate closing route is accepted when its final amount meets or
//! exceeds the running baseline, which starts at the current amount at the
//! top level and at the route's original starting amount in nested calls.
//! Using `>=` means the last equally-good candidate in iteration order wins.

use alloy_primitives::U256;
use tokio::sync::mpsc::UnboundedSender;

use crate::errors::ArbError;
use crate::rates::QuoteRequest;
use crate::tokens::TokenRegistry;

use super::convert::convert;
use super::graph::RateGraph;
use super::route::{Route, Trade};
use super::token::Token;

/// Best-closing-route search over a rate graph.
///
/// Borrows the graph and registry for the duration of one scan; missing
/// nodes are reported on the quote request channel without blocking.
pub struct CycleSearch<'a> {
    /// The rate graph being traversed.
    graph: &'a RateGraph,
    /// Token metadata, needed for per-hop decimals.
    tokens: &'a TokenRegistry,
    /// Fire-and-forget quote requests for unresolved nodes.
    requests: &'a UnboundedSender<QuoteRequest>,
}

impl<'a> CycleSearch<'a> {
    /// Creates a search over `graph` with metadata from `tokens`.
    #[must_use]
    pub const fn new(
        graph: &'a RateGraph,
        tokens: &'a TokenRegistry,
        requests: &'a UnboundedSender<QuoteRequest>,
    ) -> Self {
        Self {
            graph,
            tokens,
            requests,
        }
    }

    /// Finds the best route that starts at `origin` with `src_amount` base
    /// units and closes back on it within `hop_budget` intermediate trades.
    /// Returns the empty route when no acceptable cycle exists.
    ///
    /// # Errors
    /// Returns [`ArbError::InvariantViolation`] if a nested call produces a
    /// non-empty route that does not end at the origin; that is a logic
    /// defect, not a data condition.
    pub fn best_route(
        &self,
        origin: &Token,
        src_amount: U256,
        hop_budget: u32,
    ) -> Result<Route, ArbError> {
        self.descend(origin, origin, src_amount, hop_budget, Route::empty())
    }

    /// One recursive step; see the module docs for the three states.
    fn descend(
        &self,
        origin: &Token,
        current: &Token,
        amount: U256,
        hops_left: u32,
        route: Route,
    ) -> Result<Route, ArbError> {
        if !self.graph.has_node(current.id()) {
            // Unresolved node. Ask the rate source for current -> origin and
            // give up on this branch; the reply lands in the graph via the
            // update channel before some later scan.
            if self
                .requests
                .send(QuoteRequest {
                    src: current.id(),
                    dst: origin.id(),
                })
                .is_err()
            {
                log::debug!("search: quote request channel closed");
            }
            return Ok(Route::empty());
        }

        if hops_left == 0 {
            return self.close(origin, current, amount, route);
        }

        let mut best = Route::empty();
        // Nested calls must beat the whole search's starting amount, not the
        // local one; only the top level compares against its own input.
        let mut best_return = if current.id() == origin.id() {
            amount
        } else {
            route.first().map_or(amount, |trade| trade.src_amount)
        };

        for (next_id, rate) in self.graph.edges_from(current.id()) {
            if *next_id == current.id() || route.visits_source(*next_id) {
                continue;
            }

            let Some(next) = self.tokens.get(*next_id) else {
                log::warn!("search: no metadata for token {next_id}, skipping edge");
                continue;
            };

            let next_amount =
                match convert(current.decimals(), next.decimals(), *rate, amount) {
                    Ok(converted) => converted,
                    Err(error) => {
                        log::debug!("search: skipping edge to {}: {error}", next.symbol());
                        continue;
                    }
                };

            let mut extended = route.clone();
            extended.push(Trade {
                src: current.id(),
                dst: *next_id,
                src_amount: amount,
                dst_amount: next_amount,
                rate: *rate,
            });

            let candidate = self.descend(origin, next, next_amount, hops_left - 1, extended)?;
            let Some(last) = candidate.last() else {
                continue;
            };

            if last.dst != origin.id() {
                return Err(ArbError::InvariantViolation(format!(
                    "candidate route from {} ends at {} instead of origin {}",
                    current.symbol(),
                    last.dst,
                    origin.symbol()
                )));
            }

            let final_amount = last.dst_amount;
            if final_amount >= best_return {
                best_return = final_amount;
                best = candidate;
            }
        }

        Ok(best)
    }

    /// Closing state: the hop budget is spent, so the route succeeds only if
    /// a direct edge back to the origin exists and converts cleanly.
    fn close(
        &self,
        origin: &Token,
        current: &Token,
        amount: U256,
        mut route: Route,
    ) -> Result<Route, ArbError> {
        let Some(rate) = self.graph.rate(current.id(), origin.id()) else {
            return Ok(Route::empty());
        };

        match convert(current.decimals(), origin.decimals(), rate, amount) {
            Ok(origin_amount) => {
                route.push(Trade {
                    src: current.id(),
                    dst: origin.id(),
                    src_amount: amount,
                    dst_amount: origin_amount,
                    rate,
                });
                Ok(route)
            }
            Err(error) => {
                log::debug!(
                    "search: closing edge {} -> {} overflowed: {error}",
                    current.symbol(),
                    origin.symbol()
                );
                Ok(Route::empty())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::arb::test_helpers::*;

    /// Builds graph + registry, runs one search, returns the route and any
    /// quote requests the search fired.
    fn run_search(
        tokens: &[(&str, u8, f64)],
        edges: &[(&str, &str, u128)],
        origin: &str,
        amount: u128,
        hops: u32,
    ) -> (Route, Vec<QuoteRequest>) {
        let registry = registry(tokens);
        let mut graph = RateGraph::new();
        for (src, dst, rate) in edges {
            graph.update_rate(id(src), id(dst), U256::from(*rate));
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        let search = CycleSearch::new(&graph, &registry, &tx);
        let route = search
            .best_route(registry.get(id(origin)).unwrap(), U256::from(amount), hops)
            .unwrap();

        let mut requests = Vec::new();
        while let Ok(request) = rx.try_recv() {
            requests.push(request);
        }
        (route, requests)
    }

    #[test]
    fn test_profitable_two_hop_cycle() {
        // A -> B doubles, B -> A keeps 60%: 100 -> 200 -> 120
        let (route, requests) = run_search(
            &[("A", 18, 1.0), ("B", 18, 1.0)],
            &[("A", "B", 2 * E18), ("B", "A", 6 * E18 / 10)],
            "A",
            100 * E18,
            1,
        );

        assert_eq!(route.len(), 2);
        assert!(route.is_closing());
        assert_eq!(route.last().unwrap().dst_amount, U256::from(120 * E18));
        assert!(requests.is_empty());
    }

    /// The end-to-end loss example: 100 A -> 200 B -> 80 A is a losing
    /// cycle and must be rejected outright, not returned as "best effort".
    #[test]
    fn test_losing_cycle_is_rejected() {
        let (route, _) = run_search(
            &[("A", 18, 1.0), ("B", 6, 1.0)],
            &[("A", "B", 2 * E18), ("B", "A", 400_000_000_000_000_000)],
            "A",
            100 * E18,
            1,
        );

        assert!(route.is_empty());
    }

    /// Same shape as the losing example but checking the intermediate
    /// decimals shift: 100e18 of A becomes 200e6 of B.
    #[test]
    fn test_cross_decimals_intermediate_amount() {
        let (route, _) = run_search(
            &[("A", 18, 1.0), ("B", 6, 1.0)],
            &[("A", "B", 2 * E18), ("B", "A", 6 * E18 / 10)],
            "A",
            100 * E18,
            1,
        );

        assert_eq!(route.len(), 2);
        assert_eq!(route.first().unwrap().dst_amount, U256::from(200_000_000u64));
        assert_eq!(route.last().unwrap().dst_amount, U256::from(120 * E18));
    }

    #[test]
    fn test_break_even_cycle_is_accepted() {
        // >= baseline: an exactly break-even close is still a valid route.
        let (route, _) = run_search(
            &[("A", 18, 1.0), ("B", 18, 1.0)],
            &[("A", "B", 2 * E18), ("B", "A", E18 / 2)],
            "A",
            100 * E18,
            1,
        );

        assert_eq!(route.len(), 2);
        assert_eq!(route.last().unwrap().dst_amount, U256::from(100 * E18));
    }

    /// Two equally profitable closings; the one discovered later in graph
    /// iteration order must win.
    #[test]
    fn test_tie_break_last_wins() {
        let (route, _) = run_search(
            &[("A", 18, 1.0), ("B", 18, 1.0), ("C", 18, 1.0)],
            &[
                ("A", "B", 2 * E18),
                ("A", "C", 2 * E18),
                ("B", "A", 6 * E18 / 10),
                ("C", "A", 6 * E18 / 10),
            ],
            "A",
            100 * E18,
            1,
        );

        assert_eq!(route.len(), 2);
        assert_eq!(route.first().unwrap().dst, id("C"));
    }

    /// A -> B, B -> C, C -> A, B -> A with budget 2: B must never appear as
    /// a source twice in any returned route.
    #[test]
    fn test_cycle_avoidance() {
        let (route, _) = run_search(
            &[("A", 18, 1.0), ("B", 18, 1.0), ("C", 18, 1.0)],
            &[
                ("A", "B", 2 * E18),
                ("B", "C", 2 * E18),
                ("C", "A", 2 * E18),
                ("B", "A", 2 * E18),
            ],
            "A",
            100 * E18,
            2,
        );

        assert!(!route.is_empty());
        let b_as_source = route.iter().filter(|trade| trade.src == id("B")).count();
        assert_eq!(b_as_source, 1);
    }

    /// An unknown intermediate node returns empty immediately and fires
    /// exactly one quote request for (missing, origin).
    #[test]
    fn test_miss_triggers_single_fetch() {
        let (route, requests) = run_search(
            &[("A", 18, 1.0), ("X", 18, 1.0)],
            &[("A", "X", 2 * E18)],
            "A",
            100 * E18,
            2,
        );

        assert!(route.is_empty());
        assert_eq!(
            requests,
            vec![QuoteRequest {
                src: id("X"),
                dst: id("A"),
            }]
        );
    }

    /// A same-asset edge injected directly into the graph is never
    /// traversed; closing is the only same-asset transition.
    #[test]
    fn test_self_loop_edge_is_not_traversed() {
        let registry = registry(&[("A", 18, 1.0), ("B", 18, 1.0)]);
        let mut graph = RateGraph::new();
        graph.insert_edge_unchecked(id("A"), id("A"), U256::from(10 * E18));
        graph.update_rate(id("A"), id("B"), U256::from(2 * E18));
        graph.update_rate(id("B"), id("A"), U256::from(6 * E18 / 10));

        let (tx, _rx) = mpsc::unbounded_channel();
        let search = CycleSearch::new(&graph, &registry, &tx);
        let route = search
            .best_route(registry.get(id("A")).unwrap(), U256::from(100 * E18), 1)
            .unwrap();

        assert_eq!(route.len(), 2);
        assert!(route.iter().all(|trade| trade.src != trade.dst));
    }

    /// Hop budget zero at the top level: no self-loop is ever stored, so the
    /// route cannot close and the result is empty.
    #[test]
    fn test_zero_budget_at_origin() {
        let (route, _) = run_search(
            &[("A", 18, 1.0), ("B", 18, 1.0)],
            &[("A", "B", 2 * E18), ("B", "A", 2 * E18)],
            "A",
            100 * E18,
            0,
        );

        assert!(route.is_empty());
    }

    /// Nested calls compare against the route's original starting amount,
    /// not their local amount. Here the closing return shrinks below the
    /// local amount at B but still beats the original 100 A input, so the
    /// route must be accepted.
    #[test]
    fn test_nested_baseline_is_original_amount() {
        // A -> B: x3 (300). B -> C at 0.5 (150), close C -> A at 0.9 (135).
        // 135 >= 100 (original) even though 135 < 300 (local at B); a
        // local baseline would wrongly reject this cycle.
        let (route, _) = run_search(
            &[("A", 18, 1.0), ("B", 18, 1.0), ("C", 18, 1.0)],
            &[
                ("A", "B", 3 * E18),
                ("B", "A", 4 * E18 / 10),
                ("B", "C", E18 / 2),
                ("C", "A", 9 * E18 / 10),
            ],
            "A",
            100 * E18,
            2,
        );

        assert_eq!(route.len(), 3);
        assert_eq!(route.last().unwrap().dst_amount, U256::from(135 * E18));
    }

    /// The origin may be revisited only as the final destination, never as
    /// an intermediate source: while exploring, an edge back to A is skipped
    /// because A is already a route source. Two-trade cycles therefore only
    /// close when the budget runs out after one hop.
    #[test]
    fn test_origin_only_reachable_as_closing_step() {
        let tokens = [("A", 18, 1.0), ("B", 18, 1.0)];
        let edges = [("A", "B", 2 * E18), ("B", "A", 2 * E18)];

        // Budget 2: the B -> A edge is skipped during exploration and the
        // route never closes.
        let (route, _) = run_search(&tokens, &edges, "A", 100 * E18, 2);
        assert!(route.is_empty());

        // Budget 1: the same edge is the closing step and the cycle exists.
        let (route, _) = run_search(&tokens, &edges, "A", 100 * E18, 1);
        assert_eq!(route.len(), 2);
        assert!(route.is_closing());
    }
}
