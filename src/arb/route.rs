//! Trades and routes.
//!
//! A [`Route`] is an ordered sequence of [`Trade`]s where each step's
//! destination is the next step's source. Routes are built fresh for every
//! search call and discarded with it.

use std::fmt::{self, Debug};

use alloy_primitives::{I256, U256};

use super::token::TokenId;

/// One conversion along a single graph edge.
#[derive(Clone, PartialEq, Eq)]
pub struct Trade {
    /// Source token of the step.
    pub src: TokenId,
    /// Destination token of the step.
    pub dst: TokenId,
    /// Amount entering the step, in src base units.
    pub src_amount: U256,
    /// Amount leaving the step, in dst base units.
    pub dst_amount: U256,
    /// The scaled exchange rate applied.
    pub rate: U256,
}

impl Debug for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} -> {} {:?} @{}",
            self.src_amount, self.src, self.dst_amount, self.dst, self.rate
        )
    }
}

/// An ordered sequence of trades; closing when the last destination equals
/// the first source.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Route {
    /// The trades in execution order.
    trades: Vec<Trade>,
}

impl Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Route({})",
            self.trades
                .iter()
                .map(|trade| format!("{trade:?}"))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl Route {
    /// The empty route, used as the "nothing found" result.
    #[must_use]
    pub const fn empty() -> Self {
        Self { trades: Vec::new() }
    }

    /// Whether the route has no trades.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Number of trades in the route.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// The first trade, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Trade> {
        self.trades.first()
    }

    /// The last trade, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Trade> {
        self.trades.last()
    }

    /// Appends a trade.
    pub fn push(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    /// Iterates the trades in execution order.
    pub fn iter(&self) -> std::slice::Iter<'_, Trade> {
        self.trades.iter()
    }

    /// Whether `token` already occurs as a source of some trade. The search
    /// uses this to avoid visiting an asset as an intermediate source twice.
    #[must_use]
    pub fn visits_source(&self, token: TokenId) -> bool {
        self.trades.iter().any(|trade| trade.src == token)
    }

    /// Whether the route closes back on its first source.
    #[must_use]
    pub fn is_closing(&self) -> bool {
        match (self.trades.first(), self.trades.last()) {
            (Some(first), Some(last)) => first.src == last.dst,
            _ => false,
        }
    }

    /// Final amount minus starting amount, both denominated in the origin
    /// token of a closing route. Zero for an empty route.
    #[must_use]
    pub fn profit(&self) -> I256 {
        match (self.trades.first(), self.trades.last()) {
            (Some(first), Some(last)) => I256::from_raw(last.dst_amount)
                .saturating_sub(I256::from_raw(first.src_amount)),
            _ => I256::ZERO,
        }
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Trade;
    type IntoIter = std::slice::Iter<'a, Trade>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::arb::test_helpers::*;

    #[test]
    fn test_empty_route() {
        let route = Route::empty();
        assert!(route.is_empty());
        assert!(!route.is_closing());
        assert_eq!(route.profit(), I256::ZERO);
    }

    #[test]
    fn test_closing_and_profit() {
        let mut route = Route::empty();
        route.push(trade("A", "B", 100, 200, 2 * E18));
        route.push(trade("B", "A", 200, 110, E18 / 2));

        assert!(route.is_closing());
        assert_eq!(route.profit(), I256::try_from(10).unwrap());
    }

    #[test]
    fn test_negative_profit() {
        let mut route = Route::empty();
        route.push(trade("A", "B", 100, 200, 2 * E18));
        route.push(trade("B", "A", 200, 80, E18 / 2));

        assert!(route.is_closing());
        assert_eq!(route.profit(), I256::try_from(-20).unwrap());
    }

    #[test]
    fn test_visits_source() {
        let mut route = Route::empty();
        route.push(trade("A", "B", 100, 200, 2 * E18));
        route.push(trade("B", "C", 200, 300, 15 * E18 / 10));

        assert!(route.visits_source(id("A")));
        assert!(route.visits_source(id("B")));
        assert!(!route.visits_source(id("C")));
    }
}
