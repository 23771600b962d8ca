//! Directed graph of scaled exchange rates.
//!
//! Maps a source token to the destinations it can be traded into. Edge order
//! within a node is insertion order, which the search relies on for
//! deterministic tie-breaking, so destinations are kept in a `Vec` rather
//! than a hash map.

use std::collections::HashMap;

use alloy_primitives::U256;

use super::token::TokenId;

/// Holds the directed rate graph and supports update and lookup.
///
/// A node exists iff at least one nonzero rate has been recorded with that
/// token as source. Rates are not assumed symmetric: src -> dst says nothing
/// about dst -> src.
#[derive(Debug, Default)]
pub struct RateGraph {
    /// Outgoing edges per source token, in insertion order.
    edges: HashMap<TokenId, Vec<(TokenId, U256)>>,
}

impl RateGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records or overwrites the rate for `src -> dst`.
    ///
    /// A zero rate means "no quote available" and is a no-op, as is
    /// `src == dst`: a trade always targets a distinct asset. Overwriting an
    /// existing edge keeps its original position in iteration order.
    pub fn update_rate(&mut self, src: TokenId, dst: TokenId, rate: U256) {
        if rate.is_zero() || src == dst {
            return;
        }

        let edges = self.edges.entry(src).or_default();
        if let Some(entry) = edges.iter_mut().find(|(existing, _)| *existing == dst) {
            entry.1 = rate;
        } else {
            edges.push((dst, rate));
        }
    }

    /// Whether any edge originates at `src`.
    #[must_use]
    pub fn has_node(&self, src: TokenId) -> bool {
        self.edges.contains_key(&src)
    }

    /// The outgoing edges of `src` in insertion order; empty when the node
    /// is unknown.
    #[must_use]
    pub fn edges_from(&self, src: TokenId) -> &[(TokenId, U256)] {
        self.edges.get(&src).map_or(&[], Vec::as_slice)
    }

    /// The rate for `src -> dst`, if recorded.
    #[must_use]
    pub fn rate(&self, src: TokenId, dst: TokenId) -> Option<U256> {
        self.edges_from(src)
            .iter()
            .find(|(existing, _)| *existing == dst)
            .map(|(_, rate)| *rate)
    }

    /// Number of tokens with at least one outgoing edge.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    /// Inserts a raw edge without the zero-rate and self-loop guards.
    /// Lets tests confirm the search never traverses a same-asset edge even
    /// when one is present.
    #[cfg(test)]
    pub(crate) fn insert_edge_unchecked(&mut self, src: TokenId, dst: TokenId, rate: U256) {
        self.edges.entry(src).or_default().push((dst, rate));
    }
}
