//! Rate source collaborator and lazy-fetch plumbing.
//!
//! The search never blocks on a quote: a miss sends a [`QuoteRequest`] on
//! an unbounded channel and moves on. A spawned fetcher task resolves
//! requests against a [`RateSource`] and sends [`RateUpdate`]s back; the
//! scanner drains those into the graph at the start of its next pass, so a
//! resolved rate is only ever observed by later scans.

/// HTTP rate source
pub mod http;

use alloy_primitives::U256;
use async_trait::async_trait;
use eyre::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::arb::token::TokenId;
use crate::tokens::TokenRegistry;

/// A request to quote `src -> dst`, fired on a graph miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteRequest {
    /// Source token of the missing edge.
    pub src: TokenId,
    /// Destination token of the missing edge.
    pub dst: TokenId,
}

/// A resolved rate on its way into the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateUpdate {
    /// Source token of the edge.
    pub src: TokenId,
    /// Destination token of the edge.
    pub dst: TokenId,
    /// The scaled rate; zero means the source had no quote.
    pub rate: U256,
}

/// Something that can quote a scaled exchange rate between two tokens.
/// Implementations own their own timeout and retry policy.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches the scaled rate for `src -> dst`. A zero rate means no quote
    /// is available.
    ///
    /// # Errors
    /// Returns an error when the source is unreachable or replies with
    /// something unparseable.
    async fn fetch_rate(&self, src: TokenId, dst: TokenId) -> Result<U256>;
}

/// Spawns the task that resolves quote requests out of band.
///
/// Runs until the request channel closes. Fetch failures are logged and
/// dropped: the edge simply stays missing and a later scan will re-request
/// it.
pub fn spawn_fetcher<S>(
    source: S,
    mut requests: UnboundedReceiver<QuoteRequest>,
    updates: UnboundedSender<RateUpdate>,
) -> JoinHandle<()>
where
    S: RateSource + 'static,
{
    tokio::spawn(async move {
        while let Some(request) = requests.recv().await {
            match source.fetch_rate(request.src, request.dst).await {
                Ok(rate) => {
                    let update = RateUpdate {
                        src: request.src,
                        dst: request.dst,
                        rate,
                    };
                    if updates.send(update).is_err() {
                        // Scanner is gone; nothing left to feed.
                        break;
                    }
                }
                Err(error) => {
                    log::warn!(
                        "rates: quote {} -> {} failed: {error}",
                        request.src,
                        request.dst
                    );
                }
            }
        }
        log::info!("rates: fetcher stopped, request channel closed");
    })
}

/// Eagerly quotes every ordered pair of registry tokens and feeds the
/// results through the update channel, so the first scan starts from a
/// populated graph.
///
/// # Errors
/// Returns an error only when the update channel is closed; individual
/// quote failures are logged and skipped.
pub async fn seed<S: RateSource>(
    source: &S,
    registry: &TokenRegistry,
    updates: &UnboundedSender<RateUpdate>,
) -> Result<()> {
    let mut seeded = 0usize;
    for src in registry.iter() {
        for dst in registry.iter() {
            if src.id() == dst.id() {
                continue;
            }
            match source.fetch_rate(src.id(), dst.id()).await {
                Ok(rate) if !rate.is_zero() => {
                    updates
                        .send(RateUpdate {
                            src: src.id(),
                            dst: dst.id(),
                            rate,
                        })
                        .map_err(|_| eyre::eyre!("rate update channel closed during seeding"))?;
                    seeded += 1;
                }
                Ok(_) => {
                    log::debug!(
                        "rates: no quote for {} -> {}",
                        src.symbol(),
                        dst.symbol()
                    );
                }
                Err(error) => {
                    log::warn!(
                        "rates: seeding {} -> {} failed: {error}",
                        src.symbol(),
                        dst.symbol()
                    );
                }
            }
        }
    }
    log::info!("rates: seeded {seeded} edges");
    Ok(())
}
