//! Scan service: wires the channels together and loops forever.

use eyre::Result;

use crate::arb::scanner::Scanner;
use crate::config::Config;
use crate::notify::console;
use crate::rates::{self, RateSource};
use crate::tokens::TokenRegistry;

/// Seeds the graph, spawns the lazy-fetch worker, and scans on an interval.
///
/// Runs until the process is stopped.
///
/// # Errors
/// * If eager seeding cannot deliver updates
pub async fn start<S>(config: &Config, registry: TokenRegistry, source: S) -> Result<()>
where
    S: RateSource + 'static,
{
    let (request_tx, request_rx) = tokio::sync::mpsc::unbounded_channel();
    let (update_tx, update_rx) = tokio::sync::mpsc::unbounded_channel();

    rates::seed(&source, &registry, &update_tx).await?;
    rates::spawn_fetcher(source, request_rx, update_tx);

    let mut scanner = Scanner::new(
        registry,
        request_tx,
        update_rx,
        config.hop_budget,
        config.usd_notional,
    );

    log::info!(
        "bot: scanning {} tokens every {}s, hop budget {}, ${} notional",
        scanner.registry().len(),
        config.scan_interval_secs,
        config.hop_budget,
        config.usd_notional
    );

    loop {
        let results = scanner.scan();
        console::report(scanner.registry(), &results);

        tokio::time::sleep(std::time::Duration::from_secs(config.scan_interval_secs)).await;
    }
}
