//! Environment-driven configuration.
//!
//! All knobs come from `SWOOP_*` environment variables (a `.env` file is
//! honored) with defaults matching a typical deployment.

use eyre::{bail, Result, WrapErr};
use url::Url;

/// Hard upper bound on the hop budget. The search recurses once per hop, so
/// an unbounded budget would turn the traversal into an effectively
/// unbounded walk of the graph.
pub const MAX_HOP_BUDGET: u32 = 8;

/// Runtime configuration for the scanner.
#[derive(Debug, Clone)]
pub struct Config {
    /// Intermediate trades allowed before a route must close.
    pub hop_budget: u32,
    /// USD value every scan origin starts with.
    pub usd_notional: u32,
    /// Seconds to sleep between scan passes.
    pub scan_interval_secs: u64,
    /// Path of the JSON token metadata file.
    pub tokens_file: String,
    /// HTTP quote endpoint for the rate source.
    pub quote_endpoint: Url,
}

impl Config {
    /// Reads the configuration from the environment.
    ///
    /// # Errors
    /// * If `SWOOP_QUOTE_URL` is missing or unparseable
    /// * If a numeric variable does not parse
    /// * If the hop budget exceeds [`MAX_HOP_BUDGET`]
    pub fn from_env() -> Result<Self> {
        let hop_budget = hop_budget_from(std::env::var("SWOOP_HOP_BUDGET").ok())?;

        let usd_notional = parse_or("SWOOP_USD_NOTIONAL", 100)?;
        let scan_interval_secs = parse_or("SWOOP_SCAN_INTERVAL_SECS", 10)?;
        let tokens_file =
            std::env::var("SWOOP_TOKENS_FILE").unwrap_or_else(|_| "tokens.json".to_string());

        let quote_url = std::env::var("SWOOP_QUOTE_URL")
            .map_err(|_| eyre::eyre!("SWOOP_QUOTE_URL must be set"))?;
        let quote_endpoint = Url::parse(&quote_url).wrap_err("parsing SWOOP_QUOTE_URL")?;

        Ok(Self {
            hop_budget,
            usd_notional,
            scan_interval_secs,
            tokens_file,
            quote_endpoint,
        })
    }
}

/// Parses and bounds the hop budget; `None` means the default of 2.
fn hop_budget_from(raw: Option<String>) -> Result<u32> {
    let hop_budget = match raw {
        Some(value) => value.parse().wrap_err("parsing SWOOP_HOP_BUDGET")?,
        None => 2,
    };
    if hop_budget > MAX_HOP_BUDGET {
        bail!("SWOOP_HOP_BUDGET {hop_budget} exceeds the maximum of {MAX_HOP_BUDGET}");
    }
    Ok(hop_budget)
}

/// Parses an env var into `T`, or returns the default when unset.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value.parse().wrap_err_with(|| format!("parsing {key}")),
        Err(_) => Ok(default),
    }
}
