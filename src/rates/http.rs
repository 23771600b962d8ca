//! HTTP rate source.
//!
//! Queries a quote endpoint that answers
//! `GET <endpoint>?src=<address>&dst=<address>` with
//! `{"rate": "<decimal integer scaled by 10^18>"}`. A missing quote is
//! reported as `{"rate": "0"}` by convention.

use std::time::Duration;

use alloy_primitives::U256;
use async_trait::async_trait;
use eyre::Result;
use reqwest::Client;
use url::Url;

use crate::arb::token::TokenId;

use super::RateSource;

/// A [`RateSource`] backed by an HTTP quote endpoint.
#[derive(Debug)]
pub struct HttpRateSource {
    /// The quote endpoint.
    endpoint: Url,
    /// The HTTP client.
    client: Client,
}

impl HttpRateSource {
    /// Creates a source for the given endpoint.
    ///
    /// # Errors
    /// * If the HTTP client cannot be built
    pub fn new(endpoint: Url) -> Result<Self> {
        // The core never waits on us, but a hung fetch would stall every
        // queued request behind it.
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch_rate(&self, src: TokenId, dst: TokenId) -> Result<U256> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("src", src.address().to_string()),
                ("dst", dst.address().to_string()),
            ])
            .send()
            .await?
            .json::<serde_json::Value>()
            .await?;

        let rate = response["rate"]
            .as_str()
            .ok_or_else(|| eyre::eyre!("quote response missing rate field: {response}"))?;

        Ok(U256::from_str_radix(rate, 10)?)
    }
}
