//! Polymarket Gamma API feed.
//!
//! Market discovery is free and unauthenticated:
//! `GET https://gamma-api.polymarket.com/markets`.
//!
//! The response is a JSON array of market objects. `outcomes` and
//! `outcomePrices` arrive as JSON-encoded strings; decoding is left to
//! [`crate::types::RawMarket`].

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::FeedConfig;
use crate::feed::{FeedError, MarketFeed};

pub const GAMMA_API_URL: &str = "https://gamma-api.polymarket.com";

pub struct GammaClient {
    http: Client,
    base_url: String,
    limit: Option<u32>,
    active_only: bool,
}

impl GammaClient {
    pub fn new(cfg: &FeedConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("Failed to build Gamma HTTP client")?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            limit: cfg.limit,
            active_only: cfg.active_only,
        })
    }

    fn markets_url(&self) -> String {
        format!("{}/markets", self.base_url)
    }

    /// Query string for `/markets`. Empty by default, which matches an
    /// unfiltered request.
    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if self.active_only {
            params.push(("active", "true".to_string()));
            params.push(("closed", "false".to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

#[async_trait]
impl MarketFeed for GammaClient {
    async fn fetch_markets(&self) -> Result<Vec<Value>, FeedError> {
        let url = self.markets_url();
        debug!(url = %url, "Fetching Polymarket markets from Gamma API");

        let resp = self.http
            .get(&url)
            .query(&self.query_params())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FeedError::Status { status: status.as_u16(), body });
        }

        let body = resp.text().await?;
        let markets: Vec<Value> = serde_json::from_str(&body)?;

        info!(count = markets.len(), "Fetched raw Gamma markets");
        Ok(markets)
    }

    fn name(&self) -> &'static str {
        "polymarket-gamma"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
