//! Market-data feed integrations.
//!
//! Defines the `MarketFeed` trait the scanner consumes and the error type
//! for its failures. The only production implementation is the Polymarket
//! Gamma API client in [`gamma`].

pub mod gamma;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Why a feed fetch produced no markets.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("feed returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("feed payload is not a JSON array of markets: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A source of raw market records.
///
/// Records are returned undecoded so that one malformed entry cannot fail
/// the whole batch; the scanner decodes them one at a time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketFeed: Send + Sync {
    /// Fetch the current batch of market records.
    async fn fetch_markets(&self) -> Result<Vec<Value>, FeedError>;

    /// Feed name for logging.
    fn name(&self) -> &'static str;
}
