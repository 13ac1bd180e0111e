//! Mock feed for integration testing.
//!
//! Provides a deterministic `MarketFeed` implementation that returns a
//! controllable batch of raw records, and can be switched into a failing
//! mode, all in-memory with no external dependencies.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use polyarb::feed::{FeedError, MarketFeed};

pub struct MockFeed {
    records: Arc<Mutex<Vec<Value>>>,
    /// If set, every fetch returns a status error with this code.
    force_status: Arc<Mutex<Option<u16>>>,
    fetches: AtomicUsize,
}

impl MockFeed {
    pub fn new() -> Self {
        Self::with_records(Self::default_records())
    }

    pub fn with_records(records: Vec<Value>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            force_status: Arc::new(Mutex::new(None)),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn set_records(&self, records: Vec<Value>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn fail_with(&self, status: u16) {
        *self.force_status.lock().unwrap() = Some(status);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// A Gamma-shaped batch mixing every kind of record the scanner sees:
    /// three opportunities (one per urgency tier), fairly priced markets,
    /// a multi-outcome market, bad prices, and junk entries.
    pub fn default_records() -> Vec<Value> {
        vec![
            json!({
                "id": "1", "question": "Will it snow in Sydney in July?", "conditionId": "0xmod",
                "outcomes": "[\"Yes\", \"No\"]", "outcomePrices": "[\"0.40\", \"0.55\"]",
                "active": true, "closed": false, "volume": "10234.5"
            }),
            json!({
                "id": "2", "question": "Fed cut in March?", "conditionId": "0xfair",
                "outcomes": "[\"Yes\", \"No\"]", "outcomePrices": "[\"0.62\", \"0.38\"]"
            }),
            json!({
                "id": "3", "question": "Team A wins the final?", "conditionId": "0xsoon",
                "outcomes": ["Yes", "No"], "outcomePrices": ["0.47", "0.50"]
            }),
            json!({
                "id": "4", "question": "Who wins the election?", "conditionId": "0xmulti",
                "outcomes": ["A", "B", "C"], "outcomePrices": ["0.1", "0.1", "0.1"]
            }),
            json!({
                "id": "5", "question": "Broken price", "conditionId": "0xbad",
                "outcomes": ["Yes", "No"], "outcomePrices": ["", "0.2"]
            }),
            json!("not a market"),
            json!({
                "id": "6", "question": "BTC above 100k?", "conditionId": "0xnow",
                "outcomes": ["Yes", "No"], "outcomePrices": [0.495, 0.495]
            }),
            json!({
                "id": "7", "question": "Overround", "conditionId": "0xover",
                "outcomes": ["Yes", "No"], "outcomePrices": ["0.51", "0.50"]
            }),
        ]
    }
}

#[async_trait]
impl MarketFeed for MockFeed {
    async fn fetch_markets(&self) -> Result<Vec<Value>, FeedError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = *self.force_status.lock().unwrap() {
            return Err(FeedError::Status { status, body: "forced".into() });
        }
        Ok(self.records.lock().unwrap().clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
