//! Market validator and arbitrage scanner.
//!
//! A binary market settles at exactly 1.0 across its two outcomes, so if
//! `yes + no < 1.0` buying both sides locks in `1 - (yes + no)` per share.
//! The scanner walks the feed batch in order, drops anything that is not a
//! well-formed two-outcome market with numeric prices, and emits one
//! `ArbitrageOpportunity` per remaining market whose prices sum below 1.0.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::engine::urgency;
use crate::feed::MarketFeed;
use crate::types::{utc_timestamp, ArbitrageOpportunity, PriceQuote, RawMarket};

/// Decimal places kept on `total`.
const TOTAL_DP: u32 = 4;

/// Decimal places kept on `arbitrage_margin`.
const MARGIN_DP: u32 = 2;

const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

// ---------------------------------------------------------------------------
// Per-market evaluation
// ---------------------------------------------------------------------------

/// Why a market produced no opportunity. None of these are faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// Not exactly two outcomes and two prices.
    NotBinary,
    /// A price was missing, non-numeric, or non-finite.
    InvalidPrice,
    /// `yes + no >= 1.0`.
    NoArbitrage,
    /// A price, or the sum of both, is too large for `Decimal`.
    Overflow,
}

/// Evaluate a single market.
pub fn evaluate(
    market: &RawMarket,
    captured_at: DateTime<Utc>,
) -> Result<ArbitrageOpportunity, Skip> {
    if !market.is_binary() {
        return Err(Skip::NotBinary);
    }

    // Positional: first price is YES, second is NO.
    let yes = read_price(&market.outcome_prices[0])?;
    let no = read_price(&market.outcome_prices[1])?;

    let total = yes.checked_add(no).ok_or(Skip::Overflow)?;
    if total >= Decimal::ONE {
        return Err(Skip::NoArbitrage);
    }

    let margin = Decimal::ONE.checked_sub(total).ok_or(Skip::Overflow)?;
    let margin_pct = margin.checked_mul(dec!(100)).ok_or(Skip::Overflow)?;
    let urgency = urgency::classify(margin);

    Ok(ArbitrageOpportunity {
        question: market.question_or_placeholder().to_string(),
        condition_id: market.condition_id_or_placeholder().to_string(),
        yes_price: yes,
        no_price: no,
        total: total.round_dp_with_strategy(TOTAL_DP, ROUNDING),
        arbitrage_margin: margin_pct.round_dp_with_strategy(MARGIN_DP, ROUNDING),
        urgency,
        expected_duration: urgency.expected_duration().to_string(),
        timestamp: utc_timestamp(captured_at),
    })
}

fn read_price(value: &Value) -> Result<Decimal, Skip> {
    match PriceQuote::from_value(value) {
        PriceQuote::Parsed(price) => Ok(price),
        PriceQuote::OutOfRange => Err(Skip::Overflow),
        PriceQuote::Invalid => Err(Skip::InvalidPrice),
    }
}

/// Scan a batch of markets, preserving input order.
pub fn detect_arbitrage(
    markets: &[RawMarket],
    captured_at: DateTime<Utc>,
) -> Vec<ArbitrageOpportunity> {
    let mut opportunities = Vec::new();
    let (mut not_binary, mut invalid_price, mut no_arb, mut overflow) = (0usize, 0usize, 0usize, 0usize);

    for market in markets {
        match evaluate(market, captured_at) {
            Ok(opp) => {
                debug!(opportunity = %opp, "Arbitrage detected");
                opportunities.push(opp);
            }
            Err(Skip::NotBinary) => not_binary += 1,
            Err(Skip::InvalidPrice) => {
                debug!(question = market.question_or_placeholder(), "Skipping market with unparseable price");
                invalid_price += 1;
            }
            Err(Skip::NoArbitrage) => no_arb += 1,
            Err(Skip::Overflow) => overflow += 1,
        }
    }

    debug!(
        scanned = markets.len(),
        found = opportunities.len(),
        not_binary,
        invalid_price,
        no_arb,
        overflow,
        "Scan pass complete"
    );

    opportunities
}

/// Decode feed records one by one. Non-object entries are dropped.
pub fn decode_markets(records: Vec<Value>) -> Vec<RawMarket> {
    records
        .into_iter()
        .filter_map(|record| match record {
            Value::Object(_) => match serde_json::from_value::<RawMarket>(record) {
                Ok(market) => Some(market),
                Err(e) => {
                    debug!(error = %e, "Dropping undecodable market record");
                    None
                }
            },
            other => {
                debug!(kind = json_kind(&other), "Dropping non-object market record");
                None
            }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Full scan against a feed
// ---------------------------------------------------------------------------

/// Whether the feed delivered a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    Ok,
    /// The fetch failed; the scan ran over an empty batch.
    Unavailable(String),
}

/// Outcome of one fetch-and-scan cycle.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub opportunities: Vec<ArbitrageOpportunity>,
    pub markets_seen: usize,
    pub checked_at: DateTime<Utc>,
    pub feed: FeedStatus,
}

impl ScanReport {
    pub fn checked_at_string(&self) -> String {
        utc_timestamp(self.checked_at)
    }
}

/// Fetch from `feed` and scan. Feed failures become an empty batch.
pub async fn run_scan(feed: &dyn MarketFeed, now: DateTime<Utc>) -> ScanReport {
    let (records, status) = match feed.fetch_markets().await {
        Ok(records) => (records, FeedStatus::Ok),
        Err(e) => {
            warn!(feed = feed.name(), error = %e, "Market feed unavailable, scanning empty batch");
            (Vec::new(), FeedStatus::Unavailable(e.to_string()))
        }
    };

    let markets = decode_markets(records);
    let opportunities = detect_arbitrage(&markets, now);

    info!(
        feed = feed.name(),
        markets = markets.len(),
        opportunities = opportunities.len(),
        "Scan complete"
    );

    ScanReport {
        opportunities,
        markets_seen: markets.len(),
        checked_at: now,
        feed: status,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
