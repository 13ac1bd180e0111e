//! Shared types for the POLYARB detector.
//!
//! The feed side (`RawMarket`, `PriceQuote`) is deliberately lenient: the
//! Gamma API is heterogeneous and a single odd record must never poison a
//! whole scan. The output side (`ArbitrageOpportunity`, `NoOpportunities`)
//! mirrors the JSON shapes served by the dashboard field for field.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Substituted for a missing `question` or `conditionId`.
pub const PLACEHOLDER: &str = "N/A";

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Format a UTC instant as ISO-8601 with microseconds and a trailing `Z`.
pub fn utc_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

// ---------------------------------------------------------------------------
// Raw feed record
// ---------------------------------------------------------------------------

/// One market record as delivered by the feed.
///
/// Only the four fields the scanner needs are kept; everything else in the
/// Gamma payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMarket {
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub question: Option<String>,
    #[serde(default, rename = "conditionId", deserialize_with = "de_lenient_string")]
    pub condition_id: Option<String>,
    /// Outcome labels, e.g. `["Yes", "No"]`.
    #[serde(default, deserialize_with = "de_json_list")]
    pub outcomes: Vec<Value>,
    /// Prices aligned with `outcomes`, usually strings like `"0.42"`.
    #[serde(default, rename = "outcomePrices", deserialize_with = "de_json_list")]
    pub outcome_prices: Vec<Value>,
}

impl RawMarket {
    pub fn question_or_placeholder(&self) -> &str {
        self.question.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn condition_id_or_placeholder(&self) -> &str {
        self.condition_id.as_deref().unwrap_or(PLACEHOLDER)
    }

    /// Exactly two outcomes and exactly two prices.
    pub fn is_binary(&self) -> bool {
        self.outcomes.len() == 2 && self.outcome_prices.len() == 2
    }
}

/// Accept a string; treat any other JSON value as absent.
fn de_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Accept a JSON array, or a string holding a JSON-encoded array
/// (Gamma returns `"[\"Yes\", \"No\"]"`). Anything else becomes empty.
fn de_json_list<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items),
        Value::String(s) => Ok(serde_json::from_str::<Vec<Value>>(&s).unwrap_or_default()),
        _ => Ok(Vec::new()),
    }
}

// ---------------------------------------------------------------------------
// Price parsing
// ---------------------------------------------------------------------------

/// Below this magnitude a float price is stored as zero.
const UNDERFLOW: f64 = 1e-28;

/// Result of reading one outcome price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceQuote {
    Parsed(Decimal),
    /// Finite, but too large for `Decimal`.
    OutOfRange,
    Invalid,
}

impl PriceQuote {
    /// Read a price from a feed value. Strings and JSON numbers are
    /// accepted; everything else is `Invalid`.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::from_text(s),
            Value::Number(n) => Self::from_text(&n.to_string()),
            _ => Self::Invalid,
        }
    }

    /// Plain decimal or scientific notation. Values `Decimal` cannot hold
    /// exactly go through `f64`: tiny ones become zero, huge ones are
    /// `OutOfRange`. `nan`/`inf` are rejected.
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        if let Ok(d) = Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)) {
            return Self::Parsed(d);
        }
        match text.parse::<f64>() {
            Ok(f) if !f.is_finite() => Self::Invalid,
            Ok(f) if f.abs() < UNDERFLOW => Self::Parsed(Decimal::ZERO),
            Ok(f) => Decimal::from_f64(f).map(Self::Parsed).unwrap_or(Self::OutOfRange),
            Err(_) => Self::Invalid,
        }
    }

    pub fn value(self) -> Option<Decimal> {
        match self {
            Self::Parsed(d) => Some(d),
            Self::OutOfRange | Self::Invalid => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Urgency
// ---------------------------------------------------------------------------

/// How quickly a mispricing is expected to be arbitraged away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Urgency {
    #[serde(rename = "Moderate urgency")]
    Moderate,
    #[serde(rename = "Act soon")]
    Soon,
    #[serde(rename = "Act immediately")]
    Immediate,
}

impl Urgency {
    pub fn label(self) -> &'static str {
        match self {
            Self::Moderate => "Moderate urgency",
            Self::Soon => "Act soon",
            Self::Immediate => "Act immediately",
        }
    }

    pub fn expected_duration(self) -> &'static str {
        match self {
            Self::Moderate => "Likely to last a few minutes",
            Self::Soon => "Could disappear in under a minute",
            Self::Immediate => "Might be gone in seconds",
        }
    }

    /// Glyph shown next to the label in the HTML view.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Moderate => "⏳",
            Self::Soon => "⚠️",
            Self::Immediate => "🔥",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Output records
// ---------------------------------------------------------------------------

/// A binary market whose two prices sum to less than 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    pub question: String,
    #[serde(rename = "conditionId")]
    pub condition_id: String,
    pub yes_price: Decimal,
    pub no_price: Decimal,
    /// `yes_price + no_price`, 4 dp.
    pub total: Decimal,
    /// `(1 - total) * 100`, 2 dp.
    pub arbitrage_margin: Decimal,
    pub urgency: Urgency,
    pub expected_duration: String,
    pub timestamp: String,
}

impl fmt::Display for ArbitrageOpportunity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (YES: {} | NO: {} | total: {} | margin: {}% | {})",
            self.question,
            self.yes_price.normalize(),
            self.no_price.normalize(),
            self.total.normalize(),
            self.arbitrage_margin.normalize(),
            self.urgency,
        )
    }
}

/// Served instead of an empty list when a scan finds nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoOpportunities {
    pub message: String,
    pub checked_at: String,
    pub hint: String,
}

impl NoOpportunities {
    pub fn new(checked_at: impl Into<String>) -> Self {
        Self {
            message: "❌ No arbitrage opportunities right now.".to_string(),
            checked_at: checked_at.into(),
            hint: "Try refreshing later.".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
