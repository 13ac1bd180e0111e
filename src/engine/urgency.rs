//! Urgency classifier.
//!
//! Maps the margin fraction `1 - (yes + no)` onto a discrete urgency tier.
//! Bigger gaps take longer for the market to close.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Urgency;

/// Margins at or above this stay open for minutes.
pub const MODERATE_THRESHOLD: Decimal = dec!(0.05);

/// Margins at or above this (and below `MODERATE_THRESHOLD`) last under a minute.
pub const SOON_THRESHOLD: Decimal = dec!(0.02);

/// Classify a margin fraction. Lower bounds are inclusive.
pub fn classify(margin: Decimal) -> Urgency {
    if margin >= MODERATE_THRESHOLD {
        Urgency::Moderate
    } else if margin >= SOON_THRESHOLD {
        Urgency::Soon
    } else {
        Urgency::Immediate
    }
}
