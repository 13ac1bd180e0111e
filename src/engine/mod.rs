//! Core engine: scan a market batch and classify each opportunity.

pub mod scanner;
pub mod urgency;
