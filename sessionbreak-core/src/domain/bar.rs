//! Bar — the fundamental market data unit.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Raw intraday OHLC bar as supplied by a data loader.
///
/// The loader promises consistent price units but nothing about row
/// ordering or deduplication; the normalizer owns sort stability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl RawBar {
    /// Returns true if any OHLC field is NaN or infinite.
    pub fn has_non_finite(&self) -> bool {
        !(self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite())
    }
}

/// A raw bar annotated with its calendar frame.
///
/// `date` is the timestamp truncated to its own day (no timezone
/// conversion), `hour` is in [0, 23], and `in_reference_session` marks
/// membership in the early-session reference window. Annotation is
/// additive; the OHLC fields are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionBar {
    pub timestamp: NaiveDateTime,
    pub date: NaiveDate,
    pub hour: u32,
    pub in_reference_session: bool,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}
