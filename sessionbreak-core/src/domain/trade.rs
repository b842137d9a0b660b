//! Trade — a single unit position produced by the simulator.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Breakout side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
}

/// Lifecycle state. A trade transitions `Open` → `Closed` exactly once
/// and is never reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeState {
    Open,
    Closed,
}

/// How a closed trade exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    /// Bar's low/high touched the band midpoint.
    StopLoss,
    /// Unconditional close once hour-of-day reached the forced-exit hour.
    ForcedHour,
}

/// One round trip (or a still-open position at end of stream).
///
/// Only the simulator creates these. `close_time`, `close_price`, and
/// `exit_reason` are populated together when the trade closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub state: TradeState,
    pub direction: Direction,
    pub open_time: NaiveDateTime,
    pub open_price: f64,
    pub close_time: Option<NaiveDateTime>,
    pub close_price: Option<f64>,
    pub exit_reason: Option<ExitReason>,
}

impl Trade {
    pub fn open(direction: Direction, open_time: NaiveDateTime, open_price: f64) -> Self {
        Self {
            state: TradeState::Open,
            direction,
            open_time,
            open_price,
            close_time: None,
            close_price: None,
            exit_reason: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == TradeState::Open
    }

    /// Close the trade in place. Panics in debug builds if called twice;
    /// the simulator's single-position bookkeeping makes that unreachable.
    pub fn close(&mut self, close_time: NaiveDateTime, close_price: f64, reason: ExitReason) {
        debug_assert!(self.is_open(), "trade closed twice");
        self.state = TradeState::Closed;
        self.close_time = Some(close_time);
        self.close_price = Some(close_price);
        self.exit_reason = Some(reason);
    }
}
