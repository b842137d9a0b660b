//! DailyLevels — per-date reference band and its midpoint stop level.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::bar::SessionBar;

/// Reference levels derived from one calendar date's early-session bars.
///
/// `stop_loss` is the midpoint of the high/low band, not a distance-based
/// stop. Computed as `(session_high + session_low) / 2` so the midpoint
/// identity holds exactly in floating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyLevels {
    pub date: NaiveDate,
    pub session_high: f64,
    pub session_low: f64,
    pub stop_loss: f64,
}

impl DailyLevels {
    pub fn from_band(date: NaiveDate, session_high: f64, session_low: f64) -> Self {
        Self {
            date,
            session_high,
            session_low,
            stop_loss: (session_high + session_low) / 2.0,
        }
    }
}

/// A session bar joined with its date's levels.
///
/// `levels` is `None` when the bar's date had no reference-window bars;
/// the simulator treats such bars as ineligible for entry and for
/// level-based exits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelBar {
    pub bar: SessionBar,
    pub levels: Option<DailyLevels>,
}
