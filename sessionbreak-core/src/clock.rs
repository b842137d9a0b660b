//! SessionClock — the hour-of-day windows that drive the strategy.
//!
//! All bounds are wall-clock hours in the bar timestamps' own frame.
//! Half-open windows: a `reference` of (0, 8) covers hours 0..=7.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hour-of-day windows for the reference band, entry eligibility, and the
/// unconditional end-of-day exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClock {
    /// Half-open [start, end) window whose bars define the day's band.
    pub reference_start: u32,
    pub reference_end: u32,
    /// Half-open [start, end) window during which new trades may open.
    pub entry_start: u32,
    pub entry_end: u32,
    /// Any open trade is closed on the first bar with hour >= this.
    pub forced_exit_hour: u32,
}

impl Default for SessionClock {
    fn default() -> Self {
        Self {
            reference_start: 0,
            reference_end: 8,
            entry_start: 8,
            entry_end: 12,
            forced_exit_hour: 17,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockError {
    #[error("empty {name} window: [{start}, {end})")]
    EmptyWindow {
        name: &'static str,
        start: u32,
        end: u32,
    },
    #[error("hour bound {hour} out of range (windows end at 24, exit hour below 24)")]
    HourOutOfRange { hour: u32 },
}

impl SessionClock {
    pub fn in_reference_window(&self, hour: u32) -> bool {
        self.reference_start <= hour && hour < self.reference_end
    }

    pub fn in_entry_window(&self, hour: u32) -> bool {
        self.entry_start <= hour && hour < self.entry_end
    }

    pub fn is_forced_exit(&self, hour: u32) -> bool {
        hour >= self.forced_exit_hour
    }

    /// Check window sanity. Windows may overlap (the contract constrains
    /// each window independently, not their relationship).
    pub fn validate(&self) -> Result<(), ClockError> {
        for (name, start, end) in [
            ("reference", self.reference_start, self.reference_end),
            ("entry", self.entry_start, self.entry_end),
        ] {
            if start >= end {
                return Err(ClockError::EmptyWindow { name, start, end });
            }
            if end > 24 {
                return Err(ClockError::HourOutOfRange { hour: end });
            }
        }
        if self.forced_exit_hour >= 24 {
            return Err(ClockError::HourOutOfRange {
                hour: self.forced_exit_hour,
            });
        }
        Ok(())
    }
}
