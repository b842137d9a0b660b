//! SessionBreak Core — domain types, bar normalization, session levels,
//! trade simulation.
//!
//! The engine is a pure pipeline over an in-memory bar sequence:
//! normalize (order + annotate) → annotate_levels (per-date band join) →
//! simulate (single-position breakout state machine). No I/O, no shared
//! state across runs; each stage produces a new derived sequence.

pub mod clock;
pub mod domain;
pub mod levels;
pub mod normalize;
pub mod simulate;

pub use clock::{ClockError, SessionClock};
pub use domain::{DailyLevels, Direction, ExitReason, LevelBar, RawBar, SessionBar, Trade, TradeState};
pub use levels::{annotate_levels, build_level_table};
pub use normalize::{normalize, NormalizeError};
pub use simulate::simulate;
