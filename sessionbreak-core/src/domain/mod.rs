//! Domain types for the session-breakout engine.

pub mod bar;
pub mod levels;
pub mod trade;

pub use bar::{RawBar, SessionBar};
pub use levels::{DailyLevels, LevelBar};
pub use trade::{Direction, ExitReason, Trade, TradeState};
