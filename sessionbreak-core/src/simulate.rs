//! Trade simulation — the single-position breakout state machine.
//!
//! One forward scan over the level-annotated stream, carrying an optional
//! index into the emitted trade list. A trade is appended in `Open` state
//! the bar it triggers and later closed by mutating that same record, so
//! output order equals open order equals close order.
//!
//! Exit checks run in a fixed order on every bar while a trade is active:
//! the hour-based forced exit first, then the stop check for the trade's
//! own side. A bar whose date has no levels cannot open a trade and
//! cannot fire a stop; only the forced exit remains available on it.

use crate::clock::SessionClock;
use crate::domain::{Direction, ExitReason, LevelBar, Trade};

/// Run the state machine over `bars` (must already be in chronological
/// order). The returned list may end with one trade still open if the
/// stream ran out before an exit condition fired; callers decide how to
/// treat it (the evaluator excludes it from metrics).
pub fn simulate(bars: &[LevelBar], clock: &SessionClock) -> Vec<Trade> {
    let mut trades: Vec<Trade> = Vec::new();
    let mut active: Option<usize> = None;

    for lb in bars {
        let bar = &lb.bar;
        match active {
            None => {
                if !clock.in_entry_window(bar.hour) {
                    continue;
                }
                let Some(levels) = lb.levels else { continue };
                // Buy check first: part of the contract, even though the
                // two breakouts are mutually exclusive when high >= low.
                let direction = if bar.open > levels.session_high {
                    Some(Direction::Buy)
                } else if bar.open < levels.session_low {
                    Some(Direction::Sell)
                } else {
                    None
                };
                if let Some(direction) = direction {
                    trades.push(Trade::open(direction, bar.timestamp, bar.open));
                    active = Some(trades.len() - 1);
                }
            }
            Some(index) => {
                let trade = &mut trades[index];
                if clock.is_forced_exit(bar.hour) {
                    // Forced exit fills at the bar's open, not its close.
                    trade.close(bar.timestamp, bar.open, ExitReason::ForcedHour);
                    active = None;
                } else if let Some(levels) = lb.levels {
                    let stopped = match trade.direction {
                        Direction::Buy => bar.low <= levels.stop_loss,
                        Direction::Sell => bar.high >= levels.stop_loss,
                    };
                    if stopped {
                        trade.close(bar.timestamp, levels.stop_loss, ExitReason::StopLoss);
                        active = None;
                    }
                }
            }
        }
    }

    trades
}
