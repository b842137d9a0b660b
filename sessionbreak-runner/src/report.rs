//! Result export — JSON artifact, overlay CSV, and a console summary.
//!
//! Rendering stays outside this crate: the overlay CSV carries the
//! level-annotated series (band and stop columns next to OHLC) so an
//! external plotting tool can draw the chart the strategy reasons about.

use std::io::Write;
use std::path::Path;

use thiserror::Error;

use sessionbreak_core::LevelBar;

use crate::performance::{Performance, SharpeOutcome, UndefinedSharpe};
use crate::runner::BacktestResult;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write overlay CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Write the full result as pretty-printed JSON.
pub fn save_result_json(result: &BacktestResult, path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Write the level-annotated bar series as CSV for external plotting.
///
/// Columns: time, OHLC, then session_high/session_low/stop_loss (empty
/// on dates without a reference band).
pub fn write_overlay_csv<W: Write>(level_bars: &[LevelBar], writer: W) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "time",
        "open",
        "high",
        "low",
        "close",
        "session_high",
        "session_low",
        "stop_loss",
    ])?;
    for lb in level_bars {
        let bar = &lb.bar;
        let (high, low, stop) = match lb.levels {
            Some(levels) => (
                levels.session_high.to_string(),
                levels.session_low.to_string(),
                levels.stop_loss.to_string(),
            ),
            None => (String::new(), String::new(), String::new()),
        };
        csv_writer.write_record([
            bar.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            high,
            low,
            stop,
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Save the overlay CSV next to the JSON artifact.
pub fn save_overlay_csv(result: &BacktestResult, path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_overlay_csv(&result.level_bars, file)
}

/// Human-readable run summary for the console.
pub fn summary(result: &BacktestResult) -> String {
    match &result.performance {
        Performance::NoClosedTrades => {
            "No trades were executed; cannot compute Sharpe ratio.".to_string()
        }
        Performance::Evaluated(eval) => {
            let mut out = String::new();
            out.push_str(&format!(
                "Bars: {}  |  Dates with levels: {}\n",
                result.bar_count, result.dates_with_levels
            ));
            out.push_str(&format!(
                "Closed trades: {}  (left open at end of data: {})\n",
                eval.closed_trade_count, eval.open_trade_count
            ));
            out.push_str(&format!(
                "Total profit: {:.2}  |  Final portfolio value: {:.2}\n",
                eval.total_profit, eval.final_portfolio_value
            ));
            match eval.sharpe {
                SharpeOutcome::Ratio(value) => {
                    out.push_str(&format!("Sharpe Ratio: {value:.2}\n"));
                }
                SharpeOutcome::Undefined(UndefinedSharpe::TooFewReturns) => {
                    out.push_str("Sharpe Ratio: undefined (fewer than two returns)\n");
                }
                SharpeOutcome::Undefined(UndefinedSharpe::ZeroVariance) => {
                    out.push_str("Sharpe Ratio: undefined (zero return variance)\n");
                }
            }
            out
        }
    }
}
