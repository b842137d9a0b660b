//! Backtest runner — wires normalization, level calculation, simulation,
//! and evaluation into one run.
//!
//! Two entry points:
//! - `run_backtest()`: takes pre-loaded raw bars. Used by tests and
//!   anything that already holds bars in memory.
//! - `run_backtest_from_csv()`: loads bars from a CSV file first. Used
//!   by the CLI.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sessionbreak_core::{annotate_levels, normalize, simulate, LevelBar, NormalizeError, RawBar, Trade};

use crate::config::{BacktestConfig, ConfigError};
use crate::data_loader::{load_bars, LoadError};
use crate::performance::{evaluate, Performance};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] LoadError),
    #[error("normalization error: {0}")]
    Normalize(#[from] NormalizeError),
}

/// Complete result of a single backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub config: BacktestConfig,
    pub bar_count: usize,
    /// Count of calendar dates that produced a reference band.
    pub dates_with_levels: usize,
    pub trades: Vec<Trade>,
    pub performance: Performance,
    /// Level-annotated bars, kept for overlay export. The pipeline's
    /// output boundary: a charting collaborator consumes these, the core
    /// never renders anything.
    pub level_bars: Vec<LevelBar>,
}

/// Run a backtest over pre-loaded raw bars.
pub fn run_backtest(raw: Vec<RawBar>, config: &BacktestConfig) -> Result<BacktestResult, RunError> {
    config.validate()?;

    let bars = normalize(raw, &config.clock)?;
    let level_bars = annotate_levels(&bars);
    let trades = simulate(&level_bars, &config.clock);
    let performance = evaluate(&trades, config.initial_capital, &config.evaluator);

    let dates_with_levels = sessionbreak_core::build_level_table(&bars).len();

    Ok(BacktestResult {
        config: config.clone(),
        bar_count: bars.len(),
        dates_with_levels,
        trades,
        performance,
        level_bars,
    })
}

/// Load bars from a CSV file and run a backtest.
pub fn run_backtest_from_csv(
    data_path: &Path,
    config: &BacktestConfig,
) -> Result<BacktestResult, RunError> {
    let raw = load_bars(data_path)?;
    run_backtest(raw, config)
}
