//! SessionBreak Runner — backtest orchestration around the core engine.
//!
//! This crate builds on `sessionbreak-core` to provide:
//! - CSV bar loading with fail-fast row validation
//! - TOML-backed run configuration with named strategy constants
//! - Performance evaluation (P&L, equity curve, Sharpe)
//! - A single-run backtest entry point and result export artifacts

pub mod config;
pub mod data_loader;
pub mod performance;
pub mod report;
pub mod runner;

pub use config::{BacktestConfig, ConfigError, EvaluatorConfig};
pub use data_loader::{load_bars, read_bars, LoadError};
pub use performance::{
    evaluate, sharpe_ratio, trade_profit, EquityPoint, Evaluation, Performance, SharpeOutcome,
    UndefinedSharpe,
};
pub use report::{save_overlay_csv, save_result_json, summary, write_overlay_csv, ReportError};
pub use runner::{run_backtest, run_backtest_from_csv, BacktestResult, RunError};
