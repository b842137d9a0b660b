//! Serializable backtest configuration.
//!
//! Every strategy constant the engine and evaluator consume lives here
//! with a named default, so alternate instruments or cost assumptions
//! are a config edit rather than a code change. TOML example:
//!
//! ```toml
//! initial_capital = 10000.0
//!
//! [clock]
//! reference_start = 0
//! reference_end = 8
//! entry_start = 8
//! entry_end = 12
//! forced_exit_hour = 17
//!
//! [evaluator]
//! conversion_factor = 769.2307692307693
//! trade_cost = 10.0
//! risk_free_rate = 0.0
//! annualize = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sessionbreak_core::{ClockError, SessionClock};

/// Instrument-specific unit conversion applied to per-trade price moves.
/// The default corresponds to a 100k-unit position quoted against a rate
/// of 130 (the GBPJPY setup the strategy was written for).
pub const DEFAULT_CONVERSION_FACTOR: f64 = 100_000.0 / 130.0;

/// Fixed per-trade cost subtracted from every round trip.
pub const DEFAULT_TRADE_COST: f64 = 10.0;

pub const DEFAULT_INITIAL_CAPITAL: f64 = 10_000.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid session clock: {0}")]
    InvalidClock(#[from] ClockError),
    #[error("initial capital must be positive, got {0}")]
    NonPositiveCapital(f64),
}

/// Evaluator constants: unit conversion, costs, and Sharpe options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub conversion_factor: f64,
    pub trade_cost: f64,
    pub risk_free_rate: f64,
    pub annualize: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            conversion_factor: DEFAULT_CONVERSION_FACTOR,
            trade_cost: DEFAULT_TRADE_COST,
            risk_free_rate: 0.0,
            annualize: false,
        }
    }
}

/// Complete configuration for one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    pub initial_capital: f64,
    pub clock: SessionClock,
    pub evaluator: EvaluatorConfig,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            clock: SessionClock::default(),
            evaluator: EvaluatorConfig::default(),
        }
    }
}

impl BacktestConfig {
    /// Load and validate a TOML config file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clock.validate()?;
        if self.initial_capital <= 0.0 {
            return Err(ConfigError::NonPositiveCapital(self.initial_capital));
        }
        Ok(())
    }
}
