//! Performance evaluation — P&L, equity curve, and Sharpe ratio.
//!
//! Pure functions: trade list and config in, structured result out. Only
//! closed trades contribute; a trade left open at end of stream is
//! excluded rather than force-valued. Degenerate Sharpe inputs (fewer
//! than two returns, zero variance) are reported as an explicit
//! undefined outcome, never as a silent 0.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use sessionbreak_core::{Direction, Trade, TradeState};

use crate::config::EvaluatorConfig;

/// Trading periods per year used when annualizing the Sharpe ratio.
pub const ANNUALIZATION_PERIODS: f64 = 252.0;

/// One closed trade's contribution to the equity curve, ordered by
/// close time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub close_time: NaiveDateTime,
    pub profit: f64,
    pub cumulative_profit: f64,
    pub portfolio_value: f64,
}

/// Why a Sharpe ratio could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedSharpe {
    /// Fewer than two portfolio-value returns.
    TooFewReturns,
    /// Zero sample standard deviation across returns.
    ZeroVariance,
}

/// Sharpe ratio or the reason it is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum SharpeOutcome {
    Ratio(f64),
    Undefined(UndefinedSharpe),
}

impl SharpeOutcome {
    pub fn ratio(&self) -> Option<f64> {
        match self {
            Self::Ratio(value) => Some(*value),
            Self::Undefined(_) => None,
        }
    }
}

/// Result of evaluating a trade list.
///
/// `NoClosedTrades` is a valid outcome, not an error: the strategy simply
/// never completed a round trip on the given data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Performance {
    NoClosedTrades,
    Evaluated(Evaluation),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub equity_curve: Vec<EquityPoint>,
    pub total_profit: f64,
    pub final_portfolio_value: f64,
    pub closed_trade_count: usize,
    pub open_trade_count: usize,
    pub sharpe: SharpeOutcome,
}

/// Profit of a single closed trade under the given config.
///
/// Price move times the unit-conversion factor, minus the fixed
/// per-trade cost. Sign follows the trade direction.
pub fn trade_profit(trade: &Trade, config: &EvaluatorConfig) -> Option<f64> {
    let close_price = trade.close_price?;
    let move_for_side = match trade.direction {
        Direction::Buy => close_price - trade.open_price,
        Direction::Sell => trade.open_price - close_price,
    };
    Some(move_for_side * config.conversion_factor - config.trade_cost)
}

/// Evaluate a trade list into an equity curve and Sharpe ratio.
pub fn evaluate(trades: &[Trade], initial_capital: f64, config: &EvaluatorConfig) -> Performance {
    let mut closed: Vec<&Trade> = trades
        .iter()
        .filter(|t| t.state == TradeState::Closed)
        .collect();
    if closed.is_empty() {
        return Performance::NoClosedTrades;
    }
    let open_trade_count = trades.len() - closed.len();

    closed.sort_by_key(|t| t.close_time);

    let mut cumulative_profit = 0.0;
    let mut equity_curve = Vec::with_capacity(closed.len());
    for &trade in &closed {
        let profit = trade_profit(trade, config)
            .expect("closed trade carries a close price");
        cumulative_profit += profit;
        equity_curve.push(EquityPoint {
            close_time: trade.close_time.expect("closed trade carries a close time"),
            profit,
            cumulative_profit,
            portfolio_value: initial_capital + cumulative_profit,
        });
    }

    let sharpe = sharpe_ratio(&equity_curve, config);
    let final_portfolio_value = equity_curve
        .last()
        .map(|p| p.portfolio_value)
        .unwrap_or(initial_capital);

    Performance::Evaluated(Evaluation {
        total_profit: cumulative_profit,
        final_portfolio_value,
        closed_trade_count: equity_curve.len(),
        open_trade_count,
        sharpe,
        equity_curve,
    })
}

/// Sharpe ratio over the portfolio-value sequence.
///
/// Returns are period-over-period fractional changes (the first point has
/// no prior value and is excluded). Uses the sample (n−1) standard
/// deviation; multiplied by √252 when `config.annualize` is set.
pub fn sharpe_ratio(equity_curve: &[EquityPoint], config: &EvaluatorConfig) -> SharpeOutcome {
    let returns: Vec<f64> = equity_curve
        .windows(2)
        .map(|w| w[1].portfolio_value / w[0].portfolio_value - 1.0)
        .collect();
    if returns.len() < 2 {
        return SharpeOutcome::Undefined(UndefinedSharpe::TooFewReturns);
    }

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance = returns
        .iter()
        .map(|r| (r - mean).powi(2))
        .sum::<f64>()
        / (returns.len() - 1) as f64;
    let std = variance.sqrt();
    if std == 0.0 {
        return SharpeOutcome::Undefined(UndefinedSharpe::ZeroVariance);
    }

    let mut ratio = (mean - config.risk_free_rate) / std;
    if config.annualize {
        ratio *= ANNUALIZATION_PERIODS.sqrt();
    }
    SharpeOutcome::Ratio(ratio)
}
