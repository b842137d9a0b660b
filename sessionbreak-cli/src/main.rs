//! SessionBreak CLI — run the breakout backtest over a CSV of intraday bars.
//!
//! Commands:
//! - `run` — execute a backtest and print the summary; optionally write
//!   the result JSON and the level-overlay CSV for external plotting.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sessionbreak_runner::{
    run_backtest_from_csv, save_overlay_csv, save_result_json, summary, BacktestConfig,
};

#[derive(Parser)]
#[command(
    name = "sessionbreak",
    about = "SessionBreak CLI — intraday session-breakout backtester"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest over a CSV of time,open,high,low,close bars.
    Run {
        /// Path to the bar data CSV.
        #[arg(long)]
        data: PathBuf,

        /// Path to a TOML config file. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Initial capital. Overrides the config file value.
        #[arg(long)]
        capital: Option<f64>,

        /// Annualize the Sharpe ratio (multiply by sqrt(252)).
        #[arg(long, default_value_t = false)]
        annualize: bool,

        /// Directory for result artifacts (result.json, overlay.csv).
        /// Nothing is written when omitted.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            config,
            capital,
            annualize,
            output_dir,
        } => run_cmd(data, config, capital, annualize, output_dir),
    }
}

fn run_cmd(
    data: PathBuf,
    config_path: Option<PathBuf>,
    capital: Option<f64>,
    annualize: bool,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => BacktestConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => BacktestConfig::default(),
    };
    if let Some(capital) = capital {
        config.initial_capital = capital;
    }
    if annualize {
        config.evaluator.annualize = true;
    }

    let result = run_backtest_from_csv(&data, &config)
        .with_context(|| format!("backtest over {}", data.display()))?;

    print!("{}", summary(&result));

    if let Some(dir) = output_dir {
        let json_path = dir.join("result.json");
        save_result_json(&result, &json_path)
            .with_context(|| format!("writing {}", json_path.display()))?;
        let overlay_path = dir.join("overlay.csv");
        save_overlay_csv(&result, &overlay_path)
            .with_context(|| format!("writing {}", overlay_path.display()))?;
        println!(
            "Artifacts written to {} (result.json, overlay.csv)",
            dir.display()
        );
    }

    Ok(())
}
