use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use inflow_sim::logging::init_tracing;
use inflow_sim::reporting::{
    display_no_profitable_trials, display_run_start, display_stats, display_top_trials,
    scatter_points,
};
use inflow_sim::{run_with_config, summarize, EngineConfig, SimulationInput};

/// Number of trials listed in the console report
const TOP_TRIALS: usize = 10;

#[derive(Parser, Debug)]
#[command(
    name = "inflow-sim",
    about = "Monte Carlo estimate of marketplace net inflow (fees + ads - coupons)"
)]
struct Cli {
    #[arg(long = "tr-3p", default_value_t = 0.25, value_parser = parse_tr_3p, help = "3P transaction rate, 0.15 to 0.5")]
    transaction_rate_3p: f64,
    #[arg(long, default_value_t = 1_000_000.0, help = "Gross merchandise value")]
    gmv: f64,
    #[arg(long = "gmv-pct-1p2p", default_value_t = 0.2, value_parser = parse_unit_interval, help = "1P/2P share of GMV, 0 to 1")]
    gmv_pct_1p2p: f64,
    #[arg(long = "tr-1p2p", default_value_t = 0.42, value_parser = parse_unit_interval, help = "1P/2P transaction rate, 0 to 1")]
    transaction_rate_1p2p: f64,
    #[arg(long = "atv", default_value_t = 83.0, help = "Average transaction value")]
    average_transaction_value: f64,

    #[arg(long, help = "TOML file with engine settings")]
    config: Option<PathBuf>,
    #[arg(long, help = "Number of trials (overrides config)")]
    simulations: Option<usize>,
    #[arg(long, help = "Seed for a reproducible run (overrides config)")]
    seed: Option<u64>,
    #[arg(long, help = "Spread trials across all cores")]
    parallel: bool,
    #[arg(long, help = "Write the scatter dataset as JSON to this path")]
    output: Option<PathBuf>,
}

fn parse_bounded(s: &str, min: f64, max: f64) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if !(min..=max).contains(&value) {
        return Err(format!("{value} is outside [{min}, {max}]"));
    }
    Ok(value)
}

fn parse_tr_3p(s: &str) -> Result<f64, String> {
    parse_bounded(s, 0.15, 0.5)
}

fn parse_unit_interval(s: &str) -> Result<f64, String> {
    parse_bounded(s, 0.0, 1.0)
}

impl Cli {
    fn input(&self) -> SimulationInput {
        SimulationInput {
            transaction_rate_3p: self.transaction_rate_3p,
            gmv: self.gmv,
            gmv_pct_1p2p: self.gmv_pct_1p2p,
            transaction_rate_1p2p: self.transaction_rate_1p2p,
            average_transaction_value: self.average_transaction_value,
        }
    }

    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("loading engine config from {}", path.display()))?,
            None => EngineConfig::default(),
        };
        if let Some(n) = self.simulations {
            anyhow::ensure!(n > 0, "--simulations must be at least 1");
            config.n_simulations = n;
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config.parallel |= self.parallel;
        Ok(config)
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let input = cli.input();
    let config = cli.engine_config()?;
    info!(?input, ?config, "running simulation");

    let output = run_with_config(&input, &config).context("simulation failed")?;

    display_run_start(input.transaction_rate_3p, output.n_simulations, output.seed);
    match summarize(&output) {
        Some(stats) => {
            display_stats(&stats);
            display_top_trials(&output, TOP_TRIALS);
        }
        None => display_no_profitable_trials(output.n_simulations),
    }

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&scatter_points(&output))
            .context("serializing scatter dataset")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), points = output.len(), "scatter dataset written");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dashboard() {
        let cli = Cli::parse_from(["inflow-sim"]);
        assert_eq!(cli.input(), SimulationInput::default());
        assert_eq!(cli.engine_config().unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "inflow-sim", "--tr-3p", "0.3", "--gmv", "5000", "--simulations", "50", "--seed", "8", "--parallel",
        ]);
        assert_eq!(cli.input().transaction_rate_3p, 0.3);
        assert_eq!(cli.input().gmv, 5000.0);
        let config = cli.engine_config().unwrap();
        assert_eq!(config.n_simulations, 50);
        assert_eq!(config.seed, Some(8));
        assert!(config.parallel);
    }

    #[test]
    fn test_out_of_range_rates_rejected() {
        assert!(Cli::try_parse_from(["inflow-sim", "--tr-3p", "0.1"]).is_err());
        assert!(Cli::try_parse_from(["inflow-sim", "--gmv-pct-1p2p", "1.5"]).is_err());
        assert!(Cli::try_parse_from(["inflow-sim", "--tr-1p2p", "abc"]).is_err());
    }

    #[test]
    fn test_zero_simulations_rejected() {
        let cli = Cli::parse_from(["inflow-sim", "--simulations", "0"]);
        assert!(cli.engine_config().is_err());
    }
}
