/// Monte Carlo simulation and statistical analysis module

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};
use crate::config::EngineConfig;
use crate::distributions::MarketDistributions;
use crate::error::SimulationError;
use crate::models::{InflowStats, SimulationInput, SimulationOutput, TrialResult};
use crate::simulation::TrialModel;

/// Run the default 10 000-trial simulation seeded from system entropy
pub fn run(input: &SimulationInput) -> Result<SimulationOutput, SimulationError> {
    run_with_config(input, &EngineConfig::default())
}

/// Run the simulation for one scenario
/// Keeps only the trials with positive net inflow, in trial order
pub fn run_with_config(
    input: &SimulationInput,
    config: &EngineConfig,
) -> Result<SimulationOutput, SimulationError> {
    let model = TrialModel::new(input)?;
    let distributions = MarketDistributions::fitted()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    debug!(seed, n_simulations = config.n_simulations, parallel = config.parallel, "starting run");

    let trial = |index: usize| {
        let mut rng = trial_rng(seed, index);
        let (coupon, ads) = distributions.sample(&mut rng);
        model.evaluate(index, coupon, ads)
    };

    let rows: Vec<TrialResult> = if config.parallel {
        (0..config.n_simulations)
            .into_par_iter()
            .map(trial)
            .filter(|row| row.net_inflow > 0.0)
            .collect()
    } else {
        (0..config.n_simulations)
            .map(trial)
            .filter(|row| row.net_inflow > 0.0)
            .collect()
    };

    info!(
        surviving = rows.len(),
        n_simulations = config.n_simulations,
        "simulation finished"
    );

    Ok(SimulationOutput {
        rows,
        n_simulations: config.n_simulations,
        seed,
    })
}

/// Independent generator for one trial: the run seed on the trial's own stream
fn trial_rng(seed: u64, index: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index as u64);
    rng
}

/// Summarize the net inflow of the surviving trials
/// Returns None when no trial survived
pub fn summarize(output: &SimulationOutput) -> Option<InflowStats> {
    if output.is_empty() {
        return None;
    }

    let mut inflows: Vec<f64> = output.rows.iter().map(|r| r.net_inflow).collect();
    inflows.sort_by(f64::total_cmp);

    let count = inflows.len();
    let mean = inflows.iter().sum::<f64>() / count as f64;
    let variance = inflows
        .iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / count as f64;

    let percentile = |p: f64| {
        let index = ((p / 100.0) * (count as f64 - 1.0)).round() as usize;
        inflows[index.min(count - 1)]
    };

    Some(InflowStats {
        count,
        survival_ratio: count as f64 / output.n_simulations as f64,
        mean_net_inflow: mean,
        std_dev_net_inflow: variance.sqrt(),
        min_net_inflow: inflows[0],
        max_net_inflow: inflows[count - 1],
        percentile_10: percentile(10.0),
        percentile_25: percentile(25.0),
        percentile_50: percentile(50.0),
        percentile_75: percentile(75.0),
        percentile_90: percentile(90.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(n_simulations: usize, seed: u64) -> EngineConfig {
        EngineConfig { n_simulations, seed: Some(seed), parallel: false }
    }

    fn row(trial: usize, net_inflow: f64) -> TrialResult {
        TrialResult {
            trial,
            transactions: 1.0,
            coupon_per_transaction: 1.0,
            ads_pct_gmv: 0.01,
            net_inflow,
        }
    }

    #[test]
    fn test_default_scenario_has_profitable_trials() {
        let output = run_with_config(&SimulationInput::default(), &seeded(10_000, 2024)).unwrap();
        assert!(!output.is_empty());
        assert!(output.len() <= 10_000);
        for r in &output.rows {
            assert!(r.net_inflow > 0.0);
            assert!((r.transactions - 12_048.19).abs() < 0.01);
        }
    }

    #[test]
    fn test_rows_stay_in_trial_order() {
        let input = SimulationInput { average_transaction_value: 400.0, ..SimulationInput::default() };
        let output = run_with_config(&input, &seeded(2_000, 5)).unwrap();
        assert!(output.rows.windows(2).all(|w| w[0].trial < w[1].trial));
    }

    #[test]
    fn test_seed_is_reported_and_replayable() {
        let input = SimulationInput::default();
        let first = run_with_config(&input, &EngineConfig { n_simulations: 3_000, ..EngineConfig::default() }).unwrap();
        let replay = run_with_config(&input, &seeded(3_000, first.seed)).unwrap();
        assert_eq!(first, replay);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let input = SimulationInput { average_transaction_value: 250.0, ..SimulationInput::default() };
        let sequential = run_with_config(&input, &seeded(4_000, 77)).unwrap();
        let parallel = run_with_config(&input, &EngineConfig { parallel: true, ..seeded(4_000, 77) }).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_zero_atv_fails() {
        let input = SimulationInput { average_transaction_value: 0.0, ..SimulationInput::default() };
        assert!(matches!(run(&input), Err(SimulationError::ZeroAverageTransactionValue)));
    }

    #[test]
    fn test_zero_gmv_yields_empty_table() {
        let input = SimulationInput { gmv: 0.0, ..SimulationInput::default() };
        let output = run_with_config(&input, &seeded(1_000, 3)).unwrap();
        assert!(output.is_empty());
        assert_eq!(output.n_simulations, 1_000);
        assert!(summarize(&output).is_none());
    }

    #[test]
    fn test_summarize_statistics() {
        let output = SimulationOutput {
            rows: vec![row(0, 4.0), row(2, 1.0), row(5, 3.0), row(7, 2.0)],
            n_simulations: 8,
            seed: 0,
        };
        let stats = summarize(&output).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.survival_ratio, 0.5);
        assert_eq!(stats.mean_net_inflow, 2.5);
        assert!((stats.std_dev_net_inflow - 1.25f64.sqrt()).abs() < 1e-12);
        assert_eq!(stats.min_net_inflow, 1.0);
        assert_eq!(stats.max_net_inflow, 4.0);
        assert_eq!(stats.percentile_50, 3.0);
    }

    #[test]
    fn test_summarize_percentiles_are_ordered() {
        let input = SimulationInput { average_transaction_value: 300.0, ..SimulationInput::default() };
        let output = run_with_config(&input, &seeded(5_000, 13)).unwrap();
        let s = summarize(&output).unwrap();
        let ordered = [
            s.min_net_inflow,
            s.percentile_10,
            s.percentile_25,
            s.percentile_50,
            s.percentile_75,
            s.percentile_90,
            s.max_net_inflow,
        ];
        assert!(ordered.windows(2).all(|w| w[0] <= w[1]));
    }
}
