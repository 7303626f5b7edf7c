/// Reporting and output formatting module
/// Handles console output and the scatter dataset handed to external plotters

use serde::Serialize;
use crate::models::{InflowStats, SimulationOutput, TrialResult};

/// One point of the ads-share vs coupon-cost scatter
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Ad revenue share of GMV
    pub x: f64,
    /// Coupon cost per transaction
    pub y: f64,
    /// Net inflow drives both marker color and size
    pub color: f64,
    pub size: f64,
    pub hover: String,
}

/// Hover label for a surviving trial
pub fn hover_label(row: &TrialResult) -> String {
    format!(
        "ADS_PCT_GMV: {:.2}%<br>COUPON_PER_TRANSACTION: {:.2}<br>Net_Inflow: {:.2}",
        row.ads_pct_gmv * 100.0,
        row.coupon_per_transaction,
        row.net_inflow
    )
}

pub fn scatter_points(output: &SimulationOutput) -> Vec<ScatterPoint> {
    output
        .rows
        .iter()
        .map(|row| ScatterPoint {
            x: row.ads_pct_gmv,
            y: row.coupon_per_transaction,
            color: row.net_inflow,
            size: row.net_inflow,
            hover: hover_label(row),
        })
        .collect()
}

pub fn selected_rate_label(transaction_rate_3p: f64) -> String {
    format!("Selected TR_3P value: {:.2}", transaction_rate_3p)
}

/// Display the run header
pub fn display_run_start(transaction_rate_3p: f64, n_simulations: usize, seed: u64) {
    println!("\n=== Net inflow simulation: {} trials (seed {}) ===", n_simulations, seed);
    println!("{}", selected_rate_label(transaction_rate_3p));
}

/// Display the net inflow distribution of the surviving trials
pub fn display_stats(stats: &InflowStats) {
    println!(
        "\nProfitable trials: {} ({:.2}% of all trials)",
        stats.count,
        stats.survival_ratio * 100.0
    );
    println!(
        "Net Inflow: ${:.2} ± ${:.2} (std dev)",
        stats.mean_net_inflow, stats.std_dev_net_inflow
    );
    println!("\nNet Inflow Distribution:");
    println!("  Minimum:          ${:.2}", stats.min_net_inflow);
    println!("  10th Percentile:  ${:.2}", stats.percentile_10);
    println!("  25th Percentile:  ${:.2}", stats.percentile_25);
    println!("  Median (50th):    ${:.2}", stats.percentile_50);
    println!("  75th Percentile:  ${:.2}", stats.percentile_75);
    println!("  90th Percentile:  ${:.2}", stats.percentile_90);
    println!("  Maximum:          ${:.2}", stats.max_net_inflow);
}

pub fn display_no_profitable_trials(n_simulations: usize) {
    println!("\nNo trial out of {} yielded positive net inflow.", n_simulations);
}

/// Display the `limit` trials with the highest net inflow
pub fn display_top_trials(output: &SimulationOutput, limit: usize) {
    let mut rows: Vec<&TrialResult> = output.rows.iter().collect();
    rows.sort_by(|a, b| b.net_inflow.total_cmp(&a.net_inflow));

    println!("\nTop {} trials by net inflow:", limit.min(rows.len()));
    for row in rows.iter().take(limit) {
        println!(
            "  #{:<6} ADS_PCT_GMV: {:>6.2}% | COUPON_PER_TRANSACTION: {:>7.2} | Net_Inflow: {:.2}",
            row.trial,
            row.ads_pct_gmv * 100.0,
            row.coupon_per_transaction,
            row.net_inflow
        );
    }
}
