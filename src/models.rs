use serde::{Deserialize, Serialize};

/// Business parameters describing one marketplace scenario
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Fee rate charged on third-party GMV
    pub transaction_rate_3p: f64,
    pub gmv: f64,
    /// Share of GMV transacted as first/second-party (the rest is 3P)
    pub gmv_pct_1p2p: f64,
    pub transaction_rate_1p2p: f64,
    pub average_transaction_value: f64,
}

impl SimulationInput {
    /// Share of GMV transacted by third parties
    pub fn gmv_pct_3p(&self) -> f64 {
        1.0 - self.gmv_pct_1p2p
    }
}

impl Default for SimulationInput {
    fn default() -> Self {
        SimulationInput {
            transaction_rate_3p: 0.25,
            gmv: 1_000_000.0,
            gmv_pct_1p2p: 0.2,
            transaction_rate_1p2p: 0.42,
            average_transaction_value: 83.0,
        }
    }
}

/// Metrics produced by a single trial
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    /// Index of the trial within its run
    pub trial: usize,
    #[serde(rename = "Transactions")]
    pub transactions: f64,
    #[serde(rename = "COUPON_PER_TRANSACTION")]
    pub coupon_per_transaction: f64,
    #[serde(rename = "ADS_PCT_GMV")]
    pub ads_pct_gmv: f64,
    #[serde(rename = "Net_Inflow")]
    pub net_inflow: f64,
}

/// Trials of one run that ended with positive net inflow, in trial order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub rows: Vec<TrialResult>,
    /// Number of trials drawn, including the discarded ones
    pub n_simulations: usize,
    /// Base seed of the run; replaying it reproduces `rows`
    pub seed: u64,
}

impl SimulationOutput {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Distribution of net inflow over the surviving trials
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InflowStats {
    pub count: usize,
    /// Fraction of all trials that survived the positive-inflow filter
    pub survival_ratio: f64,
    pub mean_net_inflow: f64,
    pub std_dev_net_inflow: f64,
    pub min_net_inflow: f64,
    pub max_net_inflow: f64,
    pub percentile_10: f64,
    pub percentile_25: f64,
    pub percentile_50: f64, // Median
    pub percentile_75: f64,
    pub percentile_90: f64,
}
