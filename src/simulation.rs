/// Per-trial financial model
/// Turns one draw of the stochastic drivers into the trial's inflow metrics

use crate::error::SimulationError;
use crate::models::{SimulationInput, TrialResult};

/// Inflow components shared by every trial of a run
/// Everything except the sampled drivers depends only on the input, so it is computed once
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrialModel {
    pub gmv: f64,
    pub transactions: f64,
    pub fees_1p2p: f64,
    pub fees_3p: f64,
}

impl TrialModel {
    pub fn new(input: &SimulationInput) -> Result<Self, SimulationError> {
        if input.average_transaction_value == 0.0 {
            return Err(SimulationError::ZeroAverageTransactionValue);
        }

        let gmv = input.gmv;
        Ok(TrialModel {
            gmv,
            transactions: gmv / input.average_transaction_value,
            fees_1p2p: gmv * input.gmv_pct_1p2p * input.transaction_rate_1p2p,
            fees_3p: gmv * input.gmv_pct_3p() * input.transaction_rate_3p,
        })
    }

    /// Evaluate one trial from its sampled coupon cost and ad revenue share
    pub fn evaluate(&self, trial: usize, coupon_per_transaction: f64, ads_pct_gmv: f64) -> TrialResult {
        let ads_revenue = self.gmv * ads_pct_gmv;
        let total_inflow = self.fees_1p2p + self.fees_3p + ads_revenue;
        let total_coupons = coupon_per_transaction * self.transactions;

        TrialResult {
            trial,
            transactions: self.transactions,
            coupon_per_transaction,
            ads_pct_gmv,
            net_inflow: total_inflow - total_coupons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> SimulationInput {
        SimulationInput::default()
    }

    #[test]
    fn test_fee_components() {
        let model = TrialModel::new(&scenario()).unwrap();
        assert!((model.transactions - 12_048.192_771).abs() < 1e-3);
        assert!((model.fees_1p2p - 84_000.0).abs() < 1e-6);
        assert!((model.fees_3p - 200_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_net_inflow_matches_hand_computation() {
        let model = TrialModel::new(&scenario()).unwrap();
        let result = model.evaluate(0, 20.0, 0.1);
        // 84_000 + 200_000 + 100_000 - 20 * 12_048.19...
        let expected = 384_000.0 - 20.0 * (1_000_000.0 / 83.0);
        assert!((result.net_inflow - expected).abs() < 1e-6);
        assert_eq!(result.coupon_per_transaction, 20.0);
        assert_eq!(result.ads_pct_gmv, 0.1);
    }

    #[test]
    fn test_zero_atv_is_rejected() {
        let input = SimulationInput {
            average_transaction_value: 0.0,
            ..scenario()
        };
        assert!(matches!(
            TrialModel::new(&input),
            Err(SimulationError::ZeroAverageTransactionValue)
        ));
    }

    #[test]
    fn test_zero_gmv_never_yields_positive_inflow() {
        let input = SimulationInput { gmv: 0.0, ..scenario() };
        let model = TrialModel::new(&input).unwrap();
        for coupon in [-50.0, 0.0, 68.32, 120.0] {
            assert!(model.evaluate(0, coupon, 0.3).net_inflow <= 0.0);
        }
    }
}
