/// Fitted distributions for the two stochastic drivers of a trial
/// Coupon cost per transaction follows a double-gamma law, ad revenue share of GMV a Weibull(min) law

use rand::Rng;
use rand_distr::{Distribution, Gamma, Weibull};
use crate::error::SimulationError;

pub const COUPON_SHAPE: f64 = 1.8156;
pub const COUPON_LOC: f64 = 68.32;
pub const COUPON_SCALE: f64 = 5.225;

pub const ADS_SHAPE: f64 = 0.808;
pub const ADS_LOC: f64 = 0.0072;
pub const ADS_SCALE: f64 = 0.062;

/// Double-gamma distribution: a gamma magnitude mirrored around `loc` with a fair sign
#[derive(Clone, Copy, Debug)]
pub struct DoubleGamma {
    magnitude: Gamma<f64>,
    loc: f64,
    scale: f64,
}

impl DoubleGamma {
    pub fn new(shape: f64, loc: f64, scale: f64) -> Result<Self, SimulationError> {
        let magnitude = Gamma::new(shape, 1.0).map_err(|e| SimulationError::Distribution {
            name: "double-gamma",
            reason: e.to_string(),
        })?;
        if scale.is_nan() || scale <= 0.0 || !loc.is_finite() {
            return Err(SimulationError::Distribution {
                name: "double-gamma",
                reason: format!("loc={loc}, scale={scale}"),
            });
        }
        Ok(DoubleGamma { magnitude, loc, scale })
    }
}

impl Distribution<f64> for DoubleGamma {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let magnitude = rng.sample(self.magnitude);
        let sign = if rng.gen::<bool>() { 1.0 } else { -1.0 };
        self.loc + self.scale * sign * magnitude
    }
}

/// Weibull(min) distribution shifted right by `loc`
#[derive(Clone, Copy, Debug)]
pub struct ShiftedWeibull {
    weibull: Weibull<f64>,
    loc: f64,
}

impl ShiftedWeibull {
    pub fn new(shape: f64, loc: f64, scale: f64) -> Result<Self, SimulationError> {
        // rand_distr orders the parameters (scale, shape)
        let weibull = Weibull::new(scale, shape).map_err(|e| SimulationError::Distribution {
            name: "weibull-min",
            reason: e.to_string(),
        })?;
        Ok(ShiftedWeibull { weibull, loc })
    }

    /// Lower bound of the support
    pub fn loc(&self) -> f64 {
        self.loc
    }
}

impl Distribution<f64> for ShiftedWeibull {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.loc + rng.sample(self.weibull)
    }
}

/// The pair of distributions sampled by every trial
#[derive(Clone, Copy, Debug)]
pub struct MarketDistributions {
    pub coupon_per_transaction: DoubleGamma,
    pub ads_pct_gmv: ShiftedWeibull,
}

impl MarketDistributions {
    /// Distributions fitted to historical coupon and advertising data
    pub fn fitted() -> Result<Self, SimulationError> {
        Ok(MarketDistributions {
            coupon_per_transaction: DoubleGamma::new(COUPON_SHAPE, COUPON_LOC, COUPON_SCALE)?,
            ads_pct_gmv: ShiftedWeibull::new(ADS_SHAPE, ADS_LOC, ADS_SCALE)?,
        })
    }

    /// Draw `(coupon_per_transaction, ads_pct_gmv)` for one trial
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        let coupon = self.coupon_per_transaction.sample(rng);
        let ads = self.ads_pct_gmv.sample(rng);
        (coupon, ads)
    }
}
