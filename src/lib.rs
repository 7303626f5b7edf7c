pub mod config;
pub mod distributions;
pub mod error;
pub mod logging;
pub mod models;
pub mod monte_carlo;
pub mod reporting;
pub mod simulation;

pub use config::EngineConfig;
pub use error::{ConfigError, SimulationError};
pub use models::{InflowStats, SimulationInput, SimulationOutput, TrialResult};
pub use monte_carlo::{run, run_with_config, summarize};
