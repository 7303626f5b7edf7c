/// Engine configuration, loadable from TOML

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::ConfigError;

pub const DEFAULT_SIMULATIONS: usize = 10_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of trials drawn per run
    pub n_simulations: usize,
    /// Base seed for reproducible runs (None = system entropy)
    pub seed: Option<u64>,
    /// Spread trials over the rayon pool
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            n_simulations: DEFAULT_SIMULATIONS,
            seed: None,
            parallel: false,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(s)?;
        if config.n_simulations == 0 {
            return Err(ConfigError::NoSimulations);
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
