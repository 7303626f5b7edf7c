/// Errors raised while running a simulation
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("average transaction value is zero; transaction count is undefined")]
    ZeroAverageTransactionValue,

    #[error("invalid {name} distribution parameters: {reason}")]
    Distribution { name: &'static str, reason: String },
}

/// Errors raised while loading engine configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("n_simulations must be at least 1")]
    NoSimulations,
}
