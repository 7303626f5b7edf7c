//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the tracing subscriber.
///
/// Reads `INFLOW_SIM_LOG` for filter directives, e.g. `INFLOW_SIM_LOG=inflow_sim=debug`.
/// Falls back to `inflow_sim=info` when unset or invalid. Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("INFLOW_SIM_LOG")
            .unwrap_or_else(|_| EnvFilter::new("inflow_sim=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
