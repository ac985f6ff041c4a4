use eyre::eyre;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Tracing subscriber configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// Filter directive for the fmt subscriber, e.g. `info` or
    /// `txqueue_base=debug`.
    pub level: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl TracingConfig {
    /// Install a global fmt subscriber with this filter. Errors if a global
    /// subscriber is already set.
    pub fn install(&self) -> eyre::Result<()> {
        let filter = EnvFilter::try_new(&self.level)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| eyre!("failed to install tracing subscriber: {e}"))
    }
}
