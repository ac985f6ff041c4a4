//! Runtime configuration for queue services.
//!
//! Settings are read from an optional `config/default` file and overlaid
//! with environment variables prefixed `TXQUEUE_` (e.g.
//! `TXQUEUE_DEFAULT_PRIORITY=9`), later sources taking precedence. All
//! fields have defaults so a bare environment yields a working local setup.

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use trace::TracingConfig;

mod trace;

/// Shared settings for the submission service and the status poller.
///
/// Store and executor handles themselves are injected into the services;
/// these settings only say where a backend should connect and which knobs
/// the services run with.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Endpoint of the record store / priority index backend.
    pub store_url: String,
    /// Endpoint of the execution backend used for receipt lookups.
    pub executor_url: String,
    /// Priority used by `submit_default`.
    pub default_priority: u8,
    /// Retention window of a record, independent of its status.
    pub record_ttl_secs: u64,
    /// How long a poll waits for a terminal status before giving up.
    pub poll_timeout_ms: u64,
    /// Fixed pause between two poll reads. Kept short for latency; the only
    /// cost of lowering it is read pressure on the store.
    pub poll_interval_ms: u64,
    /// Tracing subscriber configuration.
    pub tracing: TracingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_url: "redis://127.0.0.1:6379".into(),
            executor_url: "http://127.0.0.1:8545".into(),
            default_priority: 5,
            record_ttl_secs: 24 * 60 * 60,
            poll_timeout_ms: 30_000,
            poll_interval_ms: 200,
            tracing: TracingConfig::default(),
        }
    }
}

impl Settings {
    /// Read settings from the config file, then the environment.
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::with_prefix("TXQUEUE"))
            .build()?
            .try_deserialize()
    }

    /// Record retention window as a [`Duration`].
    pub fn record_ttl(&self) -> Duration {
        Duration::from_secs(self.record_ttl_secs)
    }

    /// Poll deadline as a [`Duration`].
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    /// Inter-poll pause as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
