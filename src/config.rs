use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Backoff tuning (optional section in the endpoint config file).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Delay before the first retry, in milliseconds.
    pub initial_delay_ms: u64,
    /// Multiplier applied to the delay after each retry.
    pub growth_factor: f64,
    /// Jitter ratio: each delay is drawn uniformly within ±ratio of nominal.
    pub jitter_ratio: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 1000,
            growth_factor: 2.0,
            jitter_ratio: 0.1,
        }
    }
}

impl BackoffConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }
}

/// Per-endpoint invocation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationConfig {
    /// Transport-level request timeout in seconds; also the total retry
    /// time budget for one logical request.
    pub request_timeout_secs: u64,
    /// Bounded retry count for HTTP 500 responses. Non-negative enables
    /// the bound (the bound-exceeding response is dropped, not failed);
    /// negative disables it.
    pub max_request_retries: i32,
    /// Optional backoff tuning; built-in defaults when missing.
    #[serde(default)]
    pub backoff: BackoffConfig,
}

impl Default for InvocationConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 60,
            max_request_retries: -1,
            backoff: BackoffConfig::default(),
        }
    }
}

impl InvocationConfig {
    /// Total retry time budget for one logical request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init(path: &Path) -> Result<InvocationConfig> {
    if !path.exists() {
        let default_cfg = InvocationConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg = toml::from_str(&data)?;
    Ok(cfg)
}
