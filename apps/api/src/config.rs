use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub mock_latency_min_ms: u64,
    pub mock_latency_max_ms: u64,
    pub mock_failure_rate: f64,
    /// Fixed RNG seed for reproducible latency/failure sequences.
    pub mock_seed: Option<u64>,
    /// Directory holding the `*.json` fixtures. Embedded copies are used when unset.
    pub fixtures_dir: Option<PathBuf>,
    pub local_storage_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            mock_latency_min_ms: parse_env("MOCK_LATENCY_MIN_MS", 200)?,
            mock_latency_max_ms: parse_env("MOCK_LATENCY_MAX_MS", 700)?,
            mock_failure_rate: parse_env("MOCK_FAILURE_RATE", 0.05)?,
            mock_seed: optional_env("MOCK_SEED")?,
            fixtures_dir: std::env::var("FIXTURES_DIR").ok().map(PathBuf::from),
            local_storage_path: std::env::var("LOCAL_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".tracker-storage.json")),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.mock_latency_min_ms > self.mock_latency_max_ms {
            bail!(
                "MOCK_LATENCY_MIN_MS ({}) must not exceed MOCK_LATENCY_MAX_MS ({})",
                self.mock_latency_min_ms,
                self.mock_latency_max_ms
            );
        }
        if !(0.0..=1.0).contains(&self.mock_failure_rate) {
            bail!(
                "MOCK_FAILURE_RATE must be within 0.0..=1.0, got {}",
                self.mock_failure_rate
            );
        }
        Ok(())
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(optional_env(key)?.unwrap_or(default))
}

fn optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(None),
    }
}
