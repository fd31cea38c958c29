//! Configuration management for the growth journal server.
//!
//! Configuration can be set via environment variables:
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `JOURNAL_DIR` - Optional. Directory for reflection logs and exported documents.
//!   Defaults to `./journals`.
//! - `GROWTH_RNG_SEED` - Optional. Seed for quote, tip and leaderboard selection.
//!   Defaults to OS entropy.
//! - `SESSION_IDLE_TIMEOUT_SECS` - Optional. Sessions with no interaction for this long
//!   are dropped. Defaults to `3600`.
//! - `SESSION_SWEEP_INTERVAL_SECS` - Optional. How often idle sessions are looked for.
//!   Defaults to `60`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Where `{key}_reflection.txt` and `{key}_Reflection.pdf` are written
    pub journal_dir: PathBuf,

    /// Fixed seed for the shared randomness source
    pub rng_seed: Option<u64>,

    /// Idle time after which a session is evicted
    pub session_idle_timeout_secs: u64,

    /// Interval between idle session sweeps
    pub session_sweep_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a numeric variable does not parse, or if
    /// either session interval is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let journal_dir = std::env::var("JOURNAL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("journals"));

        let rng_seed = match std::env::var("GROWTH_RNG_SEED") {
            Ok(raw) => Some(raw.trim().parse().map_err(|e| {
                ConfigError::InvalidValue("GROWTH_RNG_SEED".to_string(), format!("{}", e))
            })?),
            Err(_) => None,
        };

        let session_idle_timeout_secs = parse_secs("SESSION_IDLE_TIMEOUT_SECS", 3600)?;
        let session_sweep_interval_secs = parse_secs("SESSION_SWEEP_INTERVAL_SECS", 60)?;

        Ok(Self {
            host,
            port,
            journal_dir,
            rng_seed,
            session_idle_timeout_secs,
            session_sweep_interval_secs,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(journal_dir: PathBuf) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            journal_dir,
            rng_seed: None,
            session_idle_timeout_secs: 3600,
            session_sweep_interval_secs: 60,
        }
    }
}

fn parse_secs(name: &str, default: u64) -> Result<u64, ConfigError> {
    let raw = match std::env::var(name) {
        Ok(raw) => raw,
        Err(_) => return Ok(default),
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue(
            name.to_string(),
            "must be greater than zero".to_string(),
        )),
        Ok(secs) => Ok(secs),
        Err(e) => Err(ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
    }
}
