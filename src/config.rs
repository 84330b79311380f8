//! Tournament-wide settings, read from a TOML file.
//!
//! Every section and every key is optional:
//!
//! ```toml
//! [pairing]
//! method = "high_low"
//! seed = 42
//!
//! [standings]
//! speaks = "average"
//!
//! [speakers]
//! exclude_breaking = true
//! drop_high = 1
//! drop_low = 1
//! top = 10
//!
//! [breaks]
//! size = 8
//! ```

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::tournaments::config::{
    PairingMethod, SpeakerAwardsConfig, StandingsConfig,
};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(#[from] toml::de::Error),
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub pairing: PairingConfig,
    pub standings: StandingsConfig,
    pub speakers: SpeakerAwardsConfig,
    pub breaks: BreakConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PairingConfig {
    pub method: PairingMethod,
    /// Fixes the random source used by [`PairingMethod::Random`], so that a
    /// draw can be regenerated exactly.
    pub seed: Option<u64>,
}

impl PairingConfig {
    pub fn rng(&self) -> ChaCha20Rng {
        match self.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_os_rng(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct BreakConfig {
    /// Number of teams advancing to the elimination rounds.
    pub size: usize,
}

impl Default for BreakConfig {
    fn default() -> Self {
        Self { size: 8 }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Installs the global `tracing` subscriber for the command line tool.
///
/// `RUST_LOG` takes precedence; otherwise each `-v` raises the level from
/// `warn` through `info` and `debug` to `trace`.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
