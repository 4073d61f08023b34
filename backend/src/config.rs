//! Configuration for the flock tracker server.
//!
//! Values are layered with figment: built-in defaults, then an optional TOML
//! file (`flock-tracker.toml` in the working directory unless another path is
//! given), then `FLOCK_TRACKER_*` environment variables, e.g.
//! `FLOCK_TRACKER_BIND_ADDRESS=0.0.0.0:8080`.

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "flock-tracker.toml";
pub const DEFAULT_DATA_FILE: &str = "flock_data.json";
pub const ENV_PREFIX: &str = "FLOCK_TRACKER_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP server listens on
    pub bind_address: String,
    /// Location of the flock document
    pub data_file: PathBuf,
    /// Origins allowed by CORS; empty allows any origin
    pub allowed_origins: Vec<String>,
    /// Directory of front-end files served for non-API paths
    pub static_dir: Option<PathBuf>,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            allowed_origins: Vec::new(),
            static_dir: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default file and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .with_context(|| format!("Failed to load configuration ({})", config_file.display()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        if self.data_file.as_os_str().is_empty() {
            bail!("data_file cannot be empty");
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("Invalid bind_address: {}", self.bind_address))
    }
}
