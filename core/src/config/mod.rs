use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::constants::default_constants::{PGP_EXECUTABLE, REQUIRED_VERSION_PREFIX};

#[derive(Debug, Serialize, Deserialize, Default, Eq, PartialEq, Clone)]
#[serde(default)]
pub struct PgpConfig {
    #[serde(default = "GpgConfig::default")]
    pub gpg: GpgConfig,
    #[serde(default = "EngineOptions::default")]
    pub engine: EngineOptions,
}

/// How the gpg executable is invoked.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
#[serde(default)]
pub struct GpgConfig {
    pub executable: String,
    /// Passed as `--homedir` when set.
    pub home_dir: Option<String>,
    pub armor: bool,
    /// Encrypt with `--trust-model always`.
    pub always_trust: bool,
}

#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
#[serde(default)]
pub struct EngineOptions {
    pub verbose: bool,
    pub required_version_prefix: String,
    /// Parent of the private staging directory.
    pub staging_dir: Option<String>,
}

impl Default for GpgConfig {
    fn default() -> Self {
        Self { executable: PGP_EXECUTABLE.into(), home_dir: None, armor: true, always_trust: true }
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            required_version_prefix: REQUIRED_VERSION_PREFIX.into(),
            staging_dir: None,
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PgpConfig> {
    let content = fs::read_to_string(path)?;
    let config: PgpConfig = toml::from_str(&content)?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(config: &PgpConfig, path: P) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    fs::write(path, toml_str)?;
    Ok(())
}
