pub mod crypto;
pub mod key_management;

use std::fmt::{Display, Formatter};
use std::path::Path;

use anyhow::Result;
use log::info;
use secrecy::SecretString;

use crate::config::{EngineOptions, PgpConfig};
use crate::runner::{GpgRunner, Runner};
use crate::temp_path::TempPathProvider;

/// Result of an engine operation. Only a successful run carries a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(Vec<u8>),
    Failure,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Outcome::Success(data) => Some(data),
            Outcome::Failure => None,
        }
    }

    pub fn into_payload(self) -> Option<Vec<u8>> {
        match self {
            Outcome::Success(data) => Some(data),
            Outcome::Failure => None,
        }
    }

    /// `(success, payload)`, with an empty payload on failure.
    pub fn into_pair(self) -> (bool, Vec<u8>) {
        match self {
            Outcome::Success(data) => (true, data),
            Outcome::Failure => (false, Vec::new()),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum EngineErr {
    ToolUnavailable,
    VersionMismatch { required: String, found: String },
    EmptyRecipients,
}

impl Display for EngineErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use EngineErr::*;

        match self {
            ToolUnavailable => write!(f, "PGP tool is not available or failed to report a version"),
            VersionMismatch { required, found } => {
                write!(f, "PGP tool version is incorrect: need {}x, found {}", required, found)
            }
            EmptyRecipients => write!(f, "Recipients cannot be empty"),
        }
    }
}

impl std::error::Error for EngineErr {}

/// Anything that turns ciphertext into plaintext with the engine's result
/// shape, so a non-subprocess decryptor can stand in for [`Engine`].
pub trait Decrypt {
    fn decrypt(&self, ciphertext: &[u8], passphrase: Option<SecretString>) -> Result<Outcome>;
}

/// Drives an OpenPGP tool through a [`Runner`], staging payloads in private
/// temporary files.
#[derive(Debug)]
pub struct Engine<R: Runner = GpgRunner> {
    runner: R,
    staging: TempPathProvider,
    verbose: bool,
    required_version_prefix: String,
}

impl Engine<GpgRunner> {
    pub fn new(config: &PgpConfig) -> Result<Self> {
        let runner = GpgRunner::from_config(&config.gpg, config.engine.verbose);
        Self::with_runner(runner, &config.engine)
    }
}

impl<R: Runner> Engine<R> {
    pub fn with_runner(runner: R, options: &EngineOptions) -> Result<Self> {
        let staging = TempPathProvider::new(options.staging_dir.as_deref().map(Path::new))?;
        Ok(Engine {
            runner,
            staging,
            verbose: options.verbose,
            required_version_prefix: options.required_version_prefix.clone(),
        })
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn staging(&self) -> &TempPathProvider {
        &self.staging
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn version(&self) -> String {
        self.runner.version()
    }

    fn log(&self, message: &str) {
        if self.verbose {
            info!("{}", message);
        }
    }

    fn validate_version(&self) -> Result<()> {
        let found = self.runner.version();
        if found.is_empty() {
            return Err(EngineErr::ToolUnavailable.into());
        }
        if !found.starts_with(&self.required_version_prefix) {
            return Err(EngineErr::VersionMismatch {
                required: self.required_version_prefix.clone(),
                found,
            }
            .into());
        }
        Ok(())
    }
}
