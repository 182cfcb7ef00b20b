use std::fs;
use std::io::{self, Read, Write};

use anyhow::{anyhow, Error, Result};
use pgp_engine_core::config::PgpConfig;
use pgp_engine_core::{Engine, EngineErr, Outcome};
use secrecy::{ExposeSecret, SecretString};

use crate::constants::PgpeExitCode;

pub(crate) fn open_engine(config: &PgpConfig) -> Result<Engine, (i32, Error)> {
    Engine::new(config).map_err(|e| (PgpeExitCode::Error.into(), e))
}

/// Exit code for an error raised by the engine.
pub(crate) fn engine_error(e: Error) -> (i32, Error) {
    let code = match e.downcast_ref::<EngineErr>() {
        Some(EngineErr::EmptyRecipients) => PgpeExitCode::InvalidArgs,
        Some(EngineErr::ToolUnavailable) | Some(EngineErr::VersionMismatch { .. }) => {
            PgpeExitCode::ConfigError
        }
        None => PgpeExitCode::Error,
    };
    (code.into(), e)
}

pub(crate) fn read_input(path: Option<&str>) -> Result<Vec<u8>, (i32, Error)> {
    let res = match path {
        Some(path) => fs::read(path),
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf).map(|_| buf)
        }
    };
    res.map_err(|e| (PgpeExitCode::Error.into(), e.into()))
}

pub(crate) fn write_output(path: Option<&str>, data: &[u8]) -> Result<(), (i32, Error)> {
    let res = match path {
        Some(path) => fs::write(path, data),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data).and_then(|_| stdout.flush())
        }
    };
    res.map_err(|e| (PgpeExitCode::Error.into(), e.into()))
}

pub(crate) fn read_passphrase_file(
    path: Option<&str>,
) -> Result<Option<SecretString>, (i32, Error)> {
    let Some(path) = path else {
        return Ok(None);
    };
    let content = fs::read_to_string(path)
        .map(SecretString::from)
        .map_err(|e| (PgpeExitCode::Error.into(), e.into()))?;
    let first_line = content.expose_secret().lines().next().unwrap_or_default();
    Ok(Some(SecretString::from(first_line)))
}

/// Writes the payload of a successful outcome, or fails with the PGP exit code.
pub(crate) fn emit_outcome(
    what: &str,
    outcome: Outcome,
    output: Option<&str>,
) -> Result<(), (i32, Error)> {
    match outcome {
        Outcome::Success(data) => write_output(output, &data),
        Outcome::Failure => Err((PgpeExitCode::PGPError.into(), anyhow!("{} failed", what))),
    }
}
