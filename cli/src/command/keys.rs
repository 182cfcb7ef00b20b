use anyhow::{anyhow, Error};
use pgp_engine_core::config::PgpConfig;
use pgp_engine_core::EngineErr;

use crate::constants::PgpeExitCode;
use crate::util::{engine_error, open_engine};

pub fn cmd_recipients(config: &PgpConfig) -> Result<(), (i32, Error)> {
    let engine = open_engine(config)?;
    for recipient in engine.read_recipients() {
        println!("{}", recipient);
    }
    Ok(())
}

pub fn cmd_delete_keys(config: &PgpConfig, private: bool, public: bool) -> Result<(), (i32, Error)> {
    let engine = open_engine(config)?;
    let report = match (private, public) {
        (true, false) => engine.delete_all_private_keys(),
        (false, true) => engine.delete_all_public_keys(),
        _ => engine.delete_all_keys(),
    }
    .map_err(engine_error)?;

    let mut failed = 0;
    for deletion in &report {
        if deletion.deleted {
            println!("Deleted {}", deletion.fingerprint);
        } else {
            failed += 1;
            eprintln!("Failed to delete {}", deletion.fingerprint);
        }
    }
    if failed == 0 {
        Ok(())
    } else {
        Err((PgpeExitCode::PGPError.into(), anyhow!("{} key(s) could not be deleted", failed)))
    }
}

pub fn cmd_version(config: &PgpConfig) -> Result<(), (i32, Error)> {
    let engine = open_engine(config)?;
    let version = engine.version();
    if version.is_empty() {
        return Err(engine_error(EngineErr::ToolUnavailable.into()));
    }
    println!("{} {}", config.gpg.executable, version);
    Ok(())
}
