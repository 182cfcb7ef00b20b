use anyhow::{anyhow, Error};
use pgp_engine_core::config::PgpConfig;

use crate::constants::PgpeExitCode;
use crate::util::{engine_error, open_engine, read_input};

pub fn cmd_import(config: &PgpConfig, file: Option<&str>) -> Result<(), (i32, Error)> {
    let engine = open_engine(config)?;
    let key = read_input(file)?;
    let outcome = engine.import_key(&key).map_err(engine_error)?;
    if outcome.is_success() {
        println!("Key imported");
        Ok(())
    } else {
        Err((PgpeExitCode::PGPError.into(), anyhow!("Import failed")))
    }
}
