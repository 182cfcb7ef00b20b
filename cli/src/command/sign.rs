use anyhow::Error;
use pgp_engine_core::config::PgpConfig;

use crate::util::{emit_outcome, engine_error, open_engine, read_input, read_passphrase_file};

pub fn cmd_sign(
    config: &PgpConfig,
    passphrase_file: Option<&str>,
    input: Option<&str>,
    output: Option<&str>,
) -> Result<(), (i32, Error)> {
    let engine = open_engine(config)?;
    let passphrase = read_passphrase_file(passphrase_file)?;
    let plaintext = read_input(input)?;
    let outcome = engine.sign(&plaintext, passphrase).map_err(engine_error)?;
    emit_outcome("Sign", outcome, output)
}
