use anyhow::Error;
use pgp_engine_core::config::PgpConfig;

use crate::util::{emit_outcome, engine_error, open_engine, read_input};

pub fn cmd_encrypt(
    config: &PgpConfig,
    recipients: &[String],
    input: Option<&str>,
    output: Option<&str>,
) -> Result<(), (i32, Error)> {
    let engine = open_engine(config)?;
    let plaintext = read_input(input)?;
    let outcome = engine.encrypt(&plaintext, recipients).map_err(engine_error)?;
    emit_outcome("Encrypt", outcome, output)
}
