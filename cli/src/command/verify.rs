use anyhow::Error;
use pgp_engine_core::config::PgpConfig;

use crate::util::{emit_outcome, engine_error, open_engine, read_input};

pub fn cmd_verify(
    config: &PgpConfig,
    input: Option<&str>,
    output: Option<&str>,
) -> Result<(), (i32, Error)> {
    let engine = open_engine(config)?;
    let signed = read_input(input)?;
    let outcome = engine.verify_signature(&signed).map_err(engine_error)?;
    emit_outcome("Verify", outcome, output)
}
