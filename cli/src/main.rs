mod command;
mod constants;
mod parser;
mod util;

use std::env;
use std::path::PathBuf;

use clap::Parser;
use constants::PgpeExitCode;
use pgp_engine_core::config::{load_config, PgpConfig};
use pgp_engine_core::constants::env_variables::CONFIG_PATH_ENV;
use pgp_engine_core::util::log::{init_logger, set_log_level};
use parser::CliParser;

use crate::constants::{default_config_path, VERBOSE_LOG_LEVEL};

fn main() {
    let cli_args = CliParser::parse();
    if let Err(e) = init_logger() {
        eprintln!("Failed to init logger: {}", e);
    }
    if cli_args.verbose {
        set_log_level(VERBOSE_LOG_LEVEL);
    }

    let config_path = cli_args
        .config
        .clone()
        .unwrap_or_else(|| env::var(CONFIG_PATH_ENV).unwrap_or(default_config_path()));
    process_cli(&config_path, cli_args);
}

fn process_cli(config_path: &str, cli_args: CliParser) {
    let mut config = if PathBuf::from(&config_path).exists() {
        match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config file '{}': {}", config_path, e);
                std::process::exit(PgpeExitCode::ConfigError.into());
            }
        }
    } else {
        PgpConfig::default()
    };
    config.engine.verbose |= cli_args.verbose;

    if let Err((code, e)) = parser::handle_cli(config, cli_args) {
        eprintln!("{}", e);
        std::process::exit(code);
    }
}
