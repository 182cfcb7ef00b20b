pub(crate) mod sub_command;

use anyhow::Error;
use clap::Parser;
use pgp_engine_core::config::PgpConfig;
use sub_command::SubCommands;

use crate::command;

#[derive(Parser)]
#[command(
    name = "pgpe",
    about = "Encrypt, decrypt, sign and verify through the local GnuPG install",
    version
)]
pub struct CliParser {
    #[command(subcommand)]
    pub command: SubCommands,

    /// Log every operation and tool invocation.
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Path to the config file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,
}

pub fn handle_cli(config: PgpConfig, cli_args: CliParser) -> Result<(), (i32, Error)> {
    match cli_args.command {
        SubCommands::Import { file } => command::import::cmd_import(&config, file.as_deref()),
        SubCommands::Encrypt { recipients, input, output } => {
            command::encrypt::cmd_encrypt(&config, &recipients, input.as_deref(), output.as_deref())
        }
        SubCommands::Decrypt { passphrase_file, input, output } => command::decrypt::cmd_decrypt(
            &config,
            passphrase_file.as_deref(),
            input.as_deref(),
            output.as_deref(),
        ),
        SubCommands::Sign { passphrase_file, input, output } => command::sign::cmd_sign(
            &config,
            passphrase_file.as_deref(),
            input.as_deref(),
            output.as_deref(),
        ),
        SubCommands::Verify { input, output } => {
            command::verify::cmd_verify(&config, input.as_deref(), output.as_deref())
        }
        SubCommands::Recipients => command::keys::cmd_recipients(&config),
        SubCommands::DeleteKeys { private, public } => {
            command::keys::cmd_delete_keys(&config, private, public)
        }
        SubCommands::Version => command::keys::cmd_version(&config),
    }
}
