use log::LevelFilter;
use pgp_engine_core::util::fs_util::get_home_dir;

pub fn default_config_path() -> String {
    let path = get_home_dir().join(".config/pgpe/config.toml");

    match path.to_str() {
        Some(path) => path.into(),
        None => {
            eprintln!("Error getting default config path, use '~/.config/pgpe/config.toml' instead");
            "~/.config/pgpe/config.toml".into()
        }
    }
}

pub const VERBOSE_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[repr(i32)]
pub enum PgpeExitCode {
    Error = 1,
    InvalidArgs = 2,
    ConfigError = 100,
    PGPError = 199,
}

impl From<PgpeExitCode> for i32 {
    fn from(val: PgpeExitCode) -> Self {
        val as i32
    }
}
