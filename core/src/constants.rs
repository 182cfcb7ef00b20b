#[allow(dead_code)]
pub(crate) mod default_constants {
    pub const PGP_EXECUTABLE: &str = "gpg";
    pub const REQUIRED_VERSION_PREFIX: &str = "2.";
    pub const STAGING_DIR_PREFIX: &str = "pgpe-";
    pub const STAGING_NAME_LENGTH: usize = 12;
    #[cfg(unix)]
    pub const SHM_DIR: &str = "/dev/shm";
}

pub mod env_variables {
    pub const LOG_LEVEL_VAR: &str = "PGPE_LOG_LEVEL";
    pub const CONFIG_PATH_ENV: &str = "PGPE_CONFIG_PATH";
}
