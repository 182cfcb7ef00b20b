use std::env;
use std::str::FromStr;

use chrono::Local;
use lazy_static::lazy_static;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use parking_lot::RwLock;

use crate::constants::env_variables::LOG_LEVEL_VAR;

lazy_static! {
    static ref LOG_LEVEL: RwLock<LevelFilter> = RwLock::new(LevelFilter::Warn);
}

struct DynamicLogger;

impl Log for DynamicLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= *LOG_LEVEL.read()
    }

    // stdout carries operation payloads, so records go to stderr
    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = Local::now();
            eprintln!(
                "[{}] [{}] - {}",
                now.format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

static LOGGER: DynamicLogger = DynamicLogger;

pub fn init_logger() -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(LevelFilter::Trace);
    if let Some(level) = level_from_env() {
        set_log_level(level);
    }
    Ok(())
}

pub fn set_log_level(level: LevelFilter) {
    *LOG_LEVEL.write() = level;
}

pub fn log_level() -> LevelFilter {
    *LOG_LEVEL.read()
}

fn level_from_env() -> Option<LevelFilter> {
    env::var(LOG_LEVEL_VAR).ok().and_then(|v| LevelFilter::from_str(v.trim()).ok())
}
