//! Drives a locally installed GnuPG to encrypt, decrypt, sign, verify and
//! manage keys, staging every payload through private temporary files.
//!
//! ```no_run
//! use pgp_engine_core::config::PgpConfig;
//! use pgp_engine_core::Engine;
//!
//! let engine = Engine::new(&PgpConfig::default())?;
//! let (ok, ciphertext) = engine.encrypt(b"hello", &["alice@example.org"])?.into_pair();
//! if ok {
//!     println!("{}", String::from_utf8_lossy(&ciphertext));
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod constants;
pub mod engine;
pub mod runner;
pub mod temp_path;
pub mod util;

pub use engine::key_management::KeyDeletion;
pub use engine::{Decrypt, Engine, EngineErr, Outcome};
pub use runner::{GpgRunner, Runner, RunnerErr};
