pub mod gpg;
pub(crate) mod utils;

use std::fmt::{Display, Formatter};
use std::path::Path;

use secrecy::SecretString;

pub use gpg::GpgRunner;

/// The capabilities the engine needs from an OpenPGP tool.
///
/// Every boolean is the tool's verdict: `true` only when the invocation
/// exited successfully. When a method that writes `output` returns `false`,
/// whatever it left at `output` is garbage and must not be read.
pub trait Runner {
    /// Version token of the tool, or an empty string if it could not be
    /// queried.
    fn version(&self) -> String;

    fn import_key_from_file(&self, path: &Path) -> bool;

    fn verify_signature_file(&self, signature: &Path, output: &Path) -> bool;

    fn decrypt_file(&self, input: &Path, output: &Path, passphrase: Option<&SecretString>)
        -> bool;

    /// `recipients` must not be empty.
    fn encrypt_file(&self, input: &Path, output: &Path, recipients: &[String]) -> bool;

    fn sign_file(&self, input: &Path, output: &Path, passphrase: Option<&SecretString>) -> bool;

    fn read_private_key_fingerprints(&self) -> Vec<String>;

    fn read_public_key_fingerprints(&self) -> Vec<String>;

    fn delete_private_key(&self, fingerprint: &str) -> bool;

    fn delete_public_key(&self, fingerprint: &str) -> bool;

    fn read_public_key_recipients(&self) -> Vec<String>;

    fn read_private_key_recipients(&self) -> Vec<String>;
}

#[derive(Debug)]
pub enum RunnerErr {
    CannotTakeStdin,
    ExitFailure(String),
}

impl Display for RunnerErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use RunnerErr::*;

        match self {
            CannotTakeStdin => write!(f, "Cannot take child's stdin"),
            ExitFailure(msg) => write!(f, "PGP tool failed: {}", msg),
        }
    }
}

impl std::error::Error for RunnerErr {}
