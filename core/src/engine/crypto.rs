use std::fs;
use std::path::Path;

use anyhow::Result;
use secrecy::SecretString;

use super::{Decrypt, Engine, EngineErr, Outcome};
use crate::runner::Runner;
use crate::temp_path::write_private;

impl<R: Runner> Engine<R> {
    /// Stages `input` in one scoped file, lets `run` write to a second one and
    /// returns that file's content only when `run` reports success.
    fn staged_transform<F>(&self, input: &[u8], run: F) -> Result<Outcome>
    where
        F: FnOnce(&R, &Path, &Path) -> bool,
    {
        self.staging.create(|input_path| {
            self.staging.create(|output_path| {
                write_private(input_path, input)?;
                if run(&self.runner, input_path, output_path) {
                    Ok(Outcome::Success(fs::read(output_path)?))
                } else {
                    Ok(Outcome::Failure)
                }
            })
        })
    }

    pub fn import_key(&self, key_contents: &[u8]) -> Result<Outcome> {
        self.log("Import Key");
        self.validate_version()?;

        self.staging.create(|path| {
            write_private(path, key_contents)?;
            if self.runner.import_key_from_file(path) {
                Ok(Outcome::Success(Vec::new()))
            } else {
                Ok(Outcome::Failure)
            }
        })
    }

    pub fn verify_signature(&self, signature_data: &[u8]) -> Result<Outcome> {
        self.log("Verify Signature");
        self.validate_version()?;

        self.staged_transform(signature_data, |runner, sig, out| {
            runner.verify_signature_file(sig, out)
        })
    }

    pub fn decrypt(
        &self,
        encrypted_data: &[u8],
        passphrase: Option<SecretString>,
    ) -> Result<Outcome> {
        self.log("Decrypt");
        self.validate_version()?;

        self.staged_transform(encrypted_data, |runner, input, out| {
            runner.decrypt_file(input, out, passphrase.as_ref())
        })
    }

    pub fn encrypt<S: AsRef<str>>(&self, plaintext: &[u8], recipients: &[S]) -> Result<Outcome> {
        self.log("Encrypt");
        if recipients.is_empty() {
            return Err(EngineErr::EmptyRecipients.into());
        }
        let recipients: Vec<String> = recipients.iter().map(|r| r.as_ref().to_string()).collect();

        self.staged_transform(plaintext, |runner, input, out| {
            runner.encrypt_file(input, out, &recipients)
        })
    }

    pub fn sign(&self, plaintext: &[u8], passphrase: Option<SecretString>) -> Result<Outcome> {
        self.log("Sign");

        self.staged_transform(plaintext, |runner, input, out| {
            runner.sign_file(input, out, passphrase.as_ref())
        })
    }
}

impl<R: Runner> Decrypt for Engine<R> {
    fn decrypt(&self, ciphertext: &[u8], passphrase: Option<SecretString>) -> Result<Outcome> {
        Engine::decrypt(self, ciphertext, passphrase)
    }
}
