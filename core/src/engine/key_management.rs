use anyhow::Result;
use log::debug;

use super::Engine;
use crate::runner::Runner;

/// What happened to one key during a bulk deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDeletion {
    pub fingerprint: String,
    pub deleted: bool,
}

impl<R: Runner> Engine<R> {
    /// Deletes every private key, then every public key.
    pub fn delete_all_keys(&self) -> Result<Vec<KeyDeletion>> {
        let mut report = self.delete_all_private_keys()?;
        report.extend(self.delete_all_public_keys()?);
        Ok(report)
    }

    pub fn delete_all_private_keys(&self) -> Result<Vec<KeyDeletion>> {
        self.log("Delete all private keys");
        self.validate_version()?;

        Ok(self
            .runner
            .read_private_key_fingerprints()
            .into_iter()
            .map(|fpr| {
                let deleted = self.runner.delete_private_key(&fpr);
                debug!("Delete private key {}: {}", fpr, deleted);
                KeyDeletion { fingerprint: fpr, deleted }
            })
            .collect())
    }

    pub fn delete_all_public_keys(&self) -> Result<Vec<KeyDeletion>> {
        self.log("Delete all public keys");
        self.validate_version()?;

        Ok(self
            .runner
            .read_public_key_fingerprints()
            .into_iter()
            .map(|fpr| {
                let deleted = self.runner.delete_public_key(&fpr);
                debug!("Delete public key {}: {}", fpr, deleted);
                KeyDeletion { fingerprint: fpr, deleted }
            })
            .collect())
    }

    /// Public then private recipient ids, first occurrence wins.
    pub fn read_recipients(&self) -> Vec<String> {
        let mut recipients = self.runner.read_public_key_recipients();
        recipients.extend(self.runner.read_private_key_recipients());
        let mut seen = std::collections::HashSet::with_capacity(recipients.len());
        recipients.retain(|r| seen.insert(r.clone()));
        recipients
    }
}
