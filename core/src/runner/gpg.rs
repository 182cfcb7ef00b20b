use std::path::Path;

use anyhow::{anyhow, Result};
use log::{debug, error};
use secrecy::{ExposeSecret, SecretString};

use super::utils::{
    check_exit, parse_primary_fingerprints, parse_uid_recipients, run_gpg_child,
    run_gpg_combined, version_from_output,
};
use super::Runner;
use crate::config::GpgConfig;

const GOOD_SIGNATURE_STATUS: &str = "[GNUPG:] GOODSIG ";

/// [`Runner`] backed by the GnuPG command line tool.
#[derive(Debug, Clone)]
pub struct GpgRunner {
    executable: String,
    home_dir: Option<String>,
    armor: bool,
    always_trust: bool,
    verbose: bool,
}

fn path_to_str(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| anyhow!("Path is not valid UTF-8: {:?}", path))
}

impl GpgRunner {
    pub fn new<S: AsRef<str>>(executable: S) -> Self {
        GpgRunner {
            executable: executable.as_ref().to_string(),
            home_dir: None,
            armor: true,
            always_trust: true,
            verbose: false,
        }
    }

    pub fn from_config(config: &GpgConfig, verbose: bool) -> Self {
        GpgRunner {
            executable: config.executable.clone(),
            home_dir: config.home_dir.clone(),
            armor: config.armor,
            always_trust: config.always_trust,
            verbose,
        }
    }

    pub fn with_home_dir<S: AsRef<str>>(mut self, home_dir: S) -> Self {
        self.home_dir = Some(home_dir.as_ref().to_string());
        self
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn get_executable(&self) -> &str {
        &self.executable
    }

    pub fn get_home_dir(&self) -> Option<&str> {
        self.home_dir.as_deref()
    }

    fn base_args(&self) -> Vec<&str> {
        let mut args = Vec::with_capacity(8);
        if let Some(home) = &self.home_dir {
            args.push("--homedir");
            args.push(home.as_str());
        }
        args
    }

    fn passphrase_args(args: &mut Vec<&str>, passphrase: Option<&SecretString>) {
        if passphrase.is_some() {
            // --pinentry-mode is required after gnupg 2.1
            args.extend(["--pinentry-mode", "loopback", "--passphrase-fd", "0"]);
        }
    }

    fn log_args(&self, args: &[&str]) {
        if self.verbose {
            debug!("Run: {} {}", self.executable, args.join(" "));
        }
    }

    fn run(&self, args: &[&str], passphrase: Option<&SecretString>) -> Result<String> {
        self.log_args(args);
        let output =
            run_gpg_child(&self.executable, args, passphrase.map(|p| p.expose_secret()))?;
        check_exit(&output)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn succeeded(&self, what: &str, res: Result<String>) -> bool {
        match res {
            Ok(_) => true,
            Err(e) => {
                debug!("{} failed: {}", what, e);
                false
            }
        }
    }

    fn listing(&self, list_arg: &str) -> Result<String> {
        let mut args = self.base_args();
        args.extend(["--batch", "--with-colons", "--fixed-list-mode", list_arg]);
        self.run(&args, None)
    }

    fn try_import(&self, path: &Path) -> Result<String> {
        let mut args = self.base_args();
        args.extend(["--batch", "--import", path_to_str(path)?]);
        self.run(&args, None)
    }

    fn try_verify(&self, signature: &Path, output: &Path) -> Result<String> {
        let mut args = self.base_args();
        args.extend([
            "--batch",
            "--yes",
            "--status-fd",
            "1",
            "--output",
            path_to_str(output)?,
            "--decrypt",
            path_to_str(signature)?,
        ]);
        let status = self.run(&args, None)?;
        if status.lines().any(|l| l.starts_with(GOOD_SIGNATURE_STATUS)) {
            Ok(status)
        } else {
            Err(anyhow!("No good signature found"))
        }
    }

    fn try_decrypt(
        &self,
        input: &Path,
        output: &Path,
        passphrase: Option<&SecretString>,
    ) -> Result<String> {
        let mut args = self.base_args();
        args.extend(["--batch", "--yes"]);
        Self::passphrase_args(&mut args, passphrase);
        args.extend(["--output", path_to_str(output)?, "--decrypt", path_to_str(input)?]);
        self.run(&args, passphrase)
    }

    fn try_encrypt(&self, input: &Path, output: &Path, recipients: &[String]) -> Result<String> {
        let mut args = self.base_args();
        args.extend(["--batch", "--yes"]);
        if self.armor {
            args.push("--armor");
        }
        if self.always_trust {
            args.extend(["--trust-model", "always"]);
        }
        for recipient in recipients {
            args.push("--recipient");
            args.push(recipient.as_str());
        }
        args.extend(["--output", path_to_str(output)?, "--encrypt", path_to_str(input)?]);
        self.run(&args, None)
    }

    fn try_sign(
        &self,
        input: &Path,
        output: &Path,
        passphrase: Option<&SecretString>,
    ) -> Result<String> {
        let mut args = self.base_args();
        args.extend(["--batch", "--yes"]);
        if self.armor {
            args.push("--armor");
        }
        Self::passphrase_args(&mut args, passphrase);
        args.extend(["--output", path_to_str(output)?, "--sign", path_to_str(input)?]);
        self.run(&args, passphrase)
    }

    fn try_delete(&self, delete_arg: &str, fingerprint: &str) -> Result<String> {
        let mut args = self.base_args();
        args.extend(["--batch", "--yes", delete_arg, fingerprint]);
        self.run(&args, None)
    }

    fn fingerprints(&self, list_arg: &str, primary: &str) -> Vec<String> {
        match self.listing(list_arg) {
            Ok(listing) => parse_primary_fingerprints(&listing, primary),
            Err(e) => {
                debug!("Listing {} failed: {}", list_arg, e);
                Vec::new()
            }
        }
    }

    fn recipients(&self, list_arg: &str) -> Vec<String> {
        match self.listing(list_arg) {
            Ok(listing) => parse_uid_recipients(&listing),
            Err(e) => {
                debug!("Listing {} failed: {}", list_arg, e);
                Vec::new()
            }
        }
    }
}

impl Runner for GpgRunner {
    fn version(&self) -> String {
        let mut args = self.base_args();
        args.push("--version");
        self.log_args(&args);
        match run_gpg_combined(&self.executable, &args) {
            Ok((status, output)) if status.success() => version_from_output(&output),
            Ok((status, _)) => {
                debug!("Version query exited with {:?}", status.code());
                String::new()
            }
            Err(e) => {
                debug!("Version query failed: {}", e);
                String::new()
            }
        }
    }

    fn import_key_from_file(&self, path: &Path) -> bool {
        self.succeeded("Import", self.try_import(path))
    }

    fn verify_signature_file(&self, signature: &Path, output: &Path) -> bool {
        self.succeeded("Verify", self.try_verify(signature, output))
    }

    fn decrypt_file(
        &self,
        input: &Path,
        output: &Path,
        passphrase: Option<&SecretString>,
    ) -> bool {
        self.succeeded("Decrypt", self.try_decrypt(input, output, passphrase))
    }

    fn encrypt_file(&self, input: &Path, output: &Path, recipients: &[String]) -> bool {
        if recipients.is_empty() {
            error!("Refusing to encrypt without recipients");
            return false;
        }
        self.succeeded("Encrypt", self.try_encrypt(input, output, recipients))
    }

    fn sign_file(&self, input: &Path, output: &Path, passphrase: Option<&SecretString>) -> bool {
        self.succeeded("Sign", self.try_sign(input, output, passphrase))
    }

    fn read_private_key_fingerprints(&self) -> Vec<String> {
        self.fingerprints("--list-secret-keys", "sec")
    }

    fn read_public_key_fingerprints(&self) -> Vec<String> {
        self.fingerprints("--list-keys", "pub")
    }

    fn delete_private_key(&self, fingerprint: &str) -> bool {
        self.succeeded("Delete private key", self.try_delete("--delete-secret-keys", fingerprint))
    }

    fn delete_public_key(&self, fingerprint: &str) -> bool {
        self.succeeded("Delete public key", self.try_delete("--delete-keys", fingerprint))
    }

    fn read_public_key_recipients(&self) -> Vec<String> {
        self.recipients("--list-keys")
    }

    fn read_private_key_recipients(&self) -> Vec<String> {
        self.recipients("--list-secret-keys")
    }
}
