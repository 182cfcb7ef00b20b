#![allow(dead_code)]

use std::env;
use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use pgp_engine_core::config::PgpConfig;
use pgp_engine_core::{Engine, GpgRunner, Runner};
use tempfile::TempDir;

pub fn get_test_username() -> String {
    env::var("PGPE_TEST_USERNAME").unwrap_or_else(|_| "pgpe-test".into())
}

pub fn get_test_email() -> String {
    env::var("PGPE_TEST_EMAIL").unwrap_or("foo@pgpe.test".to_string())
}

pub fn get_test_executable() -> String {
    env::var("PGPE_TEST_EXECUTABLE").unwrap_or("gpg".to_string())
}

pub fn get_test_password() -> String {
    env::var("PGPE_TEST_PASSWORD").unwrap_or("password".to_string())
}

/// Real-gpg tests are `#[ignore]`d; once opted into with `--ignored`, a
/// missing gpg 2.x is a failure rather than a silent pass.
pub fn require_gpg() {
    let version = GpgRunner::new(get_test_executable()).version();
    assert!(
        version.starts_with("2."),
        "gpg 2.x is required (set PGPE_TEST_EXECUTABLE), found {:?}",
        version
    );
}

pub fn gpg_key_gen_example_batch() -> String {
    format!(
        r#"%echo Generating a new key
Key-Type: RSA
Key-Length: 2048
Subkey-Type: RSA
Subkey-Length: 2048
Name-Real: {}
Name-Email: {}
Expire-Date: 0
Passphrase: {}
%commit
%echo Key generation complete
"#,
        get_test_username(),
        get_test_email(),
        get_test_password()
    )
}

/// A throwaway gpg home; the agent it spawned is stopped on drop.
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        // agent socket paths have a length limit, keep this short
        // gpg warns about a homedir that others can read
        let dir = tempfile::Builder::new()
            .prefix("pgpe")
            .permissions(fs::Permissions::from_mode(0o700))
            .tempdir_in("/tmp")
            .unwrap();
        fs::write(dir.path().join("gpg-agent.conf"), "allow-loopback-pinentry\n").unwrap();
        TestHome { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn path_str(&self) -> &str {
        self.dir.path().to_str().unwrap()
    }

    pub fn key_gen_batch(&self) {
        let mut child = Command::new(get_test_executable())
            .args(["--homedir", self.path_str(), "--batch", "--pinentry-mode", "loopback"])
            .arg("--gen-key")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();
        child.stdin.take().unwrap().write_all(gpg_key_gen_example_batch().as_bytes()).unwrap();
        assert!(child.wait().unwrap().success());
    }

    pub fn export_public_key(&self, email: &str) -> Vec<u8> {
        let output = Command::new(get_test_executable())
            .args(["--homedir", self.path_str(), "--batch", "--armor", "--export", email])
            .output()
            .unwrap();
        assert!(output.status.success());
        output.stdout
    }

    /// Unsigned literal data, as `gpg --store` writes it.
    pub fn store(&self, data: &[u8]) -> Vec<u8> {
        let mut child = Command::new(get_test_executable())
            .args(["--homedir", self.path_str(), "--batch", "--armor", "--store"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();
        child.stdin.take().unwrap().write_all(data).unwrap();
        let output = child.wait_with_output().unwrap();
        assert!(output.status.success());
        output.stdout
    }

    pub fn engine(&self, staging: &Path) -> Engine {
        let mut config = PgpConfig::default();
        config.gpg.executable = get_test_executable();
        config.gpg.home_dir = Some(self.path_str().to_string());
        config.engine.staging_dir = staging.to_str().map(String::from);
        Engine::new(&config).unwrap()
    }
}

impl Drop for TestHome {
    fn drop(&mut self) {
        let _ = Command::new("gpgconf")
            .args(["--homedir", self.path_str(), "--kill", "gpg-agent"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
    }
}

pub fn gen_unique_temp_dir() -> (TempDir, PathBuf) {
    let dir = tempfile::Builder::new().prefix("pgpe-stage").tempdir().unwrap();
    let path = dir.path().to_path_buf();
    (dir, path)
}
