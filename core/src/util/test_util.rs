use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use secrecy::{ExposeSecret, SecretString};
use tempfile::env::temp_dir;
use tempfile::TempDir;

use crate::config::EngineOptions;
use crate::engine::Engine;
use crate::runner::Runner;

const ENC_MAGIC: &[u8] = b"FAKE-ENC\n";
const SIG_MAGIC: &[u8] = b"FAKE-SIG\n";

pub(crate) fn gen_unique_temp_dir() -> (TempDir, PathBuf) {
    let base_dir = temp_dir().join("pgpe-test");
    if !base_dir.exists() {
        let _ = fs::create_dir_all(&base_dir);
    }
    let dir = TempDir::new_in(base_dir).unwrap();
    let path = dir.path().to_path_buf();
    (dir, path)
}

struct FakeKey {
    fpr: String,
    uid: String,
    secret: bool,
}

/// In-memory stand-in for gpg: "encryption" reverses the payload behind a
/// marker, "signing" prepends a marker, and the key store is a list.
pub(crate) struct FakeRunner {
    version: Mutex<String>,
    passphrase: Option<String>,
    failing: bool,
    keys: Mutex<Vec<FakeKey>>,
    protected: Mutex<HashSet<String>>,
    last_recipients: Mutex<Vec<String>>,
    invocations: AtomicUsize,
    staged_files_seen: AtomicUsize,
}

impl Default for FakeRunner {
    fn default() -> Self {
        FakeRunner {
            version: Mutex::new("2.2.27".into()),
            passphrase: None,
            failing: false,
            keys: Mutex::new(Vec::new()),
            protected: Mutex::new(HashSet::new()),
            last_recipients: Mutex::new(Vec::new()),
            invocations: AtomicUsize::new(0),
            staged_files_seen: AtomicUsize::new(0),
        }
    }
}

impl FakeRunner {
    pub fn with_version(version: &str) -> Self {
        let runner = FakeRunner::default();
        runner.set_version(version);
        runner
    }

    pub fn with_passphrase(passphrase: &str) -> Self {
        FakeRunner { passphrase: Some(passphrase.into()), ..Default::default() }
    }

    /// Every operation writes junk to its output and then reports failure.
    pub fn failing() -> Self {
        FakeRunner { failing: true, ..Default::default() }
    }

    pub fn set_version(&self, version: &str) {
        *self.version.lock() = version.into();
    }

    pub fn add_key(&self, fpr: &str, uid: &str, with_secret: bool) {
        self.keys.lock().push(FakeKey {
            fpr: fpr.into(),
            uid: uid.into(),
            secret: with_secret,
        });
    }

    /// Deleting this key will fail.
    pub fn protect(&self, fpr: &str) {
        self.protected.lock().insert(fpr.into());
    }

    pub fn last_recipients(&self) -> Vec<String> {
        self.last_recipients.lock().clone()
    }

    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    pub fn staged_files_seen(&self) -> usize {
        self.staged_files_seen.load(Ordering::SeqCst)
    }

    fn called(&self) {
        self.invocations.fetch_add(1, Ordering::SeqCst);
    }

    fn file_call(&self, input: &Path) -> Option<Vec<u8>> {
        self.called();
        self.staged_files_seen.fetch_add(1, Ordering::SeqCst);
        fs::read(input).ok()
    }

    fn finish(&self, output: &Path, data: Option<Vec<u8>>) -> bool {
        if self.failing {
            let _ = fs::write(output, b"PARTIAL");
            return false;
        }
        match data {
            Some(data) => fs::write(output, data).is_ok(),
            None => false,
        }
    }

    fn passphrase_ok(&self, passphrase: Option<&SecretString>) -> bool {
        match &self.passphrase {
            Some(expected) => {
                passphrase.map(|p| p.expose_secret() == expected.as_str()).unwrap_or(false)
            }
            None => true,
        }
    }
}

impl Runner for FakeRunner {
    fn version(&self) -> String {
        self.called();
        self.version.lock().clone()
    }

    fn import_key_from_file(&self, path: &Path) -> bool {
        let Some(content) = self.file_call(path) else {
            return false;
        };
        if self.failing {
            return false;
        }
        let content = String::from_utf8_lossy(&content).into_owned();
        for line in content.lines() {
            if let Some((fpr, uid)) = line.split_once(' ') {
                self.add_key(fpr, uid, false);
            }
        }
        true
    }

    fn verify_signature_file(&self, signature: &Path, output: &Path) -> bool {
        let data: Option<Vec<u8>> = self
            .file_call(signature)
            .and_then(|d| d.strip_prefix(SIG_MAGIC).map(|rest| rest.to_vec()));
        self.finish(output, data)
    }

    fn decrypt_file(
        &self,
        input: &Path,
        output: &Path,
        passphrase: Option<&SecretString>,
    ) -> bool {
        let data: Option<Vec<u8>> =
            self.file_call(input).filter(|_| self.passphrase_ok(passphrase)).and_then(|d| {
                d.strip_prefix(ENC_MAGIC).map(|rest| rest.iter().rev().copied().collect())
            });
        self.finish(output, data)
    }

    fn encrypt_file(&self, input: &Path, output: &Path, recipients: &[String]) -> bool {
        *self.last_recipients.lock() = recipients.to_vec();
        let data = self.file_call(input).filter(|_| !recipients.is_empty()).map(|d| {
            let mut out = ENC_MAGIC.to_vec();
            out.extend(d.iter().rev());
            out
        });
        self.finish(output, data)
    }

    fn sign_file(&self, input: &Path, output: &Path, passphrase: Option<&SecretString>) -> bool {
        let data = self.file_call(input).filter(|_| self.passphrase_ok(passphrase)).map(|d| {
            let mut out = SIG_MAGIC.to_vec();
            out.extend(d);
            out
        });
        self.finish(output, data)
    }

    fn read_private_key_fingerprints(&self) -> Vec<String> {
        self.called();
        self.keys.lock().iter().filter(|k| k.secret).map(|k| k.fpr.clone()).collect()
    }

    fn read_public_key_fingerprints(&self) -> Vec<String> {
        self.called();
        self.keys.lock().iter().map(|k| k.fpr.clone()).collect()
    }

    fn delete_private_key(&self, fingerprint: &str) -> bool {
        self.called();
        if self.failing || self.protected.lock().contains(fingerprint) {
            return false;
        }
        let mut keys = self.keys.lock();
        match keys.iter_mut().find(|k| k.fpr == fingerprint && k.secret) {
            Some(key) => {
                key.secret = false;
                true
            }
            None => false,
        }
    }

    fn delete_public_key(&self, fingerprint: &str) -> bool {
        self.called();
        if self.failing || self.protected.lock().contains(fingerprint) {
            return false;
        }
        let mut keys = self.keys.lock();
        let before = keys.len();
        keys.retain(|k| k.fpr != fingerprint);
        before != keys.len()
    }

    fn read_public_key_recipients(&self) -> Vec<String> {
        self.called();
        self.keys.lock().iter().map(|k| k.uid.clone()).collect()
    }

    fn read_private_key_recipients(&self) -> Vec<String> {
        self.called();
        self.keys.lock().iter().filter(|k| k.secret).map(|k| k.uid.clone()).collect()
    }
}

pub(crate) fn fake_engine(runner: FakeRunner) -> (TempDir, Engine<FakeRunner>) {
    let (tmp_dir, root) = gen_unique_temp_dir();
    let options = EngineOptions {
        verbose: true,
        staging_dir: root.to_str().map(String::from),
        ..Default::default()
    };
    let engine = Engine::with_runner(runner, &options).unwrap();
    (tmp_dir, engine)
}
