use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use log::{debug, warn};
use tempfile::TempDir;

use crate::constants::default_constants::{STAGING_DIR_PREFIX, STAGING_NAME_LENGTH};
use crate::util::rand::rand_alphabet_string;

/// Hands out staging paths inside a private directory and removes them when
/// their scope ends.
///
/// The directory itself is created with owner-only permissions and is removed
/// together with the provider.
#[derive(Debug)]
pub struct TempPathProvider {
    dir: TempDir,
    counter: AtomicU64,
}

/// A path that does not exist when handed out and is deleted on drop.
#[derive(Debug)]
pub struct ScopedPath {
    path: PathBuf,
}

impl ScopedPath {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AsRef<Path> for ScopedPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScopedPath {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(_) => debug!("Removed staged file {:?}", self.path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove staged file {:?}: {}", self.path, e),
        }
    }
}

fn default_staging_base() -> PathBuf {
    #[cfg(unix)]
    {
        use crate::constants::default_constants::SHM_DIR;
        let shm_dir = PathBuf::from(SHM_DIR);
        if shm_dir.is_dir() {
            return shm_dir;
        }
    }
    std::env::temp_dir()
}

impl TempPathProvider {
    /// Creates the private directory under `base`, or under `/dev/shm` (when
    /// available) / the system temp dir when `base` is `None`.
    pub fn new(base: Option<&Path>) -> Result<Self> {
        let base = base.map(Path::to_path_buf).unwrap_or_else(default_staging_base);
        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_DIR_PREFIX);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o700));
        }
        let dir = builder.tempdir_in(&base)?;
        debug!("Staging directory: {:?}", dir.path());
        Ok(TempPathProvider { dir, counter: AtomicU64::new(0) })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// True when nothing is currently staged.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(fs::read_dir(self.dir.path())?.next().is_none())
    }

    pub fn acquire(&self) -> ScopedPath {
        loop {
            let n = self.counter.fetch_add(1, Ordering::Relaxed);
            let path =
                self.dir.path().join(format!(".{}-{}", n, rand_alphabet_string(STAGING_NAME_LENGTH)));
            if !path.exists() {
                return ScopedPath { path };
            }
        }
    }

    /// Runs `scope` with a fresh staging path. The path is removed afterwards
    /// whether `scope` returns `Ok`, `Err` or unwinds; a failed removal is only
    /// logged.
    pub fn create<T, F>(&self, scope: F) -> Result<T>
    where
        F: FnOnce(&Path) -> Result<T>,
    {
        let staged = self.acquire();
        scope(staged.path())
    }
}

/// Writes `data` to a staging path that must not exist yet; on unix the file
/// is readable by the owner only.
pub fn write_private(path: &Path, data: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.flush()?;
    Ok(())
}
