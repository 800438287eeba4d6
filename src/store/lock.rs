//! Cross-process lock over the managed root
//!
//! Mutating operations hold an exclusive lock file so two invocations
//! racing against the same root cannot interleave config writes or leave a
//! half-populated version directory behind each other's backs. The lock is
//! advisory: a `create_new` lock file holding the owner's pid, removed on
//! drop. A file left behind by a killed process must be removed by hand.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Lock file name, relative to the managed root.
pub const FILE_NAME: &str = ".cvm.lock";

#[derive(Error, Debug)]
pub enum LockError {
    #[error("another cvm process (pid {pid}) holds {}; remove it if that process is gone", .path.display())]
    Busy { pid: String, path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Held exclusive lock. Released when dropped.
#[derive(Debug)]
pub struct Lock {
    path: PathBuf,
}

impl Lock {
    /// Acquire the lock under `root`, creating the root if needed.
    pub fn acquire(root: &Path) -> Result<Self, LockError> {
        fs::create_dir_all(root)?;
        let path = root.join(FILE_NAME);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                write!(file, "{}", std::process::id())?;
                tracing::debug!("acquired lock {}", path.display());
                Ok(Self { path })
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                let pid = fs::read_to_string(&path)
                    .map(|s| s.trim().to_string())
                    .unwrap_or_else(|_| "unknown".to_string());
                Err(LockError::Busy { pid, path })
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for Lock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!("failed to release lock {}: {e}", self.path.display());
        }
    }
}
