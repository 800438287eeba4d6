//! Persistent manager config - the `.cvmrc` file
//!
//! A two-field JSON record colocated with the managed root:
//!
//! ```text
//! {
//!   "lastUsed": "9.0.0",
//!   "system": "/usr/local/lib/node_modules/cordova"
//! }
//! ```
//!
//! `lastUsed` is the version most recently activated; `system` is the real
//! path a foreign global install resolved to when management first took
//! over, kept so `off` can restore it. A missing or unparsable file is
//! treated as an empty config, never as a failure.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Config file name, relative to the managed root.
pub const FILE_NAME: &str = ".cvmrc";

/// In-memory view of the config record, loaded once at manager
/// construction and persisted after each mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Version identifier last explicitly activated via `use`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used: Option<String>,

    /// Real path of the foreign global install preempted at `on`-time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<PathBuf>,

    #[serde(skip)]
    path: PathBuf,
}

impl Config {
    /// Load the config stored under `root`, defaulting to empty when the
    /// file is missing or does not parse.
    pub fn load(root: &Path) -> Self {
        let path = root.join(FILE_NAME);
        let mut config = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("ignoring unparsable config {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("ignoring unreadable config {}: {e}", path.display());
                Self::default()
            }
        };
        config.path = path;
        config
    }

    /// Persist the record as pretty-printed JSON.
    pub fn save(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&self.path, json)
    }
}
