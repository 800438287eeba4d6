//! cvm - Cordova Version Manager
//!
//! Installs released versions of the `cordova` npm package side by side
//! under a managed root and switches which one npm exposes globally.
//! The active version is never stored anywhere; it is derived each time
//! from where the global npm link points, so reported state cannot
//! drift from link reality. A pre-existing global install is remembered
//! and linked back whenever management is switched off.
//!
//! # Directory Layout
//!
//! ```text
//! ~/.cvm/
//! ├── 8.1.2/      # One unpacked distribution per installed version
//! ├── 9.0.0/
//! ├── .cvmrc      # Config record (lastUsed, system)
//! └── .cvm.lock   # Held while a mutating operation runs
//! ```

pub mod core;
pub mod io;
pub mod npm;
pub mod ops;
pub mod store;
pub mod ui;

// Re-exports for convenience
pub use ops::{VersionError, VersionManager};

use dirs::home_dir;
use std::path::PathBuf;

/// The single npm package this tool manages.
pub const PACKAGE: &str = "cordova";

/// Returns the managed root directory, or None if the user's home cannot
/// be resolved.
pub fn try_cvm_home() -> Option<PathBuf> {
    if let Ok(val) = std::env::var("CVM_HOME") {
        return Some(PathBuf::from(val));
    }
    home_dir().map(|h| h.join(".cvm"))
}

/// Returns the canonical cvm root directory (`~/.cvm`).
///
/// # Panics
/// Panics if the home directory cannot be determined.
pub fn cvm_home() -> PathBuf {
    try_cvm_home().expect("Could not determine home directory")
}
