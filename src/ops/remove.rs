//! Uninstall operation
//!
//! Deletes a version directory from the managed root. When the removed
//! version is the active one, management is switched off first so the
//! global link never dangles at a deleted directory.

use std::fs;

use crate::core::version::VersionSpec;
use crate::npm::NpmClient;
use crate::store::Lock;
use crate::ui::Reporter;

use super::{VersionError, VersionManager};

impl<C: NpmClient, R: Reporter> VersionManager<C, R> {
    /// Remove an installed version from the root. Returns the canonical
    /// version that was deleted.
    pub async fn uninstall(&self, requested: &str) -> Result<String, VersionError> {
        let _lock = Lock::acquire(&self.root)?;

        let version = VersionSpec::parse(requested)
            .filter(|spec| matches!(spec, VersionSpec::Exact(_)))
            .ok_or_else(|| VersionError::InvalidVersion(requested.to_string()))?
            .canonical();

        if !self.is_installed(&version)? {
            return Err(VersionError::NotInstalled(version));
        }

        if self.current().await?.as_deref() == Some(version.as_str()) {
            self.off_unlocked().await?;
        }

        self.reporter
            .begin(&format!("Removing installed cordova {version}"));
        let dir = self.version_dir(&version);
        tokio::task::spawn_blocking(move || fs::remove_dir_all(&dir))
            .await
            .map_err(|e| VersionError::Other(format!("Task panic: {e}")))??;
        self.reporter.finish();

        tracing::debug!("removed cordova {version}");
        Ok(version)
    }
}
