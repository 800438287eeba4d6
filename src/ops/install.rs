//! Fetch and install operations
//!
//! `fetch` resolves a requested identifier, pulls the tarball through
//! npm's cache, and unpacks it into its version directory. `install` is
//! the single-step form that additionally resolves dependencies inside
//! the new directory. Neither touches the active version or the config
//! record.

use crate::PACKAGE;
use crate::core::version::VersionSpec;
use crate::io::extract;
use crate::npm::{NpmClient, NpmError};
use crate::store::Lock;
use crate::ui::Reporter;

use super::{VersionError, VersionManager};

impl<C: NpmClient, R: Reporter> VersionManager<C, R> {
    /// Download and unpack `requested`, returning the concrete version it
    /// resolved to (meaningful when the input was `latest`).
    pub async fn fetch(&self, requested: &str) -> Result<String, VersionError> {
        let _lock = Lock::acquire(&self.root)?;
        let version = self.fetch_unlocked(requested).await?;
        self.reporter.finish();
        Ok(version)
    }

    /// Fetch plus a production dependency install inside the new version
    /// directory.
    pub async fn install(&self, requested: &str) -> Result<String, VersionError> {
        let _lock = Lock::acquire(&self.root)?;
        let version = self.fetch_unlocked(requested).await?;

        self.reporter
            .update("Installing downloaded cordova distribution");
        self.npm.install_deps(&self.version_dir(&version)).await?;
        self.reporter.finish();
        Ok(version)
    }

    async fn fetch_unlocked(&self, requested: &str) -> Result<String, VersionError> {
        let spec = VersionSpec::parse(requested)
            .ok_or_else(|| VersionError::InvalidVersion(requested.to_string()))?;

        let version = match &spec {
            VersionSpec::Latest => {
                let info = self.npm.info(PACKAGE).await?;
                info.dist_tags.latest.ok_or_else(|| NpmError::Parse {
                    command: format!("info {PACKAGE}"),
                    detail: "missing dist-tags.latest".to_string(),
                })?
            }
            VersionSpec::Exact(_) => spec.canonical(),
        };

        if self.is_installed(&version)? {
            return Err(VersionError::AlreadyInstalled(version));
        }

        // latest was just resolved against the registry, so only concrete
        // requests need an existence check
        if matches!(spec, VersionSpec::Exact(_)) && !self.available().await?.contains(&version) {
            return Err(VersionError::VersionNotFound(version));
        }

        self.reporter.begin(&format!("Fetching cordova {version}"));
        let tarball = self.npm.cache_add(PACKAGE, &version).await?;

        self.reporter.update("Unpacking cordova to cvm root");
        let dest = self.version_dir(&version);
        let count = tokio::task::spawn_blocking(move || extract::extract_tar_gz(&tarball, &dest))
            .await
            .map_err(|e| VersionError::Other(format!("Task panic: {e}")))??;
        tracing::debug!("unpacked {count} files for cordova {version}");

        Ok(version)
    }
}
