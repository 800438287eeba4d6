//! Version manager core - the state machine over the managed root
//!
//! All state is derived on demand: the installed set is the set of
//! subdirectories under the managed root, and the active version is
//! whatever the global npm link currently resolves to. Nothing caches
//! either one between calls, so link reality and reported state cannot
//! drift. The only persisted record is the two-field config file.
//!
//! Mutating operations (`fetch`, `install`, `uninstall`, `use`, `on`,
//! `off`) serialize across processes through a lock file under the root.

pub mod error;
mod install;
mod remove;
mod switch;

pub use error::VersionError;

use std::fs;
use std::io;
use std::path::{Component, PathBuf};

use crate::PACKAGE;
use crate::npm::NpmClient;
use crate::store::Config;
use crate::ui::Reporter;

/// Orchestrates version-state transitions against the managed root,
/// driving npm through the injected client.
pub struct VersionManager<C, R> {
    root: PathBuf,
    npm: C,
    reporter: R,
    config: Config,
}

impl<C: NpmClient, R: Reporter> VersionManager<C, R> {
    /// Build a manager over `root`, loading the config record once.
    pub fn new(root: PathBuf, npm: C, reporter: R) -> Self {
        let config = Config::load(&root);
        tracing::debug!("managed root {}", root.display());
        Self {
            root,
            npm,
            reporter,
            config,
        }
    }

    /// The active version: the installed version the global link resolves
    /// to, or `None` when the link is absent, foreign, or points at
    /// something no longer installed. Never fails for a missing link.
    pub async fn current(&self) -> Result<Option<String>, VersionError> {
        let Some(target) = self.read_global_link().await? else {
            return Ok(None);
        };

        let root = fs::canonicalize(&self.root).unwrap_or_else(|_| self.root.clone());
        let Ok(rel) = target.strip_prefix(&root) else {
            return Ok(None);
        };

        // only a direct child of the root names a managed version
        let mut components = rel.components();
        let name = match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => name.to_string_lossy().into_owned(),
            _ => return Ok(None),
        };

        if self.is_installed(&name)? {
            Ok(Some(name))
        } else {
            Ok(None)
        }
    }

    /// Installed versions, in filesystem enumeration order. An absent
    /// root is the first-run case and yields an empty set.
    pub fn list(&self) -> Result<Vec<String>, VersionError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry?;
            match fs::metadata(entry.path()) {
                Ok(meta) if meta.is_dir() => {
                    versions.push(entry.file_name().to_string_lossy().into_owned());
                }
                _ => {}
            }
        }
        Ok(versions)
    }

    /// Versions published upstream for the managed package.
    pub async fn available(&self) -> Result<Vec<String>, VersionError> {
        Ok(self.npm.info(PACKAGE).await?.versions)
    }

    fn is_installed(&self, version: &str) -> Result<bool, VersionError> {
        Ok(self.list()?.iter().any(|v| v == version))
    }

    fn version_dir(&self, version: &str) -> PathBuf {
        self.root.join(version)
    }

    /// Real path the global package location currently resolves to, if
    /// any. Resolution failure means no link, which is not an error.
    async fn read_global_link(&self) -> Result<Option<PathBuf>, VersionError> {
        let prefix = self.npm.config_get("prefix").await?;
        let link = crate::npm::global_package_dir(&prefix, PACKAGE);
        Ok(fs::canonicalize(&link).ok())
    }
}
