//! npm subprocess surface
//!
//! Everything the manager needs from npm: registry metadata, tarball
//! caching, dependency installs, and global link management. The
//! [`NpmClient`] trait keeps the core testable against a fake; [`NpmCli`]
//! is the real subprocess-backed client.

pub mod cli;

pub use cli::NpmCli;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NpmError {
    #[error("npm not found on PATH (is Node.js installed?)")]
    NotFound,

    #[error("failed to run npm {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("npm {command} failed with status {status}: {stderr}")]
    Failed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("unexpected output from npm {command}: {detail}")]
    Parse { command: String, detail: String },
}

/// Registry metadata subset from `npm info --json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NpmInfo {
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: DistTags,

    /// Published versions. npm collapses a single-element list to a bare
    /// string, so deserialization accepts both shapes.
    #[serde(default, deserialize_with = "one_or_many")]
    pub versions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistTags {
    #[serde(default)]
    pub latest: Option<String>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(v) => vec![v],
        OneOrMany::Many(vs) => vs,
    })
}

/// Operations the version manager drives against npm.
#[async_trait::async_trait]
pub trait NpmClient: Send + Sync {
    /// Registry metadata for `package`: latest tag plus published versions.
    async fn info(&self, package: &str) -> Result<NpmInfo, NpmError>;

    /// Value of an npm config key, e.g. `prefix`.
    async fn config_get(&self, key: &str) -> Result<String, NpmError>;

    /// Download `package@version` into npm's cache and return the path of
    /// the cached tarball.
    async fn cache_add(&self, package: &str, version: &str) -> Result<PathBuf, NpmError>;

    /// Run a production dependency install inside `dir`.
    async fn install_deps(&self, dir: &Path) -> Result<(), NpmError>;

    /// Create or replace the global link for the package located at `dir`.
    async fn link_global(&self, dir: &Path) -> Result<(), NpmError>;

    /// Remove the global install or link of `package`.
    async fn uninstall_global(&self, package: &str) -> Result<(), NpmError>;
}

/// Directory a global package lives in under the configured npm prefix.
///
/// Unix prefixes nest globals under `lib/node_modules`; Windows puts them
/// directly under `node_modules`.
pub fn global_package_dir(prefix: &str, package: &str) -> PathBuf {
    #[cfg(windows)]
    {
        Path::new(prefix).join("node_modules").join(package)
    }
    #[cfg(not(windows))]
    {
        Path::new(prefix).join("lib").join("node_modules").join(package)
    }
}
