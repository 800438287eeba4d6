//! Domain-specific errors for version operations

use crate::io::extract::ExtractError;
use crate::npm::NpmError;
use crate::store::LockError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Version {0} is not valid version identifier")]
    InvalidVersion(String),

    #[error("cordova@{0} is already installed")]
    AlreadyInstalled(String),

    #[error("cordova@{0} is not installed")]
    NotInstalled(String),

    #[error("cordova@{0} does not exist")]
    VersionNotFound(String),

    #[error("Already on")]
    AlreadyOn,

    #[error("Already off")]
    AlreadyOff,

    #[error("no versions installed. Install at least one version first")]
    NoVersionsInstalled,

    #[error(transparent)]
    Npm(#[from] NpmError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
