//! Activation operations - `use`, `on`, `off`
//!
//! `use` points the global npm link at an installed version. `on` brings
//! management up from the off state, first remembering any foreign global
//! install so `off` can put it back later. The config record is written
//! on every transition that changes it; the active version itself is
//! never persisted, only derived from the link.

use crate::core::version::{self, VersionSpec};
use crate::npm::NpmClient;
use crate::store::Lock;
use crate::ui::Reporter;

use super::{VersionError, VersionManager};

impl<C: NpmClient, R: Reporter> VersionManager<C, R> {
    /// Activate an installed version globally, recording it as last used.
    /// Returns the canonical version that was linked.
    pub async fn use_version(&mut self, requested: &str) -> Result<String, VersionError> {
        let _lock = Lock::acquire(&self.root)?;
        self.use_unlocked(requested).await
    }

    /// Switch management on: capture any foreign install, then activate
    /// the last used version, falling back to the highest installed one.
    pub async fn on(&mut self) -> Result<String, VersionError> {
        let _lock = Lock::acquire(&self.root)?;

        if self.current().await?.is_some() {
            return Err(VersionError::AlreadyOn);
        }
        let installed = self.list()?;
        if installed.is_empty() {
            return Err(VersionError::NoVersionsInstalled);
        }

        self.reporter.begin("Checking system cordova installation");
        if let Some(target) = self.read_global_link().await? {
            // remember the foreign install so off() can put it back
            self.config.system = Some(target);
            self.config.save()?;
        }
        self.reporter.finish();

        let version = match self.config.last_used.clone() {
            Some(last) if installed.iter().any(|v| v == &last) => last,
            Some(last) => {
                let fallback = version::pick_highest(&installed)
                    .ok_or(VersionError::NoVersionsInstalled)?
                    .to_string();
                self.reporter.warning(&format!(
                    "last used cordova {last} is no longer installed; activating {fallback}"
                ));
                fallback
            }
            None => {
                tracing::debug!("no last used version recorded, activating highest installed");
                version::pick_highest(&installed)
                    .ok_or(VersionError::NoVersionsInstalled)?
                    .to_string()
            }
        };

        self.use_unlocked(&version).await
    }

    /// Switch management off: drop the global link and, when a system
    /// install was captured, link it back in place.
    pub async fn off(&self) -> Result<(), VersionError> {
        let _lock = Lock::acquire(&self.root)?;
        self.off_unlocked().await
    }

    async fn use_unlocked(&mut self, requested: &str) -> Result<String, VersionError> {
        let version = VersionSpec::parse(requested)
            .filter(|spec| matches!(spec, VersionSpec::Exact(_)))
            .ok_or_else(|| VersionError::InvalidVersion(requested.to_string()))?
            .canonical();

        if !self.is_installed(&version)? {
            return Err(VersionError::NotInstalled(version));
        }

        self.reporter
            .begin(&format!("Linking cordova {version} to global package location"));
        self.npm.link_global(&self.version_dir(&version)).await?;
        self.reporter.finish();

        self.config.last_used = Some(version.clone());
        self.config.save()?;
        Ok(version)
    }

    pub(super) async fn off_unlocked(&self) -> Result<(), VersionError> {
        let Some(current) = self.current().await? else {
            return Err(VersionError::AlreadyOff);
        };

        self.reporter
            .begin(&format!("Removing global link to cordova {current}"));
        self.npm.uninstall_global(crate::PACKAGE).await?;

        // the captured system install survives every off cycle; it is
        // recorded once and reapplied each time
        if let Some(system) = self.config.system.clone() {
            self.reporter
                .update("Linking system cordova version globally");
            self.npm.link_global(&system).await?;
        }
        self.reporter.finish();
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::fs;

    use crate::ops::VersionError;
    use crate::ops::testing::Rig;
    use crate::store::Config;

    #[tokio::test]
    async fn test_use_links_and_records_last_used() {
        let rig = Rig::new();
        rig.put_version("9.0.0");

        let mut cvm = rig.manager();
        let activated = cvm.use_version("9.0.0").await.unwrap();

        assert_eq!(activated, "9.0.0");
        assert_eq!(cvm.current().await.unwrap(), Some("9.0.0".to_string()));
        assert_eq!(
            Config::load(&rig.root).last_used,
            Some("9.0.0".to_string())
        );
    }

    #[tokio::test]
    async fn test_use_missing_version_makes_no_link() {
        let rig = Rig::new();

        let err = rig.manager().use_version("9.0.0").await.unwrap_err();
        assert_eq!(err.to_string(), "cordova@9.0.0 is not installed");
        assert!(rig.npm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_use_rejects_latest() {
        let rig = Rig::new();
        rig.put_version("9.0.0");

        let err = rig.manager().use_version("latest").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Version latest is not valid version identifier"
        );
    }

    #[tokio::test]
    async fn test_use_switches_between_versions() {
        let rig = Rig::new();
        rig.put_version("8.1.2");
        rig.put_version("9.0.0");

        let mut cvm = rig.manager();
        cvm.use_version("8.1.2").await.unwrap();
        cvm.use_version("9.0.0").await.unwrap();

        assert_eq!(cvm.current().await.unwrap(), Some("9.0.0".to_string()));
        assert_eq!(
            Config::load(&rig.root).last_used,
            Some("9.0.0".to_string())
        );
    }

    #[tokio::test]
    async fn test_use_loose_identifier() {
        let rig = Rig::new();
        rig.put_version("9.0.0");

        let mut cvm = rig.manager();
        let activated = cvm.use_version("=v9.0.0").await.unwrap();

        assert_eq!(activated, "9.0.0");
        assert_eq!(cvm.current().await.unwrap(), Some("9.0.0".to_string()));
    }

    #[tokio::test]
    async fn test_on_when_already_on() {
        let rig = Rig::new();
        rig.put_version("9.0.0");

        let mut cvm = rig.manager();
        cvm.use_version("9.0.0").await.unwrap();

        let err = cvm.on().await.unwrap_err();
        assert_eq!(err.to_string(), "Already on");
    }

    #[tokio::test]
    async fn test_on_with_nothing_installed() {
        let rig = Rig::new();

        let err = rig.manager().on().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "no versions installed. Install at least one version first"
        );
    }

    #[tokio::test]
    async fn test_on_prefers_last_used() {
        let rig = Rig::new();
        rig.put_version("8.1.2");
        rig.put_version("9.0.0");

        let mut config = Config::load(&rig.root);
        config.last_used = Some("8.1.2".to_string());
        config.save().unwrap();

        let mut cvm = rig.manager();
        let activated = cvm.on().await.unwrap();

        assert_eq!(activated, "8.1.2");
        assert_eq!(cvm.current().await.unwrap(), Some("8.1.2".to_string()));
    }

    #[tokio::test]
    async fn test_on_falls_back_to_highest_installed() {
        let rig = Rig::new();
        rig.put_version("1.2.0");
        rig.put_version("1.10.0");
        rig.put_version("1.3.0");

        let mut cvm = rig.manager();
        let activated = cvm.on().await.unwrap();

        // semver order, not string order
        assert_eq!(activated, "1.10.0");
    }

    #[tokio::test]
    async fn test_on_stale_last_used_falls_back() {
        let rig = Rig::new();
        rig.put_version("8.1.2");
        rig.put_version("9.0.0");

        let mut config = Config::load(&rig.root);
        config.last_used = Some("7.0.0".to_string());
        config.save().unwrap();

        let mut cvm = rig.manager();
        let activated = cvm.on().await.unwrap();

        assert_eq!(activated, "9.0.0");
    }

    #[tokio::test]
    async fn test_on_captures_foreign_install_and_off_restores_it() {
        let rig = Rig::new();
        rig.put_version("9.0.0");
        let foreign = rig.foreign_install().canonicalize().unwrap();

        let link = rig.npm.global_link();
        fs::create_dir_all(link.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(&foreign, &link).unwrap();

        let mut cvm = rig.manager();
        cvm.on().await.unwrap();

        assert_eq!(cvm.current().await.unwrap(), Some("9.0.0".to_string()));
        assert_eq!(Config::load(&rig.root).system.as_deref(), Some(&*foreign));

        cvm.off().await.unwrap();

        assert_eq!(cvm.current().await.unwrap(), None);
        assert_eq!(link.canonicalize().unwrap(), foreign);
        let calls = rig.npm.calls();
        assert!(calls.contains(&"uninstall cordova --global".to_string()));
        assert_eq!(calls.last(), Some(&format!("link {}", foreign.display())));
    }

    #[tokio::test]
    async fn test_system_install_survives_every_cycle() {
        let rig = Rig::new();
        rig.put_version("9.0.0");
        let foreign = rig.foreign_install();

        let link = rig.npm.global_link();
        fs::create_dir_all(link.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(&foreign, &link).unwrap();

        let mut cvm = rig.manager();
        cvm.on().await.unwrap();
        cvm.off().await.unwrap();
        cvm.on().await.unwrap();
        cvm.off().await.unwrap();

        assert_eq!(
            link.canonicalize().unwrap(),
            foreign.canonicalize().unwrap()
        );
        assert!(Config::load(&rig.root).system.is_some());
    }

    #[tokio::test]
    async fn test_on_records_no_system_without_a_link() {
        let rig = Rig::new();
        rig.put_version("9.0.0");

        let mut cvm = rig.manager();
        cvm.on().await.unwrap();

        let raw = fs::read_to_string(rig.root.join(".cvmrc")).unwrap();
        assert!(!raw.contains("system"));
    }

    #[tokio::test]
    async fn test_off_when_already_off() {
        let rig = Rig::new();

        let err = rig.manager().off().await.unwrap_err();
        assert_eq!(err.to_string(), "Already off");
    }

    #[tokio::test]
    async fn test_off_drops_link_and_keeps_last_used() {
        let rig = Rig::new();
        rig.put_version("9.0.0");

        let mut cvm = rig.manager();
        cvm.use_version("9.0.0").await.unwrap();
        cvm.off().await.unwrap();

        assert_eq!(cvm.current().await.unwrap(), None);
        assert!(!rig.npm.global_link().is_symlink());
        // the record survives so on() can bring the same version back
        assert_eq!(
            Config::load(&rig.root).last_used,
            Some("9.0.0".to_string())
        );

        let err = cvm.off().await.unwrap_err();
        assert!(matches!(err, VersionError::AlreadyOff));
    }
}
