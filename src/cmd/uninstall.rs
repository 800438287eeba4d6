//! Uninstall command

use anyhow::Result;
use cvm::npm::NpmCli;
use cvm::ops::VersionManager;
use cvm::ui::SpinnerReporter;

/// Delete an installed version, unlinking it first if it is active.
pub async fn uninstall(version: &str) -> Result<()> {
    let npm = NpmCli::locate()?;
    let manager = VersionManager::new(cvm::cvm_home(), npm, SpinnerReporter::new());

    let removed = manager.uninstall(version).await?;
    println!("Removed cordova {removed}");
    Ok(())
}
