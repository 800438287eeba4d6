//! Install command

use anyhow::Result;
use cvm::npm::NpmCli;
use cvm::ops::VersionManager;
use cvm::ui::SpinnerReporter;

/// Download a version into the managed root and install its dependencies.
pub async fn install(version: &str) -> Result<()> {
    let npm = NpmCli::locate()?;
    let manager = VersionManager::new(cvm::cvm_home(), npm, SpinnerReporter::new());

    let installed = manager.install(version).await?;
    println!("Installed cordova {installed}");
    Ok(())
}
