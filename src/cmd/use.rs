//! Use command

use anyhow::Result;
use cvm::npm::NpmCli;
use cvm::ops::VersionManager;
use cvm::ui::SpinnerReporter;

/// Point the global cordova at an installed version.
pub async fn use_version(version: &str) -> Result<()> {
    let npm = NpmCli::locate()?;
    let mut manager = VersionManager::new(cvm::cvm_home(), npm, SpinnerReporter::new());

    let activated = manager.use_version(version).await?;
    println!("Now using cordova {activated}");
    Ok(())
}
