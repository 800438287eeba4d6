//! Off command

use anyhow::Result;
use cvm::npm::NpmCli;
use cvm::ops::VersionManager;
use cvm::ui::SpinnerReporter;

/// Drop the global link, restoring any recorded system install.
pub async fn off() -> Result<()> {
    let npm = NpmCli::locate()?;
    let manager = VersionManager::new(cvm::cvm_home(), npm, SpinnerReporter::new());

    manager.off().await?;
    println!("Management off");
    Ok(())
}
