//! List command

use anyhow::Result;
use cvm::npm::NpmCli;
use cvm::ops::VersionManager;
use cvm::ui::NullReporter;

/// Print installed versions (the active one starred), or the published
/// set when `available` is requested.
pub async fn list(available: bool) -> Result<()> {
    let npm = NpmCli::locate()?;
    let manager = VersionManager::new(cvm::cvm_home(), npm, NullReporter);

    if available {
        for version in manager.available().await? {
            println!("    {version}");
        }
        return Ok(());
    }

    let current = manager.current().await?;
    println!("Installed versions:");
    for version in manager.list()? {
        let marker = if current.as_deref() == Some(version.as_str()) {
            "  * "
        } else {
            "    "
        };
        println!("{marker}{version}");
    }
    Ok(())
}
