//! On command

use anyhow::Result;
use cvm::npm::NpmCli;
use cvm::ops::VersionManager;
use cvm::ui::SpinnerReporter;

/// Switch management on, activating the last used or highest installed
/// version.
pub async fn on() -> Result<()> {
    let npm = NpmCli::locate()?;
    let mut manager = VersionManager::new(cvm::cvm_home(), npm, SpinnerReporter::new());

    let activated = manager.on().await?;
    println!("Now using cordova {activated}");
    Ok(())
}
