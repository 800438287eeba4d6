//! Archive extraction module
//!
//! Unpacks the gzipped tarballs `npm pack` produces. Registry tarballs wrap
//! everything in a single top-level directory (conventionally `package/`),
//! so extraction strips the first path component while it streams entries.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Archive error: {0}")]
    Archive(String),
}

/// Extract a tar.gz archive into `dest_dir`, stripping the top-level
/// directory from every entry. Returns the number of files written.
pub fn extract_tar_gz(archive_path: &Path, dest_dir: &Path) -> Result<usize, ExtractError> {
    let file = File::open(archive_path)?;
    let reader = BufReader::new(file);
    let gz_decoder = flate2::read::GzDecoder::new(reader);

    extract_tar(gz_decoder, dest_dir)
}

fn extract_tar<R: Read>(reader: R, dest_dir: &Path) -> Result<usize, ExtractError> {
    fs::create_dir_all(dest_dir)?;

    let mut archive = tar::Archive::new(reader);
    let mut count = 0;

    for entry in archive.entries()? {
        let mut entry = entry?;
        let entry_path = entry.path()?;

        if entry.header().entry_type().is_dir() {
            continue;
        }

        // Strip the wrapping "package/" component; entries without anything
        // beneath it carry no payload
        let relative_path: PathBuf = entry_path.components().skip(1).collect();
        if relative_path.as_os_str().is_empty() {
            continue;
        }

        // Sanitize path to prevent Zip Slip; `..` or rooted components
        // would land entries outside the destination
        if relative_path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(ExtractError::Archive(format!(
                "Invalid path in archive: {}",
                entry_path.display()
            )));
        }

        let absolute_path = dest_dir.join(&relative_path);

        if let Some(parent) = absolute_path.parent() {
            fs::create_dir_all(parent)?;
        }

        entry.unpack(&absolute_path)?;
        count += 1;
    }

    Ok(count)
}
