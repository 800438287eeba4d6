//! Subprocess-backed npm client
//!
//! Each call spawns one `npm` invocation with piped stdio and waits for it
//! to finish. Non-zero exits surface as [`NpmError::Failed`] carrying the
//! captured stderr; there are no retries.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::LazyLock;

use regex::Regex;
use tokio::process::Command;

use super::{NpmClient, NpmError, NpmInfo};

/// `npm cache add --verbose` logs one `afterAdd` line per cached tarball,
/// naming the metadata file next to it.
static AFTER_ADD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)npm verb afterAdd (.*)[\\/]package[\\/]package\.json written")
        .expect("valid regex")
});

/// Real npm client. Resolves the executable once at construction.
#[derive(Debug, Clone)]
pub struct NpmCli {
    program: PathBuf,
}

struct CommandOutput {
    stdout: String,
    stderr: String,
}

impl NpmCli {
    /// Locate `npm` on PATH.
    pub fn locate() -> Result<Self, NpmError> {
        let program = which::which("npm").map_err(|_| NpmError::NotFound)?;
        tracing::debug!("using npm at {}", program.display());
        Ok(Self { program })
    }

    async fn run(&self, args: &[&str], cwd: Option<&Path>) -> Result<CommandOutput, NpmError> {
        let command = args.join(" ");
        tracing::debug!(cwd = ?cwd, "running npm {command}");

        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|source| NpmError::Spawn {
            command: command.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(NpmError::Failed {
                command,
                status: output.status.code().unwrap_or(-1),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}

/// Pull the cached package directory out of a verbose `cache add`
/// transcript. Returns the path prefix of the `afterAdd` line.
fn parse_after_add(transcript: &str) -> Option<&str> {
    AFTER_ADD
        .captures(transcript)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

#[async_trait::async_trait]
impl NpmClient for NpmCli {
    async fn info(&self, package: &str) -> Result<NpmInfo, NpmError> {
        let out = self.run(&["info", package, "--json"], None).await?;
        serde_json::from_str(out.stdout.trim()).map_err(|e| NpmError::Parse {
            command: format!("info {package}"),
            detail: e.to_string(),
        })
    }

    async fn config_get(&self, key: &str) -> Result<String, NpmError> {
        let out = self.run(&["config", "get", key], None).await?;
        Ok(out.stdout.trim().to_string())
    }

    async fn cache_add(&self, package: &str, version: &str) -> Result<PathBuf, NpmError> {
        let spec = format!("{package}@{version}");
        let out = self.run(&["cache", "add", &spec, "--verbose"], None).await?;

        // The verbose trail lands on stderr on current npm; older releases
        // wrote it to stdout, so scan both
        let combined = format!("{}{}", out.stdout, out.stderr);
        let cached_dir = parse_after_add(&combined).ok_or_else(|| NpmError::Parse {
            command: format!("cache add {spec}"),
            detail: "no afterAdd line in verbose output".to_string(),
        })?;

        Ok(Path::new(cached_dir).join("package.tgz"))
    }

    async fn install_deps(&self, dir: &Path) -> Result<(), NpmError> {
        self.run(&["install", "--prod"], Some(dir)).await?;
        Ok(())
    }

    async fn link_global(&self, dir: &Path) -> Result<(), NpmError> {
        self.run(&["link"], Some(dir)).await?;
        Ok(())
    }

    async fn uninstall_global(&self, package: &str) -> Result<(), NpmError> {
        self.run(&["uninstall", package, "--global"], None).await?;
        Ok(())
    }
}
