//! zoxide directory index wrapper.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// A directory known to zoxide
#[derive(Debug, Clone, PartialEq)]
pub struct ZoxideResult {
    /// Frecency score
    pub score: f64,
    /// Absolute directory path
    pub path: PathBuf,
}

impl ZoxideResult {
    /// Parse a `zoxide query --score` line (`  12.5 /path/to/dir`)
    pub fn parse(line: &str) -> Option<Self> {
        let (score, path) = line.trim_start().split_once(' ')?;
        let path = path.trim_start();
        if path.is_empty() {
            return None;
        }
        Some(Self {
            score: score.parse().ok()?,
            path: PathBuf::from(path),
        })
    }
}

/// Operations sesh needs from zoxide
pub trait Zoxide {
    /// Every tracked directory, highest score first
    fn list(&self) -> Result<Vec<ZoxideResult>>;

    /// Best match for a query, if any
    fn query(&self, name: &str) -> Result<Option<ZoxideResult>>;

    /// Record a visit to `path`
    fn add(&self, path: &Path) -> Result<()>;
}

/// Client for the `zoxide` binary
#[derive(Debug, Default)]
pub struct ZoxideClient;

impl ZoxideClient {
    pub fn new() -> Self {
        Self
    }
}

impl Zoxide for ZoxideClient {
    fn list(&self) -> Result<Vec<ZoxideResult>> {
        let output = Command::new("zoxide")
            .args(["query", "--list", "--score"])
            .output()
            .context("Failed to execute zoxide query")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("zoxide query failed: {}", stderr.trim());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().filter_map(ZoxideResult::parse).collect())
    }

    fn query(&self, name: &str) -> Result<Option<ZoxideResult>> {
        let output = Command::new("zoxide")
            .args(["query", "--score", "--", name])
            .output()
            .context("Failed to execute zoxide query")?;

        // zoxide exits non-zero when nothing matches
        if !output.status.success() {
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().find_map(ZoxideResult::parse))
    }

    fn add(&self, path: &Path) -> Result<()> {
        let output = Command::new("zoxide")
            .arg("add")
            .arg(path)
            .output()
            .context("Failed to execute zoxide add")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("zoxide add failed for {}: {}", path.display(), stderr.trim());
        }

        Ok(())
    }
}
