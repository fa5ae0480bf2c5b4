//! Git operations.
//!
//! Uses the git CLI so the user's credentials, SSH keys and config apply.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Operations sesh needs from git
pub trait Git {
    /// Run `git clone <url> [dir]` inside `cmd_dir` (or the current
    /// directory) and return git's output
    fn clone(&self, url: &str, cmd_dir: Option<&Path>, dir: Option<&str>) -> Result<String>;
}

/// Client for the `git` binary
#[derive(Debug, Default)]
pub struct GitClient;

impl GitClient {
    pub fn new() -> Self {
        Self
    }
}

impl Git for GitClient {
    fn clone(&self, url: &str, cmd_dir: Option<&Path>, dir: Option<&str>) -> Result<String> {
        let mut cmd = Command::new("git");
        cmd.arg("clone").arg(url);
        if let Some(dir) = dir {
            cmd.arg(dir);
        }
        if let Some(cmd_dir) = cmd_dir {
            cmd.current_dir(cmd_dir);
        }

        let output = cmd.output().context("Failed to run git clone")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("git clone failed: {}", stderr.trim());
        }

        // git reports progress on stderr
        let mut out = String::from_utf8_lossy(&output.stdout).into_owned();
        out.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(out)
    }
}
