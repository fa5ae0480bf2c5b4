use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Output};

use super::{Tmux, TmuxSession};

/// Characters tmux does not accept in session names
const INVALID_NAME_CHARS: [char; 2] = ['.', ':'];

/// Replace characters tmux rejects in session names with `_`
pub fn sanitize_session_name(name: &str) -> String {
    name.replace(INVALID_NAME_CHARS, "_")
}

/// Client for interacting with tmux
#[derive(Debug, Default)]
pub struct TmuxClient;

impl TmuxClient {
    /// Creates a new TmuxClient
    pub fn new() -> Self {
        Self
    }

    /// Check if the current process runs inside tmux
    pub fn is_inside_tmux(&self) -> bool {
        std::env::var_os("TMUX").is_some()
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        let output = Command::new("tmux")
            .args(args)
            .output()
            .with_context(|| format!("Failed to execute tmux {}", args[0]))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("tmux {} failed: {}", args[0], stderr.trim());
        }

        Ok(output)
    }
}

impl Tmux for TmuxClient {
    fn list_sessions(&self) -> Result<Vec<TmuxSession>> {
        let output = Command::new("tmux")
            .args(["list-sessions", "-F", TmuxSession::FORMAT])
            .output()
            .context("Failed to execute tmux list-sessions")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // No server simply means no sessions yet
            if stderr.contains("no server running") || stderr.contains("error connecting to") {
                return Ok(Vec::new());
            }
            anyhow::bail!("tmux list-sessions failed: {}", stderr.trim());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut sessions: Vec<TmuxSession> = stdout.lines().filter_map(TmuxSession::parse).collect();
        sessions.sort_by(|a, b| b.last_attached.cmp(&a.last_attached));
        Ok(sessions)
    }

    fn has_session(&self, name: &str) -> bool {
        let target = format!("={}", name);
        Command::new("tmux")
            .args(["has-session", "-t", &target])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn new_session(&self, name: &str, path: &Path) -> Result<()> {
        let path = path.to_string_lossy();
        self.run(&["new-session", "-d", "-s", name, "-c", &path])
            .with_context(|| format!("Failed to create tmux session {}", name))?;
        Ok(())
    }

    fn new_window(&self, session: &str, window: &str, path: &Path) -> Result<()> {
        let path = path.to_string_lossy();
        let target = format!("{}:", session);
        self.run(&["new-window", "-d", "-t", &target, "-n", window, "-c", &path])
            .with_context(|| format!("Failed to create window {} in {}", window, session))?;
        Ok(())
    }

    fn send_keys(&self, target: &str, keys: &str) -> Result<()> {
        self.run(&["send-keys", "-t", target, keys, "Enter"])
            .with_context(|| format!("Failed to send keys to {}", target))?;
        Ok(())
    }

    fn switch_or_attach(&self, name: &str, switch: bool) -> Result<()> {
        let subcommand = if switch || self.is_inside_tmux() {
            "switch-client"
        } else {
            "attach-session"
        };
        let target = format!("={}", name);

        // Attaching takes over the terminal, so stdio is inherited
        let status = Command::new("tmux")
            .args([subcommand, "-t", &target])
            .status()
            .with_context(|| format!("Failed to execute tmux {}", subcommand))?;

        if !status.success() {
            anyhow::bail!("tmux {} failed for {}", subcommand, name);
        }

        Ok(())
    }
}
