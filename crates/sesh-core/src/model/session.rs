use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Where a session entry was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionSource {
    /// Live tmux session
    Tmux,
    /// Directory tracked by zoxide
    Zoxide,
    /// Session declared in the config file
    Config,
    /// GitHub repository (cloned or not)
    #[serde(rename = "github")]
    GitHub,
}

impl SessionSource {
    /// Tag used as the catalog key prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionSource::Tmux => "tmux",
            SessionSource::Zoxide => "zoxide",
            SessionSource::Config => "config",
            SessionSource::GitHub => "github",
        }
    }

    /// Catalog key for a name from this source (`<tag>:<name>`)
    pub fn key(&self, name: &str) -> String {
        format!("{}:{}", self.as_str(), name)
    }
}

impl fmt::Display for SessionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A repository that still has to be cloned before its session can start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingClone {
    /// Clone URL (SSH or HTTPS)
    pub url: String,
    /// Local directory the clone lands in
    pub target: PathBuf,
}

impl PendingClone {
    /// Shell form of the clone, shown as the startup command
    pub fn command(&self) -> String {
        format!(
            "git clone {} {} && cd {}",
            self.url,
            self.target.display(),
            self.target.display()
        )
    }
}

/// A single entry in the session list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Source the entry came from
    pub src: SessionSource,
    /// Display name
    pub name: String,
    /// Working directory (for un-cloned repos: where the clone will land)
    pub path: PathBuf,
    /// Command run when the session is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_command: Option<String>,
    /// Command used to preview the session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_command: Option<String>,
    /// Suppress the startup command (including the default one)
    #[serde(default)]
    pub disable_startup_command: bool,
    /// Session is managed by tmuxinator
    #[serde(default)]
    pub tmuxinator: bool,
    /// Number of attached tmux clients
    #[serde(default)]
    pub attached: u32,
    /// Number of tmux windows
    #[serde(default)]
    pub windows: u32,
    /// Windows declared in the config file
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub window_names: Vec<String>,
    /// zoxide frecency score
    #[serde(default)]
    pub score: f64,
    /// Clone still to perform before the path exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_clone: Option<PendingClone>,
}

impl Session {
    /// Create a bare session with only source, name and path set
    pub fn new(src: SessionSource, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            src,
            name: name.into(),
            path: path.into(),
            startup_command: None,
            preview_command: None,
            disable_startup_command: false,
            tmuxinator: false,
            attached: 0,
            windows: 0,
            window_names: Vec::new(),
            score: 0.0,
            pending_clone: None,
        }
    }

    /// Whether the path already exists locally
    pub fn is_materialized(&self) -> bool {
        self.pending_clone.is_none()
    }

    /// Mark a pending clone as done: path becomes the clone target and the
    /// clone command is dropped
    pub fn materialize(&mut self) {
        if let Some(pending) = self.pending_clone.take() {
            self.path = pending.target;
            self.startup_command = None;
        }
    }

    /// Name to use for the tmux session backing this entry
    ///
    /// GitHub entries use `<owner>/<repo>` from the clone path so the
    /// description suffix never ends up in the tmux name.
    pub fn tmux_name(&self) -> String {
        let raw = match self.src {
            SessionSource::GitHub => {
                let repo = self.path.file_name().map(|s| s.to_string_lossy());
                let owner = self
                    .path
                    .parent()
                    .and_then(|p| p.file_name())
                    .map(|s| s.to_string_lossy());
                match (owner, repo) {
                    (Some(owner), Some(repo)) => format!("{}/{}", owner, repo),
                    _ => self.name.clone(),
                }
            }
            _ => self.name.clone(),
        };
        crate::tmux::sanitize_session_name(&raw)
    }
}

/// Result of resolving a name to a session
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// The resolved session
    pub session: Session,
    /// A new tmux session has to be created
    pub new: bool,
    /// Register the path with zoxide after connecting
    pub add_to_zoxide: bool,
}

/// Options for connecting to a session
#[derive(Debug, Clone, Default)]
pub struct ConnectOpts {
    /// Always use `switch-client`, even outside tmux
    pub switch: bool,
    /// Command to run instead of the session's startup command
    pub command: Option<String>,
}

/// Options for cloning a repository
#[derive(Debug, Clone, Default)]
pub struct CloneOptions {
    /// Repository reference: `owner/repo`, a GitHub URL, or any git URL
    pub repo: String,
    /// Directory `git clone` runs in
    pub cmd_dir: Option<String>,
    /// Name of the directory the clone creates
    pub dir: Option<String>,
}
