mod client;
mod session;

use anyhow::Result;
use std::path::Path;

pub use client::{sanitize_session_name, TmuxClient};
pub use session::TmuxSession;

/// Operations sesh needs from tmux
pub trait Tmux {
    /// Sessions ordered by most recently attached first
    fn list_sessions(&self) -> Result<Vec<TmuxSession>>;

    /// Whether a session with this exact name exists
    fn has_session(&self, name: &str) -> bool;

    /// Create a detached session rooted at `path`
    fn new_session(&self, name: &str, path: &Path) -> Result<()>;

    /// Add a named window to a session
    fn new_window(&self, session: &str, window: &str, path: &Path) -> Result<()>;

    /// Type `keys` followed by Enter into the target
    fn send_keys(&self, target: &str, keys: &str) -> Result<()>;

    /// `switch-client` when inside tmux (or `switch`), otherwise `attach-session`
    fn switch_or_attach(&self, name: &str, switch: bool) -> Result<()>;
}
