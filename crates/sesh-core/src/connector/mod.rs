//! Turns a name into a live tmux session.
//!
//! Strategies are tried in order (tmux, zoxide, config, github, directory)
//! until one knows the name. A name nobody knows is `Ok(None)`, not an error.

mod strategy;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::git::Git;
use crate::lister::Lister;
use crate::model::{ConnectOpts, Connection, Session, SessionSource};

pub use strategy::Strategy;

pub struct Connector {
    lister: Lister,
    git: Box<dyn Git>,
    strategies: Vec<Box<dyn Strategy>>,
}

impl Connector {
    pub fn new(lister: Lister, git: Box<dyn Git>) -> Self {
        Self {
            lister,
            git,
            strategies: strategy::default_strategies(),
        }
    }

    pub fn lister(&self) -> &Lister {
        &self.lister
    }

    pub fn git(&self) -> &dyn Git {
        self.git.as_ref()
    }

    /// Find the session for a name without touching tmux.
    ///
    /// GitHub repositories are cloned here, so a returned session always
    /// points at an existing directory.
    pub fn resolve(&self, name: &str) -> Result<Option<Connection>> {
        for strategy in &self.strategies {
            if let Some(connection) = strategy.resolve(self, name)? {
                debug!(
                    strategy = strategy.name(),
                    name,
                    path = %connection.session.path.display(),
                    "Resolved session"
                );
                return Ok(Some(connection));
            }
        }
        debug!(name, "No strategy matched");
        Ok(None)
    }

    /// Resolve a name, then create (if needed) and switch to its session
    pub fn connect(&self, name: &str, opts: &ConnectOpts) -> Result<Option<Connection>> {
        let Some(connection) = self.resolve(name)? else {
            return Ok(None);
        };
        self.establish(&connection, opts)
            .with_context(|| format!("Failed to connect to {}", connection.session.name))?;
        Ok(Some(connection))
    }

    fn establish(&self, connection: &Connection, opts: &ConnectOpts) -> Result<()> {
        let tmux = self.lister.tmux();
        let session = &connection.session;
        let tmux_name = session.tmux_name();

        if connection.new && !tmux.has_session(&tmux_name) {
            info!(session = %tmux_name, path = %session.path.display(), "Creating tmux session");
            tmux.new_session(&tmux_name, &session.path)?;
            for window in &session.window_names {
                tmux.new_window(&tmux_name, window, &session.path)?;
            }
            if let Some(command) = self.startup_command(session, opts) {
                tmux.send_keys(&tmux_name, &command)?;
            }
        }

        if connection.add_to_zoxide {
            if let Err(e) = self.lister.zoxide().add(&session.path) {
                warn!(path = %session.path.display(), error = %e, "Failed to add path to zoxide");
            }
        }

        tmux.switch_or_attach(&tmux_name, opts.switch)
    }

    /// `opts.command`, else the session's own command, else the default
    /// session command. Nothing when the session disables it.
    fn startup_command(&self, session: &Session, opts: &ConnectOpts) -> Option<String> {
        if let Some(command) = opts.command.as_deref().filter(|c| !c.is_empty()) {
            return Some(command.to_string());
        }
        if session.disable_startup_command || session.src == SessionSource::Tmux {
            return None;
        }
        session
            .startup_command
            .clone()
            .or_else(|| self.lister.settings().default_session.startup_command.clone())
            .filter(|c| !c.is_empty())
    }
}
