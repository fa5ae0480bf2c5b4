use anyhow::{Context, Result};
use std::fs;
use tracing::{debug, info};

use super::Connector;
use crate::model::{Connection, PendingClone, Session, SessionSource};

/// One way of turning a name into a connection
pub trait Strategy {
    /// Short name for logging
    fn name(&self) -> &'static str;

    /// `Ok(None)` when this strategy does not know the name
    fn resolve(&self, connector: &Connector, name: &str) -> Result<Option<Connection>>;
}

/// Strategies in the order they are tried
pub(crate) fn default_strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(TmuxStrategy),
        Box::new(ZoxideStrategy),
        Box::new(ConfigStrategy),
        Box::new(GitHubStrategy),
        Box::new(DirectoryStrategy),
    ]
}

/// Paths are left to the directory strategy
fn looks_like_path(name: &str) -> bool {
    name.starts_with('/') || name.starts_with('~') || name.starts_with('.')
}

/// Existing tmux session
struct TmuxStrategy;

impl Strategy for TmuxStrategy {
    fn name(&self) -> &'static str {
        "tmux"
    }

    fn resolve(&self, connector: &Connector, name: &str) -> Result<Option<Connection>> {
        Ok(connector
            .lister()
            .find_tmux_session(name)?
            .map(|session| Connection {
                session,
                new: false,
                add_to_zoxide: false,
            }))
    }
}

/// Best zoxide match for the name
struct ZoxideStrategy;

impl Strategy for ZoxideStrategy {
    fn name(&self) -> &'static str {
        "zoxide"
    }

    fn resolve(&self, connector: &Connector, name: &str) -> Result<Option<Connection>> {
        if looks_like_path(name) {
            return Ok(None);
        }

        let lister = connector.lister();
        let Some(result) = lister.zoxide().query(name)? else {
            return Ok(None);
        };

        let display = lister.home().shorten_home(&result.path);
        let mut session = Session::new(SessionSource::Zoxide, display, result.path);
        session.score = result.score;
        Ok(Some(Connection {
            session,
            new: true,
            add_to_zoxide: true,
        }))
    }
}

/// Session declared in the config file
struct ConfigStrategy;

impl Strategy for ConfigStrategy {
    fn name(&self) -> &'static str {
        "config"
    }

    fn resolve(&self, connector: &Connector, name: &str) -> Result<Option<Connection>> {
        Ok(connector
            .lister()
            .find_config_session(name)?
            .map(|session| Connection {
                session,
                new: true,
                add_to_zoxide: true,
            }))
    }
}

/// GitHub repository, cloned on demand
struct GitHubStrategy;

impl GitHubStrategy {
    /// Clone into the pending target unless it already exists
    fn materialize(connector: &Connector, pending: &PendingClone) -> Result<()> {
        let parent = pending
            .target
            .parent()
            .with_context(|| format!("Clone target has no parent: {:?}", pending.target))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create clone directory {:?}", parent))?;

        if pending.target.exists() {
            debug!(path = %pending.target.display(), "Clone target exists, skipping clone");
            return Ok(());
        }

        let dir = pending
            .target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        info!(url = %pending.url, path = %pending.target.display(), "Cloning repository");
        connector
            .git()
            .clone(&pending.url, Some(parent), dir.as_deref())
            .with_context(|| format!("Failed to clone {}", pending.url))?;
        Ok(())
    }
}

impl Strategy for GitHubStrategy {
    fn name(&self) -> &'static str {
        "github"
    }

    fn resolve(&self, connector: &Connector, name: &str) -> Result<Option<Connection>> {
        if looks_like_path(name) {
            return Ok(None);
        }

        let Some(mut session) = connector.lister().find_github_session(name)? else {
            return Ok(None);
        };

        if let Some(pending) = &session.pending_clone {
            Self::materialize(connector, pending)?;
            session.materialize();
        }

        Ok(Some(Connection {
            session,
            new: true,
            add_to_zoxide: true,
        }))
    }
}

/// Any existing directory, named after its last component
struct DirectoryStrategy;

impl Strategy for DirectoryStrategy {
    fn name(&self) -> &'static str {
        "directory"
    }

    fn resolve(&self, connector: &Connector, name: &str) -> Result<Option<Connection>> {
        let path = connector.lister().home().expand_home(name)?;
        if !path.is_dir() {
            return Ok(None);
        }
        let path = path.canonicalize().unwrap_or(path);
        let display = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());

        Ok(Some(Connection {
            session: Session::new(SessionSource::Zoxide, display, path),
            new: true,
            add_to_zoxide: true,
        }))
    }
}
