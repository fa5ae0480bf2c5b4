//! Merges every session source into one ordered catalog.

mod config;
mod github;
mod tmux;
mod zoxide;

use anyhow::{Context, Result};
use std::collections::HashSet;
use tracing::debug;

use crate::config::Settings;
use crate::github::GitHubRepos;
use crate::home::Home;
use crate::model::{Session, SessionCatalog, SessionSource};
use crate::tmux::Tmux;
use crate::zoxide::Zoxide;

/// Which sources to list and how to filter them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub tmux: bool,
    pub config: bool,
    pub zoxide: bool,
    pub github: bool,
    /// Skip tmux sessions with attached clients
    pub hide_attached: bool,
    /// Keep only the first entry per path
    pub hide_duplicates: bool,
    /// Bypass the GitHub cache
    pub refresh: bool,
}

impl ListOptions {
    fn any_source(&self) -> bool {
        self.tmux || self.config || self.zoxide || self.github
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Tmux,
    Config,
    Zoxide,
    GitHub,
}

const ALL_SOURCES: [Source; 4] = [Source::Tmux, Source::Config, Source::Zoxide, Source::GitHub];

pub struct Lister {
    settings: Settings,
    home: Box<dyn Home>,
    tmux: Box<dyn Tmux>,
    zoxide: Box<dyn Zoxide>,
    github: GitHubRepos,
}

impl Lister {
    pub fn new(
        settings: Settings,
        home: Box<dyn Home>,
        tmux: Box<dyn Tmux>,
        zoxide: Box<dyn Zoxide>,
        github: GitHubRepos,
    ) -> Self {
        Self {
            settings,
            home,
            tmux,
            zoxide,
            github,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn home(&self) -> &dyn Home {
        self.home.as_ref()
    }

    pub fn tmux(&self) -> &dyn Tmux {
        self.tmux.as_ref()
    }

    pub fn zoxide(&self) -> &dyn Zoxide {
        self.zoxide.as_ref()
    }

    pub fn github(&self) -> &GitHubRepos {
        &self.github
    }

    /// List sessions from the selected sources (all when none is selected),
    /// in source order tmux, config, zoxide, github.
    ///
    /// Keys are `<source>:<name>`; the first entry for a key wins.
    pub fn list(&self, opts: &ListOptions) -> Result<SessionCatalog> {
        let sources: Vec<Source> = if opts.any_source() {
            ALL_SOURCES
                .into_iter()
                .filter(|source| match source {
                    Source::Tmux => opts.tmux,
                    Source::Config => opts.config,
                    Source::Zoxide => opts.zoxide,
                    Source::GitHub => opts.github,
                })
                .collect()
        } else {
            ALL_SOURCES.to_vec()
        };

        let mut catalog = SessionCatalog::new();
        for source in sources {
            let sessions = match source {
                Source::Tmux => self.list_tmux().context("failed to list tmux sessions")?,
                Source::Config => self
                    .list_config()
                    .context("failed to list config sessions")?,
                Source::Zoxide => self
                    .list_zoxide()
                    .context("failed to list zoxide results")?,
                Source::GitHub => self
                    .list_github(opts.refresh)
                    .context("failed to list GitHub repositories")?,
            };
            debug!(source = ?source, count = sessions.len(), "Listed sessions");
            catalog.extend(sessions);
        }

        if opts.hide_attached {
            catalog.retain(|_, session| session.attached == 0);
        }
        if opts.hide_duplicates {
            let mut seen = HashSet::new();
            catalog.retain(|_, session| seen.insert(session.path.clone()));
        }

        Ok(catalog)
    }

    /// Live tmux session with exactly this name
    pub fn find_tmux_session(&self, name: &str) -> Result<Option<Session>> {
        Ok(self.list_tmux()?.into_sessions().into_iter().find(|s| s.name == name))
    }

    /// Config session with exactly this name
    pub fn find_config_session(&self, name: &str) -> Result<Option<Session>> {
        Ok(self.list_config()?.into_sessions().into_iter().find(|s| s.name == name))
    }

    /// GitHub session by display name, then key, then `github:<name>`
    pub fn find_github_session(&self, name: &str) -> Result<Option<Session>> {
        let catalog = self.list_github(false)?;
        if let Some(session) = catalog.sessions().find(|s| s.name == name) {
            return Ok(Some(session.clone()));
        }
        let prefixed = SessionSource::GitHub.key(name);
        Ok(catalog
            .get(name)
            .or_else(|| catalog.get(&prefixed))
            .cloned())
    }

    /// Second most recently attached tmux session
    pub fn last_tmux_session(&self) -> Result<Option<Session>> {
        Ok(self.list_tmux()?.into_sessions().into_iter().nth(1))
    }

    /// First tmux session with an attached client
    pub fn attached_tmux_session(&self) -> Result<Option<Session>> {
        Ok(self
            .list_tmux()?
            .into_sessions()
            .into_iter()
            .find(|s| s.attached > 0))
    }
}
