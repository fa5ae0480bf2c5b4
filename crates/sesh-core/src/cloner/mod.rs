//! `sesh clone`: clone a repository, then connect to it.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};
use url::Url;

use crate::connector::Connector;
use crate::github::shorthand;
use crate::model::{CloneOptions, ConnectOpts};

/// Host, owner and repository name of a clone URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitUrl {
    pub host: String,
    pub owner: String,
    pub repo: String,
}

/// Parse `user@host:owner/repo[.git]` or any `scheme://host/owner/repo[.git]`
pub fn parse_git_url(input: &str) -> Result<GitUrl> {
    let (host, path) = if !input.contains("://") && input.contains('@') {
        let (user_host, path) = input
            .split_once(':')
            .with_context(|| format!("invalid SSH URL: {}", input))?;
        let host = user_host
            .rsplit_once('@')
            .map_or(user_host, |(_, host)| host);
        (host.to_string(), path.to_string())
    } else {
        let url = Url::parse(input).with_context(|| format!("invalid repository URL: {}", input))?;
        let host = url
            .host_str()
            .with_context(|| format!("repository URL has no host: {}", input))?;
        (host.to_string(), url.path().to_string())
    };

    let segments: Vec<&str> = path
        .trim_matches('/')
        .trim_end_matches(".git")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    match segments.as_slice() {
        [owner, repo, ..] if !host.is_empty() => Ok(GitUrl {
            host,
            owner: owner.to_string(),
            repo: repo.to_string(),
        }),
        _ => bail!("could not find owner and repository in {}", input),
    }
}

/// Last URL segment without `.git`
fn repo_name(url: &str) -> &str {
    url.trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(url)
        .trim_end_matches(".git")
}

pub struct Cloner<'a> {
    connector: &'a Connector,
}

impl<'a> Cloner<'a> {
    pub fn new(connector: &'a Connector) -> Self {
        Self { connector }
    }

    /// Clone `opts.repo` and connect to the result. Returns the clone path.
    ///
    /// Without `cmd_dir`/`dir` the clone lands in
    /// `<clone root>/<host>/<owner>/<repo>`.
    pub fn clone(&self, opts: CloneOptions) -> Result<PathBuf> {
        let lister = self.connector.lister();
        let settings = &lister.settings().github;
        let home = lister.home();

        let mut cmd_dir = opts
            .cmd_dir
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|d| home.expand_home(d))
            .transpose()?;
        let mut dir = opts.dir.clone().filter(|d| !d.is_empty());
        let derive_path = cmd_dir.is_none() && dir.is_none();

        let url = if shorthand::is_shorthand(&opts.repo) {
            let url = shorthand::convert_to_url(&opts.repo, settings)?;
            if derive_path {
                let (owner, repo) = shorthand::extract_owner_and_repo(&opts.repo)?;
                let path = shorthand::clone_path(&owner, &repo, settings, home)?;
                cmd_dir = path.parent().map(PathBuf::from);
                dir = Some(repo);
            }
            url
        } else {
            if derive_path {
                // Local paths and host-less URLs clone into the current directory
                match parse_git_url(&opts.repo) {
                    Ok(parsed) => {
                        cmd_dir = Some(
                            shorthand::clone_root(settings, home)?
                                .join(&parsed.host)
                                .join(&parsed.owner),
                        );
                        dir = Some(parsed.repo);
                    }
                    Err(e) => {
                        debug!(
                            repo = %opts.repo,
                            error = %e,
                            "No host in repository reference, cloning into current directory"
                        );
                    }
                }
            }
            opts.repo.clone()
        };

        if let Some(parent) = &cmd_dir {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        info!(url = %url, "Cloning repository");
        self.connector
            .git()
            .clone(&url, cmd_dir.as_deref(), dir.as_deref())
            .with_context(|| format!("Failed to clone {}", url))?;

        let base = match cmd_dir {
            Some(base) => base,
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        let path = base.join(dir.as_deref().unwrap_or_else(|| repo_name(&url)));
        debug!(path = %path.display(), "Repository cloned");

        let target = path.to_string_lossy();
        match self
            .connector
            .connect(&target, &ConnectOpts::default())
            .with_context(|| format!("Cloned to {} but failed to connect", path.display()))?
        {
            Some(_) => Ok(path),
            None => bail!("Cloned to {} but no session matched it", path.display()),
        }
    }
}
