mod cache;
mod clone;
mod connect;
mod last;
mod list;

use anyhow::Result;

use sesh_core::config::Settings;
use sesh_core::connector::Connector;
use sesh_core::git::GitClient;
use sesh_core::github::{ApiClient, FileCache, GitHubRepos};
use sesh_core::home::RealHome;
use sesh_core::lister::Lister;
use sesh_core::tmux::TmuxClient;
use sesh_core::zoxide::ZoxideClient;

use crate::cli::{Command, Config};

pub fn run(cli: Config, settings: Settings) -> Result<()> {
    match cli.command {
        Command::List(args) => list::run(&build_connector(settings)?, &args),
        Command::Connect {
            name,
            switch,
            command,
        } => connect::run(&build_connector(settings)?, &name, switch, command),
        Command::Clone { repo, cmd_dir, dir } => {
            clone::run(&build_connector(settings)?, repo, cmd_dir, dir)
        }
        Command::Last => last::run(&build_connector(settings)?),
        Command::Cache { action } => cache::run(action),
    }
}

/// Wire the real tmux, zoxide, git and GitHub clients together
fn build_connector(settings: Settings) -> Result<Connector> {
    let cache = FileCache::new(&RealHome)?;
    let client = ApiClient::new(settings.github.token.clone());
    let github = GitHubRepos::new(Box::new(client), Box::new(cache));

    let lister = Lister::new(
        settings,
        Box::new(RealHome),
        Box::new(TmuxClient::new()),
        Box::new(ZoxideClient::new()),
        github,
    );
    Ok(Connector::new(lister, Box::new(GitClient::new())))
}
