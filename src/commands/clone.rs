use anyhow::Result;
use tracing::info;

use sesh_core::cloner::Cloner;
use sesh_core::connector::Connector;
use sesh_core::model::CloneOptions;

pub fn run(
    connector: &Connector,
    repo: String,
    cmd_dir: Option<String>,
    dir: Option<String>,
) -> Result<()> {
    let path = Cloner::new(connector).clone(CloneOptions { repo, cmd_dir, dir })?;
    info!(path = %path.display(), "Repository ready");
    Ok(())
}
