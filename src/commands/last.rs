use anyhow::{bail, Result};

use sesh_core::connector::Connector;

pub fn run(connector: &Connector) -> Result<()> {
    let lister = connector.lister();
    let Some(session) = lister.last_tmux_session()? else {
        bail!("No previous tmux session");
    };
    lister.tmux().switch_or_attach(&session.name, false)
}
