use anyhow::{bail, Result};
use tracing::info;

use sesh_core::connector::Connector;
use sesh_core::model::ConnectOpts;

pub fn run(connector: &Connector, name: &str, switch: bool, command: Option<String>) -> Result<()> {
    let opts = ConnectOpts { switch, command };
    match connector.connect(name, &opts)? {
        Some(connection) => {
            info!(session = %connection.session.name, src = %connection.session.src, "Connected");
            Ok(())
        }
        None => bail!("No session found for {}", name),
    }
}
