mod cli;
mod commands;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sesh_core::config::Settings;

use cli::Config;

fn main() -> Result<()> {
    let cli = Config::parse_args();

    setup_logging(cli.debug);

    let settings = Settings::load(cli.config.as_ref())?;

    commands::run(cli, settings)
}

fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("sesh=debug,sesh_core=debug")
    } else {
        EnvFilter::new("sesh=info,sesh_core=info")
    };

    // stdout carries the session list
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
