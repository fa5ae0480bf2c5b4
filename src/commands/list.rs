use anyhow::Result;

use sesh_core::connector::Connector;
use sesh_core::lister::ListOptions;
use sesh_core::model::SessionCatalog;

use crate::cli::ListArgs;

pub fn run(connector: &Connector, args: &ListArgs) -> Result<()> {
    let opts = ListOptions {
        tmux: args.tmux,
        config: args.configured,
        zoxide: args.zoxide,
        github: args.github,
        hide_attached: args.hide_attached,
        hide_duplicates: args.hide_duplicates,
        refresh: args.refresh,
    };
    let catalog = connector.lister().list(&opts)?;
    println!("{}", render(&catalog, args.json)?);
    Ok(())
}

/// One name per line, or a JSON array of sessions
fn render(catalog: &SessionCatalog, json: bool) -> Result<String> {
    if json {
        let sessions: Vec<_> = catalog.sessions().collect();
        return Ok(serde_json::to_string_pretty(&sessions)?);
    }
    Ok(catalog
        .sessions()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sesh_core::model::{Session, SessionSource};

    fn catalog() -> SessionCatalog {
        let mut catalog = SessionCatalog::new();
        catalog.insert("tmux:main", Session::new(SessionSource::Tmux, "main", "/srv/main"));
        catalog.insert(
            "zoxide:~/code",
            Session::new(SessionSource::Zoxide, "~/code", "/home/u/code"),
        );
        catalog
    }

    #[test]
    fn test_render_names() {
        assert_eq!(render(&catalog(), false).unwrap(), "main\n~/code");
    }

    #[test]
    fn test_render_json() {
        let out = render(&catalog(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["src"], "tmux");
        assert_eq!(value[1]["path"], "/home/u/code");
    }
}
