use anyhow::Result;
use std::path::PathBuf;

use super::Lister;
use crate::model::{Session, SessionCatalog, SessionSource};

impl Lister {
    /// Live tmux sessions, most recently attached first, minus the blacklist
    pub(crate) fn list_tmux(&self) -> Result<SessionCatalog> {
        let mut catalog = SessionCatalog::new();
        for tmux_session in self.tmux.list_sessions()? {
            if self.settings.blacklist.contains(&tmux_session.name) {
                continue;
            }
            let mut session = Session::new(
                SessionSource::Tmux,
                tmux_session.name.clone(),
                PathBuf::from(&tmux_session.path),
            );
            session.attached = tmux_session.attached;
            session.windows = tmux_session.windows;
            catalog.insert(SessionSource::Tmux.key(&tmux_session.name), session);
        }
        Ok(catalog)
    }
}
