use anyhow::Result;

use super::Lister;
use crate::model::{Session, SessionCatalog, SessionSource};

impl Lister {
    /// Sessions declared in the config file.
    ///
    /// A session combining `startup_command` with `disable_startup_command`
    /// fails the whole source.
    pub(crate) fn list_config(&self) -> Result<SessionCatalog> {
        let defaults = &self.settings.default_session;
        let mut catalog = SessionCatalog::new();

        for config in &self.settings.sessions {
            if config.name.is_empty() {
                continue;
            }
            config.validate()?;

            let path = self.home.expand_home(&config.path)?;
            let mut session = Session::new(SessionSource::Config, config.name.clone(), path);
            session.disable_startup_command = config.disable_startup_command;
            session.tmuxinator = config.tmuxinator;
            session.window_names = config.windows.clone();

            session.startup_command = config
                .startup_command
                .clone()
                .filter(|c| !c.is_empty());
            if session.startup_command.is_none() && !config.disable_startup_command {
                session.startup_command = defaults.startup_command.clone();
            }
            session.preview_command = config
                .preview_command
                .clone()
                .filter(|c| !c.is_empty())
                .or_else(|| defaults.preview_command.clone());

            catalog.insert(SessionSource::Config.key(&config.name), session);
        }

        Ok(catalog)
    }
}
