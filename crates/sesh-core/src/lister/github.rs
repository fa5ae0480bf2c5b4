use anyhow::Result;
use tracing::debug;

use super::Lister;
use crate::github::shorthand;
use crate::model::{PendingClone, RemoteRepo, Session, SessionCatalog, SessionSource};

impl Lister {
    /// GitHub repositories of every configured scope, then personal ones.
    ///
    /// Repositories missing locally carry a [`PendingClone`] and are left
    /// out entirely when `show_uncloned` is off.
    pub(crate) fn list_github(&self, refresh: bool) -> Result<SessionCatalog> {
        let config = &self.settings.github;
        let scopes = config.organizations();
        let mut catalog = SessionCatalog::new();

        if scopes.is_empty() && !config.include_personal {
            debug!("No GitHub organizations configured");
            return Ok(catalog);
        }

        let repos = self.github.list_all_repos_with_refresh(config, refresh);

        for scope in &scopes {
            if let Some(scope_repos) = repos.get(&scope.name) {
                self.add_github_repos(&mut catalog, &scope.name, scope.label(), scope_repos)?;
            }
        }

        if let Some(username) = self.github.personal_username(config) {
            if let Some(personal) = repos.get(&username) {
                self.add_github_repos(&mut catalog, &username, &username, personal)?;
            }
        }

        Ok(catalog)
    }

    fn add_github_repos(
        &self,
        catalog: &mut SessionCatalog,
        scope: &str,
        label: &str,
        repos: &[RemoteRepo],
    ) -> Result<()> {
        let config = &self.settings.github;
        let show_uncloned = config.should_show_uncloned();
        let show_description = config.should_show_description();

        for repo in repos.iter().filter(|r| r.is_listable()) {
            let name = if show_description && !repo.description.is_empty() {
                format!("{}/{} ({})", label, repo.name, repo.description)
            } else {
                format!("{}/{}", label, repo.name)
            };

            let target = shorthand::clone_path(scope, &repo.name, config, self.home.as_ref())?;
            let cloned = target.exists();
            if !cloned && !show_uncloned {
                continue;
            }

            let mut session = Session::new(SessionSource::GitHub, name, target.clone());
            if !cloned {
                let pending = PendingClone {
                    url: repo.url_for(config.use_ssh).to_string(),
                    target,
                };
                session.startup_command = Some(pending.command());
                session.pending_clone = Some(pending);
            }

            catalog.insert(
                SessionSource::GitHub.key(&format!("{}/{}", scope, repo.name)),
                session,
            );
        }

        Ok(())
    }
}
