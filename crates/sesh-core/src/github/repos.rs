use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::{debug, error};

use super::{GitHubApi, GitHubError, RepoCache};
use crate::config::{GitHubSettings, DEFAULT_CACHE_TIMEOUT_MINUTES};
use crate::model::RemoteRepo;

/// Repositories per scope name, in configuration order
pub type ScopedRepos = IndexMap<String, Vec<RemoteRepo>>;

/// Cache-first repository listing across every configured scope
pub struct GitHubRepos {
    client: Box<dyn GitHubApi>,
    cache: Box<dyn RepoCache>,
    /// Resolved logins per token
    logins: RefCell<HashMap<String, String>>,
}

impl GitHubRepos {
    pub fn new(client: Box<dyn GitHubApi>, cache: Box<dyn RepoCache>) -> Self {
        Self {
            client,
            cache,
            logins: RefCell::new(HashMap::new()),
        }
    }

    pub fn cache(&self) -> &dyn RepoCache {
        self.cache.as_ref()
    }

    /// Repositories of one organization with the client's default token.
    /// Errors are returned, not skipped.
    pub fn list_repos(&self, org: &str) -> Result<Vec<RemoteRepo>, GitHubError> {
        if let Some(repos) = self.cache.get(org) {
            return Ok(repos);
        }

        debug!(org, "Cache miss, fetching from GitHub API");
        let repos = self.client.list_org_repos(org)?;
        self.cache.set(org, &repos, DEFAULT_CACHE_TIMEOUT_MINUTES);
        Ok(repos)
    }

    /// Repositories of every configured scope, from cache when fresh
    pub fn list_all_repos(&self, settings: &GitHubSettings) -> ScopedRepos {
        self.list_all_repos_with_refresh(settings, false)
    }

    /// Repositories of every configured scope. `refresh` bypasses the cache.
    ///
    /// A scope that cannot be fetched is logged and left out; it never
    /// aborts the other scopes.
    pub fn list_all_repos_with_refresh(
        &self,
        settings: &GitHubSettings,
        refresh: bool,
    ) -> ScopedRepos {
        let timeout = settings.cache_timeout_minutes();
        let mut results = ScopedRepos::new();

        for scope in settings.organizations() {
            if let Some(repos) = self.cached(&scope.name, refresh) {
                results.insert(scope.name, repos);
                continue;
            }

            let token = settings.token_for(&scope.name);
            match self.fetch_scope(&scope.name, token.as_deref()) {
                Ok(repos) => {
                    self.cache.set(&scope.name, &repos, timeout);
                    results.insert(scope.name, repos);
                }
                Err(e) => {
                    error!(org = %scope.name, error = %e, "Failed to fetch repos from GitHub");
                }
            }
        }

        if settings.include_personal {
            if let Some((username, repos)) = self.personal_repos(settings, refresh, timeout) {
                results.entry(username).or_insert(repos);
            }
        }

        results
    }

    /// Login of the token's user, resolved once per token
    pub fn authenticated_username(&self, token: &str) -> Result<String, GitHubError> {
        if let Some(login) = self.logins.borrow().get(token) {
            return Ok(login.clone());
        }

        let login = self.client.authenticated_username(Some(token))?;
        self.logins
            .borrow_mut()
            .insert(token.to_string(), login.clone());
        Ok(login)
    }

    /// Username whose personal repositories are listed, when enabled and a
    /// token is available
    pub fn personal_username(&self, settings: &GitHubSettings) -> Option<String> {
        if !settings.include_personal {
            return None;
        }
        let token = settings.personal_token()?;
        match self.authenticated_username(&token) {
            Ok(username) => Some(username),
            Err(e) => {
                error!(error = %e, "Failed to get authenticated username for personal repos");
                None
            }
        }
    }

    fn cached(&self, scope: &str, refresh: bool) -> Option<Vec<RemoteRepo>> {
        if refresh {
            debug!(org = scope, "Cache refresh requested, fetching from GitHub API");
            return None;
        }
        let repos = self.cache.get(scope);
        if repos.is_none() {
            debug!(org = scope, "Cache miss, fetching from GitHub API");
        }
        repos
    }

    /// Fetch a scope as an organization, retrying as a user on 404
    fn fetch_scope(&self, scope: &str, token: Option<&str>) -> Result<Vec<RemoteRepo>, GitHubError> {
        match self.client.list_org_repos_with_token(scope, token) {
            Err(e) if e.is_not_found() => {
                debug!(org = scope, "Organization not found, trying user endpoint");
                self.client.list_user_repos_with_token(scope, token)
            }
            other => other,
        }
    }

    fn personal_repos(
        &self,
        settings: &GitHubSettings,
        refresh: bool,
        timeout: u32,
    ) -> Option<(String, Vec<RemoteRepo>)> {
        let token = settings.personal_token()?;
        let username = self.personal_username(settings)?;

        if let Some(repos) = self.cached(&username, refresh) {
            return Some((username, repos));
        }

        match self
            .client
            .list_authenticated_user_repos_with_token(Some(&token))
        {
            Ok(repos) => {
                self.cache.set(&username, &repos, timeout);
                Some((username, repos))
            }
            Err(e) => {
                error!(username = %username, error = %e, "Failed to fetch personal repos from GitHub");
                None
            }
        }
    }
}
