//! In-memory stand-ins for tmux, zoxide, git and the GitHub API.

use anyhow::Result;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::config::Settings;
use crate::git::Git;
use crate::github::{GitHubApi, GitHubError, GitHubRepos, RepoCache};
use crate::home::FixedHome;
use crate::lister::Lister;
use crate::model::RemoteRepo;
use crate::tmux::{Tmux, TmuxSession};
use crate::zoxide::{Zoxide, ZoxideResult};

/// Shared log of calls made on a fake
pub type CallLog = Rc<RefCell<Vec<String>>>;

fn token_label(token: Option<&str>) -> &str {
    token.unwrap_or("-")
}

#[derive(Default)]
pub struct FakeGitHub {
    orgs: HashMap<String, Vec<RemoteRepo>>,
    users: HashMap<String, Vec<RemoteRepo>>,
    failing: HashSet<String>,
    login: Option<String>,
    personal: Vec<RemoteRepo>,
    calls: CallLog,
}

impl FakeGitHub {
    pub fn with_org(mut self, org: &str, repos: Vec<RemoteRepo>) -> Self {
        self.orgs.insert(org.to_string(), repos);
        self
    }

    pub fn with_user(mut self, user: &str, repos: Vec<RemoteRepo>) -> Self {
        self.users.insert(user.to_string(), repos);
        self
    }

    /// Every call for this scope fails with HTTP 500
    pub fn failing(mut self, scope: &str) -> Self {
        self.failing.insert(scope.to_string());
        self
    }

    pub fn with_login(mut self, login: &str) -> Self {
        self.login = Some(login.to_string());
        self
    }

    pub fn with_personal(mut self, repos: Vec<RemoteRepo>) -> Self {
        self.personal = repos;
        self
    }

    pub fn calls(&self) -> CallLog {
        Rc::clone(&self.calls)
    }

    fn lookup(
        &self,
        table: &HashMap<String, Vec<RemoteRepo>>,
        scope: &str,
    ) -> Result<Vec<RemoteRepo>, GitHubError> {
        let context = format!("failed to list repositories for {}", scope);
        if self.failing.contains(scope) {
            return Err(GitHubError::Status {
                context,
                status: 500,
            });
        }
        table
            .get(scope)
            .cloned()
            .ok_or(GitHubError::NotFound { context })
    }
}

impl GitHubApi for FakeGitHub {
    fn list_org_repos_with_token(
        &self,
        org: &str,
        token: Option<&str>,
    ) -> Result<Vec<RemoteRepo>, GitHubError> {
        self.calls
            .borrow_mut()
            .push(format!("org:{}:{}", org, token_label(token)));
        self.lookup(&self.orgs, org)
    }

    fn list_user_repos_with_token(
        &self,
        username: &str,
        token: Option<&str>,
    ) -> Result<Vec<RemoteRepo>, GitHubError> {
        self.calls
            .borrow_mut()
            .push(format!("user:{}:{}", username, token_label(token)));
        self.lookup(&self.users, username)
    }

    fn list_authenticated_user_repos_with_token(
        &self,
        token: Option<&str>,
    ) -> Result<Vec<RemoteRepo>, GitHubError> {
        self.calls
            .borrow_mut()
            .push(format!("personal:{}", token_label(token)));
        Ok(self.personal.clone())
    }

    fn authenticated_username(&self, token: Option<&str>) -> Result<String, GitHubError> {
        self.calls
            .borrow_mut()
            .push(format!("login:{}", token_label(token)));
        self.login.clone().ok_or(GitHubError::MissingLogin)
    }
}

#[derive(Default)]
pub struct MemoryCache {
    entries: Rc<RefCell<HashMap<String, Vec<RemoteRepo>>>>,
    timeouts: Rc<RefCell<HashMap<String, u32>>>,
}

impl MemoryCache {
    /// Timeout passed to the last `set` per scope
    pub fn timeouts(&self) -> Rc<RefCell<HashMap<String, u32>>> {
        Rc::clone(&self.timeouts)
    }
}

impl RepoCache for MemoryCache {
    fn get(&self, scope: &str) -> Option<Vec<RemoteRepo>> {
        self.entries.borrow().get(scope).cloned()
    }

    fn set(&self, scope: &str, repos: &[RemoteRepo], timeout_minutes: u32) {
        self.entries
            .borrow_mut()
            .insert(scope.to_string(), repos.to_vec());
        self.timeouts
            .borrow_mut()
            .insert(scope.to_string(), timeout_minutes);
    }

    fn cache_path(&self) -> PathBuf {
        PathBuf::from("/nonexistent/cache")
    }
}

#[derive(Default)]
pub struct FakeTmux {
    sessions: Vec<TmuxSession>,
    actions: CallLog,
}

impl FakeTmux {
    pub fn with_session(mut self, name: &str, path: &str, attached: u32) -> Self {
        self.sessions.push(TmuxSession {
            name: name.to_string(),
            path: path.to_string(),
            attached,
            windows: 1,
            last_attached: 0,
        });
        self
    }

    pub fn actions(&self) -> CallLog {
        Rc::clone(&self.actions)
    }
}

impl Tmux for FakeTmux {
    fn list_sessions(&self) -> Result<Vec<TmuxSession>> {
        Ok(self.sessions.clone())
    }

    fn has_session(&self, name: &str) -> bool {
        self.sessions.iter().any(|s| s.name == name)
    }

    fn new_session(&self, name: &str, path: &Path) -> Result<()> {
        self.actions
            .borrow_mut()
            .push(format!("new-session:{}:{}", name, path.display()));
        Ok(())
    }

    fn new_window(&self, session: &str, window: &str, _path: &Path) -> Result<()> {
        self.actions
            .borrow_mut()
            .push(format!("new-window:{}:{}", session, window));
        Ok(())
    }

    fn send_keys(&self, target: &str, keys: &str) -> Result<()> {
        self.actions
            .borrow_mut()
            .push(format!("send-keys:{}:{}", target, keys));
        Ok(())
    }

    fn switch_or_attach(&self, name: &str, switch: bool) -> Result<()> {
        self.actions
            .borrow_mut()
            .push(format!("attach:{}:{}", name, switch));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeZoxide {
    results: Vec<ZoxideResult>,
    added: CallLog,
}

impl FakeZoxide {
    pub fn with_dir(mut self, path: impl Into<PathBuf>, score: f64) -> Self {
        self.results.push(ZoxideResult {
            score,
            path: path.into(),
        });
        self
    }

    pub fn added(&self) -> CallLog {
        Rc::clone(&self.added)
    }
}

impl Zoxide for FakeZoxide {
    fn list(&self) -> Result<Vec<ZoxideResult>> {
        Ok(self.results.clone())
    }

    fn query(&self, name: &str) -> Result<Option<ZoxideResult>> {
        Ok(self
            .results
            .iter()
            .find(|r| r.path.to_string_lossy().contains(name))
            .cloned())
    }

    fn add(&self, path: &Path) -> Result<()> {
        self.added.borrow_mut().push(path.display().to_string());
        Ok(())
    }
}

/// Records clone attempts and creates the target directory like `git clone` would
#[derive(Default)]
pub struct FakeGit {
    fail: bool,
    clones: CallLog,
}

impl FakeGit {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn clones(&self) -> CallLog {
        Rc::clone(&self.clones)
    }
}

impl Git for FakeGit {
    fn clone(&self, url: &str, cmd_dir: Option<&Path>, dir: Option<&str>) -> Result<String> {
        let base = cmd_dir.map(Path::to_path_buf).unwrap_or_default();
        let name = dir.map(str::to_string).unwrap_or_else(|| {
            url.rsplit('/')
                .next()
                .unwrap_or(url)
                .trim_end_matches(".git")
                .to_string()
        });
        let target = base.join(name);
        self.clones
            .borrow_mut()
            .push(format!("{} -> {}", url, target.display()));
        if self.fail {
            anyhow::bail!("git clone failed: repository not found");
        }
        std::fs::create_dir_all(&target)?;
        Ok(String::new())
    }
}

/// Lister wired to fakes, with `home` as the home directory
pub fn lister(
    settings: Settings,
    home: &Path,
    tmux: FakeTmux,
    zoxide: FakeZoxide,
    api: FakeGitHub,
) -> Lister {
    Lister::new(
        settings,
        Box::new(FixedHome(home.to_path_buf())),
        Box::new(tmux),
        Box::new(zoxide),
        GitHubRepos::new(Box::new(api), Box::new(MemoryCache::default())),
    )
}
