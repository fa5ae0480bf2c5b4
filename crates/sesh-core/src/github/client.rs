//! Blocking client for the GitHub REST API.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use super::GitHubError;
use crate::config::TOKEN_ENV_VAR;
use crate::model::RemoteRepo;

/// Public GitHub API endpoint
pub const API_BASE_URL: &str = "https://api.github.com";

/// Repositories requested per page (API maximum)
const PER_PAGE: u32 = 100;

const ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("sesh/", env!("CARGO_PKG_VERSION"));

/// Timestamp layout stored on [`RemoteRepo`]
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// `page` parameter of the `rel="next"` entry in a `Link` header
static NEXT_PAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<[^>]*[?&]page=(\d+)[^>]*>;\s*rel="next""#).expect("Invalid NEXT_PAGE_PATTERN regex")
});

/// Read access to repository listings
pub trait GitHubApi {
    /// Repositories of an organization
    fn list_org_repos_with_token(
        &self,
        org: &str,
        token: Option<&str>,
    ) -> Result<Vec<RemoteRepo>, GitHubError>;

    /// Repositories of a user. Includes private ones when the token belongs
    /// to that user.
    fn list_user_repos_with_token(
        &self,
        username: &str,
        token: Option<&str>,
    ) -> Result<Vec<RemoteRepo>, GitHubError>;

    /// Repositories owned by the token's user
    fn list_authenticated_user_repos_with_token(
        &self,
        token: Option<&str>,
    ) -> Result<Vec<RemoteRepo>, GitHubError>;

    /// Login of the token's user
    fn authenticated_username(&self, token: Option<&str>) -> Result<String, GitHubError>;

    /// Organization repositories using the client's default token
    fn list_org_repos(&self, org: &str) -> Result<Vec<RemoteRepo>, GitHubError> {
        self.list_org_repos_with_token(org, None)
    }

    /// User repositories using the client's default token
    fn list_user_repos(&self, username: &str) -> Result<Vec<RemoteRepo>, GitHubError> {
        self.list_user_repos_with_token(username, None)
    }
}

/// Repository as returned by the API
#[derive(Debug, Deserialize)]
struct ApiRepository {
    id: i64,
    name: String,
    full_name: String,
    description: Option<String>,
    clone_url: String,
    ssh_url: String,
    html_url: String,
    #[serde(default)]
    private: bool,
    #[serde(default)]
    fork: bool,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    disabled: bool,
    language: Option<String>,
    topics: Option<Vec<String>>,
    updated_at: Option<DateTime<Utc>>,
    pushed_at: Option<DateTime<Utc>>,
}

fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

impl From<ApiRepository> for RemoteRepo {
    fn from(repo: ApiRepository) -> Self {
        RemoteRepo {
            id: repo.id,
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description.unwrap_or_default(),
            clone_url: repo.clone_url,
            ssh_url: repo.ssh_url,
            html_url: repo.html_url,
            private: repo.private,
            fork: repo.fork,
            archived: repo.archived,
            disabled: repo.disabled,
            language: repo.language.unwrap_or_default(),
            updated_at: format_timestamp(repo.updated_at),
            pushed_at: format_timestamp(repo.pushed_at),
            topics: repo.topics.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    login: Option<String>,
}

/// Which listing endpoint to page through
#[derive(Debug, Clone, Copy)]
enum Listing<'a> {
    /// `/orgs/{org}/repos?type=all`
    Org(&'a str),
    /// `/users/{user}/repos?type=all` (public only)
    User(&'a str),
    /// `/user/repos?affiliation=owner`
    Authenticated,
}

impl Listing<'_> {
    fn path(&self) -> String {
        match self {
            Listing::Org(org) => format!("/orgs/{}/repos", org),
            Listing::User(user) => format!("/users/{}/repos", user),
            Listing::Authenticated => "/user/repos".to_string(),
        }
    }

    fn filter(&self) -> (&'static str, &'static str) {
        match self {
            Listing::Org(_) | Listing::User(_) => ("type", "all"),
            Listing::Authenticated => ("affiliation", "owner"),
        }
    }
}

/// Extract the next page number from a `Link` response header
pub fn next_page(link: &str) -> Option<u32> {
    NEXT_PAGE_PATTERN
        .captures(link)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn non_empty(token: Option<&str>) -> Option<&str> {
    token.filter(|t| !t.is_empty())
}

/// GitHub REST client
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
    default_token: Option<String>,
}

impl ApiClient {
    /// Client for api.github.com
    pub fn new(default_token: Option<String>) -> Self {
        Self::with_base_url(API_BASE_URL, default_token)
    }

    /// Client for another API root (GitHub Enterprise, tests)
    pub fn with_base_url(base_url: impl Into<String>, default_token: Option<String>) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_token,
        }
    }

    /// Explicit token, then the default token, then `GITHUB_TOKEN`.
    /// `None` means unauthenticated (rate limited) access.
    fn resolve_token(&self, token: Option<&str>) -> Option<String> {
        non_empty(token)
            .or_else(|| non_empty(self.default_token.as_deref()))
            .map(str::to_string)
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty()))
    }

    fn get(&self, path: &str, token: Option<&str>) -> ureq::RequestBuilder<ureq::typestate::WithoutBody> {
        let url = format!("{}{}", self.base_url, path);
        let request = self
            .agent
            .get(&url)
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT)
            .header("X-GitHub-Api-Version", "2022-11-28");
        match token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Fetch every page of a listing, most recently updated first
    fn list_all(
        &self,
        listing: Listing<'_>,
        token: Option<&str>,
        context: &str,
    ) -> Result<Vec<RemoteRepo>, GitHubError> {
        let path = listing.path();
        let (filter_key, filter_value) = listing.filter();
        let mut repos = Vec::new();
        let mut page: u32 = 1;

        loop {
            let mut response = self
                .get(&path, token)
                .query(filter_key, filter_value)
                .query("sort", "updated")
                .query("direction", "desc")
                .query("per_page", PER_PAGE.to_string())
                .query("page", page.to_string())
                .call()
                .map_err(|e| GitHubError::from_ureq(context, e))?;

            let next = response
                .headers()
                .get("link")
                .and_then(|v| v.to_str().ok())
                .and_then(next_page);

            let batch: Vec<ApiRepository> = response
                .body_mut()
                .read_json()
                .map_err(|e| GitHubError::from_ureq(context, e))?;
            debug!(path = %path, page, count = batch.len(), "Fetched repository page");
            repos.extend(batch.into_iter().map(RemoteRepo::from));

            match next {
                Some(n) if n > page => page = n,
                _ => break,
            }
        }

        Ok(repos)
    }

    fn fetch_login(&self, token: Option<&str>) -> Result<String, GitHubError> {
        const CONTEXT: &str = "failed to get authenticated user";

        let mut response = self
            .get("/user", token)
            .call()
            .map_err(|e| GitHubError::from_ureq(CONTEXT, e))?;
        let user: ApiUser = response
            .body_mut()
            .read_json()
            .map_err(|e| GitHubError::from_ureq(CONTEXT, e))?;

        user.login.ok_or(GitHubError::MissingLogin)
    }
}

impl GitHubApi for ApiClient {
    fn list_org_repos_with_token(
        &self,
        org: &str,
        token: Option<&str>,
    ) -> Result<Vec<RemoteRepo>, GitHubError> {
        let token = self.resolve_token(token);
        let context = format!("failed to list repositories for org {}", org);
        self.list_all(Listing::Org(org), token.as_deref(), &context)
    }

    fn list_user_repos_with_token(
        &self,
        username: &str,
        token: Option<&str>,
    ) -> Result<Vec<RemoteRepo>, GitHubError> {
        let token = self.resolve_token(token);

        // The owner endpoint exposes private repos, but only for the token's user
        let is_authenticated_user = token.is_some()
            && self
                .fetch_login(token.as_deref())
                .is_ok_and(|login| login == username);

        if is_authenticated_user {
            let context = format!(
                "failed to list repositories for authenticated user {}",
                username
            );
            self.list_all(Listing::Authenticated, token.as_deref(), &context)
        } else {
            let context = format!("failed to list repositories for user {}", username);
            self.list_all(Listing::User(username), token.as_deref(), &context)
        }
    }

    fn list_authenticated_user_repos_with_token(
        &self,
        token: Option<&str>,
    ) -> Result<Vec<RemoteRepo>, GitHubError> {
        let token = self.resolve_token(token);
        self.list_all(
            Listing::Authenticated,
            token.as_deref(),
            "failed to list repositories for authenticated user",
        )
    }

    fn authenticated_username(&self, token: Option<&str>) -> Result<String, GitHubError> {
        let token = self.resolve_token(token);
        self.fetch_login(token.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;

    fn repo_json(id: i64, owner: &str, name: &str) -> String {
        format!(
            r#"{{
                "id": {id},
                "name": "{name}",
                "full_name": "{owner}/{name}",
                "description": null,
                "clone_url": "https://github.com/{owner}/{name}.git",
                "ssh_url": "git@github.com:{owner}/{name}.git",
                "html_url": "https://github.com/{owner}/{name}",
                "private": false,
                "fork": false,
                "archived": false,
                "disabled": false,
                "language": "Rust",
                "topics": ["cli"],
                "updated_at": "2024-05-01T10:00:00Z",
                "pushed_at": "2024-04-30T09:30:00Z"
            }}"#
        )
    }

    #[test]
    fn test_next_page() {
        let link = r#"<https://api.github.com/organizations/1/repos?per_page=100&page=2>; rel="next", <https://api.github.com/organizations/1/repos?per_page=100&page=7>; rel="last""#;
        assert_eq!(next_page(link), Some(2));

        let last_page = r#"<https://api.github.com/x?page=6>; rel="prev", <https://api.github.com/x?page=1>; rel="first""#;
        assert_eq!(next_page(last_page), None);
    }

    #[test]
    fn test_convert_repo() {
        let api: ApiRepository = serde_json::from_str(&repo_json(7, "acme", "widgets")).unwrap();
        let repo = RemoteRepo::from(api);
        assert_eq!(repo.id, 7);
        assert_eq!(repo.full_name, "acme/widgets");
        assert_eq!(repo.description, "");
        assert_eq!(repo.language, "Rust");
        assert_eq!(repo.topics, vec!["cli"]);
        assert_eq!(repo.updated_at, "2024-05-01T10:00:00Z");
        assert_eq!(repo.pushed_at, "2024-04-30T09:30:00Z");
    }

    #[test]
    fn test_list_org_repos_paginates() {
        let mut server = mockito::Server::new();
        let base = server.url();

        let page1 = server
            .mock("GET", "/orgs/acme/repos")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("per_page".into(), "100".into()),
                Matcher::UrlEncoded("sort".into(), "updated".into()),
                Matcher::UrlEncoded("direction".into(), "desc".into()),
            ]))
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header(
                "link",
                &format!("<{}/orgs/acme/repos?page=2>; rel=\"next\"", base),
            )
            .with_body(format!("[{}]", repo_json(1, "acme", "newest")))
            .create();
        let page2 = server
            .mock("GET", "/orgs/acme/repos")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!("[{}]", repo_json(2, "acme", "older")))
            .create();

        let client = ApiClient::with_base_url(base, None);
        let repos = client.list_org_repos_with_token("acme", Some("tok")).unwrap();

        page1.assert();
        page2.assert();
        let names: Vec<&str> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["newest", "older"]);
    }

    #[test]
    fn test_list_org_repos_not_found() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/orgs/someone/repos")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create();

        temp_env::with_var_unset(TOKEN_ENV_VAR, || {
            let client = ApiClient::with_base_url(server.url(), None);
            let err = client.list_org_repos("someone").unwrap_err();
            assert!(err.is_not_found());
            assert!(err.to_string().contains("org someone"));
        });
    }

    #[test]
    fn test_env_token_fallback() {
        let mut server = mockito::Server::new();
        let m = server
            .mock("GET", "/orgs/acme/repos")
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer from-env")
            .with_status(200)
            .with_body("[]")
            .create();

        temp_env::with_var(TOKEN_ENV_VAR, Some("from-env"), || {
            let client = ApiClient::with_base_url(server.url(), None);
            let repos = client.list_org_repos_with_token("acme", Some("")).unwrap();
            assert!(repos.is_empty());
        });
        m.assert();
    }

    #[test]
    fn test_unauthenticated_without_any_token() {
        let mut server = mockito::Server::new();
        let m = server
            .mock("GET", "/orgs/acme/repos")
            .match_query(Matcher::Any)
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body("[]")
            .create();

        temp_env::with_var_unset(TOKEN_ENV_VAR, || {
            let client = ApiClient::with_base_url(server.url(), None);
            client.list_org_repos("acme").unwrap();
        });
        m.assert();
    }

    #[test]
    fn test_user_repos_for_token_owner_use_owner_endpoint() {
        let mut server = mockito::Server::new();
        let _user = server
            .mock("GET", "/user")
            .with_status(200)
            .with_body(r#"{"login":"jane"}"#)
            .create();
        let owned = server
            .mock("GET", "/user/repos")
            .match_query(Matcher::UrlEncoded("affiliation".into(), "owner".into()))
            .with_status(200)
            .with_body(format!("[{}]", repo_json(3, "jane", "secret")))
            .create();

        let client = ApiClient::with_base_url(server.url(), Some("tok".to_string()));
        let repos = client.list_user_repos("jane").unwrap();

        owned.assert();
        assert_eq!(repos[0].full_name, "jane/secret");
    }

    #[test]
    fn test_user_repos_for_other_user_use_public_endpoint() {
        let mut server = mockito::Server::new();
        let _user = server
            .mock("GET", "/user")
            .with_status(200)
            .with_body(r#"{"login":"jane"}"#)
            .create();
        let public = server
            .mock("GET", "/users/bob/repos")
            .match_query(Matcher::UrlEncoded("type".into(), "all".into()))
            .with_status(200)
            .with_body(format!("[{}]", repo_json(4, "bob", "dotfiles")))
            .create();

        let client = ApiClient::with_base_url(server.url(), Some("tok".to_string()));
        let repos = client.list_user_repos("bob").unwrap();

        public.assert();
        assert_eq!(repos[0].full_name, "bob/dotfiles");
    }

    #[test]
    fn test_authenticated_username_missing_login() {
        let mut server = mockito::Server::new();
        let _user = server
            .mock("GET", "/user")
            .with_status(200)
            .with_body(r#"{"id":1}"#)
            .create();

        let client = ApiClient::with_base_url(server.url(), Some("tok".to_string()));
        let err = client.authenticated_username(None).unwrap_err();
        assert!(matches!(err, GitHubError::MissingLogin));
    }
}
