use serde::{Deserialize, Serialize};

/// Environment variable holding the fallback access token
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Cache lifetime used when `cache_timeout` is unset
pub const DEFAULT_CACHE_TIMEOUT_MINUTES: u32 = 30;

/// `[github]` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitHubSettings {
    /// Legacy single organization, folded into `organizations()`
    #[serde(default)]
    pub organization: Option<String>,

    /// Organizations or users whose repositories are listed
    #[serde(default)]
    pub organizations: Vec<OrgScope>,

    /// Token used when a scope has none
    #[serde(default)]
    pub token: Option<String>,

    /// Cache lifetime in minutes (0 or unset = 30)
    #[serde(default)]
    pub cache_timeout: Option<u32>,

    /// Root for clones (default `~/git`)
    #[serde(default)]
    pub clone_dir: Option<String>,

    /// Clone over SSH instead of HTTPS
    #[serde(default)]
    pub use_ssh: bool,

    /// Also list the authenticated user's own repositories
    #[serde(default)]
    pub include_personal: bool,

    /// List repositories that are not cloned yet (default true)
    #[serde(default)]
    pub show_uncloned: Option<bool>,

    /// Append the repository description to the name (default true)
    #[serde(default)]
    pub show_description: Option<bool>,
}

/// One organization or user to enumerate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgScope {
    pub name: String,
    /// Label shown instead of `name`
    #[serde(default)]
    pub display_name: Option<String>,
    /// Token for this scope only
    #[serde(default)]
    pub token: Option<String>,
}

impl OrgScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            token: None,
        }
    }

    /// Display alias, falling back to the scope name
    pub fn label(&self) -> &str {
        match self.display_name.as_deref() {
            Some(alias) if !alias.is_empty() => alias,
            _ => &self.name,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

impl GitHubSettings {
    /// Configured scopes, with the legacy `organization` appended when it is
    /// not already listed by name
    pub fn organizations(&self) -> Vec<OrgScope> {
        let mut orgs = self.organizations.clone();

        if let Some(legacy) = self.organization.as_deref().filter(|n| !n.is_empty()) {
            if !orgs.iter().any(|o| o.name == legacy) {
                orgs.push(OrgScope {
                    name: legacy.to_string(),
                    display_name: Some(legacy.to_string()),
                    token: self.token.clone(),
                });
            }
        }

        orgs
    }

    /// Token for a scope: scope token, then global token, then `GITHUB_TOKEN`
    pub fn token_for(&self, scope: &str) -> Option<String> {
        self.organizations
            .iter()
            .find(|o| o.name == scope)
            .and_then(|o| non_empty(o.token.as_deref()))
            .or_else(|| non_empty(self.token.as_deref()))
            .or_else(|| non_empty(std::env::var(TOKEN_ENV_VAR).ok().as_deref()))
    }

    /// Token for personal repositories: global token, then `GITHUB_TOKEN`
    pub fn personal_token(&self) -> Option<String> {
        non_empty(self.token.as_deref())
            .or_else(|| non_empty(std::env::var(TOKEN_ENV_VAR).ok().as_deref()))
    }

    pub fn cache_timeout_minutes(&self) -> u32 {
        match self.cache_timeout {
            Some(minutes) if minutes > 0 => minutes,
            _ => DEFAULT_CACHE_TIMEOUT_MINUTES,
        }
    }

    pub fn should_show_uncloned(&self) -> bool {
        self.show_uncloned.unwrap_or(true)
    }

    pub fn should_show_description(&self) -> bool {
        self.show_description.unwrap_or(true)
    }
}
