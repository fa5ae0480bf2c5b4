mod github;
mod settings;

pub use github::{GitHubSettings, OrgScope, DEFAULT_CACHE_TIMEOUT_MINUTES, TOKEN_ENV_VAR};
pub use settings::{ConfigError, DefaultSessionConfig, SessionConfig, Settings};
