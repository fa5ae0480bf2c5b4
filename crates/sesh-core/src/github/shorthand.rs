//! `owner/repo` and GitHub URL shorthand.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

use super::{GitHubError, GITHUB_HOST};
use crate::config::GitHubSettings;
use crate::home::Home;

/// Root for clones when `clone_dir` is unset
pub const DEFAULT_CLONE_DIR: &str = "~/git";

/// `owner/repo`
static SHORTHAND_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9._-]+)/([a-zA-Z0-9._-]+)$").expect("Invalid SHORTHAND_PATTERN regex")
});

/// `[https://][www.]github.com/owner/repo[.git][/]`
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?github\.com/([a-zA-Z0-9._-]+)/([a-zA-Z0-9._-]+?)(?:\.git)?/?$")
        .expect("Invalid URL_PATTERN regex")
});

/// Whether the input is `owner/repo` or a GitHub repository URL
pub fn is_shorthand(input: &str) -> bool {
    SHORTHAND_PATTERN.is_match(input) || URL_PATTERN.is_match(input)
}

/// Split shorthand or a GitHub URL into `(owner, repo)`
pub fn extract_owner_and_repo(input: &str) -> Result<(String, String), GitHubError> {
    let caps = SHORTHAND_PATTERN
        .captures(input)
        .or_else(|| URL_PATTERN.captures(input))
        .ok_or_else(|| GitHubError::InvalidShorthand(input.to_string()))?;

    Ok((caps[1].to_string(), caps[2].to_string()))
}

/// Clone URL for shorthand input, SSH or HTTPS per settings
pub fn convert_to_url(input: &str, settings: &GitHubSettings) -> Result<String, GitHubError> {
    let (owner, repo) = extract_owner_and_repo(input)?;

    if settings.use_ssh {
        Ok(format!("git@{}:{}/{}.git", GITHUB_HOST, owner, repo))
    } else {
        Ok(format!("https://{}/{}/{}.git", GITHUB_HOST, owner, repo))
    }
}

/// Root directory for clones (`clone_dir` or `~/git`), home-expanded
pub fn clone_root(settings: &GitHubSettings, home: &dyn Home) -> Result<PathBuf> {
    let dir = settings
        .clone_dir
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_CLONE_DIR);
    home.expand_home(dir)
}

/// `<clone root>/github.com/<owner>/<repo>`
pub fn clone_path(
    owner: &str,
    repo: &str,
    settings: &GitHubSettings,
    home: &dyn Home,
) -> Result<PathBuf> {
    Ok(clone_root(settings, home)?
        .join(GITHUB_HOST)
        .join(owner)
        .join(repo))
}
