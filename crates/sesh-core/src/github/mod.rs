//! GitHub repository discovery: REST client, on-disk cache, shorthand
//! parsing, and the multi-scope adapter that ties them together.

pub mod cache;
pub mod client;
mod error;
mod repos;
pub mod shorthand;

pub use cache::{CacheFileInfo, FileCache, RepoCache};
pub use client::{ApiClient, GitHubApi};
pub use error::GitHubError;
pub use repos::{GitHubRepos, ScopedRepos};

/// Host every GitHub clone path and URL is built from
pub const GITHUB_HOST: &str = "github.com";
