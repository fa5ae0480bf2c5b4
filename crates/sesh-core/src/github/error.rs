use thiserror::Error;

/// Errors from GitHub API calls and shorthand parsing
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The API answered 404 (e.g. a user queried as an organization)
    #[error("{context}: not found")]
    NotFound { context: String },

    /// The API answered with another non-success status
    #[error("{context}: HTTP {status}")]
    Status { context: String, status: u16 },

    /// The request failed before a status was received, or the body was unreadable
    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: ureq::Error,
    },

    /// `/user` answered without a `login` field
    #[error("authenticated user login is missing")]
    MissingLogin,

    /// Input is neither `owner/repo` nor a GitHub URL
    #[error("invalid GitHub shorthand format: {0}")]
    InvalidShorthand(String),
}

impl GitHubError {
    /// Wrap a ureq error with the operation it interrupted
    pub(crate) fn from_ureq(context: impl Into<String>, err: ureq::Error) -> Self {
        let context = context.into();
        match err {
            ureq::Error::StatusCode(404) => GitHubError::NotFound { context },
            ureq::Error::StatusCode(status) => GitHubError::Status { context, status },
            source => GitHubError::Transport { context, source },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GitHubError::NotFound { .. })
    }
}
