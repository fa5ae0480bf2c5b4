use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Normalized GitHub repository record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRepo {
    pub id: i64,
    /// Short name (`widgets`)
    pub name: String,
    /// `owner/name`
    pub full_name: String,
    #[serde(default)]
    pub description: String,
    /// HTTPS clone URL
    pub clone_url: String,
    pub ssh_url: String,
    pub html_url: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub language: String,
    /// Last update (`%Y-%m-%dT%H:%M:%SZ`)
    #[serde(default)]
    pub updated_at: String,
    /// Last push (`%Y-%m-%dT%H:%M:%SZ`)
    #[serde(default)]
    pub pushed_at: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl RemoteRepo {
    /// Archived and disabled repositories are never listed
    pub fn is_listable(&self) -> bool {
        !self.archived && !self.disabled
    }

    /// Clone URL for the requested transport
    pub fn url_for(&self, use_ssh: bool) -> &str {
        if use_ssh {
            &self.ssh_url
        } else {
            &self.clone_url
        }
    }
}

/// On-disk cache record for one scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub repos: Vec<RemoteRepo>,
    pub cached_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Build an entry cached at `now` that expires `timeout_minutes` later
    pub fn new(repos: Vec<RemoteRepo>, now: DateTime<Utc>, timeout_minutes: u32) -> Self {
        Self {
            repos,
            cached_at: now,
            expires_at: now + Duration::minutes(i64::from(timeout_minutes)),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::repo;
    use super::*;

    #[test]
    fn test_cache_entry_expiry() {
        let now = Utc::now();
        let entry = CacheEntry::new(vec![repo("acme", "widgets")], now, 30);
        assert_eq!(entry.expires_at - entry.cached_at, Duration::minutes(30));
        assert!(!entry.is_expired(now + Duration::minutes(29)));
        assert!(entry.is_expired(now + Duration::minutes(31)));
    }

    #[test]
    fn test_url_for() {
        let r = repo("acme", "widgets");
        assert_eq!(r.url_for(true), "git@github.com:acme/widgets.git");
        assert_eq!(r.url_for(false), "https://github.com/acme/widgets.git");
    }

    #[test]
    fn test_is_listable() {
        let mut r = repo("acme", "widgets");
        assert!(r.is_listable());
        r.archived = true;
        assert!(!r.is_listable());
        r.archived = false;
        r.disabled = true;
        assert!(!r.is_listable());
    }
}
