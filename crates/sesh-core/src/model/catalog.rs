use indexmap::IndexMap;
use serde::Serialize;

use super::Session;

/// Ordered, keyed set of sessions from every source
///
/// Keys are `<source>:<name>` and unique; iteration follows insertion
/// order, which is the only ranking the list carries.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SessionCatalog {
    entries: IndexMap<String, Session>,
}

impl SessionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a session under `key`. The first insert for a key wins;
    /// returns false when the key was already present.
    pub fn insert(&mut self, key: impl Into<String>, session: Session) -> bool {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, session);
        true
    }

    /// Append every entry of `other`, keeping its order
    pub fn extend(&mut self, other: SessionCatalog) {
        for (key, session) in other.entries {
            self.insert(key, session);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Session> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Session at a position in the order
    pub fn get_index(&self, index: usize) -> Option<(&String, &Session)> {
        self.entries.get_index(index)
    }

    /// Keys in order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Sessions in order
    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.entries.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Session)> {
        self.entries.iter()
    }

    /// Keep only the entries matching `keep`, preserving order
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &Session) -> bool) {
        self.entries.retain(|key, session| keep(key, session));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_sessions(self) -> Vec<Session> {
        self.entries.into_values().collect()
    }
}

impl IntoIterator for SessionCatalog {
    type Item = (String, Session);
    type IntoIter = indexmap::map::IntoIter<String, Session>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SessionSource;
    use pretty_assertions::assert_eq;

    fn session(name: &str) -> Session {
        Session::new(SessionSource::Tmux, name, format!("/tmp/{}", name))
    }

    #[test]
    fn test_insert_keeps_order_and_rejects_duplicates() {
        let mut catalog = SessionCatalog::new();
        assert!(catalog.insert("tmux:b", session("b")));
        assert!(catalog.insert("tmux:a", session("a")));
        assert!(!catalog.insert("tmux:b", session("other")));

        let keys: Vec<&String> = catalog.keys().collect();
        assert_eq!(keys, vec!["tmux:b", "tmux:a"]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("tmux:b").unwrap().name, "b");
    }

    #[test]
    fn test_extend_and_retain() {
        let mut first = SessionCatalog::new();
        first.insert("tmux:a", session("a"));
        let mut second = SessionCatalog::new();
        second.insert("config:a", session("a"));
        second.insert("tmux:a", session("dup"));
        first.extend(second);

        assert_eq!(first.len(), 2);
        first.retain(|key, _| key.starts_with("config:"));
        let keys: Vec<&String> = first.keys().collect();
        assert_eq!(keys, vec!["config:a"]);
    }
}
