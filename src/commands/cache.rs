use anyhow::Result;
use chrono::Local;

use sesh_core::github::{CacheFileInfo, FileCache, RepoCache};
use sesh_core::home::RealHome;

use crate::cli::CacheAction;

pub fn run(action: CacheAction) -> Result<()> {
    let cache = FileCache::new(&RealHome)?;
    match action {
        CacheAction::Clear => {
            let removed = cache.clear()?;
            println!("Removed {} cached scope(s) from {}", removed, cache.cache_path().display());
        }
        CacheAction::Info => {
            println!("Cache directory: {}", cache.cache_path().display());
            let entries = cache.entries()?;
            if entries.is_empty() {
                println!("No cached scopes");
            }
            for entry in &entries {
                println!("{}", describe(entry));
            }
        }
    }
    Ok(())
}

fn describe(entry: &CacheFileInfo) -> String {
    let age = Local::now().signed_duration_since(entry.modified);
    format!(
        "{:<30} {} ({}m ago)",
        entry.scope,
        entry.modified.format("%Y-%m-%d %H:%M:%S"),
        age.num_minutes().max(0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_describe_includes_scope_and_age() {
        let modified = Local::now() - Duration::minutes(5);
        let line = describe(&CacheFileInfo {
            scope: "acme".to_string(),
            modified,
        });
        assert!(line.starts_with("acme "));
        assert!(line.contains("(5m ago)") || line.contains("(4m ago)"));

        let fixed = Local.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let line = describe(&CacheFileInfo {
            scope: "jane".to_string(),
            modified: fixed,
        });
        assert!(line.contains("2024-05-01 10:00:00"));
    }
}
