//! Home directory capability shared by every component that expands `~`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Access to the user's home directory
pub trait Home {
    /// Absolute path of the home directory
    fn home_dir(&self) -> Result<PathBuf>;

    /// Expand a leading `~` (alone or followed by `/`) to the home directory
    fn expand_home(&self, path: &str) -> Result<PathBuf> {
        if path == "~" {
            return self.home_dir();
        }
        match path.strip_prefix("~/") {
            Some(rest) => Ok(self.home_dir()?.join(rest)),
            None => Ok(PathBuf::from(path)),
        }
    }

    /// Replace a leading home directory with `~` for display
    fn shorten_home(&self, path: &Path) -> String {
        let Ok(home) = self.home_dir() else {
            return path.display().to_string();
        };
        match path.strip_prefix(&home) {
            Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
            Ok(rest) => format!("~/{}", rest.display()),
            Err(_) => path.display().to_string(),
        }
    }
}

/// Home directory resolved from the environment
#[derive(Debug, Clone, Copy, Default)]
pub struct RealHome;

impl Home for RealHome {
    fn home_dir(&self) -> Result<PathBuf> {
        dirs::home_dir().context("Could not determine home directory")
    }
}

/// Home directory pinned to a fixed path
#[derive(Debug, Clone)]
pub struct FixedHome(pub PathBuf);

impl Home for FixedHome {
    fn home_dir(&self) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        let home = FixedHome(PathBuf::from("/home/u"));
        assert_eq!(home.expand_home("~").unwrap(), PathBuf::from("/home/u"));
        assert_eq!(
            home.expand_home("~/git").unwrap(),
            PathBuf::from("/home/u/git")
        );
        assert_eq!(home.expand_home("/opt/x").unwrap(), PathBuf::from("/opt/x"));
        // Only a leading tilde segment is expanded
        assert_eq!(
            home.expand_home("~other/x").unwrap(),
            PathBuf::from("~other/x")
        );
    }

    #[test]
    fn test_shorten_home() {
        let home = FixedHome(PathBuf::from("/home/u"));
        assert_eq!(home.shorten_home(Path::new("/home/u")), "~");
        assert_eq!(home.shorten_home(Path::new("/home/u/code/x")), "~/code/x");
        assert_eq!(home.shorten_home(Path::new("/tmp/x")), "/tmp/x");
    }
}
