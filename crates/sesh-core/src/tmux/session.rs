/// Information about a tmux session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmuxSession {
    /// Session name
    pub name: String,
    /// Session working directory
    pub path: String,
    /// Number of attached clients
    pub attached: u32,
    /// Number of windows
    pub windows: u32,
    /// Unix time of the last attach (0 if never attached)
    pub last_attached: i64,
}

impl TmuxSession {
    /// `list-sessions` format matching [`TmuxSession::parse`]
    pub const FORMAT: &'static str =
        "#{session_name}\t#{session_path}\t#{session_attached}\t#{session_windows}\t#{session_last_attached}";

    /// Parse a session line from tmux list-sessions output
    /// Format: name\tpath\tattached\twindows\tlast_attached
    pub fn parse(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 4 || parts[0].is_empty() {
            return None;
        }

        Some(Self {
            name: parts[0].to_string(),
            path: parts[1].to_string(),
            attached: parts[2].parse().unwrap_or(0),
            windows: parts[3].parse().unwrap_or(0),
            last_attached: parts.get(4).and_then(|s| s.parse().ok()).unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session() {
        let session = TmuxSession::parse("main\t/home/u/code\t1\t3\t1700000000").unwrap();
        assert_eq!(session.name, "main");
        assert_eq!(session.path, "/home/u/code");
        assert_eq!(session.attached, 1);
        assert_eq!(session.windows, 3);
        assert_eq!(session.last_attached, 1700000000);
    }

    #[test]
    fn test_parse_never_attached() {
        let session = TmuxSession::parse("bg\t/tmp\t0\t1\t").unwrap();
        assert_eq!(session.attached, 0);
        assert_eq!(session.last_attached, 0);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(TmuxSession::parse("").is_none());
        assert!(TmuxSession::parse("only\ttwo").is_none());
    }
}
