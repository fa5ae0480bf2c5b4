use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Smart terminal session manager")]
pub struct Config {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List sessions from tmux, config, zoxide and GitHub
    #[command(alias = "l")]
    List(ListArgs),
    /// Connect to a session, creating it if needed
    #[command(alias = "cn")]
    Connect {
        /// Session name, catalog key or directory
        name: String,
        /// Use switch-client even outside tmux
        #[arg(short, long)]
        switch: bool,
        /// Run this instead of the session's startup command
        #[arg(short = 'C', long)]
        command: Option<String>,
    },
    /// Clone a repository and connect to it
    #[command(alias = "cl")]
    Clone {
        /// `owner/repo`, GitHub URL or any git URL
        repo: String,
        /// Directory to run the clone in
        #[arg(long)]
        cmd_dir: Option<String>,
        /// Name of the cloned directory
        #[arg(short, long)]
        dir: Option<String>,
    },
    /// Switch to the previous tmux session
    #[command(alias = "L")]
    Last,
    /// Inspect or clear the GitHub repository cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Show tmux sessions
    #[arg(short, long)]
    pub tmux: bool,
    /// Show configured sessions
    #[arg(short = 'c', long)]
    pub configured: bool,
    /// Show zoxide directories
    #[arg(short, long)]
    pub zoxide: bool,
    /// Show GitHub repositories
    #[arg(short, long)]
    pub github: bool,
    /// Hide tmux sessions with attached clients
    #[arg(short = 'H', long)]
    pub hide_attached: bool,
    /// Hide entries pointing at an already listed path
    #[arg(short = 'd', long)]
    pub hide_duplicates: bool,
    /// Bypass the GitHub cache
    #[arg(short, long)]
    pub refresh: bool,
    /// Print sessions as JSON
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheAction {
    /// Remove every cached scope
    Clear,
    /// Show cached scopes and when they were written
    Info,
}

impl Config {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
