//! Core library for sesh.
//!
//! Merges tmux sessions, zoxide directories, configured sessions and GitHub
//! repositories into one ordered [`SessionCatalog`](model::SessionCatalog),
//! and resolves a chosen entry into a session ready to attach, cloning the
//! repository first when needed.

pub mod cloner;
pub mod config;
pub mod connector;
pub mod git;
pub mod github;
pub mod home;
pub mod lister;
pub mod model;
pub mod tmux;
pub mod zoxide;

#[cfg(test)]
pub(crate) mod testing;
