//! Data types shared across listing, connecting and cloning.

mod catalog;
pub(crate) mod repo;
mod session;

pub use catalog::SessionCatalog;
pub use repo::{CacheEntry, RemoteRepo};
pub use session::{CloneOptions, ConnectOpts, Connection, PendingClone, Session, SessionSource};
