use anyhow::Result;

use super::Lister;
use crate::model::{Session, SessionCatalog, SessionSource};

impl Lister {
    /// zoxide directories, named by their home-shortened path
    pub(crate) fn list_zoxide(&self) -> Result<SessionCatalog> {
        let mut catalog = SessionCatalog::new();
        for result in self.zoxide.list()? {
            let name = self.home.shorten_home(&result.path);
            let mut session = Session::new(SessionSource::Zoxide, name.clone(), result.path);
            session.score = result.score;
            catalog.insert(SessionSource::Zoxide.key(&name), session);
        }
        Ok(catalog)
    }
}
