use std::sync::Arc;

use crate::cache::SharedCache;
use crate::managers::UserManager;
use crate::model::{Server, User};
use crate::user_managers::ServerRoster;

/// Read-only view over every server received by the client.
///
/// Servers enter this cache through the rosters of fetched users; mutating
/// calls go through the owner's [`ServerRoster`].
#[derive(Debug, Clone)]
pub struct ServerManager {
    cache: SharedCache<String, Arc<Server>>,
}

impl ServerManager {
    pub(crate) fn new(cache: SharedCache<String, Arc<Server>>) -> Self {
        Self { cache }
    }

    /// Look up a cached server by UUID or part of one
    pub fn get(&self, probe: &str) -> Option<Arc<Server>> {
        self.cache.read().get(probe).cloned()
    }

    pub fn find<F>(&self, mut predicate: F) -> Option<Arc<Server>>
    where
        F: FnMut(&Server) -> bool,
    {
        self.cache
            .read()
            .find(|server, _| predicate(&**server))
            .cloned()
    }

    /// The roster that manages the servers of `user`
    pub fn manager_for<'a>(&self, user: &'a User) -> &'a ServerRoster {
        user.servers()
    }

    /// The owner of a cached server, if that owner has been fetched
    pub fn owner_of(&self, probe: &str, users: &UserManager) -> Option<Arc<User>> {
        self.get(probe)?.owner(users)
    }

    pub fn list(&self) -> Vec<Arc<Server>> {
        self.cache.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}
