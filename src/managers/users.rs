use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::cache::SharedCache;
use crate::error::DashactylError;
use crate::model::{decode, envelope_data, MetaUser, Server, User, UserRecord};
use crate::transport::{path_segment, Rest};

/// Fields required to register a new user on the panel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            password: None,
        }
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn validate(&self) -> Result<(), DashactylError> {
        let required = [
            &self.username,
            &self.email,
            &self.first_name,
            &self.last_name,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(DashactylError::Validation(
                "username, email, first name and last name are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Manages every user received by the client, keyed by UUID
#[derive(Debug, Clone)]
pub struct UserManager {
    rest: Rest,
    cache: SharedCache<String, UserRecord>,
    servers: SharedCache<String, Arc<Server>>,
}

impl UserManager {
    pub(crate) fn new(
        rest: Rest,
        cache: SharedCache<String, UserRecord>,
        servers: SharedCache<String, Arc<Server>>,
    ) -> Self {
        Self {
            rest,
            cache,
            servers,
        }
    }

    /// Register a new user.
    ///
    /// The API answers with a reduced profile, cached as a meta user until it
    /// is resolved with [`MetaUser::resolve`].
    pub async fn create(&self, new_user: NewUser) -> Result<Arc<MetaUser>, DashactylError> {
        new_user.validate()?;

        let body = serde_json::to_value(&new_user)
            .map_err(|e| DashactylError::Validation(e.to_string()))?;
        let envelope = self.rest.post("/api/users", body).await?;
        let meta = Arc::new(MetaUser::from_payload(envelope_data("meta user", &envelope)?)?);

        self.cache
            .write()
            .upsert(meta.uuid().to_string(), UserRecord::Meta(meta.clone()));
        debug!("Created user {} ({})", meta.username(), meta.uuid());
        Ok(meta)
    }

    /// Fetch a user, checking the cache first when `check_cache` is set.
    ///
    /// A cache hit may be a meta user; a fetch always yields a full user.
    pub async fn fetch(&self, id: &str, check_cache: bool) -> Result<UserRecord, DashactylError> {
        if check_cache {
            if let Some(record) = self.get(id) {
                trace!("User {} served from cache", id);
                return Ok(record);
            }
        }
        Ok(UserRecord::Full(self.fetch_full(id).await?))
    }

    /// Fetch the full form of a user by username or ID and cache it under its UUID
    pub async fn fetch_full(&self, id: &str) -> Result<Arc<User>, DashactylError> {
        let envelope = self.rest.get(&format!("/api/users/{}", path_segment(id))).await?;
        let user = Arc::new(User::from_payload(&self.rest, &self.servers, &envelope)?);

        self.cache
            .write()
            .upsert(user.uuid().to_string(), UserRecord::Full(user.clone()));
        user.publish_servers();
        debug!("Fetched user {} ({})", user.username(), user.uuid());
        Ok(user)
    }

    /// Fetch every user known to the panel.
    ///
    /// Nothing is cached, users or servers, unless every payload in the list decodes.
    pub async fn fetch_all(&self) -> Result<Vec<Arc<User>>, DashactylError> {
        let envelope = self.rest.get("/api/users").await?;
        let payloads: Vec<Value> = decode("user list", envelope_data("user list", &envelope)?)?;

        let users = payloads
            .iter()
            .map(|payload| User::from_payload(&self.rest, &self.servers, payload).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;

        let mut cache = self.cache.write();
        for user in &users {
            cache.upsert(user.uuid().to_string(), UserRecord::Full(user.clone()));
            user.publish_servers();
        }
        debug!("Fetched {} users", users.len());
        Ok(users)
    }

    /// Look up a cached user by UUID or part of one
    pub fn get(&self, probe: &str) -> Option<UserRecord> {
        self.cache.read().get(probe).cloned()
    }

    /// Return the first cached user for which `predicate` holds
    pub fn find<F>(&self, mut predicate: F) -> Option<UserRecord>
    where
        F: FnMut(&UserRecord) -> bool,
    {
        self.cache.read().find(|record, _| predicate(record)).cloned()
    }

    /// Return the first resolved user for which `predicate` holds; meta users are skipped
    pub fn find_user<F>(&self, mut predicate: F) -> Option<Arc<User>>
    where
        F: FnMut(&User) -> bool,
    {
        self.cache
            .read()
            .find(|record, _| record.as_full().is_some_and(|user| predicate(&**user)))
            .and_then(|record| record.as_full().cloned())
    }

    /// Delete a user account on the panel and drop it from the user cache.
    ///
    /// Servers owned by the user stay in the server cache.
    pub async fn remove(&self, username: &str) -> Result<usize, DashactylError> {
        self.rest.delete(&format!("/api/users/{}", path_segment(username))).await?;

        let removed = self
            .cache
            .write()
            .remove_where(|record, _| record.username() == username);
        debug!("Removed user {} ({} cache entries)", username, removed.len());
        Ok(removed.len())
    }

    pub fn list(&self) -> Vec<UserRecord> {
        self.cache.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}
