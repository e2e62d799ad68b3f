use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::DashactylError;
use crate::managers::UserManager;
use crate::model::{decode, User, UserProfile};

/// Where a meta user stands in its one-way upgrade to a full user
#[derive(Debug, Clone, Default)]
pub enum Resolution {
    #[default]
    Unresolved,
    /// Upgraded; the full user is owned by the user cache, not by the meta user
    Resolved(Weak<User>),
}

#[derive(Debug, Deserialize)]
struct MetaBlock {
    #[serde(default)]
    resource: Option<String>,
}

/// A user as returned by the creation endpoint.
///
/// It carries the profile only. Coins, resource limits and servers require
/// a second round trip through [`MetaUser::resolve`].
#[derive(Debug)]
pub struct MetaUser {
    profile: UserProfile,
    meta_resource: Option<String>,
    state: RwLock<Resolution>,
    resolving: tokio::sync::Mutex<()>,
}

impl MetaUser {
    /// Build a meta user from the `data` member of a `POST /api/users` envelope.
    ///
    /// The profile sits under `data.attributes`; `meta.resource` is optional.
    pub(crate) fn from_payload(payload: &Value) -> Result<MetaUser, DashactylError> {
        let attributes = payload
            .pointer("/data/attributes")
            .ok_or_else(|| DashactylError::malformed("meta user", "missing field `data.attributes`"))?;

        let profile: UserProfile = decode("meta user", attributes)?;
        let meta_resource = match payload.get("meta") {
            Some(meta) if !meta.is_null() => decode::<MetaBlock>("meta user", meta)?.resource,
            _ => None,
        };

        Ok(MetaUser {
            profile,
            meta_resource,
            state: RwLock::new(Resolution::Unresolved),
            resolving: tokio::sync::Mutex::new(()),
        })
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn id(&self) -> u64 {
        self.profile.id
    }

    pub fn uuid(&self) -> &str {
        &self.profile.uuid
    }

    pub fn username(&self) -> &str {
        &self.profile.username
    }

    pub fn tag(&self) -> String {
        self.profile.tag()
    }

    /// Link to the user on the panel, when the API provides one
    pub fn meta_resource(&self) -> Option<&str> {
        self.meta_resource.as_deref()
    }

    pub fn state(&self) -> Resolution {
        self.state.read().clone()
    }

    pub fn is_resolved(&self) -> bool {
        matches!(*self.state.read(), Resolution::Resolved(_))
    }

    /// The full user this meta user was resolved to, if it is still cached
    pub fn resolved_user(&self) -> Option<Arc<User>> {
        match &*self.state.read() {
            Resolution::Resolved(user) => user.upgrade(),
            Resolution::Unresolved => None,
        }
    }

    /// Upgrade to a full user with one fetch by username.
    ///
    /// The full user replaces this meta user in the user cache. Only one
    /// resolution can succeed; later calls fail with `AlreadyResolved`. A
    /// failed fetch leaves the meta user unresolved.
    pub async fn resolve(&self, users: &UserManager) -> Result<Arc<User>, DashactylError> {
        let _guard = self.resolving.lock().await;

        if self.is_resolved() {
            return Err(DashactylError::AlreadyResolved {
                username: self.profile.username.clone(),
            });
        }

        let user = users.fetch_full(&self.profile.username).await?;
        *self.state.write() = Resolution::Resolved(Arc::downgrade(&user));
        debug!("Resolved meta user {}", self.profile.username);

        Ok(user)
    }
}

impl Serialize for MetaUser {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        struct View<'a> {
            profile: &'a UserProfile,
            #[serde(skip_serializing_if = "Option::is_none")]
            meta_resource: Option<&'a str>,
            resolved: bool,
        }

        View {
            profile: &self.profile,
            meta_resource: self.meta_resource(),
            resolved: self.is_resolved(),
        }
        .serialize(serializer)
    }
}

/// An entry of the user cache: either a meta user or a full user
#[derive(Debug, Clone)]
pub enum UserRecord {
    Meta(Arc<MetaUser>),
    Full(Arc<User>),
}

impl UserRecord {
    pub fn profile(&self) -> &UserProfile {
        match self {
            UserRecord::Meta(meta) => meta.profile(),
            UserRecord::Full(user) => user.profile(),
        }
    }

    pub fn id(&self) -> u64 {
        self.profile().id
    }

    pub fn uuid(&self) -> &str {
        &self.profile().uuid
    }

    pub fn username(&self) -> &str {
        &self.profile().username
    }

    pub fn is_meta(&self) -> bool {
        matches!(self, UserRecord::Meta(_))
    }

    pub fn as_full(&self) -> Option<&Arc<User>> {
        match self {
            UserRecord::Full(user) => Some(user),
            UserRecord::Meta(_) => None,
        }
    }

    pub fn as_meta(&self) -> Option<&Arc<MetaUser>> {
        match self {
            UserRecord::Meta(meta) => Some(meta),
            UserRecord::Full(_) => None,
        }
    }

    /// Resolve a meta record; a full record cannot be resolved
    pub async fn resolve(&self, users: &UserManager) -> Result<Arc<User>, DashactylError> {
        match self {
            UserRecord::Meta(meta) => meta.resolve(users).await,
            UserRecord::Full(user) => Err(DashactylError::InvalidOperation(format!(
                "only meta users can be resolved, '{}' is already a full user",
                user.username()
            ))),
        }
    }
}

impl Serialize for UserRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            UserRecord::Meta(meta) => meta.serialize(serializer),
            UserRecord::Full(user) => user.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::meta_payload;

    #[test]
    fn test_meta_user_from_payload() {
        let meta = MetaUser::from_payload(&meta_payload("9e8d7c6b", "newbie")).unwrap();

        assert_eq!(meta.id(), 12);
        assert_eq!(meta.username(), "newbie");
        assert!(!meta.profile().is_admin);
        assert_eq!(
            meta.meta_resource(),
            Some("https://panel.example.com/api/application/users/12")
        );
        assert!(!meta.is_resolved());
        assert!(meta.resolved_user().is_none());
        assert!(matches!(meta.state(), Resolution::Unresolved));
    }

    #[test]
    fn test_meta_user_without_meta_block() {
        let mut payload = meta_payload("9e8d7c6b", "newbie");
        payload.as_object_mut().unwrap().remove("meta");
        let meta = MetaUser::from_payload(&payload).unwrap();
        assert!(meta.meta_resource().is_none());
    }

    #[test]
    fn test_meta_user_missing_username_is_malformed() {
        let mut payload = meta_payload("9e8d7c6b", "newbie");
        payload["data"]["attributes"]
            .as_object_mut()
            .unwrap()
            .remove("username");
        assert!(matches!(
            MetaUser::from_payload(&payload),
            Err(DashactylError::MalformedPayload { entity: "meta user", .. })
        ));
    }
}
