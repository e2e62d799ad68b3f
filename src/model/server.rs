use std::sync::{Arc, Weak};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::error::DashactylError;
use crate::managers::UserManager;
use crate::model::{decode, null_as_default, User};

/// Resource limits recorded on a server at the time it was fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerLimits {
    pub memory: i64,
    pub swap: i64,
    pub disk: i64,
    pub io: i64,
    pub cpu: i64,
    #[serde(default)]
    pub threads: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureLimits {
    #[serde(default, deserialize_with = "null_as_default")]
    pub databases: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub allocations: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub backups: u32,
}

/// The plain data of a server, as found under `attributes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerDetails {
    pub id: u64,
    pub uuid: String,
    pub identifier: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suspended: bool,
    pub limits: ServerLimits,
    #[serde(default)]
    pub feature_limits: FeatureLimits,
    /// Panel ID of the owning user
    #[serde(rename = "user")]
    pub owner_id: u64,
    pub node: u64,
    pub allocation: u64,
    pub nest: u64,
    pub egg: u64,
    #[serde(default)]
    pub container: Value,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A Pterodactyl server owned by a Dashactyl user.
///
/// The owner is referenced by ID only. [`Server::owner`] looks it up in the
/// user cache on demand and remembers a found owner through a weak pointer,
/// so a server never keeps its owner alive.
#[derive(Debug)]
pub struct Server {
    details: ServerDetails,
    owner: Mutex<Weak<User>>,
}

impl Server {
    /// Build a server from a `{ "attributes": { ... } }` payload
    pub(crate) fn from_payload(payload: &Value) -> Result<Server, DashactylError> {
        let attributes = payload
            .get("attributes")
            .ok_or_else(|| DashactylError::malformed("server", "missing field `attributes`"))?;

        Ok(Server {
            details: decode("server", attributes)?,
            owner: Mutex::new(Weak::new()),
        })
    }

    pub fn details(&self) -> &ServerDetails {
        &self.details
    }

    pub fn id(&self) -> u64 {
        self.details.id
    }

    pub fn uuid(&self) -> &str {
        &self.details.uuid
    }

    pub fn identifier(&self) -> &str {
        &self.details.identifier
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn is_suspended(&self) -> bool {
        self.details.suspended
    }

    pub fn limits(&self) -> &ServerLimits {
        &self.details.limits
    }

    pub fn owner_id(&self) -> u64 {
        self.details.owner_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.details.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.details.updated_at
    }

    /// Find the owner of this server among the resolved users in the cache.
    ///
    /// A found owner is remembered for later calls while it stays alive.
    /// A miss is not remembered: the next call scans the cache again, since
    /// the owner may have been fetched in the meantime.
    pub fn owner(&self, users: &UserManager) -> Option<Arc<User>> {
        let remembered = self.owner.lock().upgrade();
        if let Some(owner) = remembered {
            return Some(owner);
        }

        trace!(
            "Looking up owner {} of server {} in the user cache",
            self.details.owner_id,
            self.details.uuid
        );
        let owner = users.find_user(|user| user.id() == self.details.owner_id)?;
        *self.owner.lock() = Arc::downgrade(&owner);
        Some(owner)
    }
}
