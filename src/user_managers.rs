//! Sub-managers owned by a single [`crate::model::User`].
//!
//! Each one is built from its slice of the user payload and exposes the
//! mutating calls for that slice. Local state only changes after the API has
//! confirmed the call.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::cache::{ResourceCache, SharedCache};
use crate::error::DashactylError;
use crate::model::resources::{check_amount, MAX_AMOUNT};
use crate::model::{decode, Package, Resources, Server};
use crate::transport::{path_segment, Rest};

/// The coin balance of a user
#[derive(Debug)]
pub struct Coins {
    rest: Rest,
    username: String,
    amount: RwLock<u64>,
    queue: Mutex<()>,
}

impl Coins {
    /// Build from the `coins` member of a user payload; absent or `null` is zero
    pub(crate) fn from_payload(
        rest: Rest,
        username: &str,
        coins: Option<&Value>,
    ) -> Result<Coins, DashactylError> {
        let amount = match coins {
            None | Some(Value::Null) => 0,
            Some(value) => decode::<u64>("coins", value)?,
        };

        Ok(Coins {
            rest,
            username: username.to_string(),
            amount: RwLock::new(amount),
            queue: Mutex::new(()),
        })
    }

    pub fn amount(&self) -> u64 {
        *self.amount.read()
    }

    /// Add coins to the balance
    pub async fn add(&self, amount: u64) -> Result<u64, DashactylError> {
        let _turn = self.queue.lock().await;
        let current = self.amount();
        let total = current
            .checked_add(amount)
            .filter(|total| *total <= MAX_AMOUNT)
            .ok_or_else(|| {
                DashactylError::Validation(format!(
                    "Coins must be between 0 and 9 hundred-trillion (have {}, adding {})",
                    current, amount
                ))
            })?;
        self.commit(total).await
    }

    /// Remove coins from the balance; the balance never drops below zero
    pub async fn remove(&self, amount: u64) -> Result<u64, DashactylError> {
        check_amount("Coins", amount)?;
        let _turn = self.queue.lock().await;
        let total = self.amount().saturating_sub(amount);
        self.commit(total).await
    }

    /// Replace the balance
    pub async fn set(&self, amount: u64) -> Result<u64, DashactylError> {
        check_amount("Coins", amount)?;
        let _turn = self.queue.lock().await;
        self.commit(amount).await
    }

    async fn commit(&self, total: u64) -> Result<u64, DashactylError> {
        let path = format!("/api/users/{}/coins", path_segment(&self.username));
        self.rest.patch(&path, json!({ "coins": total })).await?;

        *self.amount.write() = total;
        debug!("Coins of {} set to {}", self.username, total);
        Ok(total)
    }
}

#[derive(Debug, Clone)]
struct Limits {
    package: Package,
    extra: Option<Resources>,
}

/// The plan and extra resources of a user
#[derive(Debug)]
pub struct ResourceLimits {
    rest: Rest,
    username: String,
    state: RwLock<Limits>,
    queue: Mutex<()>,
}

impl ResourceLimits {
    /// Build from the `package` (required) and `extra` (optional) members of a user payload
    pub(crate) fn from_payload(
        rest: Rest,
        username: &str,
        payload: &Value,
    ) -> Result<ResourceLimits, DashactylError> {
        let package = payload
            .get("package")
            .filter(|package| !package.is_null())
            .ok_or_else(|| DashactylError::malformed("resource limits", "missing field `package`"))?;
        let package: Package = decode("resource limits", package)?;

        let extra = match payload.get("extra") {
            None | Some(Value::Null) => None,
            Some(extra) => Some(decode::<Resources>("resource limits", extra)?),
        };

        Ok(ResourceLimits {
            rest,
            username: username.to_string(),
            state: RwLock::new(Limits { package, extra }),
            queue: Mutex::new(()),
        })
    }

    pub fn package(&self) -> Package {
        self.state.read().package.clone()
    }

    pub fn extra(&self) -> Option<Resources> {
        self.state.read().extra
    }

    /// Effective limits: the plan plus any extra resources
    pub fn limits(&self) -> Resources {
        let state = self.state.read();
        match &state.extra {
            Some(extra) => state.package.resources.saturating_add(extra),
            None => state.package.resources,
        }
    }

    /// Replace the extra resources granted on top of the plan
    pub async fn set(&self, extra: Resources) -> Result<Resources, DashactylError> {
        extra.validate()?;
        let _turn = self.queue.lock().await;

        let path = format!("/api/users/{}/resources", path_segment(&self.username));
        let body = serde_json::to_value(extra)
            .map_err(|e| DashactylError::malformed("resource limits", e.to_string()))?;
        self.rest.patch(&path, body).await?;

        self.state.write().extra = Some(extra);
        debug!("Extra resources of {} set to {:?}", self.username, extra);
        Ok(self.limits())
    }

    /// Move the user to another plan
    pub async fn set_plan(&self, package: Package) -> Result<Resources, DashactylError> {
        let name = package
            .name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| DashactylError::Validation("a plan needs a package name".to_string()))?;
        package.resources.validate()?;
        let _turn = self.queue.lock().await;

        let path = format!("/api/users/{}/package", path_segment(&self.username));
        let resources = package.resources;
        let body = json!({
            "package": name,
            "ram": resources.ram,
            "disk": resources.disk,
            "cpu": resources.cpu,
            "servers": resources.servers,
        });
        self.rest.patch(&path, body).await?;

        debug!("Package of {} set to {}", self.username, name);
        self.state.write().package = package;
        Ok(self.limits())
    }
}

#[derive(Debug, Deserialize)]
struct ServerList {
    #[serde(default)]
    data: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct Relationships {
    #[serde(default)]
    servers: Option<ServerList>,
}

/// The servers owned by a user, keyed by server UUID
#[derive(Debug)]
pub struct ServerRoster {
    rest: Rest,
    server_cache: SharedCache<String, Arc<Server>>,
    cache: RwLock<ResourceCache<String, Arc<Server>>>,
}

impl ServerRoster {
    /// Build from the `relationships` member of the user attributes.
    ///
    /// Nothing is written to the client-wide server cache until [`ServerRoster::publish`].
    pub(crate) fn from_relationships(
        rest: Rest,
        server_cache: &SharedCache<String, Arc<Server>>,
        relationships: Option<&Value>,
    ) -> Result<ServerRoster, DashactylError> {
        let relationships: Relationships = match relationships {
            None | Some(Value::Null) => Relationships::default(),
            Some(value) => decode("server roster", value)?,
        };

        let mut cache = ResourceCache::new();
        for payload in relationships.servers.map(|list| list.data).unwrap_or_default() {
            let server = Server::from_payload(&payload)?;
            cache.upsert(server.uuid().to_string(), Arc::new(server));
        }
        trace!("Built server roster with {} servers", cache.len());

        Ok(ServerRoster {
            rest,
            server_cache: server_cache.clone(),
            cache: RwLock::new(cache),
        })
    }

    /// Copy every server of the roster into the client-wide server cache
    pub(crate) fn publish(&self) {
        let roster = self.cache.read();
        let mut servers = self.server_cache.write();
        for (uuid, server) in roster.iter() {
            servers.upsert(uuid.clone(), server.clone());
        }
    }

    /// Look up a server by UUID or part of one
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

    pub fn list(&self) -> Vec<Arc<Server>> {
        self.cache.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Delete a server of this user on the panel
    pub async fn delete(&self, probe: &str) -> Result<Arc<Server>, DashactylError> {
        let server = self.get(probe).ok_or_else(|| DashactylError::NotFound {
            kind: "server",
            key: probe.to_string(),
        })?;

        let path = format!("/api/servers/{}", path_segment(server.identifier()));
        self.rest.delete(&path).await?;

        self.cache.write().remove(server.uuid());
        self.server_cache.write().remove(server.uuid());
        debug!("Deleted server {}", server.uuid());
        Ok(server)
    }
}
