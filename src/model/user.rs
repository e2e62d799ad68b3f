use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::trace;

use crate::cache::SharedCache;
use crate::error::DashactylError;
use crate::model::{decode, null_as_default, Server};
use crate::transport::Rest;
use crate::user_managers::{Coins, ResourceLimits, ServerRoster};

/// Profile fields shared by full and meta users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The panel ID of the user
    pub id: u64,
    /// The stable UUID of the user; used as the cache key
    pub uuid: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(rename = "root_admin", default, deserialize_with = "null_as_default")]
    pub is_admin: bool,
    #[serde(rename = "2fa", default, deserialize_with = "null_as_default")]
    pub tfa: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// First and last name joined together, as the panel displays them
    pub fn tag(&self) -> String {
        format!("{}{}", self.first_name, self.last_name)
    }
}

/// A fully resolved Dashactyl user.
///
/// The user owns three sub-managers built from the same payload: its coin
/// balance, its resource limits and the roster of servers it owns. They are
/// never shared with another user.
#[derive(Debug)]
pub struct User {
    profile: UserProfile,
    servers: ServerRoster,
    resources: ResourceLimits,
    coins: Coins,
}

impl User {
    /// Build a user from a `GET /api/users/{id}` response envelope.
    ///
    /// The profile lives under `userinfo.attributes`; the sub-managers are
    /// handed their own slices of the payload (`relationships`, `package` and
    /// `extra`, `coins`). Building a user has no side effects: the servers
    /// found in the payload reach `server_cache` only through
    /// [`User::publish_servers`].
    pub(crate) fn from_payload(
        rest: &Rest,
        server_cache: &SharedCache<String, Arc<Server>>,
        payload: &Value,
    ) -> Result<User, DashactylError> {
        let attributes = payload
            .pointer("/userinfo/attributes")
            .ok_or_else(|| DashactylError::malformed("user", "missing field `userinfo.attributes`"))?;

        let profile: UserProfile = decode("user", attributes)?;
        trace!("Building user {} ({})", profile.username, profile.uuid);

        let servers = ServerRoster::from_relationships(
            rest.clone(),
            server_cache,
            attributes.get("relationships"),
        )?;
        let resources = ResourceLimits::from_payload(rest.clone(), &profile.username, payload)?;
        let coins = Coins::from_payload(rest.clone(), &profile.username, payload.get("coins"))?;

        Ok(User {
            profile,
            servers,
            resources,
            coins,
        })
    }

    /// Copy the servers of this user into the client-wide server cache
    pub(crate) fn publish_servers(&self) {
        self.servers.publish();
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

    pub fn email(&self) -> &str {
        &self.profile.email
    }

    pub fn is_admin(&self) -> bool {
        self.profile.is_admin
    }

    pub fn tag(&self) -> String {
        self.profile.tag()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.profile.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.profile.updated_at
    }

    pub fn servers(&self) -> &ServerRoster {
        &self.servers
    }

    pub fn resources(&self) -> &ResourceLimits {
        &self.resources
    }

    pub fn coins(&self) -> &Coins {
        &self.coins
    }
}

impl Serialize for User {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let servers: Vec<_> = self
            .servers
            .list()
            .iter()
            .map(|server| server.details().clone())
            .collect();

        let mut state = serializer.serialize_struct("User", 6)?;
        state.serialize_field("profile", &self.profile)?;
        state.serialize_field("coins", &self.coins.amount())?;
        state.serialize_field("package", &self.resources.package())?;
        state.serialize_field("extra", &self.resources.extra())?;
        state.serialize_field("limits", &self.resources.limits())?;
        state.serialize_field("servers", &servers)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache;
    use crate::model::Resources;
    use crate::test_support::{user_envelope, ScriptedTransport};
    use serde_json::json;

    fn rest() -> Rest {
        Rest::new(Arc::new(ScriptedTransport::new()), None)
    }

    #[test]
    fn test_user_from_payload() {
        let servers = cache::shared();
        let payload = user_envelope(4, "0d5b7e9c-1111-2222-3333-444455556666", "ada", json!(50));

        let user = User::from_payload(&rest(), &servers, &payload).unwrap();

        assert_eq!(user.id(), 4);
        assert_eq!(user.username(), "ada");
        assert_eq!(user.tag(), "AdaLovelace");
        assert!(!user.is_admin());
        assert!(user.updated_at().is_none());
        assert_eq!(user.coins().amount(), 50);
        assert_eq!(user.resources().limits(), Resources::new(1536, 5120, 150, 2));
        assert_eq!(user.servers().len(), 1);
        assert!(servers.read().is_empty());

        user.publish_servers();
        assert_eq!(servers.read().len(), 1);
    }

    #[test]
    fn test_user_timestamps_compare_as_instants() {
        let servers = cache::shared();
        let mut payload = user_envelope(4, "0d5b7e9c", "ada", json!(0));
        payload["userinfo"]["attributes"]["updated_at"] = json!("2021-04-12T20:22:13+02:00");

        let user = User::from_payload(&rest(), &servers, &payload).unwrap();
        assert_eq!(user.updated_at(), Some(user.created_at()));
    }

    #[test]
    fn test_user_missing_attributes_is_malformed() {
        let servers = cache::shared();
        let result = User::from_payload(&rest(), &servers, &json!({"status": "success"}));
        assert!(matches!(
            result,
            Err(DashactylError::MalformedPayload { entity: "user", .. })
        ));
    }

    #[test]
    fn test_user_missing_package_leaves_server_cache_untouched() {
        let servers = cache::shared();
        let mut payload = user_envelope(4, "0d5b7e9c", "ada", json!(0));
        payload.as_object_mut().unwrap().remove("package");

        let result = User::from_payload(&rest(), &servers, &payload);
        assert!(matches!(result, Err(DashactylError::MalformedPayload { .. })));
        assert!(servers.read().is_empty());
    }

    #[test]
    fn test_user_wrong_shaped_field_is_malformed() {
        let servers = cache::shared();
        let mut payload = user_envelope(4, "0d5b7e9c", "ada", json!(0));
        payload["userinfo"]["attributes"]["id"] = json!("four");

        let result = User::from_payload(&rest(), &servers, &payload);
        assert!(matches!(result, Err(DashactylError::MalformedPayload { .. })));
        // nothing was cached for a payload that failed to decode
        assert!(servers.read().is_empty());
    }

    #[test]
    fn test_user_round_trip_serialization() {
        let servers = cache::shared();
        let payload = user_envelope(9, "c0ffee00-0000", "grace", json!(75));
        let user = User::from_payload(&rest(), &servers, &payload).unwrap();

        let value = serde_json::to_value(&user).unwrap();
        let attributes = &payload["userinfo"]["attributes"];
        assert_eq!(value["profile"]["id"], attributes["id"]);
        assert_eq!(value["profile"]["uuid"], attributes["uuid"]);
        assert_eq!(value["profile"]["email"], attributes["email"]);
        assert_eq!(value["profile"]["2fa"], attributes["2fa"]);
        assert_eq!(value["coins"], payload["coins"]);
        assert_eq!(value["package"], payload["package"]);
        assert_eq!(value["extra"], payload["extra"]);

        let created: DateTime<Utc> =
            serde_json::from_value(value["profile"]["created_at"].clone()).unwrap();
        let original: DateTime<Utc> =
            serde_json::from_value(attributes["created_at"].clone()).unwrap();
        assert_eq!(created, original);
    }
}
