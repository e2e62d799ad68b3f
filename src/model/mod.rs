//! Data models for Dashactyl entities.
//!
//! Entities are only ever built from a successful API response. Each one is
//! decoded through serde, so a missing or wrong-shaped required field turns
//! into [`DashactylError::MalformedPayload`] instead of a silently empty value.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::DashactylError;

pub mod coupon;
pub mod meta_user;
pub mod resources;
pub mod server;
pub mod store;
pub mod user;

pub use coupon::Coupon;
pub use meta_user::{MetaUser, Resolution, UserRecord};
pub use resources::{Package, Resources};
pub use server::{FeatureLimits, Server, ServerDetails, ServerLimits};
pub use store::StoreItem;
pub use user::{User, UserProfile};

/// Decode a JSON value into `T`, reporting failures against `entity`
pub(crate) fn decode<T>(entity: &'static str, value: &Value) -> Result<T, DashactylError>
where
    T: DeserializeOwned,
{
    T::deserialize(value).map_err(|e| DashactylError::malformed(entity, e.to_string()))
}

/// Locate the `data` member of a response envelope
pub(crate) fn envelope_data<'a>(
    entity: &'static str,
    envelope: &'a Value,
) -> Result<&'a Value, DashactylError> {
    envelope
        .get("data")
        .ok_or_else(|| DashactylError::malformed(entity, "missing field `data`"))
}

/// Treat an explicit `null` like an absent field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Map `null` and the empty string to `None`
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

/// Accept a JSON string or number and keep its textual form
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
