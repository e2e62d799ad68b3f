use serde::{Deserialize, Serialize};

use crate::model::{empty_as_none, null_as_default, string_or_number};

/// An item offered in the Dashactyl store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreItem {
    /// The store ID of the item; used as the cache key
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub image: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub price: String,
    #[serde(rename = "per_item", deserialize_with = "string_or_number")]
    pub per_item: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
}
