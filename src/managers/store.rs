use tracing::{debug, trace};

use crate::cache::SharedCache;
use crate::error::DashactylError;
use crate::model::{decode, envelope_data, StoreItem};
use crate::transport::Rest;

/// Manages the store items received by the client, keyed by item ID
#[derive(Debug, Clone)]
pub struct StoreManager {
    rest: Rest,
    cache: SharedCache<u64, StoreItem>,
}

impl StoreManager {
    pub(crate) fn new(rest: Rest, cache: SharedCache<u64, StoreItem>) -> Self {
        Self { rest, cache }
    }

    /// Fetch a store item, served from the cache unless `force` is set
    pub async fn fetch(&self, id: u64, force: bool) -> Result<StoreItem, DashactylError> {
        if !force {
            let cached = self.cache.read().get_exact(&id).cloned();
            if let Some(item) = cached {
                trace!("Store item {} served from cache", id);
                return Ok(item);
            }
        }

        let envelope = self.rest.get(&format!("/api/store/{}", id)).await?;
        let item: StoreItem = decode("store item", envelope_data("store item", &envelope)?)?;
        self.cache.write().upsert(item.id, item.clone());
        Ok(item)
    }

    pub async fn fetch_all(&self) -> Result<Vec<StoreItem>, DashactylError> {
        let envelope = self.rest.get("/api/store").await?;
        let items: Vec<StoreItem> = decode("store item", envelope_data("store item", &envelope)?)?;

        let mut cache = self.cache.write();
        for item in &items {
            cache.upsert(item.id, item.clone());
        }
        debug!("Fetched {} store items", items.len());
        Ok(items)
    }

    /// Look up a cached item by ID or part of one
    pub fn get(&self, probe: &str) -> Option<StoreItem> {
        self.cache.read().get(probe).cloned()
    }

    pub fn find<F>(&self, mut predicate: F) -> Option<StoreItem>
    where
        F: FnMut(&StoreItem) -> bool,
    {
        self.cache.read().find(|item, _| predicate(item)).cloned()
    }

    pub fn list(&self) -> Vec<StoreItem> {
        self.cache.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}
