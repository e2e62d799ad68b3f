use serde_json::Value;
use tracing::{debug, trace};

use crate::cache::SharedCache;
use crate::error::DashactylError;
use crate::model::coupon::CouponOptions;
use crate::model::{decode, Coupon};
use crate::transport::{path_segment, Rest};

/// Manages the coupons received by the client, keyed by code
#[derive(Debug, Clone)]
pub struct CouponManager {
    rest: Rest,
    cache: SharedCache<String, Coupon>,
}

/// A single coupon may arrive under `data` or inline in the envelope
fn coupon_payload(envelope: &Value) -> &Value {
    match envelope.get("data") {
        Some(data) if data.is_object() => data,
        _ => envelope,
    }
}

impl CouponManager {
    pub(crate) fn new(rest: Rest, cache: SharedCache<String, Coupon>) -> Self {
        Self { rest, cache }
    }

    /// Fetch a coupon by code, served from the cache unless `force` is set
    pub async fn fetch(&self, code: &str, force: bool) -> Result<Coupon, DashactylError> {
        if !force {
            if let Some(coupon) = self.get(code) {
                trace!("Coupon {} served from cache", code);
                return Ok(coupon);
            }
        }

        let envelope = self.rest.get(&format!("/api/coupons/{}", path_segment(code))).await?;
        let coupon: Coupon = decode("coupon", coupon_payload(&envelope))?;
        self.cache.write().upsert(coupon.code.clone(), coupon.clone());
        Ok(coupon)
    }

    /// Fetch every coupon; the listing replaces nothing it does not mention
    pub async fn fetch_all(&self) -> Result<Vec<Coupon>, DashactylError> {
        let envelope = self.rest.get("/api/coupons").await?;
        let list = envelope
            .get("data")
            .or_else(|| envelope.get("coupons"))
            .ok_or_else(|| DashactylError::malformed("coupon list", "missing field `data`"))?;
        let coupons: Vec<Coupon> = decode("coupon", list)?;

        let mut cache = self.cache.write();
        for coupon in &coupons {
            cache.upsert(coupon.code.clone(), coupon.clone());
        }
        debug!("Fetched {} coupons", coupons.len());
        Ok(coupons)
    }

    /// Look up a cached coupon by its exact code
    pub fn get(&self, code: &str) -> Option<Coupon> {
        self.cache.read().get_exact(code).cloned()
    }

    pub fn find<F>(&self, mut predicate: F) -> Option<Coupon>
    where
        F: FnMut(&Coupon) -> bool,
    {
        self.cache.read().find(|coupon, _| predicate(coupon)).cloned()
    }

    /// Create a coupon; the options are validated before anything is sent
    pub async fn create(&self, options: CouponOptions) -> Result<Coupon, DashactylError> {
        options.validate()?;

        let body = serde_json::to_value(&options)
            .map_err(|e| DashactylError::Validation(e.to_string()))?;
        let envelope = self.rest.post("/api/coupons", body).await?;
        let coupon: Coupon = decode("coupon", coupon_payload(&envelope))?;

        self.cache.write().upsert(coupon.code.clone(), coupon.clone());
        debug!("Created coupon {}", coupon.code);
        Ok(coupon)
    }

    /// Revoke a coupon on the panel and drop it from the cache
    pub async fn revoke(&self, code: &str) -> Result<(), DashactylError> {
        self.rest.delete(&format!("/api/coupons/{}", path_segment(code))).await?;
        self.cache.write().remove(code);
        debug!("Revoked coupon {}", code);
        Ok(())
    }

    pub fn list(&self) -> Vec<Coupon> {
        self.cache.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache;
    use crate::model::resources::MAX_AMOUNT;
    use crate::test_support::ScriptedTransport;
    use crate::transport::RequestMethod;
    use serde_json::json;
    use std::sync::Arc;

    fn coupon(code: &str, coins: u64) -> Value {
        json!({
            "code": code, "coins": coins, "ram": 0, "disk": 0, "cpu": 0, "servers": 0,
            "uses": null, "expires_at": null, "created_at": "2021-03-20T12:00:00Z"
        })
    }

    fn manager(transport: &Arc<ScriptedTransport>) -> CouponManager {
        CouponManager::new(Rest::new(transport.clone(), None), cache::shared())
    }

    #[tokio::test]
    async fn test_create_over_ceiling_sends_nothing() {
        let transport = Arc::new(ScriptedTransport::new());
        let coupons = manager(&transport);

        let result = coupons
            .create(CouponOptions::new().code("RICH").coins(MAX_AMOUNT + 1))
            .await;
        assert!(matches!(result, Err(DashactylError::Validation(_))));
        assert_eq!(transport.call_count(), 0);
        assert!(coupons.is_empty());
    }

    #[tokio::test]
    async fn test_create_caches_coupon() {
        let transport = Arc::new(
            ScriptedTransport::new().respond(json!({"status": "success", "data": coupon("FREE5", 5)})),
        );
        let coupons = manager(&transport);

        let created = coupons.create(CouponOptions::new().code("FREE5").coins(5)).await.unwrap();
        assert_eq!(created.coins, 5);
        assert_eq!(coupons.get("FREE5"), Some(created));
        assert_eq!(transport.calls()[0].method, RequestMethod::Post);
        assert_eq!(transport.calls()[0].path, "/api/coupons");
    }

    #[tokio::test]
    async fn test_fetch_uses_exact_codes() {
        let mut envelope = coupon("SPRING", 10);
        envelope["status"] = json!("success");
        let transport = Arc::new(ScriptedTransport::new().respond(envelope));
        let coupons = manager(&transport);

        coupons.fetch("SPRING", false).await.unwrap();
        assert!(coupons.get("SPR").is_none());
        assert_eq!(coupons.fetch("SPRING", false).await.unwrap().coins, 10);
        assert_eq!(transport.call_count(), 1);

        coupons.fetch("SPRING", true).await.unwrap_err();
        assert_eq!(transport.calls()[1].path, "/api/coupons/SPRING");
    }

    #[tokio::test]
    async fn test_fetch_all_and_revoke() {
        let transport = Arc::new(ScriptedTransport::new().respond(json!({
            "status": "success",
            "data": [coupon("A", 1), coupon("B", 2)]
        })));
        let coupons = manager(&transport);

        assert_eq!(coupons.fetch_all().await.unwrap().len(), 2);
        assert_eq!(coupons.find(|c| c.coins == 2).unwrap().code, "B");

        coupons.revoke("A").await.unwrap();
        assert_eq!(transport.calls()[1].method, RequestMethod::Delete);
        assert_eq!(transport.calls()[1].path, "/api/coupons/A");
        assert_eq!(coupons.list().len(), 1);
        assert_eq!(coupons.len(), 1);
    }

    #[tokio::test]
    async fn test_codes_are_escaped_in_paths() {
        let transport = Arc::new(
            ScriptedTransport::new().respond(json!({"status": "failed", "message": "not found"})),
        );
        let coupons = manager(&transport);

        assert!(coupons.fetch("../users?x=1", true).await.is_err());
        coupons.revoke("A/B").await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].path, "/api/coupons/..%2Fusers%3Fx%3D1");
        assert_eq!(calls[1].path, "/api/coupons/A%2FB");
    }
}
