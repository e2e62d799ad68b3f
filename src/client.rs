//! The [`Dashactyl`] client facade.
//!
//! The facade owns one cache per entity kind and hands each manager the
//! shared [`Rest`] handle together with the caches it fills.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, trace};
use url::Url;

use crate::cache::{self, SharedCache};
use crate::error::DashactylError;
use crate::http_utils::{HttpRequestConfig, HttpTransport};
use crate::managers::{CouponManager, ServerManager, StoreManager, UserManager};
use crate::model::{Coupon, Server, StoreItem, UserRecord};
use crate::transport::{Rest, Transport};

/// Connection settings for a panel
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the panel, e.g. `https://panel.example.com`
    pub domain: String,
    /// Application API key
    pub api_key: String,
    /// Upper bound for a single API call
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(domain: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            api_key: api_key.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Check that the domain is an absolute http(s) URL and a key is present
    pub fn validate(&self) -> Result<(), DashactylError> {
        let url = Url::parse(self.domain.trim())
            .map_err(|e| DashactylError::Validation(format!("invalid domain '{}': {}", self.domain, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DashactylError::Validation(format!(
                "domain '{}' must use http or https",
                self.domain
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(DashactylError::Validation("an API key is required".to_string()));
        }
        Ok(())
    }
}

/// Client for the Dashactyl panel API
#[derive(Debug, Clone)]
pub struct Dashactyl {
    rest: Rest,
    users: UserManager,
    servers: ServerManager,
    coupons: CouponManager,
    store: StoreManager,
}

impl Dashactyl {
    /// Create a client that talks to the panel over HTTP
    pub fn new(config: ClientConfig) -> Result<Dashactyl, DashactylError> {
        config.validate()?;
        let transport = HttpTransport::new(HttpRequestConfig::from_client_config(&config))?;
        debug!("Created Dashactyl client for {}", transport.config().base_url);
        Ok(Self::with_transport(Arc::new(transport), config.timeout))
    }

    /// Create a client over any transport
    pub fn with_transport(transport: Arc<dyn Transport>, timeout: Option<Duration>) -> Dashactyl {
        let rest = Rest::new(transport, timeout);
        let user_cache: SharedCache<String, UserRecord> = cache::shared();
        let server_cache: SharedCache<String, Arc<Server>> = cache::shared();
        let coupon_cache: SharedCache<String, Coupon> = cache::shared();
        let store_cache: SharedCache<u64, StoreItem> = cache::shared();

        Dashactyl {
            users: UserManager::new(rest.clone(), user_cache, server_cache.clone()),
            servers: ServerManager::new(server_cache),
            coupons: CouponManager::new(rest.clone(), coupon_cache),
            store: StoreManager::new(rest.clone(), store_cache),
            rest,
        }
    }

    pub fn users(&self) -> &UserManager {
        &self.users
    }

    pub fn servers(&self) -> &ServerManager {
        &self.servers
    }

    pub fn coupons(&self) -> &CouponManager {
        &self.coupons
    }

    pub fn store(&self) -> &StoreManager {
        &self.store
    }

    /// Round-trip time of `GET /api`
    pub async fn ping(&self) -> Result<Duration, DashactylError> {
        let start = Instant::now();
        self.rest.get("/api").await?;
        let elapsed = start.elapsed();
        trace!("Ping took {:?}", elapsed);
        Ok(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::test_support::{user_envelope, ScriptedTransport};
    use serde_json::json;

    #[test]
    fn test_config_validation() {
        assert!(ClientConfig::new("https://panel.example.com", "key").validate().is_ok());
        assert!(ClientConfig::new("panel.example.com", "key").validate().is_err());
        assert!(ClientConfig::new("ftp://panel.example.com", "key").validate().is_err());
        assert!(ClientConfig::new("https://panel.example.com", " ").validate().is_err());
        assert!(Dashactyl::new(ClientConfig::new("nope", "key")).is_err());
    }

    #[tokio::test]
    async fn test_ping() {
        let transport = Arc::new(ScriptedTransport::new());
        let client = Dashactyl::with_transport(transport.clone(), None);
        client.ping().await.unwrap();
        assert_eq!(transport.calls()[0].path, "/api");
    }

    #[tokio::test]
    async fn test_ping_times_out() {
        let client = Dashactyl::with_transport(
            Arc::new(ScriptedTransport::new().hang()),
            Some(Duration::from_millis(10)),
        );
        assert!(matches!(
            client.ping().await,
            Err(DashactylError::TransportFailure(TransportError::Timeout(_)))
        ));
    }

    #[tokio::test]
    async fn test_managers_share_caches() {
        let transport = Arc::new(
            ScriptedTransport::new().respond(user_envelope(4, "0d5b7e9c", "ada", json!(50))),
        );
        let client = Dashactyl::with_transport(transport, None);

        let ada = client.users().fetch_full("ada").await.unwrap();
        let server = client.servers().get("0d5b7e9c").unwrap();
        assert!(Arc::ptr_eq(&server.owner(client.users()).unwrap(), &ada));

        let cloned = client.clone();
        assert_eq!(cloned.users().len(), 1);
        assert_eq!(cloned.servers().len(), 1);
    }
}
