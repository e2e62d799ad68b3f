use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DashactylError;
use crate::model::resources::{check_amount, check_servers};
use crate::model::Resources;

/// A redeemable Dashactyl coupon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    /// The coupon code; used as the cache key
    pub code: String,
    pub coins: u64,
    pub ram: u64,
    pub disk: u64,
    pub cpu: u64,
    pub servers: u64,
    /// How many times the coupon can be redeemed, if limited
    #[serde(default)]
    pub uses: Option<u64>,
    #[serde(default, alias = "expires")]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Coupon {
    /// The resources granted on redemption
    pub fn resources(&self) -> Resources {
        Resources::new(self.ram, self.disk, self.cpu, self.servers)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }
}

/// Options for a new coupon; every field may be left unset
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CouponOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub coins: u64,
    pub ram: u64,
    pub disk: u64,
    pub cpu: u64,
    pub servers: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl CouponOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn coins(mut self, coins: u64) -> Self {
        self.coins = coins;
        self
    }

    pub fn resources(mut self, resources: Resources) -> Self {
        self.ram = resources.ram;
        self.disk = resources.disk;
        self.cpu = resources.cpu;
        self.servers = resources.servers;
        self
    }

    pub fn uses(mut self, uses: u64) -> Self {
        self.uses = Some(uses);
        self
    }

    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Check the options before anything is sent to the API.
    ///
    /// A coupon needs a code or at least one non-zero reward, and every
    /// amount must stay below the shared ceilings.
    pub fn validate(&self) -> Result<(), DashactylError> {
        let has_code = self.code.as_deref().is_some_and(|code| !code.trim().is_empty());
        let has_reward = self.coins > 0
            || !Resources::new(self.ram, self.disk, self.cpu, self.servers).is_zero();
        if !has_code && !has_reward {
            return Err(DashactylError::Validation(
                "at least 1 option is required for new coupons".to_string(),
            ));
        }

        check_amount("Coins", self.coins)?;
        check_amount("RAM", self.ram)?;
        check_amount("Disk", self.disk)?;
        check_amount("CPU", self.cpu)?;
        check_servers(self.servers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::decode;
    use crate::model::resources::MAX_AMOUNT;
    use serde_json::json;

    #[test]
    fn test_coupon_from_payload() {
        let payload = json!({
            "code": "SPRING21",
            "coins": 250, "ram": 1024, "disk": 0, "cpu": 50, "servers": 1,
            "uses": 10,
            "expires_at": null,
            "created_at": "2021-03-20T12:00:00Z"
        });
        let coupon: Coupon = decode("coupon", &payload).unwrap();

        assert_eq!(coupon.code, "SPRING21");
        assert_eq!(coupon.uses, Some(10));
        assert!(coupon.expires_at.is_none());
        assert_eq!(coupon.resources(), Resources::new(1024, 0, 50, 1));
        assert!(!coupon.is_expired_at(Utc::now()));

        let value = serde_json::to_value(&coupon).unwrap();
        for field in ["code", "coins", "ram", "disk", "cpu", "servers", "uses"] {
            assert_eq!(value[field], payload[field], "field {}", field);
        }
    }

    #[test]
    fn test_coupon_accepts_legacy_expiry_field() {
        let coupon: Coupon = decode(
            "coupon",
            &json!({
                "code": "OLD", "coins": 1, "ram": 0, "disk": 0, "cpu": 0, "servers": 0,
                "expires": "2020-01-01T00:00:00+00:00",
                "created_at": "2019-01-01T00:00:00+00:00"
            }),
        )
        .unwrap();
        assert!(coupon.is_expired_at(Utc::now()));
        assert!(coupon.uses.is_none());
    }

    #[test]
    fn test_coupon_missing_code_is_malformed() {
        let result: Result<Coupon, _> = decode(
            "coupon",
            &json!({"coins": 1, "ram": 0, "disk": 0, "cpu": 0, "servers": 0, "created_at": "2019-01-01T00:00:00Z"}),
        );
        assert!(matches!(result, Err(DashactylError::MalformedPayload { .. })));
    }

    #[test]
    fn test_options_validation() {
        assert!(CouponOptions::new().validate().is_err());
        assert!(CouponOptions::new().code("  ").validate().is_err());
        assert!(CouponOptions::new().code("FREE").validate().is_ok());
        assert!(CouponOptions::new().coins(5).validate().is_ok());
        assert!(CouponOptions::new().coins(MAX_AMOUNT + 1).validate().is_err());
        assert!(CouponOptions::new()
            .resources(Resources::new(0, 0, 0, 11))
            .validate()
            .is_err());
    }

    #[test]
    fn test_options_body_skips_unset_fields() {
        let body = serde_json::to_value(CouponOptions::new().coins(5)).unwrap();
        assert_eq!(
            body,
            json!({"coins": 5, "ram": 0, "disk": 0, "cpu": 0, "servers": 0})
        );
    }
}
