use serde::{Deserialize, Serialize};

use crate::error::DashactylError;

/// Upper bound for coin balances and resource amounts (9 hundred-trillion)
pub const MAX_AMOUNT: u64 = 900_000_000_000_000;

/// Upper bound for server slots
pub const MAX_SERVERS: u64 = 10;

/// A set of resource amounts: RAM, disk, CPU and server slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub ram: u64,
    pub disk: u64,
    pub cpu: u64,
    pub servers: u64,
}

impl Resources {
    pub fn new(ram: u64, disk: u64, cpu: u64, servers: u64) -> Self {
        Self {
            ram,
            disk,
            cpu,
            servers,
        }
    }

    /// Field-wise sum, saturating at `u64::MAX`
    pub fn saturating_add(&self, other: &Resources) -> Resources {
        Resources {
            ram: self.ram.saturating_add(other.ram),
            disk: self.disk.saturating_add(other.disk),
            cpu: self.cpu.saturating_add(other.cpu),
            servers: self.servers.saturating_add(other.servers),
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Resources::default()
    }

    /// Check every amount against the shared ceilings
    pub fn validate(&self) -> Result<(), DashactylError> {
        check_amount("RAM", self.ram)?;
        check_amount("Disk", self.disk)?;
        check_amount("CPU", self.cpu)?;
        check_servers(self.servers)
    }
}

/// A hosting plan: named base limits assigned to a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub resources: Resources,
}

impl Package {
    pub fn new(name: impl Into<String>, resources: Resources) -> Self {
        Self {
            name: Some(name.into()),
            resources,
        }
    }
}

pub(crate) fn check_amount(label: &str, value: u64) -> Result<(), DashactylError> {
    if value > MAX_AMOUNT {
        return Err(DashactylError::Validation(format!(
            "{} must be between 0 and 9 hundred-trillion (got {})",
            label, value
        )));
    }
    Ok(())
}

pub(crate) fn check_servers(value: u64) -> Result<(), DashactylError> {
    if value > MAX_SERVERS {
        return Err(DashactylError::Validation(format!(
            "Servers must be between 0 and {} (got {})",
            MAX_SERVERS, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_saturating_add() {
        let base = Resources::new(10, 5, 2, 1);
        let extra = Resources::new(5, 0, 1, 0);
        assert_eq!(base.saturating_add(&extra), Resources::new(15, 5, 3, 1));

        let huge = Resources::new(u64::MAX, 0, 0, 0);
        assert_eq!(huge.saturating_add(&extra).ram, u64::MAX);
    }

    #[test]
    fn test_validate() {
        assert!(Resources::new(MAX_AMOUNT, MAX_AMOUNT, MAX_AMOUNT, MAX_SERVERS)
            .validate()
            .is_ok());
        assert!(matches!(
            Resources::new(MAX_AMOUNT + 1, 0, 0, 0).validate(),
            Err(DashactylError::Validation(_))
        ));
        assert!(matches!(
            Resources::new(0, 0, 0, MAX_SERVERS + 1).validate(),
            Err(DashactylError::Validation(_))
        ));
    }

    #[test]
    fn test_package_flattens_resources() {
        let package: Package = serde_json::from_value(json!({
            "name": "gold", "ram": 4096, "disk": 20480, "cpu": 200, "servers": 3
        }))
        .unwrap();
        assert_eq!(package.name.as_deref(), Some("gold"));
        assert_eq!(package.resources, Resources::new(4096, 20480, 200, 3));

        let unnamed: Package =
            serde_json::from_value(json!({"ram": 1, "disk": 2, "cpu": 3, "servers": 0})).unwrap();
        assert!(unnamed.name.is_none());
        assert_eq!(
            serde_json::to_value(&unnamed).unwrap(),
            json!({"ram": 1, "disk": 2, "cpu": 3, "servers": 0})
        );
    }
}
