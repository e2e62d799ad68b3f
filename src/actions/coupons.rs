//! Coupon action implementations.

use clap::ArgMatches;

use crate::actions::utils::{flag, print_formatted, required};
use crate::actions::CliActionError;
use crate::client::Dashactyl;
use crate::commands::params::{
    PARAMETER_CODE, PARAMETER_COINS, PARAMETER_CPU, PARAMETER_DISK, PARAMETER_RAM,
    PARAMETER_REFRESH, PARAMETER_SERVERS, PARAMETER_USES,
};
use crate::format::CsvRecordProducer;
use crate::model::coupon::CouponOptions;
use crate::model::{Coupon, Resources};

impl CsvRecordProducer for Coupon {
    fn csv_header() -> Vec<String> {
        [
            "CODE", "COINS", "RAM", "DISK", "CPU", "SERVERS", "USES", "EXPIRES_AT", "CREATED_AT",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.code.clone(),
            self.coins.to_string(),
            self.ram.to_string(),
            self.disk.to_string(),
            self.cpu.to_string(),
            self.servers.to_string(),
            self.uses.map(|uses| uses.to_string()).unwrap_or_default(),
            self.expires_at.map(|at| at.to_rfc3339()).unwrap_or_default(),
            self.created_at.to_rfc3339(),
        ]]
    }
}

pub async fn list_coupons(client: &Dashactyl, matches: &ArgMatches) -> Result<(), CliActionError> {
    let coupons = client.coupons().fetch_all().await?;
    print_formatted(&coupons, matches)
}

pub async fn get_coupon(client: &Dashactyl, matches: &ArgMatches) -> Result<(), CliActionError> {
    let code = required::<String>(matches, PARAMETER_CODE)?;
    let coupon = client
        .coupons()
        .fetch(code, flag(matches, PARAMETER_REFRESH))
        .await?;
    print_formatted(&coupon, matches)
}

/// Build coupon options from the `coupon create` arguments
pub fn coupon_options(matches: &ArgMatches) -> CouponOptions {
    let amount = |name: &str| matches.get_one::<u64>(name).copied().unwrap_or(0);

    let mut options = CouponOptions::new()
        .coins(amount(PARAMETER_COINS))
        .resources(Resources::new(
            amount(PARAMETER_RAM),
            amount(PARAMETER_DISK),
            amount(PARAMETER_CPU),
            amount(PARAMETER_SERVERS),
        ));
    if let Some(code) = matches.get_one::<String>(PARAMETER_CODE) {
        options = options.code(code.as_str());
    }
    if let Some(uses) = matches.get_one::<u64>(PARAMETER_USES) {
        options = options.uses(*uses);
    }
    options
}

pub async fn create_coupon(client: &Dashactyl, matches: &ArgMatches) -> Result<(), CliActionError> {
    let coupon = client.coupons().create(coupon_options(matches)).await?;
    print_formatted(&coupon, matches)
}

pub async fn revoke_coupon(client: &Dashactyl, matches: &ArgMatches) -> Result<(), CliActionError> {
    let code = required::<String>(matches, PARAMETER_CODE)?;
    client.coupons().revoke(code).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create_cli_commands;

    #[test]
    fn test_coupon_options_from_arguments() {
        let matches = create_cli_commands()
            .try_get_matches_from([
                "dashctl", "coupon", "create", "--code", "FREE", "--coins", "25", "--servers", "1",
            ])
            .unwrap();
        let (_, coupon) = matches.subcommand().unwrap();
        let (_, create) = coupon.subcommand().unwrap();

        let options = coupon_options(create);
        assert_eq!(options.code.as_deref(), Some("FREE"));
        assert_eq!(options.coins, 25);
        assert_eq!(options.servers, 1);
        assert_eq!(options.ram, 0);
        assert!(options.uses.is_none());
        assert!(options.validate().is_ok());
    }
}
