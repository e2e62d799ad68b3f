//! User action implementations.
//!
//! This module contains the logic behind `dashctl user`: looking users up,
//! registering and deleting accounts and changing coin balances.

use clap::ArgMatches;
use serde::Serialize;
use tracing::debug;

use crate::actions::utils::{flag, print_formatted, required};
use crate::actions::CliActionError;
use crate::client::Dashactyl;
use crate::commands::params::{
    COMMAND_ADD, COMMAND_REMOVE, COMMAND_SET, PARAMETER_AMOUNT, PARAMETER_EMAIL,
    PARAMETER_FIRST_NAME, PARAMETER_LAST_NAME, PARAMETER_PASSWORD, PARAMETER_REFRESH,
    PARAMETER_USERNAME,
};
use crate::format::CsvRecordProducer;
use crate::managers::NewUser;
use crate::model::UserRecord;

impl CsvRecordProducer for UserRecord {
    fn csv_header() -> Vec<String> {
        [
            "ID", "UUID", "USERNAME", "EMAIL", "ADMIN", "COINS", "RAM", "DISK", "CPU", "SERVERS",
            "CREATED_AT",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        let profile = self.profile();
        let (coins, limits) = match self.as_full() {
            Some(user) => {
                let limits = user.resources().limits();
                (
                    user.coins().amount().to_string(),
                    vec![
                        limits.ram.to_string(),
                        limits.disk.to_string(),
                        limits.cpu.to_string(),
                        limits.servers.to_string(),
                    ],
                )
            }
            // meta users carry no balance or limits
            None => (String::new(), vec![String::new(); 4]),
        };

        let mut record = vec![
            profile.id.to_string(),
            profile.uuid.clone(),
            profile.username.clone(),
            profile.email.clone(),
            profile.is_admin.to_string(),
            coins,
        ];
        record.extend(limits);
        record.push(profile.created_at.to_rfc3339());
        vec![record]
    }
}

/// The balance of a user after a coin operation
#[derive(Debug, Clone, Serialize)]
pub struct CoinBalance {
    pub username: String,
    pub coins: u64,
}

impl CsvRecordProducer for CoinBalance {
    fn csv_header() -> Vec<String> {
        vec!["USERNAME".to_string(), "COINS".to_string()]
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        vec![vec![self.username.clone(), self.coins.to_string()]]
    }
}

/// Get details for a specific user
pub async fn get_user(client: &Dashactyl, matches: &ArgMatches) -> Result<(), CliActionError> {
    let username = required::<String>(matches, PARAMETER_USERNAME)?;
    let check_cache = !flag(matches, PARAMETER_REFRESH);

    let user = client.users().fetch(username, check_cache).await?;
    print_formatted(&user, matches)
}

/// Register a new user
pub async fn create_user(client: &Dashactyl, matches: &ArgMatches) -> Result<(), CliActionError> {
    let mut new_user = NewUser::new(
        required::<String>(matches, PARAMETER_USERNAME)?.as_str(),
        required::<String>(matches, PARAMETER_EMAIL)?.as_str(),
        required::<String>(matches, PARAMETER_FIRST_NAME)?.as_str(),
        required::<String>(matches, PARAMETER_LAST_NAME)?.as_str(),
    );
    if let Some(password) = matches.get_one::<String>(PARAMETER_PASSWORD) {
        new_user = new_user.password(password.as_str());
    }

    let meta = client.users().create(new_user).await?;
    debug!("Created user {}", meta.uuid());
    print_formatted(&UserRecord::Meta(meta), matches)
}

/// Delete a user account
pub async fn delete_user(client: &Dashactyl, matches: &ArgMatches) -> Result<(), CliActionError> {
    let username = required::<String>(matches, PARAMETER_USERNAME)?;
    client.users().remove(username).await?;
    Ok(())
}

/// Add, remove or set the coins of a user
pub async fn change_coins(
    client: &Dashactyl,
    operation: &str,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let username = required::<String>(matches, PARAMETER_USERNAME)?;
    let amount = *required::<u64>(matches, PARAMETER_AMOUNT)?;

    let user = client.users().fetch_full(username).await?;
    let coins = match operation {
        COMMAND_ADD => user.coins().add(amount).await?,
        COMMAND_REMOVE => user.coins().remove(amount).await?,
        COMMAND_SET => user.coins().set(amount).await?,
        other => return Err(CliActionError::UnsupportedOperation(other.to_string())),
    };

    let balance = CoinBalance {
        username: user.username().to_string(),
        coins,
    };
    print_formatted(&balance, matches)
}
