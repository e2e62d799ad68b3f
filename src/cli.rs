use clap::ArgMatches;
use dashactyl::actions::{self, CliActionError};
use dashactyl::client::Dashactyl;
use dashactyl::commands::{
    COMMAND_COINS, COMMAND_CONFIG, COMMAND_COUPON, COMMAND_CREATE, COMMAND_DELETE, COMMAND_GET,
    COMMAND_LIST, COMMAND_PATH, COMMAND_PING, COMMAND_REVOKE, COMMAND_SET, COMMAND_STORE,
    COMMAND_USER,
};
use dashactyl::configuration::{Configuration, ConfigurationError};
use dashactyl::error::DashactylError;
use dashactyl::exit_codes::DashctlExitCode;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Undefined or unsupported subcommand: {0}")]
    UnsupportedSubcommand(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    #[error("{0}")]
    ClientError(#[from] DashactylError),
    #[error("{0}")]
    ActionError(#[from] CliActionError),
}

impl CliError {
    pub fn exit_code(&self) -> DashctlExitCode {
        match self {
            CliError::UnsupportedSubcommand(_) => DashctlExitCode::UsageError,
            CliError::ConfigurationError(_) => DashctlExitCode::ConfigError,
            CliError::ClientError(e) => DashctlExitCode::from(e),
            CliError::ActionError(e) => e.exit_code(),
        }
    }
}

fn extract_subcommand_name(sub_matches: &ArgMatches) -> String {
    match sub_matches.subcommand() {
        Some((name, _)) => name.to_string(),
        None => "unknown".to_string(),
    }
}

fn connect(configuration: &Configuration) -> Result<Dashactyl, CliError> {
    let client_config = configuration.client_config()?;
    debug!("Connecting to {}", client_config.domain);
    Ok(Dashactyl::new(client_config)?)
}

pub async fn execute_command(
    mut configuration: Configuration,
    matches: ArgMatches,
) -> Result<(), CliError> {
    match matches.subcommand() {
        Some((COMMAND_CONFIG, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_GET, sub_matches)) => {
                actions::config::get_configuration(&configuration, sub_matches)?
            }
            Some((COMMAND_SET, sub_matches)) => {
                actions::config::set_configuration(&mut configuration, sub_matches)?
            }
            Some((COMMAND_PATH, _)) => actions::config::print_configuration_path()?,
            _ => {
                return Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                    sub_matches,
                )))
            }
        },
        Some((COMMAND_PING, sub_matches)) => {
            let client = connect(&configuration)?;
            actions::config::ping(&client, sub_matches).await?
        }
        Some((COMMAND_USER, sub_matches)) => {
            let client = connect(&configuration)?;
            match sub_matches.subcommand() {
                Some((COMMAND_GET, sub_matches)) => {
                    actions::users::get_user(&client, sub_matches).await?
                }
                Some((COMMAND_CREATE, sub_matches)) => {
                    actions::users::create_user(&client, sub_matches).await?
                }
                Some((COMMAND_DELETE, sub_matches)) => {
                    actions::users::delete_user(&client, sub_matches).await?
                }
                Some((COMMAND_COINS, sub_matches)) => match sub_matches.subcommand() {
                    Some((operation, sub_matches)) => {
                        actions::users::change_coins(&client, operation, sub_matches).await?
                    }
                    None => {
                        return Err(CliError::UnsupportedSubcommand(COMMAND_COINS.to_string()))
                    }
                },
                _ => {
                    return Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                        sub_matches,
                    )))
                }
            }
        }
        Some((COMMAND_COUPON, sub_matches)) => {
            let client = connect(&configuration)?;
            match sub_matches.subcommand() {
                Some((COMMAND_LIST, sub_matches)) => {
                    actions::coupons::list_coupons(&client, sub_matches).await?
                }
                Some((COMMAND_GET, sub_matches)) => {
                    actions::coupons::get_coupon(&client, sub_matches).await?
                }
                Some((COMMAND_CREATE, sub_matches)) => {
                    actions::coupons::create_coupon(&client, sub_matches).await?
                }
                Some((COMMAND_REVOKE, sub_matches)) => {
                    actions::coupons::revoke_coupon(&client, sub_matches).await?
                }
                _ => {
                    return Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                        sub_matches,
                    )))
                }
            }
        }
        Some((COMMAND_STORE, sub_matches)) => {
            let client = connect(&configuration)?;
            match sub_matches.subcommand() {
                Some((COMMAND_LIST, sub_matches)) => {
                    actions::store::list_items(&client, sub_matches).await?
                }
                Some((COMMAND_GET, sub_matches)) => {
                    actions::store::get_item(&client, sub_matches).await?
                }
                _ => {
                    return Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                        sub_matches,
                    )))
                }
            }
        }
        _ => return Err(CliError::UnsupportedSubcommand(extract_subcommand_name(&matches))),
    }

    Ok(())
}
