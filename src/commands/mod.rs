//! CLI command definitions and argument parsing.
//!
//! This module defines all the CLI commands and their arguments using the clap crate.
//! The implementation has been modularized into separate files for better maintainability.

use clap::{Arg, ArgAction, Command};

pub mod config;
pub mod coupon;
pub mod params;
pub mod store;
pub mod user;

pub use params::{
    COMMAND_ADD, COMMAND_COINS, COMMAND_CONFIG, COMMAND_COUPON, COMMAND_CREATE, COMMAND_DELETE,
    COMMAND_GET, COMMAND_LIST, COMMAND_PATH, COMMAND_PING, COMMAND_REMOVE, COMMAND_REVOKE,
    COMMAND_SET, COMMAND_STORE, COMMAND_USER, PARAMETER_VERBOSE,
};

/// Create and configure all CLI commands and their arguments.
pub fn create_cli_commands() -> Command {
    Command::new("dashctl")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(PARAMETER_VERBOSE)
                .short('v')
                .long(PARAMETER_VERBOSE)
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Enable verbose output for debugging"),
        )
        .subcommand(config::config_command())
        .subcommand(Command::new(COMMAND_PING).about("Measure the round trip to the panel API"))
        .subcommand(user::user_command())
        .subcommand(coupon::coupon_command())
        .subcommand(store::store_command())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_tree_is_consistent() {
        create_cli_commands().debug_assert();
    }

    #[test]
    fn test_parse_coin_command() {
        let matches = create_cli_commands()
            .try_get_matches_from(["dashctl", "user", "coins", "add", "ada", "100"])
            .unwrap();
        let (_, user) = matches.subcommand().unwrap();
        let (_, coins) = user.subcommand().unwrap();
        let (name, add) = coins.subcommand().unwrap();
        assert_eq!(name, COMMAND_ADD);
        assert_eq!(add.get_one::<u64>(params::PARAMETER_AMOUNT), Some(&100));
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let result = create_cli_commands()
            .try_get_matches_from(["dashctl", "user", "coins", "set", "ada", "-5"]);
        assert!(result.is_err());
    }
}
