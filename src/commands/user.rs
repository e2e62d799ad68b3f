//! User command definitions.
//!
//! This module defines the user-related CLI commands and their arguments using the clap crate.

use clap::{Arg, Command};

use crate::commands::params::{
    amount_parameter, format_parameter, format_pretty_parameter, format_with_headers_parameter,
    refresh_parameter, username_parameter, COMMAND_ADD, COMMAND_COINS, COMMAND_CREATE,
    COMMAND_DELETE, COMMAND_GET, COMMAND_REMOVE, COMMAND_SET, COMMAND_USER, PARAMETER_AMOUNT,
    PARAMETER_EMAIL, PARAMETER_FIRST_NAME, PARAMETER_LAST_NAME, PARAMETER_PASSWORD,
    PARAMETER_USERNAME,
};

fn required_text(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .num_args(1)
        .required(true)
        .help(help)
        .value_parser(clap::value_parser!(String))
}

/// Define the user command and its subcommands
pub fn user_command() -> Command {
    Command::new(COMMAND_USER)
        .about("Manage Dashactyl users")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get details for a specific user")
                .arg(username_parameter())
                .arg(refresh_parameter())
                .arg(format_parameter())
                .arg(format_pretty_parameter())
                .arg(format_with_headers_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about("Register a new user on the panel")
                .arg(required_text(PARAMETER_USERNAME, "Username of the new user"))
                .arg(required_text(PARAMETER_EMAIL, "Email address of the new user"))
                .arg(required_text(PARAMETER_FIRST_NAME, "First name of the new user"))
                .arg(required_text(PARAMETER_LAST_NAME, "Last name of the new user"))
                .arg(
                    Arg::new(PARAMETER_PASSWORD)
                        .long(PARAMETER_PASSWORD)
                        .num_args(1)
                        .required(false)
                        .help("Initial password; the panel generates one when omitted"),
                )
                .arg(format_parameter())
                .arg(format_pretty_parameter())
                .arg(format_with_headers_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_DELETE)
                .about("Delete a user account")
                .arg(username_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_COINS)
                .about("Change the coin balance of a user")
                .subcommand_required(true)
                .subcommand(
                    Command::new(COMMAND_ADD)
                        .about("Add coins")
                        .arg(username_parameter())
                        .arg(amount_parameter(PARAMETER_AMOUNT, "Number of coins to add")),
                )
                .subcommand(
                    Command::new(COMMAND_REMOVE)
                        .about("Remove coins; the balance stops at zero")
                        .arg(username_parameter())
                        .arg(amount_parameter(PARAMETER_AMOUNT, "Number of coins to remove")),
                )
                .subcommand(
                    Command::new(COMMAND_SET)
                        .about("Replace the balance")
                        .arg(username_parameter())
                        .arg(amount_parameter(PARAMETER_AMOUNT, "New balance")),
                ),
        )
}
