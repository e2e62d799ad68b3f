//! Configuration command definitions.
//!
//! This module defines CLI commands related to configuration management.

use crate::commands::params::{
    format_parameter, format_pretty_parameter, format_with_headers_parameter, COMMAND_CONFIG,
    COMMAND_GET, COMMAND_PATH, COMMAND_SET, PARAMETER_NAME, PARAMETER_VALUE,
};
use clap::{Arg, Command};

/// Create the config command with all its subcommands.
pub fn config_command() -> Command {
    Command::new(COMMAND_CONFIG)
        .about("Configuration management")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get configuration details")
                .arg(format_parameter())
                .arg(format_pretty_parameter())
                .arg(format_with_headers_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_SET)
                .about("Set a configuration property")
                .arg(
                    Arg::new(PARAMETER_NAME)
                        .help("Property name")
                        .required(true)
                        .value_parser(["domain", "api-key", "timeout"]),
                )
                .arg(
                    Arg::new(PARAMETER_VALUE)
                        .help("Property value")
                        .required(true)
                        .num_args(1),
                ),
        )
        .subcommand(Command::new(COMMAND_PATH).about("Show configuration file path"))
}
