//! Store command definitions.

use clap::{Arg, Command};

use crate::commands::params::{
    format_parameter, format_pretty_parameter, format_with_headers_parameter, refresh_parameter,
    COMMAND_GET, COMMAND_LIST, COMMAND_STORE, PARAMETER_ID,
};

/// Create the store command with all its subcommands.
pub fn store_command() -> Command {
    Command::new(COMMAND_STORE)
        .about("Browse the store")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List all store items")
                .visible_alias("ls")
                .arg(format_parameter())
                .arg(format_pretty_parameter())
                .arg(format_with_headers_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get a store item by ID")
                .arg(
                    Arg::new(PARAMETER_ID)
                        .help("The store item ID")
                        .required(true)
                        .num_args(1)
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(refresh_parameter())
                .arg(format_parameter())
                .arg(format_pretty_parameter())
                .arg(format_with_headers_parameter()),
        )
}
