//! Coupon command definitions.

use clap::{Arg, Command};

use crate::commands::params::{
    format_parameter, format_pretty_parameter, format_with_headers_parameter, refresh_parameter,
    resource_parameter, COMMAND_COUPON, COMMAND_CREATE, COMMAND_GET, COMMAND_LIST, COMMAND_REVOKE,
    PARAMETER_CODE, PARAMETER_COINS, PARAMETER_CPU, PARAMETER_DISK, PARAMETER_RAM,
    PARAMETER_SERVERS, PARAMETER_USES,
};

fn code_parameter() -> Arg {
    Arg::new(PARAMETER_CODE)
        .help("The coupon code")
        .required(true)
        .num_args(1)
}

/// Create the coupon command with all its subcommands.
pub fn coupon_command() -> Command {
    Command::new(COMMAND_COUPON)
        .about("Manage coupons")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List all coupons")
                .visible_alias("ls")
                .arg(format_parameter())
                .arg(format_pretty_parameter())
                .arg(format_with_headers_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get a coupon by code")
                .arg(code_parameter())
                .arg(refresh_parameter())
                .arg(format_parameter())
                .arg(format_pretty_parameter())
                .arg(format_with_headers_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about("Create a coupon; at least a code or one reward is required")
                .arg(
                    Arg::new(PARAMETER_CODE)
                        .long(PARAMETER_CODE)
                        .num_args(1)
                        .required(false)
                        .help("The coupon code; the panel generates one when omitted"),
                )
                .arg(resource_parameter(PARAMETER_COINS, "Coins granted on redemption"))
                .arg(resource_parameter(PARAMETER_RAM, "RAM granted on redemption"))
                .arg(resource_parameter(PARAMETER_DISK, "Disk granted on redemption"))
                .arg(resource_parameter(PARAMETER_CPU, "CPU granted on redemption"))
                .arg(resource_parameter(PARAMETER_SERVERS, "Server slots granted on redemption"))
                .arg(resource_parameter(PARAMETER_USES, "How many times the coupon can be redeemed"))
                .arg(format_parameter())
                .arg(format_pretty_parameter())
                .arg(format_with_headers_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_REVOKE)
                .about("Revoke a coupon")
                .arg(code_parameter()),
        )
}
