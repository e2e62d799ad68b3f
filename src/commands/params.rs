//! Shared command parameters for all CLI commands.
//!
//! This module defines common parameters that are used across multiple command modules.
//! It provides a centralized place to define parameter names and common argument configurations.

use crate::format::OutputFormat;
use clap::{Arg, ArgAction};

// Command groups
pub const COMMAND_CONFIG: &str = "config";
pub const COMMAND_PING: &str = "ping";
pub const COMMAND_USER: &str = "user";
pub const COMMAND_COUPON: &str = "coupon";
pub const COMMAND_STORE: &str = "store";
pub const COMMAND_COINS: &str = "coins";

// CRUD operations
pub const COMMAND_CREATE: &str = "create";
pub const COMMAND_GET: &str = "get";
pub const COMMAND_LIST: &str = "list";
pub const COMMAND_DELETE: &str = "delete";
pub const COMMAND_REVOKE: &str = "revoke";

// Config commands
pub const COMMAND_SET: &str = "set";
pub const COMMAND_PATH: &str = "path";

// Coin commands
pub const COMMAND_ADD: &str = "add";
pub const COMMAND_REMOVE: &str = "remove";

// Parameter names
pub const PARAMETER_FORMAT: &str = "format";
pub const PARAMETER_PRETTY: &str = "pretty";
pub const PARAMETER_HEADERS: &str = "headers";
pub const PARAMETER_VERBOSE: &str = "verbose";
pub const PARAMETER_NAME: &str = "name";
pub const PARAMETER_VALUE: &str = "value";
pub const PARAMETER_USERNAME: &str = "username";
pub const PARAMETER_EMAIL: &str = "email";
pub const PARAMETER_FIRST_NAME: &str = "first-name";
pub const PARAMETER_LAST_NAME: &str = "last-name";
pub const PARAMETER_PASSWORD: &str = "password";
pub const PARAMETER_AMOUNT: &str = "amount";
pub const PARAMETER_CODE: &str = "code";
pub const PARAMETER_COINS: &str = "coins";
pub const PARAMETER_RAM: &str = "ram";
pub const PARAMETER_DISK: &str = "disk";
pub const PARAMETER_CPU: &str = "cpu";
pub const PARAMETER_SERVERS: &str = "servers";
pub const PARAMETER_USES: &str = "uses";
pub const PARAMETER_ID: &str = "id";
pub const PARAMETER_REFRESH: &str = "refresh";

/// Create the global format parameter.
///
/// This parameter is used across multiple commands for output formatting.
pub fn format_parameter() -> Arg {
    Arg::new(PARAMETER_FORMAT)
        .short('f')
        .long(PARAMETER_FORMAT)
        .num_args(1)
        .required(false)
        .env("DASHCTL_FORMAT")
        .default_value("json")
        .help("Output data format")
        .value_parser(OutputFormat::names())
}

pub fn format_pretty_parameter() -> Arg {
    Arg::new(PARAMETER_PRETTY)
        .long(PARAMETER_PRETTY)
        .action(ArgAction::SetTrue)
        .required(false)
        .help("Format the output pretty")
}

pub fn format_with_headers_parameter() -> Arg {
    Arg::new(PARAMETER_HEADERS)
        .long(PARAMETER_HEADERS)
        .action(ArgAction::SetTrue)
        .required(false)
        .env("DASHCTL_HEADERS")
        .help("Format the output with headers")
}

/// Bypass the cache and fetch from the panel
pub fn refresh_parameter() -> Arg {
    Arg::new(PARAMETER_REFRESH)
        .long(PARAMETER_REFRESH)
        .action(ArgAction::SetTrue)
        .required(false)
        .help("Always fetch from the panel instead of the local cache")
}

/// A positional, non-negative amount
pub fn amount_parameter(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .num_args(1)
        .value_parser(clap::value_parser!(u64))
}

/// An optional `--<name> <u64>` resource option
pub fn resource_parameter(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .num_args(1)
        .required(false)
        .help(help)
        .value_parser(clap::value_parser!(u64))
}

pub fn username_parameter() -> Arg {
    Arg::new(PARAMETER_USERNAME)
        .help("Username (or ID) of the user")
        .required(true)
        .num_args(1)
        .value_parser(clap::value_parser!(String))
}
