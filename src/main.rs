use dashactyl::commands::{create_cli_commands, PARAMETER_VERBOSE};
use dashactyl::configuration::Configuration;
use dashactyl::exit_codes::DashctlExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{execute_command, CliError};

/// Main entry point for the program
#[tokio::main]
async fn main() {
    let matches = create_cli_commands().get_matches();

    // Initialize the logging subsystem; RUST_LOG wins over --verbose
    let default_level = if matches.get_flag(PARAMETER_VERBOSE) {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match Configuration::load_or_create_default() {
        Ok(configuration) => execute_command(configuration, matches).await,
        Err(e) => Err(CliError::from(e)),
    };

    if let Err(e) = result {
        let code = e.exit_code();
        eprintln!("ERROR: {} ({})", e, code.message());
        ::std::process::exit(code.code());
    }
    ::std::process::exit(DashctlExitCode::Success.code());
}
