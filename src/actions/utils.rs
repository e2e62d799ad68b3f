use clap::ArgMatches;

use crate::actions::CliActionError;
use crate::commands::params::{PARAMETER_FORMAT, PARAMETER_HEADERS, PARAMETER_PRETTY};
use crate::format::{Formattable, OutputFormat, OutputFormatOptions};

/// Build the output format from the `--format`, `--pretty` and `--headers` arguments
pub fn output_format(matches: &ArgMatches) -> Result<OutputFormat, CliActionError> {
    let format_str = matches
        .get_one::<String>(PARAMETER_FORMAT)
        .map(|s| s.as_str())
        .unwrap_or("json");

    let options = OutputFormatOptions {
        with_headers: flag(matches, PARAMETER_HEADERS),
        pretty: flag(matches, PARAMETER_PRETTY),
    };
    Ok(OutputFormat::from_string_with_options(format_str, options)?)
}

/// Read a flag that not every subcommand defines
pub fn flag(matches: &ArgMatches, name: &str) -> bool {
    matches
        .try_get_one::<bool>(name)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}

pub fn required<'a, T>(matches: &'a ArgMatches, name: &str) -> Result<&'a T, CliActionError>
where
    T: Clone + Send + Sync + 'static,
{
    matches
        .get_one::<T>(name)
        .ok_or_else(|| CliActionError::MissingRequiredArgument(name.to_string()))
}

/// Format `value` for the requested output and print it
pub fn print_formatted<T: Formattable>(value: &T, matches: &ArgMatches) -> Result<(), CliActionError> {
    let format = output_format(matches)?;
    let output = value.format(&format)?;
    println!("{}", output.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create_cli_commands;

    #[test]
    fn test_output_format_from_arguments() {
        let matches = create_cli_commands()
            .try_get_matches_from(["dashctl", "coupon", "list", "-f", "csv", "--headers"])
            .unwrap();
        let (_, coupon) = matches.subcommand().unwrap();
        let (_, list) = coupon.subcommand().unwrap();

        match output_format(list).unwrap() {
            OutputFormat::Csv(options) => {
                assert!(options.with_headers);
                assert!(!options.pretty);
            }
            other => panic!("unexpected format: {}", other),
        }
    }

    #[test]
    fn test_flag_missing_on_subcommand() {
        let matches = create_cli_commands()
            .try_get_matches_from(["dashctl", "ping"])
            .unwrap();
        let (_, ping) = matches.subcommand().unwrap();
        assert!(!flag(ping, PARAMETER_PRETTY));
    }
}
