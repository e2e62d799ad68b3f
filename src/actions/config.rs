//! Configuration and connectivity action implementations.

use clap::ArgMatches;
use serde::Serialize;
use std::time::Duration;

use crate::actions::utils::{print_formatted, required};
use crate::actions::CliActionError;
use crate::client::Dashactyl;
use crate::commands::params::{PARAMETER_NAME, PARAMETER_VALUE};
use crate::configuration::{mask_api_key, Configuration};
use crate::format::CsvRecordProducer;

/// Configuration as shown to the user, with the API key masked
#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationView {
    pub domain: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl From<&Configuration> for ConfigurationView {
    fn from(configuration: &Configuration) -> Self {
        Self {
            domain: configuration.domain().map(|url| url.to_string()),
            api_key: configuration.api_key().map(mask_api_key),
            timeout_seconds: configuration.timeout_seconds(),
        }
    }
}

impl CsvRecordProducer for ConfigurationView {
    fn csv_header() -> Vec<String> {
        Configuration::csv_header()
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.domain.clone().unwrap_or_default(),
            self.api_key.clone().unwrap_or_default(),
            self.timeout_seconds.map(|t| t.to_string()).unwrap_or_default(),
        ]]
    }
}

/// Result of `dashctl ping`
#[derive(Debug, Clone, Serialize)]
pub struct PingReport {
    pub milliseconds: u128,
}

impl From<Duration> for PingReport {
    fn from(elapsed: Duration) -> Self {
        Self {
            milliseconds: elapsed.as_millis(),
        }
    }
}

impl CsvRecordProducer for PingReport {
    fn csv_header() -> Vec<String> {
        vec!["MILLISECONDS".to_string()]
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        vec![vec![self.milliseconds.to_string()]]
    }
}

pub fn get_configuration(
    configuration: &Configuration,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    print_formatted(&ConfigurationView::from(configuration), matches)
}

/// Set one property and save the configuration file
pub fn set_configuration(
    configuration: &mut Configuration,
    matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let name = required::<String>(matches, PARAMETER_NAME)?;
    let value = required::<String>(matches, PARAMETER_VALUE)?;

    configuration.set_property(name, value)?;
    configuration.save_to_default()?;
    Ok(())
}

pub fn print_configuration_path() -> Result<(), CliActionError> {
    let path = Configuration::get_default_configuration_file_path()?;
    println!("{}", path.display());
    Ok(())
}

pub async fn ping(client: &Dashactyl, matches: &ArgMatches) -> Result<(), CliActionError> {
    let elapsed = client.ping().await?;
    print_formatted(&PingReport::from(elapsed), matches)
}
