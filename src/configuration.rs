use crate::client::ClientConfig;
use crate::format::CsvRecordProducer;
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;
use url::Url;

pub const DEFAULT_APPLICATION_ID: &str = "dashactyl";
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "config.yml";

pub const ENV_CONFIG_DIR: &str = "DASHACTYL_CONFIG_DIR";
pub const ENV_DOMAIN: &str = "DASHACTYL_DOMAIN";
pub const ENV_API_KEY: &str = "DASHACTYL_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to load configuration data, because of: {cause:?}")]
    FailedToLoadData {
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to write configuration data to file, because of: {cause:?}")]
    FailedToWriteData {
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("missing value for property {name:?}")]
    MissingRequiredPropertyValue { name: String },
    #[error("invalid value {value:?} for property {name:?}")]
    InvalidPropertyValue { name: String, value: String },
}

/// Persistent settings of the dashctl client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    domain: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_seconds: Option<u64>,
}

impl Configuration {
    pub fn domain(&self) -> Option<&Url> {
        self.domain.as_ref()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    pub fn set_domain(&mut self, domain: &str) -> Result<(), ConfigurationError> {
        self.domain = Some(parse_domain(domain)?);
        Ok(())
    }

    pub fn set_api_key(&mut self, api_key: &str) {
        self.api_key = Some(api_key.to_string());
    }

    pub fn set_timeout_seconds(&mut self, timeout_seconds: u64) {
        self.timeout_seconds = Some(timeout_seconds);
    }

    /// Set a property by name, as used by `dashctl config set`
    pub fn set_property(&mut self, name: &str, value: &str) -> Result<(), ConfigurationError> {
        match name {
            "domain" => self.set_domain(value),
            "api-key" | "api_key" => {
                self.set_api_key(value);
                Ok(())
            }
            "timeout" | "timeout_seconds" => {
                let seconds = value
                    .parse::<u64>()
                    .map_err(|_| ConfigurationError::InvalidPropertyValue {
                        name: name.to_string(),
                        value: value.to_string(),
                    })?;
                self.set_timeout_seconds(seconds);
                Ok(())
            }
            _ => Err(ConfigurationError::InvalidPropertyValue {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Replace stored values with `DASHACTYL_DOMAIN` and `DASHACTYL_API_KEY` when set
    pub fn apply_environment(&mut self) -> Result<(), ConfigurationError> {
        if let Ok(domain) = std::env::var(ENV_DOMAIN) {
            debug!("Using domain from {}", ENV_DOMAIN);
            self.set_domain(&domain)?;
        }
        if let Ok(api_key) = std::env::var(ENV_API_KEY) {
            debug!("Using API key from {}", ENV_API_KEY);
            self.set_api_key(&api_key);
        }
        Ok(())
    }

    /// Connection settings for the client library
    pub fn client_config(&self) -> Result<ClientConfig, ConfigurationError> {
        let domain = self
            .domain
            .as_ref()
            .ok_or_else(|| ConfigurationError::MissingRequiredPropertyValue {
                name: "domain".to_string(),
            })?;
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigurationError::MissingRequiredPropertyValue {
                name: "api-key".to_string(),
            })?;

        let config = ClientConfig::new(domain.as_str(), api_key);
        Ok(match self.timeout_seconds {
            Some(seconds) => config.with_timeout(Duration::from_secs(seconds)),
            None => config,
        })
    }

    pub fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationError> {
        if let Ok(config_dir_str) = std::env::var(ENV_CONFIG_DIR) {
            let mut config_path = PathBuf::from(config_dir_str);
            config_path.push(DEFAULT_CONFIGURATION_FILE_NAME);
            return Ok(config_path);
        }

        let mut path = config_dir().ok_or(ConfigurationError::FailedToFindConfigurationDirectory)?;
        path.push(DEFAULT_APPLICATION_ID);
        path.push(DEFAULT_CONFIGURATION_FILE_NAME);
        Ok(path)
    }

    pub fn load_default() -> Result<Configuration, ConfigurationError> {
        let default_file_path = Configuration::get_default_configuration_file_path()?;
        debug!("Loading configuration from {}...", default_file_path.display());
        let mut configuration = Configuration::load_from_file(&default_file_path)?;
        configuration.apply_environment()?;
        Ok(configuration)
    }

    /// Load default configuration, creating a default one if none exists
    pub fn load_or_create_default() -> Result<Configuration, ConfigurationError> {
        let default_file_path = Configuration::get_default_configuration_file_path()?;
        debug!(
            "Loading or creating configuration from {}...",
            default_file_path.display()
        );

        let mut configuration = if default_file_path.exists() {
            Configuration::load_from_file(&default_file_path)?
        } else {
            debug!("Configuration file not found, creating default configuration");
            let default_config = Configuration::default();
            default_config.save(&default_file_path)?;
            default_config
        };
        configuration.apply_environment()?;
        Ok(configuration)
    }

    pub fn load_from_file(path: &Path) -> Result<Configuration, ConfigurationError> {
        let configuration = fs::read_to_string(path)
            .map_err(|cause| ConfigurationError::FailedToLoadData {
                cause: Box::new(cause),
            })?;
        serde_yaml::from_str(&configuration).map_err(|cause| ConfigurationError::FailedToLoadData {
            cause: Box::new(cause),
        })
    }

    pub fn write<W: Write>(&self, writer: W) -> Result<(), ConfigurationError> {
        serde_yaml::to_writer(writer, self)
            .map_err(|e| ConfigurationError::FailedToWriteData { cause: Box::new(e) })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigurationError> {
        let configuration_directory = path
            .parent()
            .ok_or(ConfigurationError::FailedToFindConfigurationDirectory)?;
        fs::create_dir_all(configuration_directory)
            .map_err(|_| ConfigurationError::FailedToFindConfigurationDirectory)?;

        let file = File::create(path)
            .map_err(|e| ConfigurationError::FailedToWriteData { cause: Box::new(e) })?;
        self.write(file)
    }

    pub fn save_to_default(&self) -> Result<(), ConfigurationError> {
        self.save(&Self::get_default_configuration_file_path()?)
    }
}

fn parse_domain(domain: &str) -> Result<Url, ConfigurationError> {
    Url::parse(domain.trim())
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .ok_or_else(|| ConfigurationError::InvalidPropertyValue {
            name: "domain".to_string(),
            value: domain.to_string(),
        })
}

/// Hide all but the last four characters of an API key
pub fn mask_api_key(api_key: &str) -> String {
    let visible: String = api_key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{}", visible)
}

impl CsvRecordProducer for Configuration {
    fn csv_header() -> Vec<String> {
        vec!["DOMAIN".to_string(), "API_KEY".to_string(), "TIMEOUT_SECONDS".to_string()]
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.domain.as_ref().map(Url::to_string).unwrap_or_default(),
            self.api_key.as_deref().map(mask_api_key).unwrap_or_default(),
            self.timeout_seconds.map(|t| t.to_string()).unwrap_or_default(),
        ]]
    }
}
