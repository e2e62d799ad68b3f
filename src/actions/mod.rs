use thiserror::Error;

pub mod config;
pub mod coupons;
pub mod store;
pub mod users;
pub mod utils;

#[derive(Debug, Error)]
pub enum CliActionError {
    #[error("{0}")]
    ApiError(#[from] crate::error::DashactylError),

    #[error("{0}")]
    ConfigurationError(#[from] crate::configuration::ConfigurationError),

    #[error("{0}")]
    FormattingError(#[from] crate::format::FormattingError),

    #[error("Missing required argument: {0}")]
    MissingRequiredArgument(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl CliActionError {
    pub fn exit_code(&self) -> crate::exit_codes::DashctlExitCode {
        use crate::exit_codes::DashctlExitCode;

        match self {
            CliActionError::ApiError(e) => DashctlExitCode::from(e),
            CliActionError::ConfigurationError(_) => DashctlExitCode::ConfigError,
            CliActionError::FormattingError(_) => DashctlExitCode::SoftwareError,
            CliActionError::MissingRequiredArgument(_) => DashctlExitCode::UsageError,
            CliActionError::UnsupportedOperation(_) => DashctlExitCode::UsageError,
        }
    }
}
