//! Custom exit codes for dashctl
//!
//! This module defines specific exit codes for different error conditions
//! to make scripting and automation easier.

use crate::error::{DashactylError, TransportError};

/// Custom exit codes for dashctl
///
/// These codes follow the BSD sysexits.h conventions where possible:
/// - 0: Success
/// - 64-78: Standard exit codes from sysexits.h
/// - 100+: Custom application-specific codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashctlExitCode {
    /// Success (0) - Command completed successfully
    Success = exitcode::OK as isize,

    /// Command line usage error (64) - User input error
    UsageError = exitcode::USAGE as isize,

    /// Data format error (65) - Input data was incorrect
    DataError = exitcode::DATAERR as isize,

    /// Addressee unknown (67) - User or resource not found
    NotFound = exitcode::NOUSER as isize,

    /// Internal software error (70) - Unexpected application error
    SoftwareError = exitcode::SOFTWARE as isize,

    /// I/O error (74) - Reading or writing a file failed
    IoError = exitcode::IOERR as isize,

    /// Configuration error (78) - Application configuration issue
    ConfigError = exitcode::CONFIG as isize,

    /// Network error (101) - Connection or communication issues
    NetworkError = 101,

    /// API error (102) - Remote API returned an error
    ApiError = 102,
}

impl DashctlExitCode {
    /// Convert to numeric exit code
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Get descriptive message for the exit code
    pub fn message(&self) -> &'static str {
        match self {
            DashctlExitCode::Success => "Success",
            DashctlExitCode::UsageError => "Command line usage error",
            DashctlExitCode::DataError => "Data format error",
            DashctlExitCode::NotFound => "Resource not found",
            DashctlExitCode::SoftwareError => "Internal software error",
            DashctlExitCode::IoError => "Input/output error",
            DashctlExitCode::ConfigError => "Configuration error",
            DashctlExitCode::NetworkError => "Network communication error",
            DashctlExitCode::ApiError => "Remote API error",
        }
    }
}

impl From<DashctlExitCode> for i32 {
    fn from(code: DashctlExitCode) -> Self {
        code.code()
    }
}

impl From<&DashactylError> for DashctlExitCode {
    fn from(error: &DashactylError) -> Self {
        match error {
            DashactylError::MalformedPayload { .. } => DashctlExitCode::DataError,
            DashactylError::Validation(_) | DashactylError::InvalidOperation(_) => {
                DashctlExitCode::UsageError
            }
            DashactylError::ApiRejected { .. } => DashctlExitCode::ApiError,
            DashactylError::TransportFailure(TransportError::Server { .. }) => {
                DashctlExitCode::ApiError
            }
            DashactylError::TransportFailure(_) => DashctlExitCode::NetworkError,
            DashactylError::AlreadyResolved { .. } => DashctlExitCode::SoftwareError,
            DashactylError::NotFound { .. } => DashctlExitCode::NotFound,
        }
    }
}
