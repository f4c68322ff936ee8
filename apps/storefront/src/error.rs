//! # App Error Type
//!
//! Unified error type for storefront commands.
//!
//! Every failed command is printed as one JSON line with a machine-readable
//! `code` and a human-readable `message`:
//! ```json
//! { "code": "VALIDATION_ERROR", "message": "Invalid setting: max quantity must be between 1 and 4294967295" }
//! ```
//!
//! A blocked add-to-cart is NOT an error here; it is a normal response with
//! `accepted: false`.

use maxqty_host::HostError;
use serde::Serialize;

/// Error returned from storefront commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The command line couldn't be understood
    InvalidCommand,

    /// Input validation failed
    ValidationError,

    /// The host didn't load the plugin
    PluginInactive,

    /// Name doesn't match a known resource
    NotFound,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates an invalid-command error.
    pub fn invalid_command(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::InvalidCommand, message)
    }
}

/// Converts adapter errors to app errors.
impl From<HostError> for AppError {
    fn from(err: HostError) -> Self {
        let code = match &err {
            HostError::UnknownExtensionPoint(_) => ErrorCode::NotFound,
            HostError::HostInactive(_) => ErrorCode::PluginInactive,
            HostError::InvalidSetting(_) => ErrorCode::ValidationError,
        };
        AppError::new(code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
