//! # Host Error Types
//!
//! Error types for the adapter layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError (maxqty-core)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  HostError (this module) ← Adds adapter context                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (storefront) ← Serialized for the operator                   │
//! │                                                                         │
//! │  LimitExceeded never travels this way: a rejection is reported through │
//! │  the host's notice channel, not returned as an error.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use maxqty_core::ValidationError;
use thiserror::Error;

/// Adapter-layer errors.
#[derive(Debug, Error)]
pub enum HostError {
    /// The name doesn't match any extension point this adapter knows.
    #[error("Unknown extension point: {0}")]
    UnknownExtensionPoint(String),

    /// The host's commerce plugin isn't active, so nothing was registered.
    #[error("Commerce plugin {0} is not active")]
    HostInactive(String),

    /// A submitted setting was rejected.
    #[error("Invalid setting: {0}")]
    InvalidSetting(#[from] ValidationError),
}

/// Result type for adapter operations.
pub type HostResult<T> = Result<T, HostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_converts_to_host_error() {
        let err: HostError = ValidationError::InvalidFormat {
            field: "max quantity".to_string(),
            reason: "must be a whole number".to_string(),
        }
        .into();

        assert!(matches!(err, HostError::InvalidSetting(_)));
        assert_eq!(
            err.to_string(),
            "Invalid setting: max quantity has invalid format: must be a whole number"
        );
    }
}
