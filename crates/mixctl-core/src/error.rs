//! Shared error type across mixctl crates.

use thiserror::Error;

/// Caller-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Configuration could not be parsed or failed validation.
    InvalidConfig,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// A route (HTTP API) spec could not be compiled.
    InvalidApiSpec,
    /// A quota spec could not be compiled.
    InvalidQuotaSpec,
    /// No service context is registered under the requested name.
    UnknownService,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::InvalidApiSpec => "INVALID_API_SPEC",
            ErrorCode::InvalidQuotaSpec => "INVALID_QUOTA_SPEC",
            ErrorCode::UnknownService => "UNKNOWN_SERVICE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MixctlError>;

/// Unified error type used by core and control.
#[derive(Debug, Error)]
pub enum MixctlError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("invalid api spec: {0}")]
    InvalidApiSpec(String),
    #[error("invalid quota spec: {0}")]
    InvalidQuotaSpec(String),
    #[error("unknown service: {0}")]
    UnknownService(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MixctlError {
    /// Map internal error to a stable caller-facing code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MixctlError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            MixctlError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            MixctlError::InvalidApiSpec(_) => ErrorCode::InvalidApiSpec,
            MixctlError::InvalidQuotaSpec(_) => ErrorCode::InvalidQuotaSpec,
            MixctlError::UnknownService(_) => ErrorCode::UnknownService,
            MixctlError::Internal(_) => ErrorCode::Internal,
        }
    }
}
