//! Unified error codes for the GRC portal
//!
//! Error codes are organized by category:
//! - 0xxx: General errors (validation, lookup)
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Storage errors
//! - 4xxx: Form configuration errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 on the wire so UI code can map codes to messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Session has expired or was revoked
    SessionExpired = 1005,
    /// Auth service could not be reached
    AuthServiceUnavailable = 1010,
    /// Auth service returned a role outside the catalog
    UnknownRole = 1011,
    /// Auth service returned an unexpected payload
    InvalidAuthResponse = 1012,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 3xxx: Storage ====================
    /// Durable storage could not be read
    StorageReadFailed = 3001,
    /// Durable storage rejected a write
    StorageWriteFailed = 3002,
    /// Stored data could not be decoded
    StorageCorrupted = 3003,

    // ==================== 4xxx: Form config ====================
    /// Field id not present in the request type
    FormFieldNotFound = 4001,
    /// Field id already present in the request type
    FormFieldExists = 4002,
    /// Field id not offered by the field catalog
    FormFieldNotInCatalog = 4003,
    /// Default fields can be disabled but not removed
    FormFieldIsDefault = 4004,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Whether the user can recover by retrying the same action
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCode::AuthServiceUnavailable
                | ErrorCode::StorageReadFailed
                | ErrorCode::StorageWriteFailed
                | ErrorCode::NetworkError
        )
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "Please sign in to continue",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::SessionExpired => "Your session has expired, please sign in again",
            ErrorCode::AuthServiceUnavailable => "The sign-in service is unavailable, try again later",
            ErrorCode::UnknownRole => "Your account has a role this portal does not recognise",
            ErrorCode::InvalidAuthResponse => "The sign-in service returned an unexpected response",

            // Permission
            ErrorCode::PermissionDenied => "You do not have permission to do that",

            // Storage
            ErrorCode::StorageReadFailed => "Saved data could not be read",
            ErrorCode::StorageWriteFailed => "Changes could not be saved, try again",
            ErrorCode::StorageCorrupted => "Saved data is corrupted",

            // Form config
            ErrorCode::FormFieldNotFound => "Form field not found",
            ErrorCode::FormFieldExists => "Form field already present",
            ErrorCode::FormFieldNotInCatalog => "Form field is not available in the catalog",
            ErrorCode::FormFieldIsDefault => "Default form fields can only be disabled",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when a u16 does not name an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1005 => Ok(ErrorCode::SessionExpired),
            1010 => Ok(ErrorCode::AuthServiceUnavailable),
            1011 => Ok(ErrorCode::UnknownRole),
            1012 => Ok(ErrorCode::InvalidAuthResponse),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Storage
            3001 => Ok(ErrorCode::StorageReadFailed),
            3002 => Ok(ErrorCode::StorageWriteFailed),
            3003 => Ok(ErrorCode::StorageCorrupted),

            // Form config
            4001 => Ok(ErrorCode::FormFieldNotFound),
            4002 => Ok(ErrorCode::FormFieldExists),
            4003 => Ok(ErrorCode::FormFieldNotInCatalog),
            4004 => Ok(ErrorCode::FormFieldIsDefault),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
