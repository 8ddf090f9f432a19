//! Client error types

use shared::ErrorCode;
use thiserror::Error;

/// Transport-level error from the auth HTTP client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client misconfigured
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether the server rejected the caller's credentials or token
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(_) => ErrorCode::NetworkError,
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InvalidAuthResponse,
            Self::Unauthorized => ErrorCode::NotAuthenticated,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::InvalidRequest,
            Self::Internal(_) => ErrorCode::InternalError,
            Self::Config(_) => ErrorCode::ConfigError,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Login/session failure, phrased for display to the user
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Sign-in was refused: {0}")]
    Denied(String),

    #[error("Authentication service unavailable: {0}")]
    Unavailable(String),

    #[error("Account role '{0}' is not recognised by this portal")]
    UnknownRole(String),

    #[error("Unexpected response from authentication service: {0}")]
    InvalidResponse(String),

    #[error("Please sign in to continue")]
    NotAuthenticated,

    #[error("Your session has expired, please sign in again")]
    SessionExpired,
}

impl AuthError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidCredentials => ErrorCode::InvalidCredentials,
            Self::Denied(_) => ErrorCode::PermissionDenied,
            Self::Unavailable(_) => ErrorCode::AuthServiceUnavailable,
            Self::UnknownRole(_) => ErrorCode::UnknownRole,
            Self::InvalidResponse(_) => ErrorCode::InvalidAuthResponse,
            Self::NotAuthenticated => ErrorCode::NotAuthenticated,
            Self::SessionExpired => ErrorCode::SessionExpired,
        }
    }
}

impl From<ClientError> for AuthError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unauthorized | ClientError::Validation(_) => Self::InvalidCredentials,
            ClientError::Forbidden(msg) => Self::Denied(msg),
            ClientError::Http(e) => Self::Unavailable(e.to_string()),
            ClientError::Internal(msg) | ClientError::NotFound(msg) | ClientError::Config(msg) => {
                Self::Unavailable(msg)
            }
            ClientError::InvalidResponse(msg) => Self::InvalidResponse(msg),
            ClientError::Serialization(e) => Self::InvalidResponse(e.to_string()),
        }
    }
}

impl From<shared::rbac::UnknownRole> for AuthError {
    fn from(err: shared::rbac::UnknownRole) -> Self {
        Self::UnknownRole(err.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_mapping() {
        assert!(matches!(
            AuthError::from(ClientError::Unauthorized),
            AuthError::InvalidCredentials
        ));
        assert!(matches!(
            AuthError::from(ClientError::Internal("502".into())),
            AuthError::Unavailable(_)
        ));
        assert!(matches!(
            AuthError::from(ClientError::Forbidden("locked".into())),
            AuthError::Denied(_)
        ));
    }

    #[test]
    fn test_auth_error_codes() {
        assert_eq!(AuthError::InvalidCredentials.code(), ErrorCode::InvalidCredentials);
        assert_eq!(
            AuthError::UnknownRole("root".into()).code(),
            ErrorCode::UnknownRole
        );
        assert!(AuthError::Unavailable("down".into()).code().is_retryable());
    }

    #[test]
    fn test_client_error_codes() {
        assert_eq!(ClientError::Unauthorized.code(), ErrorCode::NotAuthenticated);
        assert_eq!(ClientError::Config("bad url".into()).code(), ErrorCode::ConfigError);
        assert_eq!(ClientError::Internal("500".into()).code(), ErrorCode::InternalError);
        assert_eq!(AuthError::SessionExpired.code(), ErrorCode::SessionExpired);
    }

    #[test]
    fn test_only_unauthorized_is_auth_failure() {
        assert!(ClientError::Unauthorized.is_auth_failure());
        assert!(!ClientError::Forbidden("nope".into()).is_auth_failure());
    }
}
