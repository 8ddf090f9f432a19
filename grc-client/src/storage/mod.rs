//! Durable key-value storage
//!
//! Session identity and form customizations are cached here. The store is a
//! cache of server-issued data, never the system of record.
//!
//! - [`FileStore`] - one file per key under a directory
//! - [`MemoryStore`] - in-process map, can be told to reject writes

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use shared::ErrorCode;
use thiserror::Error;

/// Fixed storage keys
pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const USER_ROLE: &str = "user_role";
    pub const USER_PROFILE: &str = "user_profile";
    pub const FORM_CONFIGURATIONS: &str = "form_configurations";

    /// Keys owned by the auth session
    pub const SESSION_KEYS: &[&str] = &[ACCESS_TOKEN, REFRESH_TOKEN, USER_ROLE, USER_PROFILE];
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Write rejected: {0}")]
    WriteRejected(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

impl StorageError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::StorageReadFailed,
            Self::Io(_) | Self::Write { .. } | Self::WriteRejected(_) => {
                ErrorCode::StorageWriteFailed
            }
            Self::InvalidKey(_) => ErrorCode::InvalidRequest,
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// String key-value storage
///
/// Callers never issue concurrent writes to the same key; implementations
/// need not provide multi-key atomicity.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removing a missing key is not an error
    fn remove(&self, key: &str) -> StorageResult<()>;
}

pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_and_write_failures_have_distinct_codes() {
        let io = || std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let read = StorageError::Read {
            key: keys::USER_PROFILE.to_string(),
            source: io(),
        };
        let write = StorageError::Write {
            key: keys::USER_PROFILE.to_string(),
            source: io(),
        };
        assert_eq!(read.code(), ErrorCode::StorageReadFailed);
        assert_eq!(write.code(), ErrorCode::StorageWriteFailed);
        assert_eq!(
            StorageError::InvalidKey("a b".into()).code(),
            ErrorCode::InvalidRequest
        );
    }

    #[test]
    fn test_validate_key() {
        for key in keys::SESSION_KEYS {
            assert!(validate_key(key).is_ok());
        }
        assert!(validate_key(keys::FORM_CONFIGURATIONS).is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a b").is_err());
    }
}
