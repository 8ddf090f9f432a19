//! GRC Client - session, storage and form configuration for the GRC portal
//!
//! Talks to the authentication service over HTTP and keeps the signed-in
//! session and request form customizations in a local key-value store.

pub mod auth;
pub mod config;
pub mod error;
pub mod form_config;
pub mod http;
pub mod logger;
pub mod session;
pub mod storage;

pub use auth::{AuthService, Credentials};
pub use config::ClientConfig;
pub use error::{AuthError, ClientError, ClientResult};
pub use form_config::{FormConfigError, FormConfigResult, FormConfigStore};
pub use http::HttpClient;
pub use session::{AuthSession, AuthState, SessionCacheError, SessionCacheResult};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};

// Re-export shared types for convenience
pub use shared::client::{LoginResponse, UserInfo};
pub use shared::form_config::{ConfigPatch, FieldPatch, MoveDirection};
