//! Shared types for the GRC portal
//!
//! Permission and role catalogs, navigation visibility, request form
//! configuration, auth DTOs and error codes. Everything here is pure and
//! synchronous; I/O lives in `grc-client`.

pub mod client;
pub mod error;
pub mod form_config;
pub mod models;
pub mod navigation;
pub mod rbac;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse, UserInfo};
pub use error::ErrorCode;
pub use form_config::{FormConfigurations, FormFieldConfig, RequestType, RequestTypeFormConfig};
pub use models::User;
pub use navigation::{NavigationItem, default_navigation, visible_navigation};
pub use rbac::{Permission, PermissionArea, Role};
