//! Role-based access control
//!
//! - [`Permission`] / [`PermissionArea`] - permission catalog
//! - [`Role`] - role catalog with explicit permission lists
//! - [`resolver`] - total, string-keyed lookups that fail closed

pub mod permission;
pub mod resolver;
pub mod role;

pub use permission::{Permission, PermissionArea, UnknownPermission};
pub use resolver::{get_permissions, has_permission, has_permission_id, permissions_by_area};
pub use role::{Role, UnknownRole};
