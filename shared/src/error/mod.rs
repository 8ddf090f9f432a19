//! Unified error codes for the GRC portal
//!
//! [`ErrorCode`]: standardized numeric codes, each with a user-facing message.
//! The leading digit groups codes by concern.
//!
//! Crate-level error enums (`AuthError`, `StorageError`, `FormConfigError`, ...)
//! expose a `code()` returning one of these so UI code only needs one table.

mod codes;

pub use codes::{ErrorCode, InvalidErrorCode};
