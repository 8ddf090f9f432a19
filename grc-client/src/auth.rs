//! Authentication service seam
//!
//! [`AuthSession`](crate::AuthSession) talks to the auth service only through
//! [`AuthService`], so tests and alternative transports can stand in for
//! [`HttpClient`](crate::HttpClient).

use std::fmt;

use async_trait::async_trait;
use shared::{LoginResponse, UserInfo};

use crate::error::ClientResult;

/// Remote authentication operations
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for tokens and the user's profile
    async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse>;

    /// Tell the service the token is no longer in use
    async fn logout(&self, access_token: &str) -> ClientResult<()>;

    /// Fetch the profile the service currently associates with the token
    async fn current_user(&self, access_token: &str) -> ClientResult<UserInfo>;
}

/// Username/password pair submitted at sign-in
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
