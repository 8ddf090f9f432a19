//! Authenticated session
//!
//! `AuthSession` owns the current user and the tokens issued at sign-in. The
//! persisted copy in the [`KeyValueStore`] is only a cache: it lets the
//! portal come back signed in after a restart, and
//! [`AuthSession::restore_and_reconcile`] lets the server overwrite it.
//!
//! The cache only ever describes one user. Every failed sign-in clears it,
//! and a new sign-in clears it before writing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::rbac::UnknownRole;
use shared::util::now_millis;
use shared::{ErrorCode, NavigationItem, Permission, Role, User, UserInfo, visible_navigation};
use thiserror::Error;

use crate::auth::{AuthService, Credentials};
use crate::error::{AuthError, ClientError};
use crate::storage::{KeyValueStore, StorageError, keys};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticating,
    Authenticated(User),
}

#[derive(Debug, Error)]
pub enum SessionCacheError {
    #[error("Session cache storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Session cache is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Session cache is incomplete")]
    Incomplete,

    #[error("Session cache has an unrecognised role: {0}")]
    UnknownRole(#[from] UnknownRole),

    #[error("Session cache role mismatch: cached {cached} but profile says {profile}")]
    RoleMismatch { cached: Role, profile: Role },
}

impl SessionCacheError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Storage(e) => e.code(),
            Self::Corrupt(_) | Self::Incomplete | Self::UnknownRole(_) | Self::RoleMismatch { .. } => {
                ErrorCode::StorageCorrupted
            }
        }
    }
}

pub type SessionCacheResult<T> = Result<T, SessionCacheError>;

/// Snapshot stored under `user_profile`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProfile {
    user: UserInfo,
    logged_in_at: i64,
}

/// Session bound to an auth service and a durable store
pub struct AuthSession {
    service: Arc<dyn AuthService>,
    store: Arc<dyn KeyValueStore>,
    state: AuthState,
    access_token: Option<String>,
    refresh_token: Option<String>,
    logged_in_at: Option<i64>,
    /// Set when the server rejected the session, cleared by the next sign-in
    expired: bool,
}

impl AuthSession {
    pub fn new(service: Arc<dyn AuthService>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            service,
            store,
            state: AuthState::Unauthenticated,
            access_token: None,
            refresh_token: None,
            logged_in_at: None,
            expired: false,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated(_))
    }

    pub fn current_user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// The signed-in user, or why there is none
    ///
    /// `SessionExpired` after the server rejected the session,
    /// `NotAuthenticated` otherwise.
    pub fn require_user(&self) -> Result<&User, AuthError> {
        match self.current_user() {
            Some(user) => Ok(user),
            None if self.expired => Err(AuthError::SessionExpired),
            None => Err(AuthError::NotAuthenticated),
        }
    }

    pub fn current_role(&self) -> Option<Role> {
        self.current_user().map(|u| u.role)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Sign-in time in Unix milliseconds
    pub fn logged_in_at(&self) -> Option<i64> {
        self.logged_in_at
    }

    // ========== Lifecycle ==========

    /// Sign in with the auth service
    ///
    /// Any previous session, in memory and cached, is dropped first. Failing
    /// to write the local cache does not fail the sign-in.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<User, AuthError> {
        tracing::info!(username = %credentials.username, "Signing in");
        self.teardown();
        self.expired = false;
        self.state = AuthState::Authenticating;

        let response = match self
            .service
            .login(&credentials.username, &credentials.password)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                self.teardown();
                tracing::warn!(username = %credentials.username, error = %e, "Sign-in failed");
                return Err(AuthError::from(e));
            }
        };

        let user = match User::try_from(response.user) {
            Ok(user) => user,
            Err(e) => {
                self.teardown();
                tracing::warn!(
                    username = %credentials.username,
                    role = %e.0,
                    "Sign-in refused: unrecognised role"
                );
                return Err(AuthError::from(e));
            }
        };

        let logged_in_at = now_millis();
        if let Err(e) = persist_session(
            self.store.as_ref(),
            &response.access_token,
            response.refresh_token.as_deref(),
            &user,
            logged_in_at,
        ) {
            tracing::warn!(error = %e, "Failed to cache session, continuing without it");
            self.clear_cache();
        }

        self.access_token = Some(response.access_token);
        self.refresh_token = response.refresh_token;
        self.logged_in_at = Some(logged_in_at);
        self.state = AuthState::Authenticated(user.clone());

        tracing::info!(user_id = %user.id, role = %user.role, "Signed in");
        Ok(user)
    }

    /// Sign out
    ///
    /// The auth service is told best-effort; local state is cleared whatever
    /// it answers.
    pub async fn logout(&mut self) {
        if let Some(token) = self.access_token.clone() {
            if let Err(e) = self.service.logout(&token).await {
                tracing::warn!(error = %e, "Logout notification failed");
            }
        }

        let user_id = self.current_user().map(|u| u.id.clone());
        self.teardown();
        self.expired = false;
        tracing::info!(user_id = ?user_id, "Signed out");
    }

    /// Drop the session after the server rejected its token
    ///
    /// The server is not contacted. [`require_user`](Self::require_user)
    /// reports `SessionExpired` until the next sign-in.
    pub fn handle_auth_failure(&mut self) {
        if self.is_authenticated() {
            tracing::warn!("Session rejected by server, signing out");
        }
        self.teardown();
        self.expired = true;
    }

    /// Tear the session down if `err` is an authentication failure
    ///
    /// Returns whether teardown happened. Meant to be called on every error
    /// coming back from an authenticated request.
    pub fn observe(&mut self, err: &ClientError) -> bool {
        if err.is_auth_failure() {
            self.handle_auth_failure();
            true
        } else {
            false
        }
    }

    /// Rebuild the session from the local cache
    ///
    /// Returns whether a session was restored. See [`try_restore`](Self::try_restore).
    pub fn restore(&mut self) -> bool {
        match self.try_restore() {
            Ok(restored) => restored,
            Err(e) => {
                tracing::warn!(error = %e, code = %e.code(), "Could not restore cached session");
                false
            }
        }
    }

    /// Rebuild the session from the local cache
    ///
    /// `Ok(false)` when nothing is cached. An incomplete or inconsistent
    /// cache is cleared before its error is returned; a storage failure
    /// leaves the cache alone.
    pub fn try_restore(&mut self) -> SessionCacheResult<bool> {
        match load_session(self.store.as_ref()) {
            Ok(Some(cached)) => {
                tracing::info!(user_id = %cached.user.id, role = %cached.user.role, "Restored cached session");
                self.access_token = Some(cached.access_token);
                self.refresh_token = cached.refresh_token;
                self.logged_in_at = Some(cached.logged_in_at);
                self.state = AuthState::Authenticated(cached.user);
                Ok(true)
            }
            Ok(None) => {
                tracing::debug!("No cached session");
                self.reset_memory();
                Ok(false)
            }
            Err(e @ SessionCacheError::Storage(_)) => {
                self.reset_memory();
                Err(e)
            }
            Err(e) => {
                self.teardown();
                Err(e)
            }
        }
    }

    /// Restore from cache, then let the server confirm who the user is
    ///
    /// - server answers: its user and role replace the cached ones
    /// - server rejects the token: the session is torn down
    /// - server unreachable: the cached session is kept
    pub async fn restore_and_reconcile(&mut self) -> bool {
        if !self.restore() {
            return false;
        }
        let Some(token) = self.access_token.clone() else {
            return false;
        };

        let info = match self.service.current_user(&token).await {
            Ok(info) => info,
            Err(e) if e.is_auth_failure() => {
                self.handle_auth_failure();
                return false;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not reconcile session, keeping cached copy");
                return true;
            }
        };

        let user = match User::try_from(info) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(role = %e.0, "Server reports an unrecognised role, signing out");
                self.teardown();
                return false;
            }
        };

        if self.current_user() != Some(&user) {
            tracing::info!(user_id = %user.id, role = %user.role, "Session updated from server");
        }

        let logged_in_at = self.logged_in_at.unwrap_or_else(now_millis);
        if let Err(e) = persist_session(
            self.store.as_ref(),
            &token,
            self.refresh_token.as_deref(),
            &user,
            logged_in_at,
        ) {
            tracing::warn!(error = %e, "Failed to cache reconciled session");
            self.clear_cache();
        }
        self.state = AuthState::Authenticated(user);
        true
    }

    // ========== Authorization ==========

    pub fn check_permission(&self, permission: Permission) -> bool {
        self.current_role()
            .is_some_and(|role| role.has_permission(permission))
    }

    /// At least one of `permissions`; false for an empty list
    pub fn check_any(&self, permissions: &[Permission]) -> bool {
        self.current_role()
            .is_some_and(|role| role.has_any_permission(permissions))
    }

    /// Every one of `permissions`; true for an empty list when signed in
    pub fn check_all(&self, permissions: &[Permission]) -> bool {
        self.current_role()
            .is_some_and(|role| role.has_all_permissions(permissions))
    }

    /// `tree` filtered for the current user; empty when signed out
    pub fn visible_navigation(&self, tree: &[NavigationItem]) -> Vec<NavigationItem> {
        match self.current_role() {
            Some(role) => visible_navigation(tree, role),
            None => Vec::new(),
        }
    }

    // ========== Internal ==========

    fn reset_memory(&mut self) {
        self.state = AuthState::Unauthenticated;
        self.access_token = None;
        self.refresh_token = None;
        self.logged_in_at = None;
    }

    fn clear_cache(&self) {
        for key in keys::SESSION_KEYS {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key = %key, error = %e, "Failed to clear cached session key");
            }
        }
    }

    fn teardown(&mut self) {
        self.reset_memory();
        self.clear_cache();
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("state", &self.state)
            .field("has_token", &self.access_token.is_some())
            .field("expired", &self.expired)
            .finish()
    }
}

struct CachedSession {
    access_token: String,
    refresh_token: Option<String>,
    user: User,
    logged_in_at: i64,
}

/// Replace the cached session
///
/// Existing keys are removed first so a failure part-way never leaves one
/// user's token next to another user's profile.
fn persist_session(
    store: &dyn KeyValueStore,
    access_token: &str,
    refresh_token: Option<&str>,
    user: &User,
    logged_in_at: i64,
) -> SessionCacheResult<()> {
    let profile_json = serde_json::to_string(&StoredProfile {
        user: UserInfo::from(user),
        logged_in_at,
    })?;

    for key in keys::SESSION_KEYS {
        store.remove(key)?;
    }
    // Profile and role go in before the token: `load_session` needs all three
    store.set(keys::USER_PROFILE, &profile_json)?;
    store.set(keys::USER_ROLE, user.role.as_str())?;
    if let Some(token) = refresh_token {
        store.set(keys::REFRESH_TOKEN, token)?;
    }
    store.set(keys::ACCESS_TOKEN, access_token)?;
    Ok(())
}

/// `Ok(None)` when nothing is cached
fn load_session(store: &dyn KeyValueStore) -> SessionCacheResult<Option<CachedSession>> {
    let access_token = store.get(keys::ACCESS_TOKEN)?;
    let role = store.get(keys::USER_ROLE)?;
    let profile = store.get(keys::USER_PROFILE)?;

    let (access_token, role, profile) = match (access_token, role, profile) {
        (None, None, None) => return Ok(None),
        (Some(token), Some(role), Some(profile)) if !token.is_empty() => (token, role, profile),
        _ => return Err(SessionCacheError::Incomplete),
    };

    let cached: Role = role.parse()?;
    let profile: StoredProfile = serde_json::from_str(&profile)?;
    let user = User::try_from(profile.user)?;
    if user.role != cached {
        return Err(SessionCacheError::RoleMismatch {
            cached,
            profile: user.role,
        });
    }

    Ok(Some(CachedSession {
        access_token,
        refresh_token: store.get(keys::REFRESH_TOKEN)?,
        user,
        logged_in_at: profile.logged_in_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn manager() -> User {
        User {
            id: "u-7".into(),
            name: "Maria Manager".into(),
            email: "maria@corp.example".into(),
            department: "Finance".into(),
            role: Role::Manager,
        }
    }

    #[test]
    fn test_persist_then_load() {
        let store = MemoryStore::new();
        persist_session(&store, "tok", Some("ref"), &manager(), 42).unwrap();

        let cached = load_session(&store).unwrap().unwrap();
        assert_eq!(cached.access_token, "tok");
        assert_eq!(cached.refresh_token.as_deref(), Some("ref"));
        assert_eq!(cached.user, manager());
        assert_eq!(cached.logged_in_at, 42);
    }

    #[test]
    fn test_persist_drops_stale_refresh_token() {
        let store = MemoryStore::new();
        persist_session(&store, "tok-1", Some("ref-1"), &manager(), 1).unwrap();
        persist_session(&store, "tok-2", None, &manager(), 2).unwrap();

        let cached = load_session(&store).unwrap().unwrap();
        assert_eq!(cached.access_token, "tok-2");
        assert!(cached.refresh_token.is_none());
    }

    #[test]
    fn test_partial_persist_never_pairs_new_token_with_old_profile() {
        let store = MemoryStore::new();
        persist_session(&store, "old", None, &manager(), 1).unwrap();

        store.reject_key(keys::USER_ROLE);
        let auditor = User {
            role: Role::Auditor,
            ..manager()
        };
        assert!(matches!(
            persist_session(&store, "new", None, &auditor, 2),
            Err(SessionCacheError::Storage(_))
        ));
        assert_eq!(store.get(keys::ACCESS_TOKEN).unwrap(), None);
        assert!(matches!(load_session(&store), Err(SessionCacheError::Incomplete)));
    }

    #[test]
    fn test_load_empty_store() {
        assert!(load_session(&MemoryStore::new()).unwrap().is_none());
    }

    #[test]
    fn test_load_rejects_partial_cache() {
        let store = MemoryStore::new();
        store.set(keys::ACCESS_TOKEN, "tok").unwrap();
        let err = load_session(&store).err().unwrap();
        assert!(matches!(err, SessionCacheError::Incomplete));
        assert_eq!(err.code(), ErrorCode::StorageCorrupted);
    }

    #[test]
    fn test_load_rejects_role_mismatch() {
        let store = MemoryStore::new();
        persist_session(&store, "tok", None, &manager(), 1).unwrap();
        store.set(keys::USER_ROLE, "system_admin").unwrap();
        assert!(matches!(
            load_session(&store),
            Err(SessionCacheError::RoleMismatch {
                cached: Role::SystemAdmin,
                profile: Role::Manager
            })
        ));
    }

    #[test]
    fn test_load_rejects_unknown_role() {
        let store = MemoryStore::new();
        persist_session(&store, "tok", None, &manager(), 1).unwrap();
        store.set(keys::USER_ROLE, "superuser").unwrap();
        assert!(matches!(
            load_session(&store),
            Err(SessionCacheError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_load_rejects_corrupt_profile() {
        let store = MemoryStore::new();
        persist_session(&store, "tok", None, &manager(), 1).unwrap();
        store.set(keys::USER_PROFILE, "{oops").unwrap();
        let err = load_session(&store).err().unwrap();
        assert!(matches!(err, SessionCacheError::Corrupt(_)));
        assert_eq!(err.code(), ErrorCode::StorageCorrupted);
    }
}
