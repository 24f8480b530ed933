//! Session Store
//!
//! Tab-scoped key/value storage and the typed repository every component
//! reads and writes through. Keys are shared with the front-end shell and must
//! not change.

use std::sync::Arc;

use platform::lockout::LockoutState;

use crate::domain::identity::{AdminProfile, IdentityRecord};

pub const USER_KEY: &str = "user";
pub const ADMIN_JWT_KEY: &str = "admin_jwt";
pub const ADMIN_USER_KEY: &str = "admin_user";
pub const LOGIN_ATTEMPTS_KEY: &str = "adminLoginAttempts";
pub const LOGIN_LOCKOUT_KEY: &str = "adminLoginLockout";

/// Raw string storage living as long as one browser tab
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// Typed access to a [`SessionStore`]
#[derive(Clone)]
pub struct SessionRepository {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRepository").finish_non_exhaustive()
    }
}

impl SessionRepository {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Stored identity; an unreadable record counts as absent
    pub fn identity(&self) -> Option<IdentityRecord> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable identity record");
                None
            }
        }
    }

    pub fn save_identity(&self, identity: &IdentityRecord) {
        match serde_json::to_string(identity) {
            Ok(raw) => self.store.set(USER_KEY, raw),
            Err(e) => tracing::error!(error = %e, "Failed to serialize identity record"),
        }
    }

    /// Admin bearer token; empty strings count as absent
    pub fn admin_token(&self) -> Option<String> {
        self.store
            .get(ADMIN_JWT_KEY)
            .filter(|token| !token.is_empty())
    }

    pub fn has_admin_token(&self) -> bool {
        self.admin_token().is_some()
    }

    pub fn admin_profile(&self) -> Option<AdminProfile> {
        let raw = self.store.get(ADMIN_USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn save_admin(&self, token: &str, profile: &AdminProfile) {
        self.store.set(ADMIN_JWT_KEY, token.to_string());
        match serde_json::to_string(profile) {
            Ok(raw) => self.store.set(ADMIN_USER_KEY, raw),
            Err(e) => tracing::error!(error = %e, "Failed to serialize admin profile"),
        }
    }

    /// Drop the admin token and its profile
    pub fn purge_admin(&self) {
        self.store.remove(ADMIN_JWT_KEY);
        self.store.remove(ADMIN_USER_KEY);
    }

    /// Drop everything a logout clears
    pub fn clear_session(&self) {
        self.store.remove(USER_KEY);
        self.purge_admin();
    }

    /// Failed admin login attempts and lock deadline
    pub fn lockout_state(&self) -> LockoutState {
        let attempts = self
            .store
            .get(LOGIN_ATTEMPTS_KEY)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0);
        let locked_until_ms = self
            .store
            .get(LOGIN_LOCKOUT_KEY)
            .and_then(|raw| raw.trim().parse().ok());

        LockoutState {
            attempts,
            locked_until_ms,
        }
    }

    pub fn save_lockout_state(&self, state: &LockoutState) {
        self.store
            .set(LOGIN_ATTEMPTS_KEY, state.attempts.to_string());
        match state.locked_until_ms {
            Some(until) => self.store.set(LOGIN_LOCKOUT_KEY, until.to_string()),
            None => self.store.remove(LOGIN_LOCKOUT_KEY),
        }
    }

    /// Remove the lock deadline only
    pub fn clear_lock_deadline(&self) {
        self.store.remove(LOGIN_LOCKOUT_KEY);
    }

    /// Remove attempt count and lock deadline
    pub fn clear_lockout(&self) {
        self.store.remove(LOGIN_ATTEMPTS_KEY);
        self.store.remove(LOGIN_LOCKOUT_KEY);
    }

    /// Raw value access for diagnostics and tests
    pub fn raw(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }
}
