//! Authenticated session store.
//!
//! The client-side mirror of the persisted browser store: current user,
//! bearer token, and the auto-lock preferences, saved as one JSON blob
//! under the `auth-storage` key of the local key-value store.

use serde::{Deserialize, Serialize};

use crate::api::User;
use crate::autolock::AutoLockConfig;
use crate::error::StorageError;
use crate::storage::Database;

/// Key under which the session blob is persisted.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";

/// Session mutations the auto-lock controller is allowed to perform.
pub trait SessionHandle {
    /// Clear authentication state. Must be idempotent.
    fn logout(&mut self);
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthSession {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
    /// Survives logout so the preference is kept across sessions.
    #[serde(default)]
    pub auto_lock: AutoLockConfig,
}

impl AuthSession {
    /// Load the persisted session, falling back to a fresh one when the
    /// key is absent or the stored blob no longer parses.
    pub fn load(db: &Database) -> Result<Self, StorageError> {
        match db.kv_get(AUTH_STORAGE_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json).unwrap_or_default()),
            None => Ok(Self::default()),
        }
    }

    /// Persist the session blob.
    pub fn save(&self, db: &Database) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        db.kv_set(AUTH_STORAGE_KEY, &json)?;
        Ok(())
    }

    pub fn login(&mut self, user: Option<User>, token: impl Into<String>) {
        self.user = user;
        self.token = Some(token.into());
        self.is_authenticated = true;
    }

    /// Re-derive the authentication flag from token presence.
    pub fn check_auth(&mut self) {
        self.is_authenticated = self.token.is_some();
    }

    pub fn update_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    pub fn update_auto_lock_settings(&mut self, enabled: bool, duration_minutes: u64) {
        self.auto_lock = AutoLockConfig {
            enabled,
            duration_minutes,
        };
    }
}

impl SessionHandle for AuthSession {
    fn logout(&mut self) {
        self.user = None;
        self.token = None;
        self.is_authenticated = false;
    }
}
