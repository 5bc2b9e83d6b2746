//! Authentication state snapshot.
//!
//! DESIGN
//! ======
//! `AuthState` is a plain value. The controller replaces it wholesale on
//! every transition and observers only ever hold clones, so a reader never
//! sees a half-applied change. The helpers below build the canonical
//! snapshots so status strings live in exactly one place.

use serde::{Deserialize, Serialize};

// =============================================================================
// STATUS STRINGS
// =============================================================================

pub const NOT_LOGGED_IN: &str = "Not logged in";
pub const LOGIN_FAILED: &str = "Login Failed";
pub const ERROR_USER_ID: &str = "Error";
pub const LOGGED_OUT: &str = "Logged out";

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password.";
pub const NETWORK_ERROR_MESSAGE: &str = "Login failed due to a network error.";

// =============================================================================
// AUTH STATE
// =============================================================================

/// Snapshot of the current authentication status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    /// True iff the last completed attempt succeeded.
    pub is_authenticated: bool,
    /// Opaque user identifier, or a status string when not authenticated.
    pub user_id: String,
    /// Display name; empty unless authenticated.
    pub name: String,
    /// Display email; empty unless authenticated.
    pub email: String,
    /// True while an attempt is in flight.
    pub is_loading: bool,
    /// Present iff the last attempt failed or faulted.
    pub error_message: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            is_authenticated: false,
            user_id: NOT_LOGGED_IN.to_owned(),
            name: String::new(),
            email: String::new(),
            is_loading: false,
            error_message: None,
        }
    }
}

/// Coarse phase of the login state machine, derived from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Idle,
    Loading,
    Authenticated,
    Failed,
}

impl AuthState {
    /// Snapshot for a successful credential check.
    #[must_use]
    pub fn authenticated(user_id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            user_id: user_id.into(),
            name: name.into(),
            email: email.into(),
            is_loading: false,
            error_message: None,
        }
    }

    /// Snapshot for a rejected username/password pair.
    #[must_use]
    pub fn login_failed() -> Self {
        Self {
            user_id: LOGIN_FAILED.to_owned(),
            error_message: Some(INVALID_CREDENTIALS_MESSAGE.to_owned()),
            ..Self::default()
        }
    }

    /// Snapshot for a fault surfaced by the session service.
    #[must_use]
    pub fn network_error() -> Self {
        Self {
            user_id: ERROR_USER_ID.to_owned(),
            error_message: Some(NETWORK_ERROR_MESSAGE.to_owned()),
            ..Self::default()
        }
    }

    /// Snapshot after an explicit logout.
    #[must_use]
    pub fn logged_out() -> Self {
        Self { user_id: LOGGED_OUT.to_owned(), ..Self::default() }
    }

    /// Copy of `self` marked as having an attempt in flight. Identity fields
    /// are carried over untouched.
    #[must_use]
    pub fn begin_attempt(&self) -> Self {
        Self { is_loading: true, error_message: None, ..self.clone() }
    }

    /// Resolved copy: the loading flag is always cleared.
    #[must_use]
    pub fn settled(self) -> Self {
        Self { is_loading: false, ..self }
    }

    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        if self.is_loading {
            AuthPhase::Loading
        } else if self.is_authenticated {
            AuthPhase::Authenticated
        } else if self.error_message.is_some() {
            AuthPhase::Failed
        } else {
            AuthPhase::Idle
        }
    }

    /// Authenticated implies not loading and no error; loading implies no error.
    #[must_use]
    pub fn upholds_invariants(&self) -> bool {
        let authenticated_ok = !self.is_authenticated || (self.error_message.is_none() && !self.is_loading);
        let loading_ok = !self.is_loading || self.error_message.is_none();
        authenticated_ok && loading_ok
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
