//! Session service — simulated remote credential check.
//!
//! DESIGN
//! ======
//! `SessionService` is the seam between the controller and whatever
//! verifies credentials. The bundled `SimulatedSessionService` stands in for
//! a backend: it waits a fixed latency and compares against one hardcoded
//! account. It never returns `Err`; the error path exists for real
//! transports and for fault injection in tests.
//!
//! TRADE-OFFS
//! ==========
//! The latency is a constant, not a knob. Tests run on Tokio's paused clock
//! instead of shortening it.

use std::time::Duration;

use tracing::debug;

use crate::state::AuthState;

/// Fixed delay before the simulated backend answers.
pub const SIMULATED_LATENCY: Duration = Duration::from_secs(2);

const VALID_USERNAME: &str = "user";
const VALID_CREDENTIAL: &str = "pass123";

const TEST_USER_ID: &str = "user_12345";
const TEST_USER_NAME: &str = "Mr. Test User";
const TEST_USER_EMAIL: &str = "user@mysql.com";

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("transport fault: {0}")]
    Transport(String),
}

// =============================================================================
// SERVICE TRAIT
// =============================================================================

/// Credential verification backend. Enables mocking in tests.
#[async_trait::async_trait]
pub trait SessionService: Send + Sync {
    /// Check a username/credential pair and produce the resulting snapshot.
    ///
    /// Rejected credentials are an `Ok` snapshot with an error message, not
    /// an `Err`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the check itself could not complete.
    async fn attempt_login(&self, username: &str, credential: &str) -> Result<AuthState, SessionError>;

    /// Drop any locally held session data. Never fails.
    fn clear_session(&self);
}

// =============================================================================
// SIMULATED BACKEND
// =============================================================================

/// In-process stand-in for a login backend with a single known account.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedSessionService;

impl SimulatedSessionService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

pub(crate) fn credentials_match(username: &str, credential: &str) -> bool {
    username == VALID_USERNAME && credential == VALID_CREDENTIAL
}

#[async_trait::async_trait]
impl SessionService for SimulatedSessionService {
    async fn attempt_login(&self, username: &str, credential: &str) -> Result<AuthState, SessionError> {
        tokio::time::sleep(SIMULATED_LATENCY).await;

        if credentials_match(username, credential) {
            debug!(%username, "login accepted");
            Ok(AuthState::authenticated(TEST_USER_ID, TEST_USER_NAME, TEST_USER_EMAIL))
        } else {
            debug!(%username, "login rejected");
            Ok(AuthState::login_failed())
        }
    }

    fn clear_session(&self) {
        // Nothing is stored locally yet.
        debug!("session cleared");
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
