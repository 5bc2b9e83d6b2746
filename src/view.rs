//! Text rendering of an `AuthState` snapshot.
//!
//! SYSTEM CONTEXT
//! ==============
//! Front ends are passive consumers: they render whatever snapshot they
//! observe and forward user input as `login`/`logout` commands. This module
//! holds the rendering rules so every front end shows the same content.

use crate::state::AuthState;

pub const LOGGED_IN_HEADING: &str = "Authentication Success!";
pub const LOGIN_HEADING: &str = "MySQL Login System";
pub const USERNAME_HINT: &str = "Username (Try: user)";
pub const PASSWORD_HINT: &str = "Password (Try: pass123)";
pub const LOADING_OVERLAY: &str = "Signing in...";

/// Whether the login action should accept input for this snapshot.
#[must_use]
pub fn login_enabled(state: &AuthState) -> bool {
    !state.is_authenticated && !state.is_loading
}

/// Render a snapshot as display lines.
#[must_use]
pub fn render(state: &AuthState) -> Vec<String> {
    let mut lines = Vec::new();

    if state.is_authenticated {
        lines.push(LOGGED_IN_HEADING.to_owned());
        lines.push(format!("Welcome, {}", state.name));
        lines.push(format!("User ID: {}", state.user_id));
        lines.push(format!("Email: {}", state.email));
        lines.push("Type `logout` to sign out.".to_owned());
    } else {
        lines.push(LOGIN_HEADING.to_owned());
        lines.push(format!("Status: {}", state.user_id));
        if let Some(message) = &state.error_message {
            lines.push(format!("Error: {message}"));
        }
        if login_enabled(state) {
            lines.push(USERNAME_HINT.to_owned());
            lines.push(PASSWORD_HINT.to_owned());
            lines.push("Type `login <username> <password>` to sign in.".to_owned());
        }
    }

    if state.is_loading {
        lines.push(LOADING_OVERLAY.to_owned());
    }
    lines
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
