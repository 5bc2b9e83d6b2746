use super::*;

// =============================================================================
// constructors
// =============================================================================

#[test]
fn default_is_not_logged_in() {
    let state = AuthState::default();
    assert!(!state.is_authenticated);
    assert_eq!(state.user_id, NOT_LOGGED_IN);
    assert!(state.name.is_empty());
    assert!(state.email.is_empty());
    assert!(!state.is_loading);
    assert!(state.error_message.is_none());
    assert_eq!(state.phase(), AuthPhase::Idle);
}

#[test]
fn authenticated_carries_identity() {
    let state = AuthState::authenticated("u1", "Ada", "ada@example.com");
    assert!(state.is_authenticated);
    assert_eq!(state.user_id, "u1");
    assert_eq!(state.name, "Ada");
    assert_eq!(state.email, "ada@example.com");
    assert_eq!(state.phase(), AuthPhase::Authenticated);
    assert!(state.upholds_invariants());
}

#[test]
fn login_failed_has_message_and_empty_identity() {
    let state = AuthState::login_failed();
    assert!(!state.is_authenticated);
    assert_eq!(state.user_id, LOGIN_FAILED);
    assert_eq!(state.error_message.as_deref(), Some(INVALID_CREDENTIALS_MESSAGE));
    assert!(state.name.is_empty());
    assert!(state.email.is_empty());
    assert_eq!(state.phase(), AuthPhase::Failed);
}

#[test]
fn network_error_uses_error_user_id() {
    let state = AuthState::network_error();
    assert_eq!(state.user_id, ERROR_USER_ID);
    assert_eq!(state.error_message.as_deref(), Some(NETWORK_ERROR_MESSAGE));
    assert!(!state.is_loading);
    assert_eq!(state.phase(), AuthPhase::Failed);
}

#[test]
fn logged_out_is_default_except_user_id() {
    let state = AuthState::logged_out();
    assert_eq!(state, AuthState { user_id: LOGGED_OUT.to_owned(), ..AuthState::default() });
    assert_eq!(state.phase(), AuthPhase::Idle);
}

// =============================================================================
// transitions
// =============================================================================

#[test]
fn begin_attempt_clears_error_and_keeps_identity() {
    let failed = AuthState::login_failed();
    let loading = failed.begin_attempt();
    assert!(loading.is_loading);
    assert!(loading.error_message.is_none());
    assert_eq!(loading.user_id, LOGIN_FAILED);
    assert_eq!(loading.phase(), AuthPhase::Loading);
    assert!(loading.upholds_invariants());
}

#[test]
fn begin_attempt_leaves_source_snapshot_untouched() {
    let failed = AuthState::login_failed();
    let _ = failed.begin_attempt();
    assert!(!failed.is_loading);
    assert!(failed.error_message.is_some());
}

#[test]
fn settled_forces_loading_off() {
    let state = AuthState { is_loading: true, ..AuthState::authenticated("u", "n", "e") };
    let settled = state.settled();
    assert!(!settled.is_loading);
    assert!(settled.is_authenticated);
}

// =============================================================================
// invariants
// =============================================================================

#[test]
fn invariants_reject_authenticated_with_error() {
    let state = AuthState { error_message: Some("x".into()), ..AuthState::authenticated("u", "n", "e") };
    assert!(!state.upholds_invariants());
}

#[test]
fn invariants_reject_loading_with_error() {
    let state = AuthState { is_loading: true, error_message: Some("x".into()), ..AuthState::default() };
    assert!(!state.upholds_invariants());
}

#[test]
fn canonical_snapshots_uphold_invariants() {
    for state in [
        AuthState::default(),
        AuthState::login_failed(),
        AuthState::network_error(),
        AuthState::logged_out(),
        AuthState::default().begin_attempt(),
    ] {
        assert!(state.upholds_invariants(), "{state:?}");
    }
}

// =============================================================================
// serde
// =============================================================================

#[test]
fn serializes_with_camel_case_fields() {
    let json = serde_json::to_value(AuthState::login_failed()).unwrap();
    assert_eq!(json["isAuthenticated"], false);
    assert_eq!(json["userId"], LOGIN_FAILED);
    assert_eq!(json["isLoading"], false);
    assert_eq!(json["errorMessage"], INVALID_CREDENTIALS_MESSAGE);
}

#[test]
fn absent_error_serializes_as_null() {
    let json = serde_json::to_value(AuthState::default()).unwrap();
    assert!(json["errorMessage"].is_null());
}
