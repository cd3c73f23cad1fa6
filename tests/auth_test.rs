//! Tests for the mock sign-in.

use std::time::Duration;

use kenny_games::{AuthError, AuthMode, AuthStub, Credentials, SIGN_IN_DELAY};

fn credentials(email: &str, name: &str) -> Credentials {
    Credentials::new(email.to_string(), "secret".to_string(), name.to_string())
}

#[test]
fn test_blank_email_rejected() {
    let mut auth = AuthStub::new();
    assert_eq!(auth.submit(credentials("", "")), Err(AuthError::EmptyEmail));
    assert_eq!(auth.submit(credentials("   ", "")), Err(AuthError::EmptyEmail));
    assert!(!auth.is_pending());
}

#[test]
fn test_user_arrives_after_delay() {
    let mut auth = AuthStub::new();
    auth.submit(credentials("kenny@example.com", "")).expect("valid");
    assert!(auth.is_pending());

    assert_eq!(auth.tick(SIGN_IN_DELAY - Duration::from_millis(1)), None);
    let user = auth.tick(Duration::from_millis(1)).expect("signed in");
    assert_eq!(user.id(), "1");
    assert_eq!(user.name(), "kenny");
    assert_eq!(user.email(), "kenny@example.com");
    assert!(!auth.is_pending());
    assert_eq!(auth.tick(SIGN_IN_DELAY), None);
}

#[test]
fn test_supplied_name_wins_over_email() {
    let mut auth = AuthStub::new();
    auth.toggle_mode();
    assert_eq!(auth.mode(), AuthMode::Signup);
    auth.submit(credentials("s@example.com", "  Sandy ")).expect("valid");
    let user = auth.tick(SIGN_IN_DELAY).expect("signed in");
    assert_eq!(user.name(), "Sandy");
}

#[test]
fn test_submit_while_pending_is_refused() {
    let mut auth = AuthStub::new();
    auth.submit(credentials("a@b.c", "")).expect("valid");
    assert_eq!(auth.submit(credentials("x@y.z", "")), Err(AuthError::Pending));
    let user = auth.tick(SIGN_IN_DELAY).expect("signed in");
    assert_eq!(user.email(), "a@b.c");
}

#[test]
fn test_cancel_drops_pending_sign_in() {
    let mut auth = AuthStub::new();
    auth.submit(credentials("a@b.c", "")).expect("valid");
    auth.cancel();
    assert_eq!(auth.tick(SIGN_IN_DELAY * 2), None);
}

#[test]
fn test_mode_toggles_back_and_forth() {
    assert_eq!(AuthMode::default(), AuthMode::Login);
    assert_eq!(AuthMode::Login.toggled(), AuthMode::Signup);
    assert_eq!(AuthMode::Signup.toggled(), AuthMode::Login);
    assert_eq!(AuthMode::Signup.to_string(), "Sign up");
}
