//! Mock sign-in.
//!
//! Any email and password are accepted. After an artificial delay the stub
//! fabricates a [`User`]; nothing is checked or stored.

use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::games::timing::Delay;

/// Artificial sign-in latency.
pub const SIGN_IN_DELAY: Duration = Duration::from_millis(1000);

const STUB_USER_ID: &str = "1";

/// Signed-in identity, held by the shell until logout.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct User {
    id: String,
    name: String,
    email: String,
}

/// Which form the auth screen shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
pub enum AuthMode {
    /// Existing account.
    #[default]
    #[strum(to_string = "Log in")]
    Login,
    /// New account; also asks for a display name.
    #[strum(to_string = "Sign up")]
    Signup,
}

impl AuthMode {
    /// The other form.
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Signup,
            Self::Signup => Self::Login,
        }
    }
}

/// What the user typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, new, Getters)]
pub struct Credentials {
    email: String,
    password: String,
    name: String,
}

/// Reasons a submit is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum AuthError {
    /// The email field is blank.
    #[display("Email is required")]
    EmptyEmail,
    /// A sign-in is already in flight.
    #[display("Sign-in already in progress")]
    Pending,
}

/// Delayed fake authentication.
#[derive(Debug, Default)]
pub struct AuthStub {
    mode: AuthMode,
    pending: Option<(Delay, Credentials)>,
}

impl AuthStub {
    /// Stub showing the login form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current form.
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Switches between login and sign-up. Ignored while pending.
    #[instrument(skip(self))]
    pub fn toggle_mode(&mut self) {
        if !self.is_pending() {
            self.mode = self.mode.toggled();
            debug!(mode = %self.mode, "Auth mode toggled");
        }
    }

    /// Whether a sign-in is waiting on the delay.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a sign-in with `credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmptyEmail`] for a blank email and
    /// [`AuthError::Pending`] if a sign-in is already running.
    #[instrument(skip(self, credentials), fields(email = %credentials.email(), mode = %self.mode))]
    pub fn submit(&mut self, credentials: Credentials) -> Result<(), AuthError> {
        if self.is_pending() {
            return Err(AuthError::Pending);
        }
        if credentials.email().trim().is_empty() {
            return Err(AuthError::EmptyEmail);
        }
        debug!("Sign-in started");
        self.pending = Some((Delay::new(SIGN_IN_DELAY), credentials));
        Ok(())
    }

    /// Advances the artificial delay; yields the user once it completes.
    pub fn tick(&mut self, elapsed: Duration) -> Option<User> {
        let (delay, _) = self.pending.as_mut()?;
        delay.advance(elapsed)?;
        let (_, credentials) = self.pending.take()?;
        let user = fabricate_user(&credentials);
        info!(name = %user.name, "Signed in");
        Some(user)
    }

    /// Drops any pending sign-in.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Builds the identity for `credentials`.
///
/// The display name is the supplied name, or the local part of the email
/// when the name is blank.
#[instrument(skip(credentials), fields(email = %credentials.email()))]
pub fn fabricate_user(credentials: &Credentials) -> User {
    let email = credentials.email().trim().to_string();
    let name = match credentials.name().trim() {
        "" => email.split('@').next().unwrap_or_default().to_string(),
        name => name.to_string(),
    };
    User {
        id: STUB_USER_ID.to_string(),
        name,
        email,
    }
}
