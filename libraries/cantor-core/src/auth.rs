//! Identity-provider contract
//!
//! The rest of the application reads a reactive "current user" value to
//! gate views: `Some(AuthUser)` when signed in, `None` otherwise. The
//! provider itself (credential checking, token issuing) lives elsewhere;
//! this module only carries the user claim and the subscription plumbing.

use crate::types::UserId;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// The identity claim produced by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Stable user identifier
    pub uid: UserId,

    /// Sign-in email
    pub email: String,
}

impl AuthUser {
    /// Create an identity claim
    pub fn new(uid: UserId, email: impl Into<String>) -> Self {
        Self {
            uid,
            email: email.into(),
        }
    }
}

/// Reactive current-user state.
///
/// Holds `Option<AuthUser>` behind a watch channel; consumers subscribe and
/// re-check on every change. Sign-out publishes `None`.
#[derive(Debug)]
pub struct AuthState {
    tx: watch::Sender<Option<AuthUser>>,
}

impl AuthState {
    /// Create a signed-out auth state
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Publish a sign-in
    pub fn sign_in(&self, user: AuthUser) {
        // send_replace never fails; a channel with no receivers just holds
        // the latest value for future subscribers
        self.tx.send_replace(Some(user));
    }

    /// Publish a sign-out
    pub fn sign_out(&self) {
        self.tx.send_replace(None);
    }

    /// Current user, if signed in
    pub fn current_user(&self) -> Option<AuthUser> {
        self.tx.borrow().clone()
    }

    /// Subscribe to sign-in/sign-out changes
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.tx.subscribe()
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}
