//! Driving port for the sign-in use-case.

use async_trait::async_trait;

use crate::domain::{Error, SignInCredentials, User};

/// Verify credentials and return the (possibly newly created) user.
#[async_trait]
pub trait SignInCommand: Send + Sync {
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<User, Error>;
}
