//! Driving port that turns a session identity into a user identifier.
//!
//! Inbound adapters call this at the start of every ownership-sensitive
//! operation. The session layer only knows the verified email; this port
//! answers "which user is that?".

use async_trait::async_trait;

use crate::domain::{Email, Error, User, UserId};

/// Use-case port for resolving the caller.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve the session email to a user id.
    ///
    /// - `None` fails with `Unauthorized`.
    /// - An email with no user record fails with `NotFound`.
    async fn resolve(&self, session: Option<&Email>) -> Result<UserId, Error>;

    /// Resolve the session email to the full user record.
    async fn current_user(&self, session: Option<&Email>) -> Result<User, Error>;
}
