//! Identity resolution backed by the user repository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{IdentityResolver, UserPersistenceError, UserRepository};
use crate::domain::{Email, Error, User, UserId};

/// Maps a session email onto the stored user record.
#[derive(Clone)]
pub struct IdentityService<U: ?Sized> {
    users: Arc<U>,
}

impl<U: ?Sized> IdentityService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

/// Translate user persistence failures into domain errors.
pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => {
            Error::internal(format!("unexpected duplicate user email: {email}"))
        }
    }
}

#[async_trait]
impl<U> IdentityResolver for IdentityService<U>
where
    U: UserRepository + ?Sized,
{
    async fn resolve(&self, session: Option<&Email>) -> Result<UserId, Error> {
        self.current_user(session).await.map(|user| *user.id())
    }

    async fn current_user(&self, session: Option<&Email>) -> Result<User, Error> {
        let email = session.ok_or_else(|| Error::unauthorized("Unauthorized"))?;
        self.users
            .find_by_email(email)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found("User not found"))
    }
}
