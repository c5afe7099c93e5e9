//! Sign-in service: verify with the identity provider, then make sure a user
//! record exists for the verified email.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::identity_service::map_user_persistence_error;
use crate::domain::ports::{IdentityProvider, SignInCommand, UserPersistenceError, UserRepository};
use crate::domain::{Error, SignInCredentials, User, UserId};

/// Implements [`SignInCommand`] on top of the provider and user ports.
#[derive(Clone)]
pub struct SignInService<U: ?Sized> {
    provider: Arc<dyn IdentityProvider>,
    users: Arc<U>,
}

impl<U: ?Sized> SignInService<U> {
    pub fn new(provider: Arc<dyn IdentityProvider>, users: Arc<U>) -> Self {
        Self { provider, users }
    }
}

#[async_trait]
impl<U> SignInCommand for SignInService<U>
where
    U: UserRepository + ?Sized,
{
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<User, Error> {
        let identity = self.provider.verify(credentials).await?;

        if let Some(existing) = self
            .users
            .find_by_email(&identity.email)
            .await
            .map_err(map_user_persistence_error)?
        {
            return Ok(existing);
        }

        let user = User::new(
            UserId::random(),
            identity.email,
            identity.display_name,
            identity.avatar_url,
        );
        match self.users.insert(&user).await {
            Ok(()) => {
                info!(user_id = %user.id(), "user created on first sign-in");
                Ok(user)
            }
            // A concurrent first sign-in won the insert; use its record.
            Err(UserPersistenceError::DuplicateEmail { .. }) => self
                .users
                .find_by_email(user.email())
                .await
                .map_err(map_user_persistence_error)?
                .ok_or_else(|| Error::internal("user vanished after duplicate insert")),
            Err(err) => Err(map_user_persistence_error(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{FixtureIdentityProvider, MockUserRepository};
    use crate::domain::{DisplayName, Email, ErrorCode};
    use rstest::{fixture, rstest};

    #[fixture]
    fn ada_credentials() -> SignInCredentials {
        SignInCredentials::try_from_parts("ada@example.com", "password").expect("shape")
    }

    fn stored_ada() -> User {
        User::new(
            UserId::random(),
            Email::new("ada@example.com").expect("email"),
            DisplayName::new("Ada Lovelace").expect("name"),
            None,
        )
    }

    fn service(repo: MockUserRepository) -> SignInService<MockUserRepository> {
        SignInService::new(Arc::new(FixtureIdentityProvider), Arc::new(repo))
    }

    #[rstest]
    #[tokio::test]
    async fn first_sign_in_creates_user(ada_credentials: SignInCredentials) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(1).return_once(|_| Ok(None));
        repo.expect_insert()
            .withf(|user| user.email().as_ref() == "ada@example.com")
            .times(1)
            .return_once(|_| Ok(()));

        let user = service(repo)
            .sign_in(&ada_credentials)
            .await
            .expect("sign in");

        assert_eq!(user.display_name().as_ref(), "Ada Lovelace");
        assert!(user.avatar_url().is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn repeat_sign_in_reuses_record(ada_credentials: SignInCredentials) {
        let existing = stored_ada();
        let expected = *existing.id();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(move |_| Ok(Some(existing)));
        repo.expect_insert().times(0);

        let user = service(repo)
            .sign_in(&ada_credentials)
            .await
            .expect("sign in");

        assert_eq!(user.id(), &expected);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_insert_rereads_winner(ada_credentials: SignInCredentials) {
        let winner = stored_ada();
        let expected = *winner.id();
        let mut repo = MockUserRepository::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_find_by_email()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_| Err(UserPersistenceError::duplicate_email("ada@example.com")));
        repo.expect_find_by_email()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(move |_| Ok(Some(winner)));

        let user = service(repo)
            .sign_in(&ada_credentials)
            .await
            .expect("sign in");

        assert_eq!(user.id(), &expected);
    }

    #[tokio::test]
    async fn wrong_password_never_touches_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(0);
        repo.expect_insert().times(0);
        let creds = SignInCredentials::try_from_parts("ada@example.com", "nope").expect("shape");

        let err = service(repo).sign_in(&creds).await.expect_err("rejected");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "Invalid credentials");
    }
}
