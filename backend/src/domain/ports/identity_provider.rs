//! Driven port for the external identity provider.
//!
//! The OAuth handshake itself lives outside this service. Adapters hand the
//! presented credentials to the provider and return the identity it vouches
//! for. The fixture provider below stands in for development and tests.

use async_trait::async_trait;

use crate::domain::{DisplayName, Email, Error, SignInCredentials, VerifiedIdentity};

/// Port for verifying sign-in credentials with an identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials and return the provider-asserted identity.
    ///
    /// Unknown accounts and wrong secrets both fail with
    /// [`crate::domain::ErrorCode::Unauthorized`].
    async fn verify(&self, credentials: &SignInCredentials) -> Result<VerifiedIdentity, Error>;
}

const FIXTURE_PASSWORD: &str = "password";

/// Development accounts: `(email, display name, avatar)`.
const FIXTURE_ACCOUNTS: [(&str, &str, Option<&str>); 2] = [
    (
        "ada@example.com",
        "Ada Lovelace",
        Some("https://avatars.example.com/ada.png"),
    ),
    ("grace@example.com", "Grace Hopper", None),
];

/// In-memory provider with two fixed development accounts sharing the
/// password `password`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn verify(&self, credentials: &SignInCredentials) -> Result<VerifiedIdentity, Error> {
        let Ok(email) = Email::new(credentials.login()) else {
            return Err(Error::unauthorized("Invalid credentials"));
        };
        let account = FIXTURE_ACCOUNTS
            .iter()
            .find(|(address, _, _)| *address == email.as_ref());

        match account {
            Some((_, name, avatar)) if credentials.secret() == FIXTURE_PASSWORD => {
                let display_name = DisplayName::new(*name)
                    .map_err(|err| Error::internal(format!("invalid fixture display name: {err}")))?;
                Ok(VerifiedIdentity {
                    email,
                    display_name,
                    avatar_url: avatar.map(str::to_owned),
                })
            }
            _ => Err(Error::unauthorized("Invalid credentials")),
        }
    }
}
