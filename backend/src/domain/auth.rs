//! Sign-in primitives: credentials presented to the identity provider and the
//! verified identity it hands back.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::{DisplayName, Email};

/// Domain error returned when sign-in payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for SignInValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for SignInValidationError {}

/// Credentials forwarded to the identity provider.
///
/// ## Invariants
/// - `login` is trimmed and non-empty; it is not yet a verified email.
/// - `secret` is non-empty, keeps caller whitespace, and is zeroized on drop.
///
/// # Examples
/// ```
/// use blog_backend::domain::SignInCredentials;
///
/// let creds = SignInCredentials::try_from_parts(" ada@example.com ", "password").unwrap();
/// assert_eq!(creds.login(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInCredentials {
    login: String,
    secret: Zeroizing<String>,
}

impl SignInCredentials {
    /// Construct credentials from raw request inputs.
    pub fn try_from_parts(login: &str, secret: &str) -> Result<Self, SignInValidationError> {
        let normalized = login.trim();
        if normalized.is_empty() {
            return Err(SignInValidationError::EmptyEmail);
        }
        if secret.is_empty() {
            return Err(SignInValidationError::EmptyPassword);
        }
        Ok(Self {
            login: normalized.to_owned(),
            secret: Zeroizing::new(secret.to_owned()),
        })
    }

    /// Login name as typed by the user.
    pub fn login(&self) -> &str {
        self.login.as_str()
    }

    /// Secret presented to the provider.
    pub fn secret(&self) -> &str {
        self.secret.as_str()
    }
}

/// Identity asserted by the provider after a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: Email,
    pub display_name: DisplayName,
    pub avatar_url: Option<String>,
}
