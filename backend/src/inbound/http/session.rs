//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie holds only the email verified at sign-in. Handlers ask for it
//! as an optional identity and let the domain decide what "absent" means.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Email, Error};

pub(crate) const EMAIL_KEY: &str = "email";

/// Newtype wrapper that exposes identity-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the verified email and rotate the session id.
    pub fn persist_identity(&self, email: &Email) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(EMAIL_KEY, email.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The verified email, or `None` when the caller has no usable session.
    ///
    /// A cookie whose stored value no longer parses as an email is treated
    /// as absent.
    pub fn identity(&self) -> Result<Option<Email>, Error> {
        let raw = self
            .0
            .get::<String>(EMAIL_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| match Email::new(&value) {
            Ok(email) => Some(email),
            Err(error) => {
                tracing::warn!(%error, "invalid email in session cookie");
                None
            }
        }))
    }

    /// Drop every key and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
