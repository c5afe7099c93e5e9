//! Sign-in session handlers.
//!
//! ```text
//! POST   /api/auth/session {"email":"ada@example.com","password":"password"}
//! GET    /api/auth/session
//! DELETE /api/auth/session
//! ```

use actix_web::{delete, get, post, web};
use serde::Deserialize;

use crate::domain::{Error, SignInCredentials, SignInValidationError, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{ErrorBody, MessageBody};
use crate::inbound::http::schemas::UserSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_json_body;

/// Sign-in request body.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct SignInRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "password")]
    pub password: String,
}

impl TryFrom<SignInRequest> for SignInCredentials {
    type Error = SignInValidationError;

    fn try_from(value: SignInRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_sign_in_validation_error(err: SignInValidationError) -> Error {
    match err {
        SignInValidationError::EmptyEmail => Error::invalid_request("Email is required"),
        SignInValidationError::EmptyPassword => Error::invalid_request("Password is required"),
    }
}

/// Verify credentials with the identity provider and start a session.
#[utoipa::path(
    post,
    path = "/api/auth/session",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = UserSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Blank email or password", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "signIn",
    security([])
)]
#[post("/auth/session")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> ApiResult<web::Json<User>> {
    let request: SignInRequest = parse_json_body(&body)?;
    let credentials =
        SignInCredentials::try_from(request).map_err(map_sign_in_validation_error)?;
    let user = state.sign_in.sign_in(&credentials).await?;
    session.persist_identity(user.email())?;
    Ok(web::Json(user))
}

/// The signed-in user.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current user", body = UserSchema),
        (status = 401, description = "No session", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "currentSession"
)]
#[get("/auth/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let email = session.identity()?;
    let user = state.identity.current_user(email.as_ref()).await?;
    Ok(web::Json(user))
}

/// End the session. Succeeds whether or not one existed.
#[utoipa::path(
    delete,
    path = "/api/auth/session",
    responses((status = 200, description = "Signed out", body = MessageBody)),
    tags = ["auth"],
    operation_id = "signOut",
    security([])
)]
#[delete("/auth/session")]
pub async fn sign_out(session: SessionContext) -> web::Json<MessageBody> {
    session.clear();
    web::Json(MessageBody::new("Signed out"))
}
