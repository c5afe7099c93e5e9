//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities used by the API and persistence
//! layers, and the services that enforce post ownership. Types are immutable
//! once built; constructors validate their invariants.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure with a stable category.
//! - User, UserId, Email, DisplayName: identity as seen by the post core.
//! - Post, PostId, PostDraft, PostListing: the post aggregate and its inputs.
//! - SignInCredentials, VerifiedIdentity: identity provider exchange.
//! - IdentityService, PostService, SignInService: driving port implementations.

pub mod auth;
pub mod error;
pub mod identity_service;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod sign_in_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{SignInCredentials, SignInValidationError, VerifiedIdentity};
pub use self::error::{Error, ErrorCode};
pub use self::identity_service::IdentityService;
pub use self::post::{Post, PostDraft, PostId, PostListing, PostValidationError};
pub use self::post_service::PostService;
pub use self::sign_in_service::SignInService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DISPLAY_NAME_MAX, DisplayName, Email, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use blog_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("Unauthorized"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
