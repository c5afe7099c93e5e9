//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod posts;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api` handler on `cfg`.
///
/// The caller provides `web::Data<HttpState>` and a session middleware.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(posts::list_posts)
            .service(posts::create_post)
            .service(posts::update_post)
            .service(posts::delete_post)
            .service(auth::sign_in)
            .service(auth::current_session)
            .service(auth::sign_out),
    );
}
