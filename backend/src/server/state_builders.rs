//! Builders for the HTTP state from the configured storage.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use blog_backend::domain::ports::{FixtureIdentityProvider, PostRepository, UserRepository};
use blog_backend::inbound::http::state::{HttpState, HttpStatePorts};
use blog_backend::outbound::memory::{InMemoryPostRepository, InMemoryUserRepository};
use blog_backend::outbound::persistence::{DbPool, DieselPostRepository, DieselUserRepository};

/// Pick Diesel repositories when a pool is available, otherwise in-memory
/// stores that are lost on restart.
fn build_repositories(
    pool: Option<&DbPool>,
) -> (Arc<dyn PostRepository>, Arc<dyn UserRepository>) {
    match pool {
        Some(pool) => (
            Arc::new(DieselPostRepository::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
        ),
        None => {
            warn!("no database configured; posts are kept in memory");
            (
                Arc::new(InMemoryPostRepository::default()),
                Arc::new(InMemoryUserRepository::default()),
            )
        }
    }
}

/// Wire the domain services for the HTTP handlers.
pub(super) fn build_http_state(pool: Option<&DbPool>) -> web::Data<HttpState> {
    let (posts, users) = build_repositories(pool);
    let ports = HttpStatePorts::from_adapters(
        posts,
        users,
        Arc::new(FixtureIdentityProvider),
        Arc::new(DefaultClock),
    );
    web::Data::new(HttpState::new(ports))
}
