//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! driving ports, so they can be exercised without any I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    IdentityProvider, IdentityResolver, PostRepository, PostsCommand, PostsQuery, SignInCommand,
    UserRepository,
};
use crate::domain::{IdentityService, PostService, SignInService};

/// Parameter object bundling every port implementation the handlers use.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub identity: Arc<dyn IdentityResolver>,
    pub posts: Arc<dyn PostsCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub sign_in: Arc<dyn SignInCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identity: Arc<dyn IdentityResolver>,
    pub posts: Arc<dyn PostsCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub sign_in: Arc<dyn SignInCommand>,
}

impl HttpStatePorts {
    /// Wire the domain services on top of the given driven adapters.
    pub fn from_adapters(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        provider: Arc<dyn IdentityProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let identity: Arc<dyn IdentityResolver> = Arc::new(IdentityService::new(users.clone()));
        let post_service = Arc::new(PostService::new(posts, identity.clone(), clock));
        Self {
            identity,
            posts: post_service.clone(),
            posts_query: post_service,
            sign_in: Arc::new(SignInService::new(provider, users)),
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use blog_backend::domain::ports::FixtureIdentityProvider;
    /// use blog_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use blog_backend::outbound::memory::{InMemoryPostRepository, InMemoryUserRepository};
    /// use mockable::DefaultClock;
    ///
    /// let ports = HttpStatePorts::from_adapters(
    ///     Arc::new(InMemoryPostRepository::default()),
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(FixtureIdentityProvider),
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::new(ports);
    /// let _posts = state.posts.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            identity,
            posts,
            posts_query,
            sign_in,
        } = ports;
        Self {
            identity,
            posts,
            posts_query,
            sign_in,
        }
    }
}
