//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`PostsQuery`, `PostsCommand`, `IdentityResolver`,
//! `SignInCommand`) are called by inbound adapters. Driven ports
//! (`PostRepository`, `UserRepository`, `IdentityProvider`) are implemented by
//! outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_provider;
mod identity_resolver;
mod post_repository;
mod posts;
mod sign_in_command;
mod user_repository;

pub use identity_provider::{FixtureIdentityProvider, IdentityProvider};
pub use identity_resolver::IdentityResolver;
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostRepository, PostRepositoryError};
pub use posts::{PostsCommand, PostsQuery};
pub use sign_in_command::SignInCommand;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
