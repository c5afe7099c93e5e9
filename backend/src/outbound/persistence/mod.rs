//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the user and post repository ports, backed by
//! `diesel-async` connections from a `bb8` pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Ownership rules live in the domain; the adapters only
//!   guarantee that conditional writes are single statements.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leak into the domain.
//! - **Strongly typed errors**: pool and Diesel failures are mapped into the
//!   port error enums.
//!
//! # Example
//!
//! ```ignore
//! use blog_backend::outbound::persistence::{DbPool, DieselPostRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/blog")).await?;
//! let posts = DieselPostRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_post_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
