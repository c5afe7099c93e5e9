//! Driving ports for the post API.
//!
//! HTTP handlers depend on these traits rather than on repositories, so
//! handler tests can substitute doubles without wiring persistence.

use async_trait::async_trait;

use crate::domain::{Email, Error, Post, PostDraft, PostId, PostListing, UserId};

/// Read side of the post API.
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// Fetch every post, then resolve the caller from `session`.
    ///
    /// The posts are read first, so a storage failure surfaces even for
    /// callers without a session.
    async fn list_posts(&self, session: Option<&Email>) -> Result<PostListing, Error>;
}

/// Write side of the post API. Callers pass an already resolved `caller`.
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Create a post owned by `caller`.
    async fn create_post(&self, caller: &UserId, draft: PostDraft) -> Result<Post, Error>;

    /// Replace title and content of a post owned by `caller`.
    async fn update_post(
        &self,
        caller: &UserId,
        id: &PostId,
        draft: PostDraft,
    ) -> Result<Post, Error>;

    /// Permanently delete a post owned by `caller`.
    async fn delete_post(&self, caller: &UserId, id: &PostId) -> Result<(), Error>;
}
