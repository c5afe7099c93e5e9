//! Port for post persistence.
//!
//! Mutations are conditional on ownership: adapters must apply updates and
//! deletes only to rows whose id *and* owner match, in a single statement.

use async_trait::async_trait;

use crate::domain::{Post, PostDraft, PostId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Every stored post, newest first.
    async fn list_all(&self) -> Result<Vec<Post>, PostRepositoryError>;

    /// Persist a newly created post.
    async fn insert(&self, post: &Post) -> Result<(), PostRepositoryError>;

    /// Owner of the post with `id`, or `None` when no such post exists.
    async fn find_owner(&self, id: &PostId) -> Result<Option<UserId>, PostRepositoryError>;

    /// Replace title and content of the post `id` owned by `owner`.
    ///
    /// Returns `None` when no row matched both id and owner.
    async fn update_owned(
        &self,
        id: &PostId,
        owner: &UserId,
        draft: &PostDraft,
    ) -> Result<Option<Post>, PostRepositoryError>;

    /// Hard-delete the post `id` owned by `owner`.
    ///
    /// Returns `false` when no row matched both id and owner.
    async fn delete_owned(&self, id: &PostId, owner: &UserId) -> Result<bool, PostRepositoryError>;
}
