//! Post domain service implementing the post API driving ports.
//!
//! Ownership is checked in two steps: the owner is read to produce the exact
//! not-found/unauthorized outcome, then the mutation is issued conditionally
//! on `(id, owner)`. A zero-row write means the post vanished in between and
//! is reported as not found.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    IdentityResolver, PostRepository, PostRepositoryError, PostsCommand, PostsQuery,
};
use crate::domain::{Email, Error, Post, PostDraft, PostId, PostListing, UserId};

const POST_NOT_FOUND: &str = "Post not found";

/// Post service backed by a [`PostRepository`].
#[derive(Clone)]
pub struct PostService<P: ?Sized> {
    posts: Arc<P>,
    identity: Arc<dyn IdentityResolver>,
    clock: Arc<dyn Clock>,
}

impl<P: ?Sized> PostService<P> {
    pub fn new(posts: Arc<P>, identity: Arc<dyn IdentityResolver>, clock: Arc<dyn Clock>) -> Self {
        Self {
            posts,
            identity,
            clock,
        }
    }
}

fn map_post_error(error: PostRepositoryError) -> Error {
    match error {
        PostRepositoryError::Connection { message } => {
            Error::internal(format!("post repository unavailable: {message}"))
        }
        PostRepositoryError::Query { message } => Error::internal(message),
    }
}

impl<P> PostService<P>
where
    P: PostRepository + ?Sized,
{
    async fn ensure_owner(&self, caller: &UserId, id: &PostId) -> Result<(), Error> {
        let owner = self
            .posts
            .find_owner(id)
            .await
            .map_err(map_post_error)?
            .ok_or_else(|| Error::not_found(POST_NOT_FOUND))?;
        if &owner != caller {
            return Err(Error::forbidden("Unauthorized"));
        }
        Ok(())
    }
}

#[async_trait]
impl<P> PostsQuery for PostService<P>
where
    P: PostRepository + ?Sized,
{
    async fn list_posts(&self, session: Option<&Email>) -> Result<PostListing, Error> {
        let posts = self.posts.list_all().await.map_err(map_post_error)?;
        let logged_in_user_id = self.identity.resolve(session).await?;
        Ok(PostListing {
            posts,
            logged_in_user_id,
        })
    }
}

#[async_trait]
impl<P> PostsCommand for PostService<P>
where
    P: PostRepository + ?Sized,
{
    async fn create_post(&self, caller: &UserId, draft: PostDraft) -> Result<Post, Error> {
        let post = Post::create(PostId::random(), *caller, draft, self.clock.utc());
        self.posts.insert(&post).await.map_err(map_post_error)?;
        info!(post_id = %post.id(), user_id = %caller, "post created");
        Ok(post)
    }

    async fn update_post(
        &self,
        caller: &UserId,
        id: &PostId,
        draft: PostDraft,
    ) -> Result<Post, Error> {
        self.ensure_owner(caller, id).await?;
        self.posts
            .update_owned(id, caller, &draft)
            .await
            .map_err(map_post_error)?
            .ok_or_else(|| Error::not_found(POST_NOT_FOUND))
    }

    async fn delete_post(&self, caller: &UserId, id: &PostId) -> Result<(), Error> {
        self.ensure_owner(caller, id).await?;
        let deleted = self
            .posts
            .delete_owned(id, caller)
            .await
            .map_err(map_post_error)?;
        if !deleted {
            return Err(Error::not_found(POST_NOT_FOUND));
        }
        info!(post_id = %id, user_id = %caller, "post deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
