//! In-process repositories used when no database is configured and in tests.
//!
//! State lives behind a `Mutex`; each port call holds the lock for the whole
//! operation, so conditional writes are atomic just like their SQL
//! counterparts.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    PostRepository, PostRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{Email, Post, PostDraft, PostId, User, UserId};

fn poisoned(store: &str) -> String {
    format!("{store} store lock poisoned")
}

/// User repository keyed by normalised email.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Email, User>>,
}

impl InMemoryUserRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Email, User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query(poisoned("user")))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.get(email).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.lock()?;
        if users.contains_key(user.email()) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        users.insert(user.email().clone(), user.clone());
        Ok(())
    }
}

/// Post repository backed by a map of post id to post.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<HashMap<PostId, Post>>,
}

impl InMemoryPostRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<PostId, Post>>, PostRepositoryError> {
        self.posts
            .lock()
            .map_err(|_| PostRepositoryError::query(poisoned("post")))
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let mut posts: Vec<Post> = self.lock()?.values().cloned().collect();
        posts.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().as_uuid().cmp(a.id().as_uuid()))
        });
        Ok(posts)
    }

    async fn insert(&self, post: &Post) -> Result<(), PostRepositoryError> {
        let mut posts = self.lock()?;
        if posts.contains_key(post.id()) {
            return Err(PostRepositoryError::query(format!(
                "post {} already exists",
                post.id()
            )));
        }
        posts.insert(*post.id(), post.clone());
        Ok(())
    }

    async fn find_owner(&self, id: &PostId) -> Result<Option<UserId>, PostRepositoryError> {
        Ok(self.lock()?.get(id).map(|post| *post.user_id()))
    }

    async fn update_owned(
        &self,
        id: &PostId,
        owner: &UserId,
        draft: &PostDraft,
    ) -> Result<Option<Post>, PostRepositoryError> {
        let mut posts = self.lock()?;
        let Some(post) = posts.get_mut(id).filter(|post| post.is_owned_by(owner)) else {
            return Ok(None);
        };
        *post = post.revised(draft);
        Ok(Some(post.clone()))
    }

    async fn delete_owned(&self, id: &PostId, owner: &UserId) -> Result<bool, PostRepositoryError> {
        let mut posts = self.lock()?;
        let owned = posts.get(id).is_some_and(|post| post.is_owned_by(owner));
        if owned {
            posts.remove(id);
        }
        Ok(owned)
    }
}
