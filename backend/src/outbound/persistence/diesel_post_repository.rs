//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Updates and deletes filter on both `id` and `user_id`, so a mutation can
//! never touch a post the caller does not own, even if ownership was checked
//! against a stale read.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{Post, PostDraft, PostId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPostRow, PostRevision, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::posts;

/// Diesel-backed implementation of the post repository port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostRepositoryError {
    map_basic_pool_error(error, PostRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    map_basic_diesel_error(
        error,
        PostRepositoryError::query,
        PostRepositoryError::connection,
    )
}

fn row_to_post(row: PostRow) -> Result<Post, PostRepositoryError> {
    let PostRow {
        id,
        title,
        content,
        user_id,
        created_at,
    } = row;
    Post::restore(
        PostId::from_uuid(id),
        title,
        content,
        UserId::from_uuid(user_id),
        created_at,
    )
    .map_err(|err| PostRepositoryError::query(format!("stored post {id} is invalid: {err}")))
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PostRow> = posts::table
            .order((posts::created_at.desc(), posts::id.desc()))
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_post).collect()
    }

    async fn insert(&self, post: &Post) -> Result<(), PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewPostRow {
            id: *post.id().as_uuid(),
            title: post.title(),
            content: post.content(),
            user_id: *post.user_id().as_uuid(),
            created_at: post.created_at(),
        };

        diesel::insert_into(posts::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_owner(&self, id: &PostId) -> Result<Option<UserId>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let owner = posts::table
            .filter(posts::id.eq(id.as_uuid()))
            .select(posts::user_id)
            .first::<uuid::Uuid>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(owner.map(UserId::from_uuid))
    }

    async fn update_owned(
        &self,
        id: &PostId,
        owner: &UserId,
        draft: &PostDraft,
    ) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let revision = PostRevision {
            title: draft.title(),
            content: draft.content(),
        };

        let row = diesel::update(
            posts::table
                .filter(posts::id.eq(id.as_uuid()))
                .filter(posts::user_id.eq(owner.as_uuid())),
        )
        .set(&revision)
        .returning(PostRow::as_returning())
        .get_result::<PostRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_post).transpose()
    }

    async fn delete_owned(&self, id: &PostId, owner: &UserId) -> Result<bool, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(
            posts::table
                .filter(posts::id.eq(id.as_uuid()))
                .filter(posts::user_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}
