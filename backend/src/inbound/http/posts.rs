//! Posts API handlers.
//!
//! ```text
//! GET    /api/posts
//! POST   /api/posts   {"title":"Hello","content":"World"}
//! PATCH  /api/posts   {"id":"…","title":"Hello","content":"World"}
//! DELETE /api/posts   {"id":"…"}
//! ```
//!
//! Mutations resolve the caller before reading the body, then validate fields,
//! then let the domain enforce existence and ownership.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::Deserialize;

use crate::domain::{Error, Post, PostDraft, PostListing};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{ErrorBody, MessageBody};
use crate::inbound::http::schemas::{PostListingSchema, PostSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_json_body, post_id_or_not_found, present};

const CREATE_FIELDS_REQUIRED: &str = "Title and content are required";
const UPDATE_FIELDS_REQUIRED: &str = "ID, title, and content are required";
const DELETE_FIELDS_REQUIRED: &str = "ID is required";

/// Request body for `POST /api/posts`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct CreatePostRequest {
    #[schema(example = "Hello")]
    pub title: Option<String>,
    #[schema(example = "World")]
    pub content: Option<String>,
}

/// Request body for `PATCH /api/posts`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdatePostRequest {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Request body for `DELETE /api/posts`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct DeletePostRequest {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Option<String>,
}

fn draft_or(
    title: Option<String>,
    content: Option<String>,
    message: &'static str,
) -> Result<PostDraft, Error> {
    PostDraft::from_parts(present(title), present(content))
        .map_err(|_| Error::invalid_request(message))
}

/// List every post together with the caller's user id.
#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
        (status = 200, description = "All posts, newest first", body = PostListingSchema),
        (status = 401, description = "No session", body = ErrorBody),
        (status = 404, description = "Session user not found", body = ErrorBody),
        (status = 500, description = "Posts could not be fetched", body = ErrorBody)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<PostListing>> {
    let email = session.identity()?;
    let listing = state.posts_query.list_posts(email.as_ref()).await?;
    Ok(web::Json(listing))
}

/// Create a post owned by the caller.
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostSchema),
        (status = 400, description = "Missing title or content", body = ErrorBody),
        (status = 401, description = "No session", body = ErrorBody),
        (status = 404, description = "Session user not found", body = ErrorBody),
        (status = 500, description = "Post could not be stored", body = ErrorBody)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let email = session.identity()?;
    let caller = state.identity.resolve(email.as_ref()).await?;

    let request: CreatePostRequest =
        parse_json_body(&body).map_err(|_| Error::invalid_request(CREATE_FIELDS_REQUIRED))?;
    let draft = draft_or(request.title, request.content, CREATE_FIELDS_REQUIRED)?;

    let post = state.posts.create_post(&caller, draft).await?;
    Ok(HttpResponse::Created().json(post))
}

/// Replace the title and content of a post the caller owns.
#[utoipa::path(
    patch,
    path = "/api/posts",
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostSchema),
        (status = 400, description = "Missing id, title or content", body = ErrorBody),
        (status = 401, description = "No session, or caller is not the owner", body = ErrorBody),
        (status = 404, description = "Session user or post not found", body = ErrorBody),
        (status = 500, description = "Post could not be updated", body = ErrorBody)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[patch("/posts")]
pub async fn update_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> ApiResult<web::Json<Post>> {
    let email = session.identity()?;
    let caller = state.identity.resolve(email.as_ref()).await?;

    let request: UpdatePostRequest =
        parse_json_body(&body).map_err(|_| Error::invalid_request(UPDATE_FIELDS_REQUIRED))?;
    let raw_id = present(request.id);
    let draft = draft_or(request.title, request.content, UPDATE_FIELDS_REQUIRED);
    let (Some(raw_id), Ok(draft)) = (raw_id, draft) else {
        return Err(Error::invalid_request(UPDATE_FIELDS_REQUIRED));
    };
    let id = post_id_or_not_found(&raw_id)?;

    let post = state.posts.update_post(&caller, &id, draft).await?;
    Ok(web::Json(post))
}

/// Permanently delete a post the caller owns.
#[utoipa::path(
    delete,
    path = "/api/posts",
    request_body = DeletePostRequest,
    responses(
        (status = 200, description = "Post deleted", body = MessageBody),
        (status = 400, description = "Missing id", body = ErrorBody),
        (status = 401, description = "No session, or caller is not the owner", body = ErrorBody),
        (status = 404, description = "Session user or post not found", body = ErrorBody),
        (status = 500, description = "Post could not be deleted", body = ErrorBody)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> ApiResult<web::Json<MessageBody>> {
    let email = session.identity()?;
    let caller = state.identity.resolve(email.as_ref()).await?;

    let request: DeletePostRequest =
        parse_json_body(&body).map_err(|_| Error::invalid_request(DELETE_FIELDS_REQUIRED))?;
    let raw_id = present(request.id).ok_or_else(|| Error::invalid_request(DELETE_FIELDS_REQUIRED))?;
    let id = post_id_or_not_found(&raw_id)?;

    state.posts.delete_post(&caller, &id).await?;
    Ok(web::Json(MessageBody::new("Post deleted")))
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
