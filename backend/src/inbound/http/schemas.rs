//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. These
//! wrappers mirror their serialised shape for the generated document only.

use utoipa::ToSchema;

/// Shape of [`crate::domain::Post`] on the wire.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
#[schema(rename_all = "camelCase")]
pub struct PostSchema {
    #[schema(value_type = String, format = Uuid, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Hello")]
    title: String,
    #[schema(example = "World")]
    content: String,
    /// Owner of the post.
    #[schema(value_type = String, format = Uuid)]
    user_id: String,
    #[schema(value_type = String, format = DateTime, example = "2024-05-01T12:00:00Z")]
    created_at: String,
}

/// Shape of [`crate::domain::PostListing`] on the wire.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
#[schema(rename_all = "camelCase")]
pub struct PostListingSchema {
    posts: Vec<PostSchema>,
    /// The caller's user id, for deciding which posts are editable.
    #[schema(value_type = String, format = Uuid)]
    logged_in_user_id: String,
}

/// Shape of [`crate::domain::User`] on the wire.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
#[schema(rename_all = "camelCase")]
pub struct UserSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(example = "Ada Lovelace")]
    display_name: String,
    avatar_url: Option<String>,
}
