//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Users created on first sign-in.
    users (id) {
        id -> Uuid,
        /// Unique, stored lower-cased.
        email -> Varchar,
        display_name -> Varchar,
        avatar_url -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Posts; each row has exactly one owner.
    posts (id) {
        id -> Uuid,
        title -> Text,
        content -> Text,
        /// Owner, foreign key to `users.id`.
        user_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(posts -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(posts, users);
