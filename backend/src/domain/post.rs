//! Post data model.
//!
//! A post is a titled text record owned by exactly one user. The owner is set
//! at creation and never reassigned; only the title and content change.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use super::UserId;

/// Validation errors raised when building post drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostValidationError {
    /// Title was missing or empty.
    MissingTitle,
    /// Content was missing or empty.
    MissingContent,
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "title must not be empty"),
            Self::MissingContent => write!(f, "content must not be empty"),
        }
    }
}

impl std::error::Error for PostValidationError {}

/// System-generated post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(Uuid);

impl PostId {
    /// Parse a client-supplied identifier.
    ///
    /// Returns `None` for anything that is not a UUID; such a value cannot
    /// name an existing post.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    /// Wrap a UUID read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh identifier for a new post.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for PostId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// Validated title and content for a new or edited post.
///
/// ## Invariants
/// - Neither field is empty. Text is kept exactly as written, so a
///   whitespace-only title is still a title.
///
/// # Examples
/// ```
/// use blog_backend::domain::{PostDraft, PostValidationError};
///
/// let draft = PostDraft::new("Hello", "World").unwrap();
/// assert_eq!(draft.title(), "Hello");
/// assert_eq!(
///     PostDraft::new("", "World").unwrap_err(),
///     PostValidationError::MissingTitle
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    content: String,
}

impl PostDraft {
    /// Validate a title/content pair.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, PostValidationError> {
        let title = title.into();
        let content = content.into();
        if title.is_empty() {
            return Err(PostValidationError::MissingTitle);
        }
        if content.is_empty() {
            return Err(PostValidationError::MissingContent);
        }
        Ok(Self { title, content })
    }

    /// Build a draft from optional request fields.
    pub fn from_parts(
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Self, PostValidationError> {
        let title = title.ok_or(PostValidationError::MissingTitle)?;
        let content = content.ok_or(PostValidationError::MissingContent)?;
        Self::new(title, content)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A persisted post.
///
/// Serialises as `{id, title, content, userId, createdAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    id: PostId,
    title: String,
    content: String,
    user_id: UserId,
    created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `owner` from a validated draft.
    pub fn create(id: PostId, owner: UserId, draft: PostDraft, created_at: DateTime<Utc>) -> Self {
        let PostDraft { title, content } = draft;
        Self {
            id,
            title,
            content,
            user_id: owner,
            created_at,
        }
    }

    /// Rehydrate a post from storage, re-checking the draft invariants.
    pub fn restore(
        id: PostId,
        title: String,
        content: String,
        owner: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<Self, PostValidationError> {
        let draft = PostDraft::new(title, content)?;
        Ok(Self::create(id, owner, draft, created_at))
    }

    /// Return a copy with title and content replaced; id, owner and creation
    /// time are preserved.
    #[must_use]
    pub fn revised(&self, draft: &PostDraft) -> Self {
        Self {
            title: draft.title.clone(),
            content: draft.content.clone(),
            ..self.clone()
        }
    }

    pub fn id(&self) -> &PostId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Owner of the post; immutable after creation.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether `caller` owns this post.
    pub fn is_owned_by(&self, caller: &UserId) -> bool {
        &self.user_id == caller
    }
}

/// The list operation's result: every post plus the caller's identifier, so
/// clients can decide which posts they may edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListing {
    pub posts: Vec<Post>,
    pub logged_in_user_id: UserId,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    #[case(None, Some("World"), PostValidationError::MissingTitle)]
    #[case(Some(""), Some("World"), PostValidationError::MissingTitle)]
    #[case(Some("Hello"), None, PostValidationError::MissingContent)]
    #[case(Some("Hello"), Some(""), PostValidationError::MissingContent)]
    fn draft_rejects_missing_fields(
        #[case] title: Option<&str>,
        #[case] content: Option<&str>,
        #[case] expected: PostValidationError,
    ) {
        let err = PostDraft::from_parts(title.map(Into::into), content.map(Into::into))
            .expect_err("invalid draft");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("   ", "World")]
    #[case("Hello", " \n\t")]
    fn whitespace_only_fields_are_accepted(#[case] title: &str, #[case] content: &str) {
        let draft = PostDraft::new(title, content).expect("valid draft");
        assert_eq!(draft.title(), title);
        assert_eq!(draft.content(), content);
    }

    #[test]
    fn draft_keeps_text_as_written() {
        let draft = PostDraft::new("  Hello ", "World\n").expect("valid draft");
        assert_eq!(draft.title(), "  Hello ");
        assert_eq!(draft.content(), "World\n");
    }

    #[rstest]
    #[case("not-a-uuid", false)]
    #[case("", false)]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", true)]
    fn post_id_parse(#[case] raw: &str, #[case] valid: bool) {
        assert_eq!(PostId::parse(raw).is_some(), valid);
    }

    #[test]
    fn revised_preserves_owner_and_timestamp() {
        let owner = UserId::random();
        let post = Post::create(
            PostId::random(),
            owner,
            PostDraft::new("Hello", "World").expect("draft"),
            timestamp(),
        );
        let revised = post.revised(&PostDraft::new("Hi", "There").expect("draft"));

        assert_eq!(revised.id(), post.id());
        assert_eq!(revised.user_id(), &owner);
        assert_eq!(revised.created_at(), post.created_at());
        assert_eq!(revised.title(), "Hi");
        assert_eq!(revised.content(), "There");
    }

    #[test]
    fn ownership_check_compares_ids() {
        let owner = UserId::random();
        let post = Post::create(
            PostId::random(),
            owner,
            PostDraft::new("Hello", "World").expect("draft"),
            timestamp(),
        );
        assert!(post.is_owned_by(&owner));
        assert!(!post.is_owned_by(&UserId::random()));
    }

    #[test]
    fn post_serialises_public_shape() {
        let post_id = PostId::parse("11111111-1111-4111-8111-111111111111").expect("id");
        let owner = UserId::new("22222222-2222-4222-8222-222222222222").expect("owner");
        let post = Post::create(
            post_id,
            owner,
            PostDraft::new("Hello", "World").expect("draft"),
            timestamp(),
        );
        let value = serde_json::to_value(&post).expect("serialise post");
        assert_eq!(
            value,
            json!({
                "id": "11111111-1111-4111-8111-111111111111",
                "title": "Hello",
                "content": "World",
                "userId": "22222222-2222-4222-8222-222222222222",
                "createdAt": "2024-05-01T12:00:00Z",
            })
        );
    }
}
