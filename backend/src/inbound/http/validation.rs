//! Shared request-body helpers for inbound HTTP adapters.
//!
//! Handlers take the raw body and decode it only after the caller has been
//! identified, so unauthenticated requests are rejected before their payload
//! is looked at.

use serde::de::DeserializeOwned;

use crate::domain::{Error, PostId};

/// Decode a JSON request body. An empty body is read as `{}`.
pub(crate) fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body)
        .map_err(|err| Error::invalid_request(format!("Invalid JSON body: {err}")))
}

/// A required text field: absent and empty strings both count as missing.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// Resolve a client-supplied post id.
///
/// Text that is not a well-formed identifier cannot name a post, so it is
/// reported exactly like an unknown id.
pub(crate) fn post_id_or_not_found(raw: &str) -> Result<PostId, Error> {
    PostId::parse(raw).ok_or_else(|| Error::not_found("Post not found"))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq, Eq)]
    struct IdBody {
        id: Option<String>,
    }

    #[rstest]
    #[case(b"".as_slice(), None)]
    #[case(b"  \n".as_slice(), None)]
    #[case(br#"{"id":"abc"}"#.as_slice(), Some("abc"))]
    #[case(br#"{"id":"abc","extra":1}"#.as_slice(), Some("abc"))]
    fn decodes_bodies(#[case] body: &[u8], #[case] expected: Option<&str>) {
        let body: IdBody = parse_json_body(body).expect("decodes");
        assert_eq!(body.id.as_deref(), expected);
    }

    #[rstest]
    #[case(b"{".as_slice())]
    #[case(br#"{"id":5}"#.as_slice())]
    #[case(b"null".as_slice())]
    fn rejects_malformed_bodies(#[case] body: &[u8]) {
        let err = parse_json_body::<IdBody>(body).expect_err("malformed");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some(" "), Some(" "))]
    fn presence_ignores_empty_strings(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(present(raw.map(str::to_owned)).as_deref(), expected);
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    fn malformed_post_id_is_not_found(#[case] raw: &str) {
        let err = post_id_or_not_found(raw).expect_err("not found");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Post not found");
    }
}
