//! Tests for the posts HTTP handlers.

use super::*;
use crate::domain::Email;
use crate::domain::ports::FixtureIdentityProvider;
use crate::inbound::http::auth::sign_in;
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
use crate::outbound::memory::{InMemoryPostRepository, InMemoryUserRepository};
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

const UNKNOWN_ID: &str = "00000000-0000-0000-0000-000000000001";

async fn seed_session(session: SessionContext, email: web::Path<String>) -> ApiResult<HttpResponse> {
    let email = Email::new(email.into_inner()).map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_identity(&email)?;
    Ok(HttpResponse::NoContent().finish())
}

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let ports = HttpStatePorts::from_adapters(
        Arc::new(InMemoryPostRepository::default()),
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(FixtureIdentityProvider),
        Arc::new(DefaultClock),
    );
    App::new()
        .app_data(web::Data::new(HttpState::new(ports)))
        .wrap(test_session_middleware())
        .route("/test/session/{email}", web::post().to(seed_session))
        .service(
            web::scope("/api")
                .service(sign_in)
                .service(list_posts)
                .service(create_post)
                .service(update_post)
                .service(delete_post),
        )
}

async fn login_and_get_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    email: &str,
) -> Cookie<'static> {
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/auth/session")
            .set_json(json!({"email": email, "password": "password"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    session_cookie(&res).expect("session cookie")
}

async fn create_as(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    cookie: &Cookie<'static>,
    title: &str,
) -> Value {
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/posts")
            .cookie(cookie.clone())
            .set_json(json!({"title": title, "content": "Body"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    actix_test::read_body_json(res).await
}

async fn listed_posts(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    cookie: &Cookie<'static>,
) -> Value {
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::get()
            .uri("/api/posts")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let listing: Value = actix_test::read_body_json(res).await;
    listing["posts"].clone()
}

fn request_for(method: &str) -> actix_test::TestRequest {
    let request = match method {
        "GET" => actix_test::TestRequest::get(),
        "POST" => actix_test::TestRequest::post(),
        "PATCH" => actix_test::TestRequest::patch(),
        "DELETE" => actix_test::TestRequest::delete(),
        other => panic!("unsupported method {other}"),
    };
    request.uri("/api/posts")
}

#[rstest]
#[case("GET", "")]
#[case("POST", r#"{"title":"Hello","content":"World"}"#)]
#[case("PATCH", "{not json")]
#[case("DELETE", "")]
#[actix_web::test]
async fn every_method_requires_a_session(#[case] method: &str, #[case] body: &str) {
    let app = actix_test::init_service(test_app()).await;
    let res = actix_test::call_service(
        &app,
        request_for(method)
            .insert_header(("content-type", "application/json"))
            .set_payload(body.to_owned())
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({"error": "Unauthorized"}));
}

#[rstest]
#[case("GET")]
#[case("POST")]
#[case("PATCH")]
#[case("DELETE")]
#[actix_web::test]
async fn session_for_unknown_user_is_not_found(#[case] method: &str) {
    let app = actix_test::init_service(test_app()).await;
    let seeded = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/test/session/nobody@example.com")
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&seeded).expect("session cookie");

    let res = actix_test::call_service(
        &app,
        request_for(method)
            .cookie(cookie)
            .set_json(json!({"id": UNKNOWN_ID, "title": "t", "content": "c"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({"error": "User not found"}));
}

#[actix_web::test]
async fn create_then_list_round_trips() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_and_get_cookie(&app, "ada@example.com").await;

    let created = create_as(&app, &cookie, "Hello").await;
    assert_eq!(created["title"], "Hello");
    assert_eq!(created["content"], "Body");

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/posts")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let listing: Value = actix_test::read_body_json(res).await;
    assert_eq!(listing["loggedInUserId"], created["userId"]);
    assert_eq!(listing["posts"], json!([created]));
}

#[rstest]
#[case(r#"{"title":"Hello"}"#)]
#[case(r#"{"title":"","content":"World"}"#)]
#[case("")]
#[case("{not json")]
#[actix_web::test]
async fn create_requires_title_and_content(#[case] body: &str) {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_and_get_cookie(&app, "ada@example.com").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/posts")
            .cookie(cookie.clone())
            .insert_header(("content-type", "application/json"))
            .set_payload(body.to_owned())
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({"error": "Title and content are required"}));
    assert_eq!(listed_posts(&app, &cookie).await, json!([]));
}

#[actix_web::test]
async fn whitespace_only_title_is_accepted() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_and_get_cookie(&app, "ada@example.com").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/posts")
            .cookie(cookie.clone())
            .set_json(json!({"title": "   ", "content": "World"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(res).await;
    assert_eq!(created["title"], "   ");
    assert_eq!(listed_posts(&app, &cookie).await, json!([created]));
}

#[rstest]
#[case(|_: &Value| json!({"title": "t", "content": "c"}))]
#[case(|id: &Value| json!({"id": id, "content": "c"}))]
#[case(|id: &Value| json!({"id": id, "title": "t", "content": ""}))]
#[case(|_: &Value| json!({"id": "", "title": "t", "content": "c"}))]
#[actix_web::test]
async fn update_requires_every_field(#[case] body_for: fn(&Value) -> Value) {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_and_get_cookie(&app, "ada@example.com").await;
    let created = create_as(&app, &cookie, "Original").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri("/api/posts")
            .cookie(cookie.clone())
            .set_json(body_for(&created["id"]))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({"error": "ID, title, and content are required"}));
    assert_eq!(listed_posts(&app, &cookie).await, json!([created]));
}

#[actix_web::test]
async fn delete_requires_id() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_and_get_cookie(&app, "ada@example.com").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/posts")
            .cookie(cookie)
            .set_json(json!({}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({"error": "ID is required"}));
}

#[rstest]
#[case("PATCH", UNKNOWN_ID)]
#[case("PATCH", "not-a-uuid")]
#[case("DELETE", UNKNOWN_ID)]
#[case("DELETE", "not-a-uuid")]
#[actix_web::test]
async fn unknown_or_malformed_ids_are_not_found(#[case] method: &str, #[case] id: &str) {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_and_get_cookie(&app, "ada@example.com").await;

    let res = actix_test::call_service(
        &app,
        request_for(method)
            .cookie(cookie)
            .set_json(json!({"id": id, "title": "t", "content": "c"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({"error": "Post not found"}));
}

#[rstest]
#[case("PATCH")]
#[case("DELETE")]
#[actix_web::test]
async fn non_owner_is_rejected_and_post_is_untouched(#[case] method: &str) {
    let app = actix_test::init_service(test_app()).await;
    let ada = login_and_get_cookie(&app, "ada@example.com").await;
    let grace = login_and_get_cookie(&app, "grace@example.com").await;
    let created = create_as(&app, &ada, "Mine").await;

    let res = actix_test::call_service(
        &app,
        request_for(method)
            .cookie(grace)
            .set_json(json!({"id": created["id"], "title": "Theirs", "content": "x"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({"error": "Unauthorized"}));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/posts")
            .cookie(ada)
            .to_request(),
    )
    .await;
    let listing: Value = actix_test::read_body_json(res).await;
    assert_eq!(listing["posts"], json!([created]));
}

#[actix_web::test]
async fn owner_updates_then_deletes() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_and_get_cookie(&app, "ada@example.com").await;
    let created = create_as(&app, &cookie, "Draft").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri("/api/posts")
            .cookie(cookie.clone())
            .set_json(json!({"id": created["id"], "title": "Final", "content": "Done"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = actix_test::read_body_json(res).await;
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["title"], "Final");
    assert_eq!(updated["content"], "Done");
    assert_eq!(updated["userId"], created["userId"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/posts")
            .cookie(cookie.clone())
            .set_json(json!({"id": created["id"]}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({"message": "Post deleted"}));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/posts")
            .cookie(cookie)
            .set_json(json!({"id": created["id"]}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
