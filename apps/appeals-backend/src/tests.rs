use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::config::Config;
use crate::{AppState, build_router};

fn test_router() -> Router {
    build_router(AppState::new(Config::for_tests()))
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/admin_login")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "username": username, "password": password }).to_string(),
        ))
        .expect("request")
}

fn bearer_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, "Bearer auth_token")
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn login_accepts_the_fixed_admin_credentials() {
    let response = test_router()
        .oneshot(login_request("admin", "admin"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "token": "auth_token", "refreshToken": "refresh_token" })
    );
}

#[tokio::test]
async fn login_rejects_unknown_credentials() {
    let response = test_router()
        .oneshot(login_request("admin", "wrong"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn appeals_require_a_bearer_token() {
    let request = Request::builder()
        .uri("/api/appeals")
        .body(Body::empty())
        .expect("request");
    let response = test_router().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn wrong_bearer_token_is_unauthorized() {
    let request = Request::builder()
        .uri("/api/appeals")
        .header(AUTHORIZATION, "Bearer forged")
        .body(Body::empty())
        .expect("request");
    let response = test_router().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn appeals_list_returns_the_seeded_summaries() {
    let response = test_router()
        .oneshot(bearer_get("/api/appeals"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([
            { "id": 1, "title": "Something went wrong!" },
            { "id": 2, "title": "I got an error" },
            { "id": 3, "title": "An error occurred" },
        ])
    );
}

#[tokio::test]
async fn appeal_detail_includes_its_messages() {
    let response = test_router()
        .oneshot(bearer_get("/api/appeals/1"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "id": 1,
            "title": "Something went wrong!",
            "messages": [{ "text": "a message", "isAdmin": false }],
        })
    );
}

#[tokio::test]
async fn unknown_appeal_is_not_found() {
    let response = test_router()
        .oneshot(bearer_get("/api/appeals/99"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn add_message_appends_and_acknowledges_with_an_empty_string() {
    let router = test_router();

    let request = Request::builder()
        .method("POST")
        .uri("/api/appeals/1/add-message")
        .header(AUTHORIZATION, "Bearer auth_token")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "message": "message by admin", "isAdmin": true }).to_string(),
        ))
        .expect("request");
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!(""));

    let response = router
        .oneshot(bearer_get("/api/appeals/1"))
        .await
        .expect("response");
    let detail = body_json(response).await;
    assert_eq!(
        detail["messages"],
        json!([
            { "text": "a message", "isAdmin": false },
            { "text": "message by admin", "isAdmin": true },
        ])
    );
}

#[tokio::test]
async fn unmatched_routes_get_the_generic_not_found_body() {
    let response = test_router()
        .oneshot(bearer_get("/api/nothing-here"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "Not found" }));
}
