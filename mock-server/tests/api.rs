use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, Health, User};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- health ---

#[tokio::test]
async fn health_reports_healthy() {
    let resp = app().oneshot(empty_request("GET", "/health")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let health: Health = body_json(resp).await;
    assert_eq!(health.status, "Healthy");
}

// --- users ---

#[tokio::test]
async fn list_users_empty() {
    let resp = app().oneshot(empty_request("GET", "/users")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    assert!(users.is_empty());
}

#[tokio::test]
async fn create_user_returns_201() {
    let resp = app()
        .oneshot(json_request("POST", "/users", r#"{"name":"Ann"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: User = body_json(resp).await;
    assert_eq!(user.name, "Ann");
    assert!(user.email.is_none());
}

#[tokio::test]
async fn create_user_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/users", r#"{"not_name":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_user_not_found() {
    let resp = app()
        .oneshot(empty_request("GET", "/users/00000000-0000-0000-0000-000000000000"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_user_bad_uuid_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/users/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_user_not_found() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/users/00000000-0000-0000-0000-000000000000",
            r#"{"name":"Nope"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_user_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/users/00000000-0000-0000-0000-000000000000"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- echo ---

#[tokio::test]
async fn echo_reflects_method_query_headers_and_body() {
    let resp = app()
        .oneshot(json_request("PUT", "/echo?page=2&sort=name", r#"{"a":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PUT");
    assert_eq!(echo.query.get("page").map(String::as_str), Some("2"));
    assert_eq!(echo.query.get("sort").map(String::as_str), Some("name"));
    assert_eq!(
        echo.headers.get("content-type").map(String::as_str),
        Some("application/json")
    );
    assert_eq!(echo.body, serde_json::json!({"a": 1}));
}

#[tokio::test]
async fn echo_without_body_reports_null() {
    let resp = app().oneshot(empty_request("DELETE", "/echo")).await.unwrap();

    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "DELETE");
    assert!(echo.query.is_empty());
    assert!(echo.body.is_null());
}

// --- full lifecycle ---

#[tokio::test]
async fn user_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/users", r#"{"name":"Ann"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: User = body_json(resp).await;
    let id = created.id;

    // update — partial: only email
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/users/{id}"),
            r#"{"email":"ann@example.com"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: User = body_json(resp).await;
    assert_eq!(updated.name, "Ann"); // unchanged
    assert_eq!(updated.email.as_deref(), Some("ann@example.com"));

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/users/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: User = body_json(resp).await;
    assert_eq!(fetched.id, id);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/users/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // list after delete — empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/users"))
        .await
        .unwrap();
    let users: Vec<User> = body_json(resp).await;
    assert!(users.is_empty());
}
