mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use common::{send, send_request, session_token, setup_test_app, test_jwt_config};
use serde_json::json;
use studentdesk_auth::create_session_token_at;
use studentdesk_config::JwtConfig;
use uuid::Uuid;

#[tokio::test]
async fn test_missing_authorization_header() {
    let (app, _) = setup_test_app();

    let (status, body) = send(&app, "GET", "/api/students", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");
}

#[tokio::test]
async fn test_non_bearer_scheme() {
    let (app, _) = setup_test_app();
    let request = Request::builder()
        .method("GET")
        .uri("/api/students")
        .header("authorization", "Basic YWRtaW46c2VjcmV0")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send_request(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid authorization header format");
}

#[tokio::test]
async fn test_expired_token() {
    let (app, _) = setup_test_app();
    let issued_two_hours_ago = Utc::now().timestamp() - 7200;
    let token =
        create_session_token_at(Uuid::new_v4(), issued_two_hours_ago, &test_jwt_config()).unwrap();

    let (status, body) = send(&app, "GET", "/api/students", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_token_signed_with_other_secret() {
    let (app, _) = setup_test_app();
    let other = JwtConfig {
        secret: "a-different-secret".to_string(),
        session_token_expiry: 3600,
    };
    let token = create_session_token_at(Uuid::new_v4(), Utc::now().timestamp(), &other).unwrap();

    let (status, body) = send(&app, "GET", "/api/students", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_garbage_token() {
    let (app, _) = setup_test_app();

    let (status, _) = send(&app, "GET", "/api/students", Some("abc.def.ghi"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_every_student_route_is_protected() {
    let (app, _) = setup_test_app();
    let id = Uuid::new_v4();
    let body = json!({"name": "Ann", "image": "http://x/a.png", "age": 20});

    let cases = [
        ("GET", "/api/students".to_string(), None),
        ("POST", "/api/students".to_string(), Some(body.clone())),
        ("GET", format!("/api/students/{id}"), None),
        ("PUT", format!("/api/students/{id}"), Some(body)),
        ("DELETE", format!("/api/students/{id}"), None),
    ];

    for (method, uri, body) in cases {
        let (status, _) = send(&app, method, &uri, None, body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
}

#[tokio::test]
async fn test_rejected_request_does_not_touch_store() {
    let (app, state) = setup_test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/students",
        Some("invalid"),
        Some(json!({"name": "Ann", "image": "http://x/a.png", "age": 20})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let stored = state.students.list(&Default::default()).await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_login_routes_are_public() {
    let (app, _) = setup_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"username": "x", "password": "y"})),
    )
    .await;

    // Rejected for bad credentials, not for a missing bearer token.
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn test_valid_token_is_accepted() {
    let (app, _) = setup_test_app();
    let token = session_token();

    let (status, _) = send(&app, "GET", "/api/students", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (app, _) = setup_test_app();

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/api/students").is_some());
    assert!(doc["paths"].get("/auth/google-login").is_some());
    assert!(doc["components"]["securitySchemes"].get("bearer_auth").is_some());
}
