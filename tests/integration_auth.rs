mod common;

use axum::http::StatusCode;
use common::{TEST_PASSWORD, create_local_user, send, setup_test_app, test_jwt_config};
use serde_json::json;
use studentdesk_auth::testing::IdTokenBuilder;
use studentdesk_auth::verify_session_token;

#[tokio::test]
async fn test_local_login_success() {
    let (app, state) = setup_test_app();
    let user = create_local_user(&state, "registrar").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"username": "registrar", "password": TEST_PASSWORD})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();
    let claims = verify_session_token(token, &test_jwt_config()).unwrap();
    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn test_local_login_wrong_password() {
    let (app, state) = setup_test_app();
    create_local_user(&state, "registrar").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"username": "registrar", "password": "wrong"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn test_local_login_unknown_user_has_same_message() {
    let (app, _) = setup_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"username": "nobody", "password": TEST_PASSWORD})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn test_local_login_missing_field() {
    let (app, _) = setup_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"username": "registrar"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn test_local_login_empty_password() {
    let (app, _) = setup_test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"username": "registrar", "password": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_google_login_creates_user_once() {
    let (app, state) = setup_test_app();
    let id_token = IdTokenBuilder::new("google-sub-1")
        .name("Grace Hopper")
        .email("grace@example.com")
        .sign();

    let (status, first) = send(
        &app,
        "POST",
        "/auth/google-login",
        None,
        Some(json!({"token": id_token})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, second) = send(
        &app,
        "POST",
        "/auth/google-login",
        None,
        Some(json!({"token": id_token})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let jwt = test_jwt_config();
    let first_claims = verify_session_token(first["token"].as_str().unwrap(), &jwt).unwrap();
    let second_claims = verify_session_token(second["token"].as_str().unwrap(), &jwt).unwrap();
    assert_eq!(first_claims.sub, second_claims.sub);

    let user = state
        .users
        .find_by_google_id("google-sub-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.id.to_string(), first_claims.sub);
    assert_eq!(user.display_name, "Grace Hopper");
    assert_eq!(user.email, "grace@example.com");
}

#[tokio::test]
async fn test_concurrent_google_logins_share_one_user() {
    let (app, _) = setup_test_app();
    let id_token = IdTokenBuilder::new("google-sub-race").name("Racer").sign();

    let requests = (0..8).map(|_| {
        let app = app.clone();
        let id_token = id_token.clone();
        async move {
            send(
                &app,
                "POST",
                "/auth/google-login",
                None,
                Some(json!({"token": id_token})),
            )
            .await
        }
    });
    let responses = futures::future::join_all(requests).await;

    let jwt = test_jwt_config();
    let subjects: std::collections::HashSet<String> = responses
        .into_iter()
        .map(|(status, body)| {
            assert_eq!(status, StatusCode::OK);
            verify_session_token(body["token"].as_str().unwrap(), &jwt)
                .unwrap()
                .sub
        })
        .collect();
    assert_eq!(subjects.len(), 1);
}

#[tokio::test]
async fn test_google_login_rejects_wrong_audience() {
    let (app, _) = setup_test_app();
    let id_token = IdTokenBuilder::new("google-sub-2")
        .audience("someone-else.apps.googleusercontent.com")
        .sign();

    let (status, body) = send(
        &app,
        "POST",
        "/auth/google-login",
        None,
        Some(json!({"token": id_token})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Google authentication failed");
}

#[tokio::test]
async fn test_google_login_rejects_expired_token() {
    let (app, state) = setup_test_app();
    let id_token = IdTokenBuilder::new("google-sub-3").expired().sign();

    let (status, _) = send(
        &app,
        "POST",
        "/auth/google-login",
        None,
        Some(json!({"token": id_token})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(
        state
            .users
            .find_by_google_id("google-sub-3")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_google_login_rejects_garbage() {
    let (app, _) = setup_test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/auth/google-login",
        None,
        Some(json!({"token": "not-a-jwt"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_google_login_missing_token_field() {
    let (app, _) = setup_test_app();

    let (status, _) = send(&app, "POST", "/auth/google-login", None, Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_google_session_grants_student_access() {
    let (app, _) = setup_test_app();
    let id_token = IdTokenBuilder::new("google-sub-4").sign();

    let (_, body) = send(
        &app,
        "POST",
        "/auth/google-login",
        None,
        Some(json!({"token": id_token})),
    )
    .await;
    let session = body["token"].as_str().unwrap();

    let (status, students) = send(&app, "GET", "/api/students", Some(session), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(students, json!([]));
}
