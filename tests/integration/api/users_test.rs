//! User API integration tests
//!
//! Profiles, profile updates and user search.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::assert_api_error;
use crate::common::{create_test_server, register_unique_user, register_user};

#[tokio::test]
async fn test_get_profile() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;
    let sol = register_unique_user(&server, "Sol").await;

    let response = server
        .get(&format!("/api/users/{}", luna.id))
        .authorization_bearer(&sol.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["name"], "Luna");
    assert_eq!(body["followersCount"], 0);
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_get_profile_not_found() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;

    for path in [format!("/api/users/{}", Uuid::new_v4()), "/api/users/nobody".to_string()] {
        let response = server.get(&path).authorization_bearer(&luna.token).await;
        assert_api_error!(response, StatusCode::NOT_FOUND, "User not found");
    }
}

#[tokio::test]
async fn test_get_profile_requires_auth() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;

    let response = server.get(&format!("/api/users/{}", luna.id)).await;

    assert_api_error!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile_is_partial() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;

    let response = server
        .put("/api/users/profile")
        .authorization_bearer(&luna.token)
        .json(&json!({ "bio": "I dream in colour", "location": "The Moon" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .put("/api/users/profile")
        .authorization_bearer(&luna.token)
        .json(&json!({ "website": "https://luna.example.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["name"], "Luna");
    assert_eq!(body["bio"], "I dream in colour");
    assert_eq!(body["location"], "The Moon");
    assert_eq!(body["website"], "https://luna.example.com");
}

#[tokio::test]
async fn test_update_profile_validation() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;

    let cases = [
        (json!({ "bio": "z".repeat(161) }), "bio"),
        (json!({ "location": "z".repeat(101) }), "location"),
        (json!({ "name": " L " }), "name"),
    ];
    for (body, field) in cases {
        let response = server
            .put("/api/users/profile")
            .authorization_bearer(&luna.token)
            .json(&body)
            .await;
        let error = assert_api_error!(response, StatusCode::BAD_REQUEST);
        assert_eq!(error["field"], field);
    }

    let boundary = server
        .put("/api/users/profile")
        .authorization_bearer(&luna.token)
        .json(&json!({ "bio": "z".repeat(160) }))
        .await;
    assert_eq!(boundary.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_profile_cannot_change_email() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;

    let response = server
        .put("/api/users/profile")
        .authorization_bearer(&luna.token)
        .json(&json!({ "email": "new@example.com" }))
        .await;

    assert_api_error!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_users() {
    let server = create_test_server();
    let luna = register_user(&server, "Luna Lovegood", "luna@hogwarts.example").await;
    register_user(&server, "Sol", "sol@sun.example").await;

    let by_name: Value = server
        .get("/api/users/search/LOVE")
        .authorization_bearer(&luna.token)
        .await
        .json();
    assert_eq!(by_name.as_array().map(Vec::len), Some(1));
    assert_eq!(by_name[0]["name"], "Luna Lovegood");
    assert!(by_name[0].get("email").is_none());

    let by_email: Value = server
        .get("/api/users/search/sun")
        .authorization_bearer(&luna.token)
        .await
        .json();
    assert_eq!(by_email[0]["name"], "Sol");

    let none: Value = server
        .get("/api/users/search/zzz")
        .authorization_bearer(&luna.token)
        .await
        .json();
    assert_eq!(none, json!([]));
}

#[tokio::test]
async fn test_search_users_is_capped() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Searcher").await;
    for i in 0..25 {
        register_unique_user(&server, &format!("Dreamer {}", i)).await;
    }

    let found: Value = server
        .get("/api/users/search/dreamer")
        .authorization_bearer(&luna.token)
        .await
        .json();

    assert_eq!(found.as_array().map(Vec::len), Some(20));
}
