//! Authentication test helpers
//!
//! Registers users through the public API so tests exercise the same path
//! a client does.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "moonlight42";

/// A registered user with a valid token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Register `name` with `email` and the shared test password
pub async fn register_user(server: &TestServer, name: &str, email: &str) -> TestUser {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "name": name,
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .await;
    assert_eq!(
        response.status_code(),
        StatusCode::CREATED,
        "registration failed: {}",
        response.text()
    );

    let body: serde_json::Value = response.json();
    let id = body["user"]["id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("user id in registration response");
    TestUser {
        id,
        name: name.to_string(),
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        token: body["token"].as_str().expect("token in response").to_string(),
    }
}

/// Register a user with a unique email
pub async fn register_unique_user(server: &TestServer, name: &str) -> TestUser {
    let email = format!("test_{}@example.com", Uuid::new_v4().simple());
    register_user(server, name, &email).await
}

/// A dream body accepted by create and update
pub fn dream_body(title: &str, privacy_level: &str, mood: &str, tags: &[&str]) -> serde_json::Value {
    json!({
        "title": title,
        "content": format!("{} was a vivid dream", title),
        "privacyLevel": privacy_level,
        "mood": mood,
        "tags": tags,
    })
}

/// Create a dream as `user` and return its JSON
pub async fn create_dream(server: &TestServer, user: &TestUser, body: serde_json::Value) -> serde_json::Value {
    let response = server
        .post("/api/dreams")
        .authorization_bearer(&user.token)
        .json(&body)
        .await;
    assert_eq!(
        response.status_code(),
        StatusCode::CREATED,
        "dream creation failed: {}",
        response.text()
    );
    response.json()
}
