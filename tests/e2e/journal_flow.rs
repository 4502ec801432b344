//! A complete journaling session: register, log in, post, get liked,
//! get commented on, delete.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{create_test_server, register_user, TEST_PASSWORD};

#[tokio::test]
async fn test_luna_journal_flow() {
    let server = create_test_server();

    // Register and log in
    register_user(&server, "Luna", "luna@example.com").await;
    let login: Value = server
        .post("/api/auth/login")
        .json(&json!({ "email": "luna@example.com", "password": TEST_PASSWORD }))
        .await
        .json();
    let luna_token = login["token"].as_str().expect("login token").to_string();
    let luna_id = login["user"]["id"].as_str().expect("user id").to_string();

    // Post a public dream
    let response = server
        .post("/api/dreams")
        .authorization_bearer(&luna_token)
        .json(&json!({
            "title": "Flying",
            "content": "I dreamt of flying over mountains today",
            "privacyLevel": "public",
            "mood": "exciting",
            "tags": ["flying"],
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let dream: Value = response.json();
    let dream_id = dream["id"].as_str().expect("dream id").to_string();

    // The feed shows it with Luna as owner
    let feed: Value = server.get("/api/dreams/feed").await.json();
    let entry = feed
        .as_array()
        .and_then(|dreams| dreams.iter().find(|d| d["id"] == dream_id.as_str()))
        .expect("dream in feed");
    assert_eq!(entry["owner"]["name"], "Luna");

    // A second user likes it
    let sol = register_user(&server, "Sol", "sol@example.com").await;
    let liked = server
        .post(&format!("/api/dreams/{}/like", dream_id))
        .authorization_bearer(&sol.token)
        .await;
    assert_eq!(liked.status_code(), StatusCode::OK);

    let fetched: Value = server
        .get(&format!("/api/dreams/{}", dream_id))
        .authorization_bearer(&luna_token)
        .await
        .json();
    assert_eq!(fetched["likes"].as_array().map(Vec::len), Some(1));

    // and comments, mentioning Luna
    let commented = server
        .post(&format!("/api/dreams/{}/comments", dream_id))
        .authorization_bearer(&sol.token)
        .json(&json!({ "content": format!("Wow @[Luna]({}) take me along", luna_id) }))
        .await;
    assert_eq!(commented.status_code(), StatusCode::CREATED);
    let commented: Value = commented.json();
    assert_eq!(commented["comments"][0]["mentions"], json!([luna_id]));

    // Luna finds Sol through search
    let found: Value = server
        .get("/api/users/search/sol")
        .authorization_bearer(&luna_token)
        .await
        .json();
    assert_eq!(found[0]["id"], sol.id.to_string());

    let before: Value = server.get("/api/auth/me").authorization_bearer(&luna_token).await.json();
    let count_before = before["dreamCount"].as_i64().expect("dream count");

    // Luna deletes it
    let deleted = server
        .delete(&format!("/api/dreams/{}", dream_id))
        .authorization_bearer(&luna_token)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::OK);

    let after: Value = server.get("/api/auth/me").authorization_bearer(&luna_token).await.json();
    assert_eq!(after["dreamCount"].as_i64(), Some(count_before - 1));

    let feed: Value = server.get("/api/dreams/feed").await.json();
    assert_eq!(feed, json!([]));

    let gone = server
        .get(&format!("/api/dreams/{}", dream_id))
        .authorization_bearer(&luna_token)
        .await;
    assert_eq!(gone.status_code(), StatusCode::NOT_FOUND);
}
