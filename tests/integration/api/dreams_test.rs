//! Dream API integration tests
//!
//! Create, read, update, delete, like and comment, including the ownership
//! and privacy rules.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::assert_api_error;
use crate::common::{create_dream, create_test_server, dream_body, register_unique_user, register_user};

#[tokio::test]
async fn test_create_dream() {
    let server = create_test_server();
    let luna = register_user(&server, "Luna", "luna@example.com").await;

    let response = server
        .post("/api/dreams")
        .authorization_bearer(&luna.token)
        .json(&json!({
            "title": "  Flying  ",
            "content": "I dreamt of flying over mountains today",
            "privacyLevel": "public",
            "mood": "exciting",
            "tags": ["flying", " mountains ", "", "flying"],
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let dream: serde_json::Value = response.json();
    assert_eq!(dream["title"], "Flying");
    assert_eq!(dream["privacyLevel"], "public");
    assert_eq!(dream["mood"], "exciting");
    assert_eq!(dream["tags"], json!(["flying", "mountains"]));
    assert_eq!(dream["likes"], json!([]));
    assert_eq!(dream["comments"], json!([]));
    assert_eq!(dream["owner"]["name"], "Luna");
    assert_eq!(dream["owner"]["id"], luna.id.to_string());
    assert!(dream.get("ownerId").is_none());
}

#[tokio::test]
async fn test_create_dream_defaults_to_private() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;

    let dream = create_dream(
        &server,
        &luna,
        json!({"title": "Quiet", "content": "A quiet little dream", "mood": "peaceful"}),
    )
    .await;

    assert_eq!(dream["privacyLevel"], "private");
    assert_eq!(dream["tags"], json!([]));
}

#[tokio::test]
async fn test_create_dream_content_boundary() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;

    let nine = server
        .post("/api/dreams")
        .authorization_bearer(&luna.token)
        .json(&json!({"title": "Short", "content": "123456789", "mood": "sad"}))
        .await;
    let error = assert_api_error!(nine, StatusCode::BAD_REQUEST);
    assert_eq!(error["field"], "content");

    let ten = server
        .post("/api/dreams")
        .authorization_bearer(&luna.token)
        .json(&json!({"title": "Short", "content": "1234567890", "mood": "sad"}))
        .await;
    assert_eq!(ten.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_dream_validation() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;

    let cases = [
        (json!({"title": " ", "content": "long enough text", "mood": "sad"}), "title"),
        (json!({"title": "T", "content": "long enough text"}), "mood"),
        (json!({"title": "T", "content": "long enough text", "mood": "ecstatic"}), "mood"),
        (
            json!({"title": "T", "content": "long enough text", "mood": "sad", "privacyLevel": "friends"}),
            "privacyLevel",
        ),
    ];

    for (body, field) in cases {
        let response = server
            .post("/api/dreams")
            .authorization_bearer(&luna.token)
            .json(&body)
            .await;
        let error = assert_api_error!(response, StatusCode::BAD_REQUEST);
        assert_eq!(error["field"], field, "body: {}", body);
    }
}

#[tokio::test]
async fn test_create_dream_requires_auth() {
    let server = create_test_server();

    let response = server
        .post("/api/dreams")
        .json(&dream_body("Flying", "public", "exciting", &[]))
        .await;

    assert_api_error!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dream_count_follows_create_and_delete() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;

    let first = create_dream(&server, &luna, dream_body("One", "public", "happy", &[])).await;
    create_dream(&server, &luna, dream_body("Two", "private", "sad", &[])).await;

    let me: serde_json::Value = server.get("/api/auth/me").authorization_bearer(&luna.token).await.json();
    assert_eq!(me["dreamCount"], 2);

    let id = first["id"].as_str().unwrap();
    let response = server
        .delete(&format!("/api/dreams/{}", id))
        .authorization_bearer(&luna.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Dream deleted successfully");

    let me: serde_json::Value = server.get("/api/auth/me").authorization_bearer(&luna.token).await.json();
    assert_eq!(me["dreamCount"], 1);
}

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;
    let dream = create_dream(&server, &luna, dream_body("Flying", "public", "exciting", &["flying"])).await;
    let id = dream["id"].as_str().unwrap();

    let response = server
        .put(&format!("/api/dreams/{}", id))
        .authorization_bearer(&luna.token)
        .json(&json!({
            "title": "Falling",
            "content": "Then I started falling slowly",
            "mood": "scary",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let updated: serde_json::Value = response.json();
    assert_eq!(updated["id"], dream["id"]);
    assert_eq!(updated["title"], "Falling");
    assert_eq!(updated["mood"], "scary");
    assert_eq!(updated["privacyLevel"], "private");
    assert_eq!(updated["tags"], json!([]));
    assert_eq!(updated["createdAt"], dream["createdAt"]);
    assert_eq!(updated["owner"]["id"], luna.id.to_string());
}

#[tokio::test]
async fn test_other_users_dream_looks_missing() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;
    let sol = register_unique_user(&server, "Sol").await;
    let dream = create_dream(&server, &luna, dream_body("Flying", "public", "exciting", &[])).await;
    let id = dream["id"].as_str().unwrap();
    let missing = Uuid::new_v4();

    let update_other = server
        .put(&format!("/api/dreams/{}", id))
        .authorization_bearer(&sol.token)
        .json(&dream_body("Mine now", "public", "happy", &[]))
        .await;
    let update_missing = server
        .put(&format!("/api/dreams/{}", missing))
        .authorization_bearer(&sol.token)
        .json(&dream_body("Mine now", "public", "happy", &[]))
        .await;
    let a = assert_api_error!(update_other, StatusCode::NOT_FOUND, "Dream not found");
    let b = assert_api_error!(update_missing, StatusCode::NOT_FOUND, "Dream not found");
    assert_eq!(a, b);

    let delete_other = server
        .delete(&format!("/api/dreams/{}", id))
        .authorization_bearer(&sol.token)
        .await;
    let delete_missing = server
        .delete(&format!("/api/dreams/{}", missing))
        .authorization_bearer(&sol.token)
        .await;
    let a = assert_api_error!(delete_other, StatusCode::NOT_FOUND, "Dream not found");
    let b = assert_api_error!(delete_missing, StatusCode::NOT_FOUND, "Dream not found");
    assert_eq!(a, b);

    // Still there, unchanged
    let fetched: serde_json::Value = server
        .get(&format!("/api/dreams/{}", id))
        .authorization_bearer(&luna.token)
        .await
        .json();
    assert_eq!(fetched["title"], "Flying");
}

#[tokio::test]
async fn test_malformed_id_is_not_found() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;

    for request in [
        server.get("/api/dreams/not-a-uuid"),
        server.delete("/api/dreams/not-a-uuid"),
        server.post("/api/dreams/not-a-uuid/like"),
    ] {
        let response = request.authorization_bearer(&luna.token).await;
        assert_api_error!(response, StatusCode::NOT_FOUND, "Dream not found");
    }
}

#[tokio::test]
async fn test_get_private_dream_only_for_owner() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;
    let sol = register_unique_user(&server, "Sol").await;
    let dream = create_dream(&server, &luna, dream_body("Secret", "private", "mysterious", &[])).await;
    let path = format!("/api/dreams/{}", dream["id"].as_str().unwrap());

    let owner_view = server.get(&path).authorization_bearer(&luna.token).await;
    assert_eq!(owner_view.status_code(), StatusCode::OK);

    let other_view = server.get(&path).authorization_bearer(&sol.token).await;
    assert_api_error!(other_view, StatusCode::NOT_FOUND, "Dream not found");
}

#[tokio::test]
async fn test_anonymous_dream_hides_owner_from_others() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;
    let sol = register_unique_user(&server, "Sol").await;
    let dream = create_dream(&server, &luna, dream_body("Masks", "anonymous", "anxious", &[])).await;
    assert_eq!(dream["owner"]["id"], luna.id.to_string());
    let path = format!("/api/dreams/{}", dream["id"].as_str().unwrap());

    let other_view: serde_json::Value = server.get(&path).authorization_bearer(&sol.token).await.json();
    assert!(other_view["owner"].is_null());

    let owner_view: serde_json::Value = server.get(&path).authorization_bearer(&luna.token).await.json();
    assert_eq!(owner_view["owner"]["name"], "Luna");
}

#[tokio::test]
async fn test_anonymous_owner_hidden_in_comments_and_likes() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;
    let sol = register_unique_user(&server, "Sol").await;
    let dream = create_dream(&server, &luna, dream_body("Masks", "anonymous", "anxious", &[])).await;
    let id = dream["id"].as_str().unwrap().to_string();

    server
        .post(&format!("/api/dreams/{}/like", id))
        .authorization_bearer(&luna.token)
        .await;
    let own_comment: serde_json::Value = server
        .post(&format!("/api/dreams/{}/comments", id))
        .authorization_bearer(&luna.token)
        .json(&json!({ "content": "it was me all along" }))
        .await
        .json();
    assert_eq!(own_comment["comments"][0]["author"]["id"], luna.id.to_string());
    server
        .post(&format!("/api/dreams/{}/comments", id))
        .authorization_bearer(&sol.token)
        .json(&json!({ "content": "who wrote this?" }))
        .await;

    let feed: serde_json::Value = server.get("/api/dreams/feed").await.json();
    let from_feed = feed
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["id"] == id.as_str())
        .cloned()
        .unwrap();
    let single: serde_json::Value = server
        .get(&format!("/api/dreams/{}", id))
        .authorization_bearer(&sol.token)
        .await
        .json();

    for view in [from_feed, single] {
        assert!(view["owner"].is_null());
        assert_eq!(view["likes"], json!([]));
        let comments = view["comments"].as_array().unwrap();
        assert_eq!(comments.len(), 2);
        assert_ne!(comments[0]["author"]["id"], luna.id.to_string());
        assert_eq!(comments[0]["author"]["name"], "Anonymous");
        assert_eq!(comments[1]["author"]["id"], sol.id.to_string());
        assert_eq!(comments[1]["author"]["name"], "Sol");
    }
}

#[tokio::test]
async fn test_like_toggles() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;
    let sol = register_unique_user(&server, "Sol").await;
    let dream = create_dream(&server, &luna, dream_body("Flying", "public", "exciting", &[])).await;
    let path = format!("/api/dreams/{}/like", dream["id"].as_str().unwrap());

    let liked: serde_json::Value = server.post(&path).authorization_bearer(&sol.token).await.json();
    assert_eq!(liked["likes"], json!([sol.id.to_string()]));

    let both: serde_json::Value = server.post(&path).authorization_bearer(&luna.token).await.json();
    assert_eq!(both["likes"].as_array().unwrap().len(), 2);

    let unliked: serde_json::Value = server.post(&path).authorization_bearer(&sol.token).await.json();
    assert_eq!(unliked["likes"], json!([luna.id.to_string()]));

    let missing = server
        .post(&format!("/api/dreams/{}/like", Uuid::new_v4()))
        .authorization_bearer(&sol.token)
        .await;
    assert_api_error!(missing, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comments_append_with_mentions() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;
    let sol = register_unique_user(&server, "Sol").await;
    let dream = create_dream(&server, &luna, dream_body("Flying", "public", "exciting", &[])).await;
    let path = format!("/api/dreams/{}/comments", dream["id"].as_str().unwrap());

    let response = server
        .post(&path)
        .authorization_bearer(&sol.token)
        .json(&json!({ "content": format!("Same here @[Luna]({})!", luna.id) }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let with_one: serde_json::Value = response.json();
    let comments = with_one["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["author"]["name"], "Sol");
    assert_eq!(comments[0]["mentions"], json!([luna.id.to_string()]));

    let stranger = Uuid::new_v4();
    let with_two: serde_json::Value = server
        .post(&path)
        .authorization_bearer(&luna.token)
        .json(&json!({ "content": "thanks", "mentions": [stranger] }))
        .await
        .json();
    let comments = with_two["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], format!("Same here @[Luna]({})!", luna.id));
    assert_eq!(comments[1]["content"], "thanks");
    assert_eq!(comments[1]["mentions"], json!([stranger.to_string()]));
}

#[tokio::test]
async fn test_empty_comment_rejected() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;
    let dream = create_dream(&server, &luna, dream_body("Flying", "public", "exciting", &[])).await;

    let response = server
        .post(&format!("/api/dreams/{}/comments", dream["id"].as_str().unwrap()))
        .authorization_bearer(&luna.token)
        .json(&json!({ "content": "   " }))
        .await;

    let error = assert_api_error!(response, StatusCode::BAD_REQUEST);
    assert_eq!(error["field"], "content");
}

#[tokio::test]
async fn test_user_dreams_listing() {
    let server = create_test_server();
    let luna = register_unique_user(&server, "Luna").await;
    let sol = register_unique_user(&server, "Sol").await;
    create_dream(&server, &luna, dream_body("Public", "public", "happy", &[])).await;
    create_dream(&server, &luna, dream_body("Private", "private", "sad", &[])).await;
    create_dream(&server, &luna, dream_body("Anonymous", "anonymous", "scary", &[])).await;
    let path = format!("/api/dreams/user/{}", luna.id);

    let titles = |body: serde_json::Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|d| d["title"].as_str().unwrap().to_string())
            .collect()
    };

    let own = server.get(&path).authorization_bearer(&luna.token).await.json();
    assert_eq!(titles(own), vec!["Anonymous", "Private", "Public"]);

    let own_private = server
        .get(&path)
        .add_query_param("privacyLevel", "private")
        .authorization_bearer(&luna.token)
        .await
        .json();
    assert_eq!(titles(own_private), vec!["Private"]);

    let others = server.get(&path).authorization_bearer(&sol.token).await.json();
    assert_eq!(titles(others), vec!["Public"]);

    let others_anonymous = server
        .get(&path)
        .add_query_param("privacyLevel", "anonymous")
        .authorization_bearer(&sol.token)
        .await
        .json();
    assert_eq!(titles(others_anonymous), Vec::<String>::new());
}
