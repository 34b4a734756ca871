//! Word review API tests.
//!
//! These tests require a running PostgreSQL database.
//! Set the DATABASE_URL environment variable before running.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

use common::fixtures;
use common::TestContext;

const REVIEW_PATH: &str = "/api/words-review/";

/// Test every valid attempt is scheduled and reported with 200.
#[tokio::test]
#[ignore = "requires database"]
async fn test_review_all_succeed() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user().await;
    let list_id = ctx.create_words_list(user_id, "Verbs").await;
    let write = ctx.create_word(list_id, "write", "pisać").await;
    let speak = ctx.create_word(list_id, "speak", "mówić").await;

    let response = server
        .post(REVIEW_PATH)
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&json!({
            "flashcards": [fixtures::rated(write, 3)],
            "write_words": [fixtures::typed(speak, "speak")],
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert!(body[0]["next_review"].is_string());

    assert_eq!(ctx.review_state(write).await, (1, 1, Some(2.36)));
    assert_eq!(ctx.review_state(speak).await, (1, 1, Some(2.6)));

    // Cleanup
    ctx.cleanup_user(user_id).await;
}

/// Test a second review moves the word to a six day interval.
#[tokio::test]
#[ignore = "requires database"]
async fn test_review_twice_grows_interval() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user().await;
    let list_id = ctx.create_words_list(user_id, "Nouns").await;
    let word_id = ctx.create_word(list_id, "example", "przykład").await;

    for _ in 0..2 {
        server
            .post(REVIEW_PATH)
            .add_header(
                axum::http::header::AUTHORIZATION,
                TestContext::auth_header_value(&token),
            )
            .json(&fixtures::review_request("story", vec![fixtures::rated(word_id, 4)]))
            .await
            .assert_status_ok();
    }

    let (interval, repetitions, _) = ctx.review_state(word_id).await;
    assert_eq!(interval, 6);
    assert_eq!(repetitions, 2);

    // Cleanup
    ctx.cleanup_user(user_id).await;
}

/// Test mixed valid and invalid attempts return 207 with both lists.
#[tokio::test]
#[ignore = "requires database"]
async fn test_review_partial_success() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user().await;
    let list_id = ctx.create_words_list(user_id, "Mixed").await;
    let first = ctx.create_word(list_id, "house", "dom").await;
    let second = ctx.create_word(list_id, "tree", "drzewo").await;
    let third = ctx.create_word(list_id, "river", "rzeka").await;

    let response = server
        .post(REVIEW_PATH)
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&fixtures::review_request(
            "flashcards",
            vec![
                fixtures::rated(first, 3),
                fixtures::rated(second, 2),
                fixtures::rated(third, 4),
            ],
        ))
        .await;

    response.assert_status(StatusCode::MULTI_STATUS);
    let body: serde_json::Value = response.json();
    assert_eq!(body["reviewed"].as_array().unwrap().len(), 2);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert_eq!(body["errors"][0]["word_id"], third);

    // Cleanup
    ctx.cleanup_user(user_id).await;
}

/// Test other users' words are reported as not found and left untouched.
#[tokio::test]
#[ignore = "requires database"]
async fn test_review_foreign_word_fails() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (owner_id, _) = ctx.create_test_user().await;
    let (user_id, token) = ctx.create_test_user().await;
    let list_id = ctx.create_words_list(owner_id, "Private").await;
    let word_id = ctx.create_word(list_id, "secret", "sekret").await;

    let response = server
        .post(REVIEW_PATH)
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&fixtures::review_request("story", vec![fixtures::rated(word_id, 4)]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert!(body.get("reviewed").is_none());
    assert_eq!(ctx.review_state(word_id).await, (1, 0, None));

    // Cleanup
    ctx.cleanup_user(user_id).await;
    ctx.cleanup_user(owner_id).await;
}

/// Test an empty request is rejected as a whole.
#[tokio::test]
#[ignore = "requires database"]
async fn test_review_empty_request() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user().await;

    let response = server
        .post(REVIEW_PATH)
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "bad_request");

    // Cleanup
    ctx.cleanup_user(user_id).await;
}

/// Test review endpoint requires authentication.
#[tokio::test]
#[ignore = "requires database"]
async fn test_review_requires_auth() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .post(REVIEW_PATH)
        .json(&fixtures::review_request("flashcards", vec![fixtures::rated(1, 3)]))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
