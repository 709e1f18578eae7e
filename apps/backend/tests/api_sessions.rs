//! Review session API tests.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use common::fixtures;
use common::TestContext;
use vocab_core::ItemStatus;

fn expected_answer(prompt: &Value) -> &'static str {
    match prompt["text"].as_str().unwrap() {
        "dog" => "chien",
        "cat" => "chat",
        "bird" => "oiseau",
        "fish" => "poisson",
        other => panic!("unexpected prompt {other}"),
    }
}

async fn start(server: &TestServer, request: Value) -> Value {
    let response = server.post("/api/sessions").json(&request).await;
    response.assert_status_ok();
    response.json()
}

async fn respond(server: &TestServer, session_id: &Value, request: Value) -> Value {
    let response = server
        .post(&format!("/api/sessions/{}/respond", session_id.as_str().unwrap()))
        .json(&request)
        .await;
    response.assert_status_ok();
    response.json()
}

#[tokio::test]
async fn test_start_session_first_prompt() {
    let ctx = TestContext::with_items(&fixtures::seeded_items());
    let server = ctx.server();

    let body = start(&server, json!({"direction": "en2fr"})).await;

    assert_eq!(body["done"], false);
    assert!(body["step"].is_null());
    assert_eq!(body["prompt"]["direction"], "a_to_b");
    assert_eq!(body["prompt"]["target"], "French");
    let question = body["prompt"]["question"].as_str().unwrap();
    assert!(question.starts_with("Translate to French: "));
    // Validated items stay out of the default pool.
    assert_eq!(body["summary"]["remaining"], 3);
}

#[tokio::test]
async fn test_due_only_session_empty() {
    let items = vec![fixtures::item(1, "dog", "chien", ItemStatus::New, 3)];
    let ctx = TestContext::with_items(&items);
    let server = ctx.server();

    let body = start(&server, json!({"due_only": true})).await;

    assert_eq!(body["done"], true);
    assert!(body["prompt"].is_null());

    let response = server
        .post(&format!("/api/sessions/{}/respond", body["session_id"].as_str().unwrap()))
        .json(&json!({"answer": "chien"}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_correct_answers_finish_session() {
    let ctx = TestContext::with_items(&fixtures::seeded_items());
    let server = ctx.server();

    let mut body = start(&server, json!({"due_only": true, "direction": "a_to_b"})).await;
    let session_id = body["session_id"].clone();
    let mut graded = 0;

    while body["done"] == false {
        let answer = expected_answer(&body["prompt"]);
        body = respond(&server, &session_id, json!({"answer": answer})).await;
        assert_eq!(body["step"]["kind"], "graded");
        assert_eq!(body["step"]["correct"], true);
        graded += 1;
    }

    assert_eq!(graded, 2);
    assert_eq!(body["summary"]["correct"], 2);

    let saved = ctx.saved_items();
    assert_eq!(saved[0].repetitions, 1);
    assert_eq!(saved[0].interval, 1);
    assert_eq!(saved[0].status, ItemStatus::Learning);
    assert_eq!(saved[1].repetitions, 2);
    assert_eq!(saved[1].interval, 6);
    // Not in the due pool, so untouched.
    assert_eq!(saved[2], fixtures::seeded_items()[2]);
}

#[tokio::test]
async fn test_wrong_answer_is_saved_and_requeued() {
    let items = vec![fixtures::item(1, "dog", "chien", ItemStatus::New, 0)];
    let ctx = TestContext::with_items(&items);
    let server = ctx.server();

    let body = start(&server, json!({"direction": "b_to_a"})).await;
    assert_eq!(body["prompt"]["text"], "chien");
    assert_eq!(body["prompt"]["target"], "English");

    let body = respond(&server, &body["session_id"], json!({"answer": "cat"})).await;

    assert_eq!(body["step"]["kind"], "graded");
    assert_eq!(body["step"]["correct"], false);
    assert_eq!(body["step"]["expected"], "dog");
    assert_eq!(body["done"], false);
    assert_eq!(body["prompt"]["item_id"], 1);

    let saved = ctx.saved_items();
    assert_eq!(saved[0].status, ItemStatus::Learning);
    assert_eq!(saved[0].ease_factor, 2.3);
}

#[tokio::test]
async fn test_typo_within_tolerance_counts() {
    let items = vec![fixtures::item(1, "the bicycle", "la bicyclette", ItemStatus::New, 0)];
    let ctx = TestContext::with_items(&items);
    let server = ctx.server();

    let body = start(&server, json!({"direction": "a_to_b"})).await;
    let body = respond(&server, &body["session_id"], json!({"answer": "La bicylette"})).await;

    assert_eq!(body["step"]["correct"], true);
    assert_eq!(body["done"], true);
}

#[tokio::test]
async fn test_actions_do_not_grade() {
    let items = vec![fixtures::item(1, "dog", "chien", ItemStatus::New, 0)];
    let ctx = TestContext::with_items(&items);
    let server = ctx.server();

    let body = start(&server, json!({"direction": "a_to_b"})).await;
    let session_id = body["session_id"].clone();

    let body = respond(&server, &session_id, json!({"action": "show"})).await;
    assert_eq!(body["step"]["kind"], "revealed");
    assert_eq!(body["step"]["expected"], "chien");

    let body = respond(&server, &session_id, json!({"action": "skip"})).await;
    assert_eq!(body["step"]["kind"], "skipped");

    let body = respond(&server, &session_id, json!({"answer": "  "})).await;
    assert_eq!(body["step"]["kind"], "requeued");

    let body = respond(&server, &session_id, json!({"action": "stats"})).await;
    assert_eq!(body["step"]["kind"], "progress");
    assert_eq!(body["step"]["counts"]["new"], 1);

    assert_eq!(body["prompt"]["item_id"], 1);
    assert_eq!(ctx.saved_items(), items);
}

#[tokio::test]
async fn test_exit_action_ends_session() {
    let ctx = TestContext::with_items(&fixtures::seeded_items());
    let server = ctx.server();

    let body = start(&server, json!({})).await;
    let session_id = body["session_id"].clone();

    let body = respond(&server, &session_id, json!({"action": "exit"})).await;
    assert_eq!(body["step"]["kind"], "ended");
    assert_eq!(body["done"], true);

    let response = server
        .post(&format!("/api/sessions/{}/respond", session_id.as_str().unwrap()))
        .json(&json!({"answer": "chien"}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_exit_action_saves_collection() {
    let ctx = TestContext::with_items(&fixtures::seeded_items());
    let server = ctx.server();

    let body = start(&server, json!({})).await;
    std::fs::remove_file(&ctx.path).unwrap();

    let body = respond(&server, &body["session_id"], json!({"action": "exit"})).await;

    assert_eq!(body["done"], true);
    assert!(ctx.path.exists());
    assert_eq!(ctx.saved_items(), fixtures::seeded_items());
    assert_eq!(ctx.live_sessions(), 0);
}

#[tokio::test]
async fn test_oldest_session_evicted_past_cap() {
    let ctx = TestContext::with_session_cap(&fixtures::seeded_items(), 2);
    let server = ctx.server();

    let first = start(&server, json!({"direction": "a_to_b"})).await;
    let second = start(&server, json!({"direction": "a_to_b"})).await;
    let third = start(&server, json!({"direction": "a_to_b"})).await;

    assert_eq!(ctx.live_sessions(), 2);
    server
        .post(&format!("/api/sessions/{}/respond", first["session_id"].as_str().unwrap()))
        .json(&json!({"action": "skip"}))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    for body in [&second, &third] {
        let body = respond(&server, &body["session_id"], json!({"action": "skip"})).await;
        assert_eq!(body["step"]["kind"], "skipped");
    }
}

#[tokio::test]
async fn test_finished_session_frees_its_slot() {
    let items = vec![fixtures::item(1, "dog", "chien", ItemStatus::New, 0)];
    let ctx = TestContext::with_session_cap(&items, 1);
    let server = ctx.server();

    let body = start(&server, json!({"direction": "a_to_b"})).await;
    respond(&server, &body["session_id"], json!({"answer": "chien"})).await;
    assert_eq!(ctx.live_sessions(), 0);

    let body = start(&server, json!({"item_id": 1, "direction": "a_to_b"})).await;
    assert_eq!(body["done"], false);
    assert_eq!(ctx.live_sessions(), 1);
}

#[tokio::test]
async fn test_unknown_action_rejected() {
    let ctx = TestContext::with_items(&fixtures::seeded_items());
    let server = ctx.server();

    let body = start(&server, json!({})).await;
    let response = server
        .post(&format!("/api/sessions/{}/respond", body["session_id"].as_str().unwrap()))
        .json(&json!({"action": "dance"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pinned_item_session() {
    let ctx = TestContext::with_items(&fixtures::seeded_items());
    let server = ctx.server();

    // Item 4 is validated and not due, but pinning bypasses the filters.
    let body = start(&server, json!({"item_id": 4, "due_only": true})).await;

    assert_eq!(body["prompt"]["item_id"], 4);
    assert_eq!(body["summary"]["remaining"], 1);
}

#[tokio::test]
async fn test_pinned_item_not_found() {
    let ctx = TestContext::with_items(&fixtures::seeded_items());
    let server = ctx.server();

    let response = server.post("/api/sessions").json(&json!({"item_id": 42})).await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_direction() {
    let ctx = TestContext::with_items(&fixtures::seeded_items());
    let server = ctx.server();

    let response = server
        .post("/api/sessions")
        .json(&json!({"direction": "sideways"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_end_session() {
    let ctx = TestContext::with_items(&fixtures::seeded_items());
    let server = ctx.server();

    let body = start(&server, json!({"direction": "a_to_b"})).await;
    let session_id = body["session_id"].as_str().unwrap().to_string();
    let answer = expected_answer(&body["prompt"]);
    respond(&server, &body["session_id"], json!({"answer": answer})).await;

    let response = server.delete(&format!("/api/sessions/{session_id}")).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["done"], true);
    assert_eq!(body["step"]["kind"], "ended");
    assert_eq!(body["summary"]["graded"], 1);

    server
        .delete(&format!("/api/sessions/{session_id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
