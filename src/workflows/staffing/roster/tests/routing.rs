use super::common::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

fn post_selection(payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/staffing/selection")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(payload).expect("serialize payload"),
        ))
        .expect("request")
}

#[tokio::test]
async fn post_selection_returns_the_winner_with_scores() {
    let candidates = vec![
        candidate("Ana Torres"),
        with_expertise(candidate("Noah Feld"), "math", "high"),
    ];
    let payload = json!({
        "candidates": candidates,
        "subject": "math",
        "as_of": "2026-03-02",
    });

    let response = router()
        .oneshot(post_selection(&payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json_body(response).await;
    assert_eq!(body.get("winner_index").and_then(Value::as_u64), Some(1));
    assert_eq!(
        body.pointer("/winner/name").and_then(Value::as_str),
        Some("Noah Feld")
    );
    assert_eq!(
        body.get("scores")
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(2)
    );
}

#[tokio::test]
async fn post_selection_honors_the_target_school() {
    let candidates = vec![
        candidate("Ana Torres"),
        with_preferences(candidate("Noah Feld"), &["Lincoln High"], &[]),
    ];
    let payload = json!({
        "candidates": candidates,
        "subject": "math",
        "as_of": "2026-03-02",
        "target_school": "Lincoln High",
    });

    let response = router()
        .oneshot(post_selection(&payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.get("winner_index").and_then(Value::as_u64), Some(1));
}

#[tokio::test]
async fn empty_roster_maps_to_unprocessable_entity() {
    let payload = json!({
        "candidates": [],
        "subject": "math",
        "as_of": "2026-03-02",
    });

    let response = router()
        .oneshot(post_selection(&payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("no candidates"));
}

#[tokio::test]
async fn invalid_expertise_level_names_the_offending_candidate() {
    let candidates = vec![
        candidate("Ana Torres"),
        with_expertise(candidate("Noah Feld"), "math", "guru"),
    ];
    let payload = json!({
        "candidates": candidates,
        "subject": "math",
        "as_of": "2026-03-02",
    });

    let response = router()
        .oneshot(post_selection(&payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body.get("candidate_index").and_then(Value::as_u64), Some(1));
    assert_eq!(
        body.get("candidate").and_then(Value::as_str),
        Some("Noah Feld")
    );
    assert!(body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("guru"));
}
