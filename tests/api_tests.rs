mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_json(app: axum::Router, uri: &str, json: &serde_json::Value) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(json).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let (status, json) = get(common::build_test_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["models"], 4);
}

#[tokio::test]
async fn test_questionnaire_lists_every_question() {
    let (status, json) = get(common::build_test_app(), "/api/questionnaire").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let questions = json["data"].as_array().unwrap();
    assert_eq!(questions.len(), 17);
    assert_eq!(questions[0]["key"], "age");
    assert_eq!(questions[0]["widget"], "slider");
    assert_eq!(questions[0]["min"], 10);
    assert_eq!(questions[0]["max"], 60);
    assert_eq!(questions[2]["options"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_models_overview() {
    let (status, json) = get(common::build_test_app(), "/api/models").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["ensemble_size"], 4);
    assert_eq!(json["data"]["model_dir"], "models");
    let names = json["data"]["feature_names"].as_array().unwrap();
    assert_eq!(names.len(), 20);
    assert_eq!(names[19], "relationship_status_Single");
}

#[tokio::test]
async fn test_assess_high_risk_submission() {
    let answers = serde_json::to_value(common::answers(5, "Between 4 and 5 hours")).unwrap();

    let (status, json) = post_json(common::build_test_app(), "/api/assess", &answers).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let data = &json["data"];
    assert_eq!(data["votes"], 4);
    assert_eq!(data["total"], 4);
    assert_eq!(data["tier"], "high");
    assert_eq!(data["guidance"]["severity"], "error");
    assert_eq!(data["guidance"]["heading"], "Tips to reduce addiction:");
    assert_eq!(data["ballots"].as_array().unwrap().len(), 4);
    assert!(data["assessment_id"].is_string());
}

#[tokio::test]
async fn test_assess_default_answers() {
    let answers = smcheck::models::default_answers();

    let (status, json) = post_json(common::build_test_app(), "/api/assess", &answers).await;

    assert_eq!(status, StatusCode::OK);
    // Likert at 3 and under an hour a day: nothing fires.
    assert_eq!(json["data"]["votes"], 0);
    assert_eq!(json["data"]["tier"], "none");
}

#[tokio::test]
async fn test_assess_rejects_out_of_range_age() {
    let mut answers = serde_json::to_value(common::answers(3, "Between 2 and 3 hours")).unwrap();
    answers["age"] = serde_json::json!(70);

    let (status, json) = post_json(common::build_test_app(), "/api/assess", &answers).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("age"));
}

#[tokio::test]
async fn test_assess_rejects_unknown_label() {
    let mut answers = serde_json::to_value(common::answers(3, "Between 2 and 3 hours")).unwrap();
    answers["relationship_status"] = serde_json::json!("Complicated");

    let (status, json) = post_json(common::build_test_app(), "/api/assess", &answers).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("relationship_status"));
}

#[tokio::test]
async fn test_assess_rejects_malformed_body() {
    let answers = serde_json::json!({ "age": 25 });

    let (status, json) = post_json(common::build_test_app(), "/api/assess", &answers).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let resp = common::build_test_app()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    assert!(resp.headers()["content-type"].to_str().unwrap().starts_with("text/plain"));

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains(r#"assessments_total{tier="high"}"#), "{text}");
    assert!(text.contains(r#"assessment_failures_total{kind="encoding"}"#), "{text}");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, json) = get(common::build_test_app(), "/api/unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("/api/unknown"));
}
