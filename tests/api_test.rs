//! End-to-end tests of the HTTP API against a scripted provider.

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use common::{generator, long_intro, state, ScriptedProvider};
use seo_scientist::{
    build_router,
    content::ContentType,
    http_server::FALLBACK_HEADER,
    store::{records::timestamp, ContentRecord, MemoryStore, RecordStore, SessionRecord},
    AppState,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const ORIGIN: &str = "https://seo-science.vercel.app";

fn app(provider: ScriptedProvider) -> Router {
    build_router(state(provider), ORIGIN).unwrap()
}

fn working_provider() -> ScriptedProvider {
    ScriptedProvider::replying(vec![
        ("keyword expert", "running shoes for women\n\n trail running shoes \nbest running shoes 2024".to_string()),
        ("title copywriter", "Best Running Shoes: A Complete Buyer's Guide for 2024\nHow to Choose Running Shoes That Fit Your Stride".to_string()),
        ("content strategist", "Topic 1: Picking a shoe\n- Fit\n- Cushioning\n- Price".to_string()),
        ("content writer", long_intro("running shoes")),
    ])
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Option<String>, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    read(response).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read(response).await
}

async fn read(response: axum::response::Response) -> (StatusCode, Option<String>, Value) {
    let status = response.status();
    let fallback = response
        .headers()
        .get(FALLBACK_HEADER)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, fallback, json)
}

#[tokio::test]
async fn test_health_and_root() {
    let app = app(working_provider());

    let (status, _, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["time"].as_str().unwrap().contains('T'));

    let (status, _, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "SEO Scientist AI Content Writer API");
    assert_eq!(body["frontend"], ORIGIN);
    assert!(body["docs"].as_str().unwrap().contains("/api/dashboard"));
}

#[tokio::test]
async fn test_keywords_requires_seed() {
    let app = app(working_provider());

    let (status, _, body) = post(&app, "/api/keywords", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing seed_keyword");

    let (status, _, body) = post(&app, "/api/keywords", json!({ "seed_keyword": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn test_keywords_creates_session() {
    let app = app(working_provider());

    let (status, fallback, body) =
        post(&app, "/api/keywords", json!({ "seed_keyword": "running shoes" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fallback, None);
    assert_eq!(body["status"], "success");

    let session_id = body["session_id"].as_str().unwrap();
    let digits = session_id.strip_prefix("session_").unwrap();
    assert!(!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));

    assert_eq!(
        body["keywords"],
        json!(["running shoes for women", "trail running shoes", "best running shoes 2024"])
    );
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = app(working_provider());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/topics")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    let (status, _, body) = read(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_titles_attach_to_session() {
    let app = app(working_provider());

    let (_, _, body) = post(&app, "/api/keywords", json!({ "seed_keyword": "running shoes" })).await;
    let session_id = body["session_id"].as_str().unwrap().to_string();

    let (status, _, body) = post(
        &app,
        "/api/titles",
        json!({ "keyword": "running shoes", "session_id": session_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["titles"].as_array().unwrap().len(), 2);

    let (_, _, dashboard) = get(&app, "/api/dashboard").await;
    let session = &dashboard["recent_sessions"][0];
    assert_eq!(session["seed"], "running shoes");
    assert_eq!(session["titles"], body["titles"]);

    // unknown sessions are ignored
    let (status, _, _) = post(
        &app,
        "/api/titles",
        json!({ "keyword": "running shoes", "session_id": "session_1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_titles_and_topics_validation() {
    let app = app(working_provider());

    let (status, _, body) = post(&app, "/api/titles", json!({ "tone": "witty" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing keyword");

    let (status, _, body) = post(&app, "/api/topics", json!({ "title": "Only a title" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing title or keyword");

    let (status, _, body) = post(
        &app,
        "/api/content",
        json!({ "keyword": "kw", "title": "t" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing input");
}

#[tokio::test]
async fn test_topics_returned_verbatim() {
    let app = app(working_provider());

    let (status, _, body) = post(
        &app,
        "/api/topics",
        json!({ "title": "Best Running Shoes", "keyword": "running shoes" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topics"], "Topic 1: Picking a shoe\n- Fit\n- Cushioning\n- Price");
}

#[tokio::test]
async fn test_content_scored_and_stored() {
    let app = app(working_provider());

    let (status, _, body) = post(
        &app,
        "/api/content",
        json!({
            "keyword": "running shoes",
            "title": "Best Running Shoes",
            "topic_outline": "Topic 1: Picking a shoe",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert!(body["content_id"].as_str().unwrap().starts_with("content_"));
    assert_eq!(body["seo_score"], 90);
    assert_eq!(
        body["factors"],
        json!(["Good keyword density", "Optimal word count", "Good readability"])
    );

    let (_, _, dashboard) = get(&app, "/api/dashboard").await;
    let record = &dashboard["recent_contents"][0];
    assert_eq!(record["type"], "blog_intro");
    assert_eq!(record["words"], 209);
    assert_eq!(record["seo_score"], 90);
    assert_eq!(record["outline"], "Topic 1: Picking a shoe");
}

#[tokio::test]
async fn test_provider_failure_still_succeeds_with_fallback() {
    let app = app(ScriptedProvider::failing());

    let (status, fallback, body) =
        post(&app, "/api/keywords", json!({ "seed_keyword": "yoga" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fallback.as_deref(), Some("true"));
    assert_eq!(body["status"], "success");
    assert_eq!(body["keywords"], json!(["yoga guide", "best yoga tools"]));

    let (status, _, body) = post(&app, "/api/titles", json!({ "keyword": "yoga" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["titles"],
        json!(["Complete yoga Guide", "Mastering yoga", "Boost ROI with yoga"])
    );

    let (_, _, body) = post(
        &app,
        "/api/topics",
        json!({ "title": "Yoga", "keyword": "yoga" }),
    )
    .await;
    assert_eq!(
        body["topics"],
        "Topic 1: Everything about yoga\n- Overview\n- Benefits\n- Strategies"
    );

    let (status, fallback, body) = post(
        &app,
        "/api/content",
        json!({
            "keyword": "yoga",
            "title": "Yoga",
            "topic_outline": "outline",
            "content_type": "meta_description",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fallback.as_deref(), Some("true"));
    assert_eq!(
        body["content"],
        "Learn everything about yoga in this insightful guide."
    );
    // moderate keyword (15) + okay readability (10) + punctuation (10) + capital (5)
    assert_eq!(body["seo_score"], 40);
}

#[tokio::test]
async fn test_dashboard_stats() {
    let app = app(ScriptedProvider::failing());

    let (status, _, body) = get(&app, "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["sessions"], 0);
    assert_eq!(body["stats"]["contents"], 0);
    assert_eq!(body["stats"]["avg_score"].as_f64(), Some(0.0));
    assert_eq!(body["status"], "success");

    // fallback copy always mentions its keyword once and scores 40
    for (keyword, title) in [("yoga", "Yoga"), ("tea", "Tea"), ("golf", "Golf")] {
        post(
            &app,
            "/api/content",
            json!({ "keyword": keyword, "title": title, "topic_outline": "o" }),
        )
        .await;
    }
    for seed in ["a", "b", "c", "d", "e", "f"] {
        post(&app, "/api/keywords", json!({ "seed_keyword": seed })).await;
    }

    let (_, _, body) = get(&app, "/api/dashboard").await;
    assert_eq!(body["stats"]["sessions"], 6);
    assert_eq!(body["stats"]["contents"], 3);
    assert_eq!(body["stats"]["avg_score"].as_f64(), Some(40.0));

    let recent: Vec<&str> = body["recent_sessions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["seed"].as_str().unwrap())
        .collect();
    assert_eq!(recent, vec!["b", "c", "d", "e", "f"]);
    assert_eq!(body["recent_contents"].as_array().unwrap().len(), 3);
}

fn scored(seo_score: u8) -> ContentRecord {
    ContentRecord {
        keyword: "kw".to_string(),
        title: "Title".to_string(),
        outline: "outline".to_string(),
        content: "Body.".to_string(),
        seo_score,
        factors: Vec::new(),
        content_type: ContentType::BlogIntro,
        words: 1,
        time: timestamp(),
    }
}

#[tokio::test]
async fn test_dashboard_average_rounds_ties_to_even() {
    let contents = Arc::new(MemoryStore::<ContentRecord>::new());
    for i in 0..7 {
        contents.put(format!("content_{i}"), scored(55)).await;
    }
    contents.put("content_7".to_string(), scored(56)).await;

    let state = AppState::with_stores(
        generator(working_provider()),
        Arc::new(MemoryStore::<SessionRecord>::new()),
        contents,
        ORIGIN,
    );
    let app = build_router(Arc::new(state), ORIGIN).unwrap();

    // 441 / 8 = 55.125
    let (status, _, body) = get(&app, "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["contents"], 8);
    assert_eq!(body["stats"]["avg_score"].as_f64(), Some(55.12));
}

#[tokio::test]
async fn test_cors_allows_only_configured_origin() {
    let app = app(working_provider());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::ORIGIN, ORIGIN)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        ORIGIN
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
