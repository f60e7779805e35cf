//! HTTP JSON API for the content service.
//!
//! All generation endpoints answer 200 with `status: "success"` once their
//! input validates, including when the provider failed and fallback text was
//! used. Such responses carry the `x-generation-fallback: true` header.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, HeaderValue, Method},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    content::{scorer, ContentType, Generation, SeoContentGenerator},
    error::{ApiError, Error, Result},
    store::{
        records::timestamp, ContentRecord, IdGenerator, MemoryStore, RecordStore, SessionRecord,
    },
};

pub const SERVICE_NAME: &str = "SEO Scientist AI Content Writer API";

pub const FALLBACK_HEADER: HeaderName = HeaderName::from_static("x-generation-fallback");

const RECENT_LIMIT: usize = 5;

/// Shared state for all handlers.
pub struct AppState {
    pub generator: SeoContentGenerator,
    pub sessions: Arc<dyn RecordStore<SessionRecord>>,
    pub contents: Arc<dyn RecordStore<ContentRecord>>,
    pub session_ids: IdGenerator,
    pub content_ids: IdGenerator,
    pub frontend_url: String,
}

impl AppState {
    /// State backed by in-memory stores.
    pub fn new(generator: SeoContentGenerator, frontend_url: impl Into<String>) -> Self {
        Self::with_stores(
            generator,
            Arc::new(MemoryStore::<SessionRecord>::new()),
            Arc::new(MemoryStore::<ContentRecord>::new()),
            frontend_url,
        )
    }

    pub fn with_stores(
        generator: SeoContentGenerator,
        sessions: Arc<dyn RecordStore<SessionRecord>>,
        contents: Arc<dyn RecordStore<ContentRecord>>,
        frontend_url: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            sessions,
            contents,
            session_ids: IdGenerator::new("session"),
            content_ids: IdGenerator::new("content"),
            frontend_url: frontend_url.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct KeywordsRequest {
    pub seed_keyword: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TitlesRequest {
    pub keyword: Option<String>,
    pub tone: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TopicsRequest {
    pub title: Option<String>,
    pub keyword: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContentRequest {
    pub keyword: Option<String>,
    pub title: Option<String>,
    pub topic_outline: Option<String>,
    pub content_type: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub session_id: String,
    pub keywords: Vec<String>,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TitlesResponse {
    pub titles: Vec<String>,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TopicsResponse {
    pub topics: String,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub content_id: String,
    pub content: String,
    pub seo_score: u8,
    pub factors: Vec<String>,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub sessions: usize,
    pub contents: usize,
    pub avg_score: f64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_sessions: Vec<SessionRecord>,
    pub recent_contents: Vec<ContentRecord>,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub frontend: String,
    pub docs: &'static str,
}

/// Build the API router with CORS restricted to `allowed_origin`.
pub fn build_router(state: Arc<AppState>, allowed_origin: &str) -> Result<Router> {
    let origin = HeaderValue::from_str(allowed_origin)
        .map_err(|e| Error::Config(format!("invalid CORS origin {allowed_origin:?}: {e}")))?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .route("/", get(service_info))
        .route("/api/health", get(health))
        .route("/api/keywords", post(generate_keywords))
        .route("/api/titles", post(generate_titles))
        .route("/api/topics", post(generate_topics))
        .route("/api/content", post(generate_content))
        .route("/api/dashboard", get(dashboard))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, app: Router) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("🚀 Starting SEO Scientist backend on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Trimmed value of a required string field, or a 400 with `message`.
fn required(value: Option<String>, message: &str) -> std::result::Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(message.to_string()))
}

fn respond<T: Serialize>(fallback: bool, body: T) -> Response {
    if fallback {
        ([(FALLBACK_HEADER, HeaderValue::from_static("true"))], Json(body)).into_response()
    } else {
        Json(body).into_response()
    }
}

/// Round to 2 decimals. Ties go to the even digit and are judged on the
/// exact binary value, so 55.125 becomes 55.12.
fn round_to_cents(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// GET /
async fn service_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME,
        frontend: state.frontend_url.clone(),
        docs: "/api/health, /api/keywords, /api/titles, /api/topics, /api/content, /api/dashboard",
    })
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        time: timestamp(),
    })
}

/// POST /api/keywords
async fn generate_keywords(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<KeywordsRequest>, JsonRejection>,
) -> std::result::Result<Response, ApiError> {
    let Json(req) = payload?;
    let seed = required(req.seed_keyword, "Missing seed_keyword")?;

    let generation = state.generator.generate_keywords(&seed).await;
    let fallback = generation.is_fallback();
    let keywords = generation.into_inner();

    let session_id = state.session_ids.next_id();
    state
        .sessions
        .put(session_id.clone(), SessionRecord::new(seed, keywords.clone()))
        .await;

    Ok(respond(
        fallback,
        KeywordsResponse {
            session_id,
            keywords,
            status: "success",
        },
    ))
}

/// POST /api/titles
///
/// Titles are attached to the session when `session_id` names one.
async fn generate_titles(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<TitlesRequest>, JsonRejection>,
) -> std::result::Result<Response, ApiError> {
    let Json(req) = payload?;
    let keyword = required(req.keyword, "Missing keyword")?;

    let generation = state
        .generator
        .generate_titles(&keyword, req.tone.as_deref())
        .await;
    let fallback = generation.is_fallback();
    let titles = generation.into_inner();

    if let Some(session_id) = req.session_id.filter(|id| !id.is_empty()) {
        let stored = titles.clone();
        state
            .sessions
            .update(
                &session_id,
                Box::new(move |session: &mut SessionRecord| session.titles = Some(stored)),
            )
            .await;
    }

    Ok(respond(
        fallback,
        TitlesResponse {
            titles,
            status: "success",
        },
    ))
}

/// POST /api/topics
async fn generate_topics(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<TopicsRequest>, JsonRejection>,
) -> std::result::Result<Response, ApiError> {
    let Json(req) = payload?;
    let message = "Missing title or keyword";
    let title = required(req.title, message)?;
    let keyword = required(req.keyword, message)?;

    let generation = state.generator.generate_topics(&title, &keyword).await;

    Ok(respond(
        generation.is_fallback(),
        TopicsResponse {
            topics: generation.into_inner(),
            status: "success",
        },
    ))
}

/// POST /api/content
async fn generate_content(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<ContentRequest>, JsonRejection>,
) -> std::result::Result<Response, ApiError> {
    let Json(req) = payload?;
    let message = "Missing input";
    let keyword = required(req.keyword, message)?;
    let title = required(req.title, message)?;
    let outline = required(req.topic_outline, message)?;
    let content_type = req
        .content_type
        .as_deref()
        .map(ContentType::parse)
        .unwrap_or_default();

    let generation: Generation<String> = state
        .generator
        .generate_content(&keyword, &title, &outline, content_type)
        .await;
    let fallback = generation.is_fallback();
    let content = generation.into_inner();

    let report = scorer::score(&content, &keyword);
    let factors: Vec<String> = report.factors.iter().map(|f| f.to_string()).collect();

    let content_id = state.content_ids.next_id();
    let record = ContentRecord {
        keyword,
        title,
        outline,
        content: content.clone(),
        seo_score: report.score,
        factors: factors.clone(),
        content_type,
        words: scorer::word_count(&content),
        time: timestamp(),
    };
    state.contents.put(content_id.clone(), record).await;

    info!(
        content_id = %content_id,
        session_id = req.session_id.as_deref().unwrap_or(""),
        score = report.score,
        "content generated"
    );

    Ok(respond(
        fallback,
        ContentResponse {
            content_id,
            content,
            seo_score: report.score,
            factors,
            status: "success",
        },
    ))
}

/// GET /api/dashboard
async fn dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    let avg_score = state.contents.average(ContentRecord::score).await;

    Json(DashboardResponse {
        stats: DashboardStats {
            sessions: state.sessions.len().await,
            contents: state.contents.len().await,
            avg_score: round_to_cents(avg_score),
        },
        recent_sessions: state.sessions.recent(RECENT_LIMIT).await,
        recent_contents: state.contents.recent(RECENT_LIMIT).await,
        status: "success",
    })
}
