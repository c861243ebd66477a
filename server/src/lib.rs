use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, response::{IntoResponse, Response}, routing::get, Json, Router};
use engine::{DocId, IndexContext, IndexStats, SearchHit, SearchOptions, TokenizerConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Corpus file the index is built from at startup.
    pub corpus: PathBuf,
    pub tokenizer: TokenizerConfig,
    /// Directory served for paths no route matches, e.g. a search page.
    pub static_dir: Option<PathBuf>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default)]
    pub dedup: bool,
}
fn default_k() -> usize { 10 }

#[derive(Deserialize)]
pub struct LegacyParams {
    pub word: Option<String>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_ms: u128,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

/// Flat hit shape of the `/s` endpoint; `desc` is the rendered snippet.
#[derive(Serialize)]
pub struct LegacyHit {
    pub title: String,
    pub desc: String,
    pub url: String,
    pub doc_id: DocId,
    pub weight: i64,
}

impl From<SearchHit> for LegacyHit {
    fn from(hit: SearchHit) -> Self {
        Self { desc: hit.snippet.to_string(), title: hit.title, url: hit.url, doc_id: hit.doc_id, weight: hit.weight }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<IndexContext>,
}

/// Build the index and the router. Fails, and nothing is served, when the
/// corpus cannot be read.
pub fn build_app(config: ServerConfig) -> Result<Router> {
    let ctx = Arc::new(IndexContext::open(&config.corpus, &config.tokenizer)?);
    let stats = ctx.stats();
    tracing::info!(
        corpus = %config.corpus.display(),
        num_docs = stats.num_docs,
        num_terms = stats.num_terms,
        skipped = stats.skipped_records,
        "index ready"
    );
    let app_state = AppState { index: ctx };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let mut app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/s", get(legacy_search_handler))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/stats", get(stats_handler))
        .with_state(app_state);
    if let Some(dir) = config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }
    Ok(app.layer(cors).layer(TraceLayer::new_for_http()))
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let options = SearchOptions { dedup_terms: params.dedup, limit: None };
    let mut results = state.index.search_with(&params.q, &options);
    let total_hits = results.len();
    results.truncate(params.k.clamp(1, 100));
    let elapsed = start.elapsed();
    tracing::info!(query = %params.q, total_hits, "search");
    Json(SearchResponse { query: params.q, took_ms: elapsed.as_millis(), took_s: elapsed.as_secs_f64(), total_hits, results })
}

/// `/s?word=...`: every hit, flattened.
pub async fn legacy_search_handler(State(state): State<AppState>, Query(params): Query<LegacyParams>) -> Response {
    let Some(word) = params.word else {
        return (StatusCode::BAD_REQUEST, "missing search keyword: pass ?word=").into_response();
    };
    tracing::info!(query = %word, "search");
    let hits: Vec<LegacyHit> = state.index.search(&word).into_iter().map(LegacyHit::from).collect();
    Json(hits).into_response()
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<DocId>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    match state.index.document(doc_id) {
        Some(doc) => Ok(Json(serde_json::json!({
            "doc_id": doc.id,
            "title": doc.title,
            "url": doc.url,
            "text": doc.content,
        }))),
        None => Err((StatusCode::NOT_FOUND, format!("no document with id {doc_id}"))),
    }
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<IndexStats> {
    Json(state.index.stats())
}
