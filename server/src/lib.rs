use axum::{extract::{Path, Query, State}, http::StatusCode, routing::{get, post}, Json, Router};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use voiddocs_core::engine::{Hit, SearchEngine, DEFAULT_TOP_N, EMPTY_INDEX_MESSAGE};
use voiddocs_core::{CorpusSource, Passage, PassageId};

pub const MAX_TOP_N: usize = 50;

pub type DynSource = Box<dyn CorpusSource + Send>;

/// One engine per process; every request takes the lock, so builds and queries never overlap.
pub type SharedEngine = Arc<Mutex<SearchEngine<DynSource>>>;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_n")]
    pub n: usize,
}
fn default_n() -> usize { DEFAULT_TOP_N }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_ms: u128,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<Hit>,
    /// Set when no corpus could be loaded or built.
    pub diagnostic: Option<String>,
}

#[derive(Serialize)]
pub struct RebuildResponse {
    pub passages: usize,
    pub message: String,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: SharedEngine,
}

pub fn shared(engine: SearchEngine<DynSource>) -> SharedEngine { Arc::new(Mutex::new(engine)) }

pub fn build_app(engine: SharedEngine) -> Router {
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

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/passage/:id", get(passage_handler))
        .route("/index/rebuild", post(rebuild_handler))
        .with_state(AppState { engine })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run engine work on the blocking pool; crawling uses a blocking HTTP client.
async fn with_engine<T, F>(state: &AppState, f: F) -> Result<T, (StatusCode, String)>
where
    T: Send + 'static,
    F: FnOnce(&mut SearchEngine<DynSource>) -> T + Send + 'static,
{
    let engine = state.engine.clone();
    tokio::task::spawn_blocking(move || {
        let mut guard = engine.lock();
        f(&mut *guard)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "engine task failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "engine task failed".to_string())
    })
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let n = params.n.clamp(1, MAX_TOP_N);
    let q = params.q.clone();
    let hits = with_engine(&state, move |engine| engine.query(&q, n)).await?;

    let (results, diagnostic) = match hits {
        Some(hits) => (hits, None),
        None => (Vec::new(), Some(EMPTY_INDEX_MESSAGE.to_string())),
    };
    let elapsed = start.elapsed();
    Ok(Json(SearchResponse {
        query: params.q,
        took_ms: elapsed.as_millis(),
        took_s: elapsed.as_secs_f64(),
        total_hits: results.len(),
        results,
        diagnostic,
    }))
}

pub async fn passage_handler(
    State(state): State<AppState>,
    Path(id): Path<PassageId>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let passage: Option<Passage> = with_engine(&state, move |engine| {
        engine.warm();
        engine.passage(id).cloned()
    })
    .await?;
    Ok(Json(match passage {
        Some(p) => serde_json::json!({
            "id": id,
            "title": p.title,
            "source": p.source,
            "content": p.content,
        }),
        None => serde_json::json!({ "error": "not found" }),
    }))
}

pub async fn rebuild_handler(State(state): State<AppState>) -> Result<Json<RebuildResponse>, (StatusCode, String)> {
    let passages = with_engine(&state, |engine| engine.rebuild()).await?;
    let message = if passages == 0 {
        EMPTY_INDEX_MESSAGE.to_string()
    } else {
        format!("Index rebuilt with {passages} chunks.")
    };
    Ok(Json(RebuildResponse { passages, message }))
}
