pub mod error;
pub mod render;

use anyhow::Result;
use axum::{extract::{Query, State}, http::HeaderMap, routing::{get, post}, Json, Router};
use docs_core::config::{DEFAULT_MAX_RESULTS, DEFAULT_PAGE_LIMIT};
use docs_core::{Category, DocsError, IndexHandle, PageRequest, TitleLookup};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::render::{Rendered, ResponseFormat};

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub max_results: Option<i64>,
    pub response_format: Option<String>,
}

#[derive(Deserialize)]
pub struct TitleParams {
    pub title: String,
    pub response_format: Option<String>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub response_format: Option<String>,
}

#[derive(Deserialize)]
pub struct CodeParams {
    pub topic: String,
    pub max_results: Option<i64>,
    pub response_format: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<IndexHandle>,
    pub admin_token: Option<String>,
}

/// Load the corpus and build the router. Fails before serving anything if the
/// corpus is missing, empty or malformed.
pub fn build_app(corpus_dir: String) -> Result<Router> {
    let index = IndexHandle::open(&corpus_dir)?;
    let admin_token = std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty());
    Ok(router(AppState { index: Arc::new(index), admin_token }))
}

pub fn router(app_state: AppState) -> Router {
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
        .route("/docs", get(list_handler))
        .route("/docs/by-title", get(title_handler))
        .route("/docs/index", get(catalog_handler))
        .route("/docs/stats", get(stats_handler))
        .route("/code-examples", get(code_examples_handler))
        .route("/index/reload", post(reload_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn positive(name: &str, value: Option<i64>, default: usize) -> Result<usize, DocsError> {
    match value {
        None => Ok(default),
        Some(v) if v <= 0 => Err(DocsError::invalid(format!("{name} must be >= 1, got {v}"))),
        Some(v) => usize::try_from(v).map_err(|_| DocsError::invalid(format!("{name} is out of range"))),
    }
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Rendered, ApiError> {
    let format = ResponseFormat::parse(params.response_format.as_deref())?;
    let max_results = positive("max_results", params.max_results, DEFAULT_MAX_RESULTS)?;
    let index = state.index.current();
    let hits = index.search(&params.query, max_results)?;
    tracing::info!(query = %params.query, max_results, hits = hits.len(), "search");

    let hint = format!(
        "**Suggestions:**\n\
         - Try broader terms (e.g. 'surface' instead of 'create NURBS surface')\n\
         - Use API class names directly (e.g. 'AlCurve', 'AlSurface')\n\
         - Use `/docs` to browse all {} pages\n\
         - Use `/code-examples` to find pages with code samples",
        index.num_docs()
    );
    Ok(render::search_results(format, &params.query, &hits, &hint))
}

pub async fn code_examples_handler(
    State(state): State<AppState>,
    Query(params): Query<CodeParams>,
) -> Result<Rendered, ApiError> {
    let format = ResponseFormat::parse(params.response_format.as_deref())?;
    let max_results = positive("max_results", params.max_results, DEFAULT_MAX_RESULTS)?;
    let index = state.index.current();
    let hits = index.code_examples(&params.topic, max_results)?;
    tracing::info!(topic = %params.topic, max_results, hits = hits.len(), "code examples");

    let hint = format!(
        "**Info:** There are {} pages with code blocks.\n\n\
         **Suggestions:**\n\
         - Try broader terms (e.g. 'plug-in' instead of 'momentary plug-in example')\n\
         - Use `/search` to find related pages first\n\
         - Use `/docs?category=guide` to browse all guides",
        index.stats().pages_with_code
    );
    Ok(render::search_results(format, &params.topic, &hits, &hint))
}

pub async fn title_handler(
    State(state): State<AppState>,
    Query(params): Query<TitleParams>,
) -> Result<Rendered, ApiError> {
    let format = ResponseFormat::parse(params.response_format.as_deref())?;
    let index = state.index.current();
    match index.get_by_title(&params.title)? {
        TitleLookup::Found { document, kind } => {
            tracing::debug!(title = %params.title, found = %document.title, ?kind, "title lookup");
            Ok(render::document(format, document, kind))
        }
        TitleLookup::Suggestions(titles) => Err(ApiError::NotFound {
            message: format!("No documentation found matching: '{}'. Did you mean one of the suggestions?", params.title),
            suggestions: titles.into_iter().map(str::to_string).collect(),
        }),
        TitleLookup::NotFound => Err(ApiError::NotFound {
            message: format!(
                "No documentation found matching: '{}'. Use /docs to browse or /search to search by keyword.",
                params.title
            ),
            suggestions: Vec::new(),
        }),
    }
}

pub async fn list_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Rendered, ApiError> {
    let format = ResponseFormat::parse(params.response_format.as_deref())?;
    let category = match params.category.as_deref() {
        Some(c) => Category::parse_filter(c)?,
        None => None,
    };
    let request = PageRequest::new(params.offset.unwrap_or(0), params.limit.unwrap_or(DEFAULT_PAGE_LIMIT as i64))?;
    let index = state.index.current();
    let page = index.list(category, request);
    tracing::debug!(?category, offset = request.offset, limit = request.limit, showing = page.documents.len(), "list");
    Ok(render::page(format, &page))
}

pub async fn catalog_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let index = state.index.current();
    Json(serde_json::json!(index.catalog()))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<docs_core::CorpusStats> {
    Json(state.index.current().stats())
}

async fn reload_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<docs_core::CorpusStats>, ApiError> {
    authorize(&state, &headers)?;
    let handle = Arc::clone(&state.index);
    let fresh = tokio::task::spawn_blocking(move || handle.reload())
        .await
        .map_err(|e| ApiError::ServiceUnavailable(format!("reload task failed: {e}")))??;
    Ok(Json(fresh.stats()))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err(ApiError::Unauthorized("ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("invalid admin token".into()))
    }
}
