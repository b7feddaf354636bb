use crate::cache::ParagraphCache;
use crate::model::{GenerateResponse, GenerationRequest};
use crate::render::paragraphs_to_html;
use crate::upstream::{ParagraphSource, UpstreamError};
use axum::{
    extract::{Json, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct AppState<S> {
    pub cache: ParagraphCache,
    pub source: S,
    /// Shared bearer token; `None` leaves both routes open. Real
    /// authentication belongs to the host environment.
    pub auth_token: Option<String>,
}

#[derive(Debug)]
pub struct Generated {
    pub paragraphs: Vec<String>,
    pub cached: bool,
}

/// The composed core: derive the key, serve from cache when the entry is
/// unexpired, otherwise fetch upstream, store, and return. Fetch failures
/// propagate unchanged and write nothing, so a later call for the same key
/// still misses and retries upstream.
pub async fn generate<S: ParagraphSource>(
    cache: &ParagraphCache,
    source: &S,
    req: &GenerationRequest,
) -> Result<Generated, UpstreamError> {
    if let Some(entry) = cache.get(req).await {
        info!("cache hit, entry fetched at {}", entry.fetched_at);
        return Ok(Generated {
            paragraphs: entry.paragraphs,
            cached: true,
        });
    }

    let paragraphs = source.fetch(req).await?;
    cache.put(req, paragraphs.clone()).await;

    Ok(Generated {
        paragraphs,
        cached: false,
    })
}

pub fn app<S: ParagraphSource + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/v1/generate", post(handle_generate::<S>))
        .route("/v1/cache", delete(handle_flush::<S>))
        .with_state(state)
}

pub async fn handle_generate<S: ParagraphSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Json(req): Json<GenerationRequest>,
) -> Response {
    if let Err(denied) = authorize(&headers, state.auth_token.as_deref()) {
        return denied;
    }

    // Boundary validation, before any cache or network work.
    if let Err(e) = req.validate() {
        warn!("rejected generation request: {}", e);
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response();
    }

    match generate(&state.cache, &state.source, &req).await {
        Ok(generated) => {
            info!(
                "served {} paragraphs (type: {}, cached: {})",
                generated.paragraphs.len(),
                req.meat_type.as_str(),
                generated.cached
            );
            let body = GenerateResponse {
                html: paragraphs_to_html(&generated.paragraphs),
                paragraphs: generated.paragraphs,
                cached: generated.cached,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!("upstream fetch failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

pub async fn handle_flush<S: ParagraphSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Response {
    if let Err(denied) = authorize(&headers, state.auth_token.as_deref()) {
        return denied;
    }

    state.cache.flush();
    info!("cache flushed");
    StatusCode::NO_CONTENT.into_response()
}

fn authorize(headers: &HeaderMap, token: Option<&str>) -> Result<(), Response> {
    let Some(expected) = token else {
        return Ok(());
    };

    let supplied = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    if supplied == Some(expected) {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "missing or invalid bearer token" })),
        )
            .into_response())
    }
}
