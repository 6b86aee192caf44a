//! Service descriptor, browser status, and liveness probe.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
///
/// Service descriptor listing the endpoint surface.
pub async fn service_descriptor() -> Json<Value> {
    Json(json!({
        "service": "browser-embassy",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "description": "Remote browser automation service",
        "endpoints": {
            "/navigate": "Navigate to URL",
            "/screenshot": "Get current page screenshot",
            "/extract_fields": "Extract form fields",
            "/fill_field": "Fill a form field",
            "/click": "Click an element",
            "/get_html": "Get page HTML",
            "/execute_js": "Execute JavaScript",
            "/status": "Browser status",
            "/oracle_login": "Scripted cloud-console sign-in",
            "/create_anthropic_key": "Scripted API key creation",
        }
    }))
}

/// GET /status
///
/// Reports session presence; read failures downgrade to an error state
/// instead of propagating. Does not take the operations lock, keeping the
/// probe responsive during long flows.
pub async fn browser_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    let session = match state.sessions.current().await {
        Ok(session) => session,
        Err(_) => {
            return Json(json!({
                "browser": "not_initialized",
                "ready": false,
            }))
        }
    };

    match (session.current_url().await, session.title().await) {
        (Ok(current_url), Ok(page_title)) => Json(json!({
            "browser": "ready",
            "ready": true,
            "current_url": current_url,
            "page_title": page_title,
        })),
        (Err(e), _) | (_, Err(e)) => Json(json!({
            "browser": "error",
            "ready": false,
            "error": e.to_string(),
        })),
    }
}

/// GET /api/health
///
/// Liveness probe. `browser_ready` reflects an actual health probe against
/// the session, not mere presence.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let session = state.sessions.current().await.ok();

    let (ready, current_url) = match &session {
        Some(session) => (
            session.is_alive().await,
            session.current_url().await.ok(),
        ),
        None => (false, None),
    };

    Json(json!({
        "status": "healthy",
        "browser_initialized": session.is_some(),
        "browser_ready": ready,
        "current_url": current_url,
        "timestamp": Utc::now().timestamp(),
    }))
}
