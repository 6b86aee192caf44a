//! Page-level operations: navigation, screenshot, HTML, script execution.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

/// Request to navigate the shared session.
#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub url: Option<String>,
}

/// Response after navigation.
#[derive(Debug, Serialize)]
pub struct NavigateResponse {
    pub success: bool,
    pub url: String,
    pub title: String,
}

/// POST /navigate
///
/// Auto-creates the session; navigation is the entry point for a fresh
/// browser.
pub async fn navigate(
    State(state): State<Arc<AppState>>,
    body: Option<Json<NavigateRequest>>,
) -> Result<Json<NavigateResponse>, ApiError> {
    let url = body
        .and_then(|Json(req)| req.url)
        .filter(|u| !u.is_empty())
        .ok_or(ApiError::MissingField("URL is required"))?;

    let _guard = state.sessions.lock_ops().await;
    let session = state.sessions.ensure().await?;

    info!("Navigating to: {}", url);
    session.navigate(&url).await?;

    Ok(Json(NavigateResponse {
        success: true,
        url: session.current_url().await?,
        title: session.title().await?,
    }))
}

/// Screenshot payload.
#[derive(Debug, Serialize)]
pub struct ScreenshotResponse {
    pub success: bool,
    /// Base64-encoded PNG.
    pub screenshot: String,
    pub url: String,
    pub format: &'static str,
}

/// GET /screenshot
pub async fn screenshot(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ScreenshotResponse>, ApiError> {
    let _guard = state.sessions.lock_ops().await;
    let session = state.sessions.current().await?;

    let screenshot = session.screenshot_png().await?;
    let url = session.current_url().await?;

    Ok(Json(ScreenshotResponse {
        success: true,
        screenshot,
        url,
        format: "png",
    }))
}

/// Page HTML payload.
#[derive(Debug, Serialize)]
pub struct HtmlResponse {
    pub success: bool,
    pub html: String,
    pub url: String,
    pub title: String,
}

/// GET /get_html
pub async fn get_html(State(state): State<Arc<AppState>>) -> Result<Json<HtmlResponse>, ApiError> {
    let _guard = state.sessions.lock_ops().await;
    let session = state.sessions.current().await?;

    Ok(Json(HtmlResponse {
        success: true,
        html: session.html().await?,
        url: session.current_url().await?,
        title: session.title().await?,
    }))
}

/// Request to run a script in the page.
#[derive(Debug, Deserialize)]
pub struct ExecuteJsRequest {
    pub script: Option<String>,
}

/// Script result payload.
#[derive(Debug, Serialize)]
pub struct ExecuteJsResponse {
    pub success: bool,
    pub result: Value,
}

/// POST /execute_js
///
/// Scripts are treated as a function body (`return document.title;` works),
/// matching what WebDriver-era callers send.
pub async fn execute_js(
    State(state): State<Arc<AppState>>,
    body: Option<Json<ExecuteJsRequest>>,
) -> Result<Json<ExecuteJsResponse>, ApiError> {
    let script = body
        .and_then(|Json(req)| req.script)
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingField("script is required"))?;

    let _guard = state.sessions.lock_ops().await;
    let session = state.sessions.current().await?;

    let result = session.run_script(&script).await?;

    Ok(Json(ExecuteJsResponse {
        success: true,
        result,
    }))
}
