//! HTTP route definitions.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::flows::{create_key, login};
use crate::handlers::{forms, meta, page};
use crate::state::AppState;

/// Create the service router.
///
/// ## Route Structure
///
/// ```text
/// GET  /                     - Service descriptor
/// GET  /status               - Browser status
/// GET  /api/health           - Liveness probe
///
/// POST /navigate             - Navigate to URL (auto-creates the session)
/// GET  /screenshot           - Screenshot of the current page
/// GET  /get_html             - HTML of the current page
/// POST /execute_js           - Run JavaScript in the page
///
/// GET  /extract_fields       - Discover form fields
/// POST /fill_field           - Fill a form field
/// POST /click                - Click an element
///
/// POST /oracle_login         - Scripted cloud-console sign-in
/// POST /create_anthropic_key - Scripted API key creation
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(meta::service_descriptor))
        .route("/status", get(meta::browser_status))
        .route("/api/health", get(meta::health))
        .route("/navigate", post(page::navigate))
        .route("/screenshot", get(page::screenshot))
        .route("/get_html", get(page::get_html))
        .route("/execute_js", post(page::execute_js))
        .route("/extract_fields", get(forms::extract_fields))
        .route("/fill_field", post(forms::fill_field))
        .route("/click", post(forms::click))
        .route("/oracle_login", post(login::oracle_login))
        .route("/create_anthropic_key", post(create_key::create_anthropic_key))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
