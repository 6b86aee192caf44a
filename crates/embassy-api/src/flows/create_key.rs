//! Scripted API-key creation on the key-management console.
//!
//! Structured selectors are tried most-specific-first; when they all miss,
//! a text-matching heuristic scans clickable elements; when that misses too,
//! the caller gets a diagnostic snapshot (page text, screenshot, location)
//! instead of an error, so a human can disambiguate.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Local;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};
use url::Url;

use embassy_browser::{BrowserError, BrowserSession, Locator};

use crate::error::ApiError;
use crate::state::{AppState, FlowTargets};

/// Key-creation request. The whole body is optional.
#[derive(Debug, Default, Deserialize)]
pub struct CreateKeyRequest {
    pub key_name: Option<String>,
}

/// Upper bound for the optional name-dialog field to appear.
const NAME_FIELD_TIMEOUT: Duration = Duration::from_secs(5);

/// Truncation length for the diagnostic page-text preview.
const PREVIEW_CHARS: usize = 500;

static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sk-ant-[A-Za-z0-9_-]{95,}").unwrap());

/// Find a generated key in free page text.
pub(crate) fn extract_key_from_text(text: &str) -> Option<String> {
    KEY_PATTERN.find(text).map(|m| m.as_str().to_string())
}

/// Truncate on character boundaries.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Whether a location string points at the given host. Unparseable
/// locations (`about:blank`, empty) never match.
fn is_on_host(location: &str, host: &str) -> bool {
    Url::parse(location)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .is_some_and(|h| h == host)
}

fn default_key_name() -> String {
    format!("Auto-generated Key {}", Local::now().format("%Y%m%d_%H%M%S"))
}

/// Create-key button candidates, most specific first. XPath text matches
/// come last; they are the structured stand-in for label-based lookup.
fn create_button_candidates() -> Vec<Locator> {
    vec![
        Locator::css(r#"button[aria-label*="Create"]"#),
        Locator::css(r#"button[aria-label*="New"]"#),
        Locator::css("button.create-key"),
        Locator::css(r#"button[data-test="create-key"]"#),
        Locator::xpath(r#"//button[contains(translate(text(), "CREATE", "create"), "create")]"#),
        Locator::xpath(r#"//a[contains(translate(text(), "CREATE", "create"), "create")]"#),
        Locator::xpath(r#"//button[contains(translate(text(), "KEY", "key"), "key")]"#),
    ]
}

/// Candidates for the optional key-name field in the creation dialog.
fn name_field_candidates() -> Vec<Locator> {
    vec![
        Locator::css(r#"input[type="text"]"#),
        Locator::css(r#"input[placeholder*="name" i]"#),
        Locator::css(r#"input[name*="name" i]"#),
    ]
}

/// Confirmation button candidates.
fn confirm_button_candidates() -> Vec<Locator> {
    vec![
        Locator::xpath(r#"//button[contains(translate(text(), "CREATE", "create"), "create")]"#),
        Locator::xpath(r#"//button[contains(translate(text(), "CONFIRM", "confirm"), "confirm")]"#),
        Locator::css(r#"button[type="submit"]"#),
        Locator::css("button.primary"),
    ]
}

/// Heuristic fallback: scan clickable elements' visible text for the
/// create-key keywords and click the first hit.
const FIND_AND_CLICK_CREATE_SCRIPT: &str = r#"(() => {
    const clickable = Array.from(document.querySelectorAll('button, a'));
    const hit = clickable.find((el) => {
        const text = (el.textContent || '').toLowerCase();
        return text.includes('create') && (text.includes('key') || text.includes('api'));
    });
    if (!hit) return false;
    hit.scrollIntoView();
    hit.click();
    return true;
})()"#;

/// Heuristic fallback for the confirmation step; only visible buttons count.
const CONFIRM_FALLBACK_SCRIPT: &str = r#"(() => {
    const buttons = Array.from(document.querySelectorAll('button'));
    const hit = buttons.find((el) => {
        const text = (el.textContent || '').toLowerCase();
        return (text.includes('create') || text.includes('confirm') || el.type === 'submit')
            && el.offsetParent !== null;
    });
    if (!hit) return false;
    hit.click();
    return true;
})()"#;

/// Scan structured places a console might put the generated key: readonly
/// inputs, code/pre blocks, data attributes.
const KEY_SCAN_SCRIPT: &str = r#"(() => {
    const nodes = document.querySelectorAll('input[type="text"], input[readonly], textarea[readonly], code, pre');
    for (const node of nodes) {
        const value = (node.value || node.textContent || '').trim();
        if (value.startsWith('sk-ant-')) return value;
    }
    for (const el of document.querySelectorAll('[data-key], [data-api-key], [data-value]')) {
        for (const attr of el.attributes) {
            if (attr.value && attr.value.startsWith('sk-ant-')) return attr.value.trim();
        }
    }
    return null;
})()"#;

/// What the flow ended with. Soft misses are outcomes, not errors.
enum KeyFlowOutcome {
    Created {
        api_key: String,
        screenshot_before: String,
        screenshot_after: String,
        current_url: String,
    },
    ButtonNotFound {
        page_text_preview: String,
        screenshot: String,
        current_url: String,
    },
    KeyNotExtracted {
        screenshot: String,
        current_url: String,
        page_html_length: usize,
    },
}

/// POST /create_anthropic_key
pub async fn create_anthropic_key(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CreateKeyRequest>>,
) -> Response {
    let key_name = body
        .and_then(|Json(req)| req.key_name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(default_key_name);

    let _guard = state.sessions.lock_ops().await;
    let session = match state.sessions.ensure().await {
        Ok(session) => session,
        Err(e) => return ApiError::from(e).into_response(),
    };

    info!("Starting key-creation flow (key name: {})", key_name);
    match run(&session, &state.flows, &key_name).await {
        Ok(KeyFlowOutcome::Created {
            api_key,
            screenshot_before,
            screenshot_after,
            current_url,
        }) => {
            info!(
                "Extracted API key: {}...",
                truncate_chars(&api_key, 20)
            );
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "api_key": api_key,
                    "key_name": key_name,
                    "screenshot_before": screenshot_before,
                    "screenshot_after": screenshot_after,
                    "current_url": current_url,
                })),
            )
                .into_response()
        }
        Ok(KeyFlowOutcome::ButtonNotFound {
            page_text_preview,
            screenshot,
            current_url,
        }) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "error": "Could not find 'Create Key' button",
                "page_text_preview": page_text_preview,
                "screenshot": screenshot,
                "current_url": current_url,
                "suggestion": "Check whether a login is needed or the page structure changed",
            })),
        )
            .into_response(),
        Ok(KeyFlowOutcome::KeyNotExtracted {
            screenshot,
            current_url,
            page_html_length,
        }) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "error": "Could not extract API key from page",
                "screenshot": screenshot,
                "current_url": current_url,
                "page_html_length": page_html_length,
                "suggestion": "Check the screenshot to see whether the key was created; it may need manual extraction",
            })),
        )
            .into_response(),
        Err(e) => {
            error!("Key-creation flow failed: {}", e);
            let screenshot = session.screenshot_png().await.ok();
            let current_url = session.current_url().await.ok();
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": e.to_string(),
                    "screenshot": screenshot,
                    "current_url": current_url,
                })),
            )
                .into_response()
        }
    }
}

async fn run(
    session: &BrowserSession,
    flows: &FlowTargets,
    key_name: &str,
) -> Result<KeyFlowOutcome, BrowserError> {
    let location = session.current_url().await?;
    if !is_on_host(&location, &flows.keys_console_host) {
        info!("Navigating to key console: {}", flows.keys_console_url);
        session.navigate(&flows.keys_console_url).await?;
    }

    let screenshot_before = session.screenshot_png().await?;

    info!("Looking for the create-key button");
    let created_via = match session.resolve_first(&create_button_candidates()).await? {
        Some(found) => {
            session.click_node(found.node_id).await?;
            Some(found.node_id)
        }
        None => {
            info!("Structured selectors missed, trying the text heuristic");
            let clicked = session
                .evaluate(FIND_AND_CLICK_CREATE_SCRIPT)
                .await?
                .as_bool()
                .unwrap_or(false);

            if !clicked {
                warn!("Create-key button not found");
                let page_text = session
                    .evaluate("document.body.innerText")
                    .await?
                    .as_str()
                    .unwrap_or("")
                    .to_string();
                return Ok(KeyFlowOutcome::ButtonNotFound {
                    page_text_preview: truncate_chars(&page_text, PREVIEW_CHARS),
                    screenshot: screenshot_before,
                    current_url: session.current_url().await?,
                });
            }

            session.settle().await;
            None
        }
    };

    match session
        .wait_for_first(&name_field_candidates(), NAME_FIELD_TIMEOUT)
        .await
    {
        Ok(found) => {
            session.fill_node(found.node_id, key_name).await?;
            info!("Filled key name: {}", key_name);
        }
        Err(BrowserError::WaitTimeout { .. }) => {
            info!("No name field found; the dialog may not require one");
        }
        Err(e) => return Err(e),
    }

    info!("Looking for the confirmation button");
    let confirm = session
        .resolve_first(&confirm_button_candidates())
        .await?
        // the create button may still match; never click it twice
        .filter(|found| Some(found.node_id) != created_via);

    match confirm {
        Some(found) => {
            session.click_node(found.node_id).await?;
            info!("Clicked confirmation button");
        }
        None => {
            let clicked = session
                .evaluate(CONFIRM_FALLBACK_SCRIPT)
                .await?
                .as_bool()
                .unwrap_or(false);
            if clicked {
                session.settle().await;
            } else {
                warn!("No confirmation button found");
            }
        }
    }

    info!("Extracting the API key");
    let page_text = session
        .evaluate("document.body.innerText")
        .await?
        .as_str()
        .unwrap_or("")
        .to_string();

    let mut api_key = extract_key_from_text(&page_text);
    if api_key.is_none() {
        api_key = session
            .evaluate(KEY_SCAN_SCRIPT)
            .await?
            .as_str()
            .map(|s| s.to_string());
    }

    let screenshot_after = session.screenshot_png().await?;
    let current_url = session.current_url().await?;

    match api_key {
        Some(api_key) => Ok(KeyFlowOutcome::Created {
            api_key,
            screenshot_before,
            screenshot_after,
            current_url,
        }),
        None => {
            warn!("Could not extract an API key");
            let page_html_length = session.html().await?.len();
            Ok(KeyFlowOutcome::KeyNotExtracted {
                screenshot: screenshot_after,
                current_url,
                page_html_length,
            })
        }
    }
}

#[cfg(test)]
#[path = "create_key_tests.rs"]
mod tests;
