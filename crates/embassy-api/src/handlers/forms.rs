//! Form operations: field discovery, filling, clicking.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use embassy_browser::{visible_fields, FormField, Locator, LocatorMethod};

use crate::error::ApiError;
use crate::state::AppState;

/// Discovered-fields payload. `fields` carries only visible controls;
/// `total` counts everything found on the page.
#[derive(Debug, Serialize)]
pub struct ExtractFieldsResponse {
    pub success: bool,
    pub fields: Vec<FormField>,
    pub total: usize,
    pub visible: usize,
}

/// GET /extract_fields
pub async fn extract_fields(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExtractFieldsResponse>, ApiError> {
    let _guard = state.sessions.lock_ops().await;
    let session = state.sessions.current().await?;

    let all = session.discover_fields().await?;
    let fields = visible_fields(&all);

    Ok(Json(ExtractFieldsResponse {
        success: true,
        total: all.len(),
        visible: fields.len(),
        fields,
    }))
}

/// Request to fill one form field.
#[derive(Debug, Deserialize)]
pub struct FillFieldRequest {
    pub selector: Option<String>,
    pub value: Option<String>,
    pub method: Option<String>,
}

/// Fill confirmation.
#[derive(Debug, Serialize)]
pub struct FillFieldResponse {
    pub success: bool,
    pub selector: String,
    pub filled: bool,
}

/// POST /fill_field
///
/// One lookup attempt with the requested method; a selector that resolves
/// nothing is an error, never a false `filled`.
pub async fn fill_field(
    State(state): State<Arc<AppState>>,
    body: Option<Json<FillFieldRequest>>,
) -> Result<Json<FillFieldResponse>, ApiError> {
    let req = body.map(|Json(r)| r);
    let selector = req
        .as_ref()
        .and_then(|r| r.selector.clone())
        .filter(|s| !s.is_empty());
    let value = req.as_ref().and_then(|r| r.value.clone());

    let (Some(selector), Some(value)) = (selector, value) else {
        return Err(ApiError::MissingField("selector and value are required"));
    };

    let method = LocatorMethod::from_tag(req.as_ref().and_then(|r| r.method.as_deref()));
    let locator = Locator::new(method, selector.clone());

    let _guard = state.sessions.lock_ops().await;
    let session = state.sessions.current().await?;

    session.fill(&locator, &value).await?;
    info!("Filled field {}", selector);

    Ok(Json(FillFieldResponse {
        success: true,
        selector,
        filled: true,
    }))
}

/// Request to click an element.
#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    pub selector: Option<String>,
    pub method: Option<String>,
}

/// Click confirmation with the post-click location.
#[derive(Debug, Serialize)]
pub struct ClickResponse {
    pub success: bool,
    pub selector: String,
    pub clicked: bool,
    pub current_url: String,
}

/// POST /click
pub async fn click(
    State(state): State<Arc<AppState>>,
    body: Option<Json<ClickRequest>>,
) -> Result<Json<ClickResponse>, ApiError> {
    let req = body.map(|Json(r)| r);
    let selector = req
        .as_ref()
        .and_then(|r| r.selector.clone())
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingField("selector is required"))?;

    let method = LocatorMethod::from_tag(req.as_ref().and_then(|r| r.method.as_deref()));
    let locator = Locator::new(method, selector.clone());

    let _guard = state.sessions.lock_ops().await;
    let session = state.sessions.current().await?;

    session.click(&locator).await?;
    info!("Clicked on {}", selector);

    Ok(Json(ClickResponse {
        success: true,
        selector,
        clicked: true,
        current_url: session.current_url().await?,
    }))
}
