//! High-level page operations on a browser session.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::cdp::CdpError;
use crate::fields::{FormField, DISCOVER_FIELDS_SCRIPT};
use crate::locator::Locator;

use super::browser::BrowserSession;
use super::types::BrowserError;

/// Poll interval for candidate-list waits.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// An element resolved from a candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedElement {
    /// Index of the candidate that matched.
    pub candidate: usize,
    /// CDP node id, valid until the next navigation.
    pub node_id: i64,
}

impl BrowserSession {
    /// Navigate the working page, bounded by the configured page-load timeout.
    pub async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.page
            .navigate(url, self.config.page_load_timeout)
            .await?;
        Ok(())
    }

    /// Current location of the working page.
    pub async fn current_url(&self) -> Result<String, BrowserError> {
        Ok(self.page.get_url().await?)
    }

    /// Document title of the working page.
    pub async fn title(&self) -> Result<String, BrowserError> {
        Ok(self.page.get_title().await?)
    }

    /// Full HTML of the working page.
    pub async fn html(&self) -> Result<String, BrowserError> {
        Ok(self.page.get_content().await?)
    }

    /// Viewport screenshot as base64 PNG.
    pub async fn screenshot_png(&self) -> Result<String, BrowserError> {
        Ok(self.page.screenshot_png().await?)
    }

    /// Evaluate a JavaScript expression.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, BrowserError> {
        Ok(self.page.evaluate(expression).await?)
    }

    /// Run a script written as a function body (`return ...;` style).
    pub async fn run_script(&self, body: &str) -> Result<Value, BrowserError> {
        Ok(self.page.evaluate_body(body).await?)
    }

    /// Wait until the page settles after an action that may navigate.
    ///
    /// A click does not have to trigger navigation, so a load timeout here is
    /// logged and tolerated rather than failing the operation.
    pub async fn settle(&self) {
        match self.page.wait_for_load(self.config.page_load_timeout).await {
            Ok(()) => {}
            Err(CdpError::Timeout(msg)) => warn!("Page did not settle: {}", msg),
            Err(e) => warn!("Load-state check failed: {}", e),
        }
    }

    /// Resolve a locator to a node id. Exactly one lookup attempt with the
    /// locator's method; `Ok(None)` when nothing matches.
    pub async fn resolve(&self, locator: &Locator) -> Result<Option<i64>, BrowserError> {
        let found = match locator.as_css() {
            Some(css) => self.page.query_selector(&css).await?,
            None => self.page.find_by_xpath(&locator.target).await?,
        };
        Ok(found)
    }

    /// Try a prioritized candidate list in order, stopping at the first
    /// match. Lookup errors on individual candidates (e.g. selector syntax
    /// the page rejects) count as misses.
    pub async fn resolve_first(
        &self,
        candidates: &[Locator],
    ) -> Result<Option<ResolvedElement>, BrowserError> {
        for (index, locator) in candidates.iter().enumerate() {
            match self.resolve(locator).await {
                Ok(Some(node_id)) => {
                    debug!("Matched candidate {}: {}", index, locator);
                    return Ok(Some(ResolvedElement {
                        candidate: index,
                        node_id,
                    }));
                }
                Ok(None) => {}
                Err(e) => {
                    debug!("Candidate {} failed ({}): {}", index, locator, e);
                }
            }
        }
        Ok(None)
    }

    /// Wait for any candidate to appear, bounded by `timeout`.
    pub async fn wait_for_first(
        &self,
        candidates: &[Locator],
        timeout: Duration,
    ) -> Result<ResolvedElement, BrowserError> {
        let start = std::time::Instant::now();

        loop {
            if let Some(found) = self.resolve_first(candidates).await? {
                return Ok(found);
            }

            if start.elapsed() > timeout {
                let what = candidates
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(" | ");
                return Err(BrowserError::WaitTimeout {
                    what,
                    timeout_ms: timeout.as_millis() as u64,
                });
            }

            tokio::time::sleep(WAIT_POLL_INTERVAL).await;
        }
    }

    /// Fill the element the locator resolves to, replacing its value.
    pub async fn fill(&self, locator: &Locator, value: &str) -> Result<(), BrowserError> {
        let node_id = self
            .resolve(locator)
            .await?
            .ok_or_else(|| BrowserError::ElementNotFound(locator.to_string()))?;

        self.fill_node(node_id, value).await
    }

    /// Fill an already-resolved node.
    pub async fn fill_node(&self, node_id: i64, value: &str) -> Result<(), BrowserError> {
        self.page.fill_node(node_id, value).await?;
        Ok(())
    }

    /// Click the element the locator resolves to and wait for the page to
    /// settle.
    pub async fn click(&self, locator: &Locator) -> Result<(), BrowserError> {
        let node_id = self
            .resolve(locator)
            .await?
            .ok_or_else(|| BrowserError::ElementNotFound(locator.to_string()))?;

        self.click_node(node_id).await
    }

    /// Click an already-resolved node and wait for the page to settle.
    pub async fn click_node(&self, node_id: i64) -> Result<(), BrowserError> {
        self.page.click_node(node_id).await?;
        self.settle().await;
        Ok(())
    }

    /// Discover form fields on the working page. Returns every control,
    /// visible or not; callers filter.
    pub async fn discover_fields(&self) -> Result<Vec<FormField>, BrowserError> {
        let raw = self.page.evaluate(DISCOVER_FIELDS_SCRIPT).await?;
        let fields: Vec<FormField> = serde_json::from_value(raw)
            .map_err(|e| BrowserError::ActionFailed(format!("Field payload: {}", e)))?;
        Ok(fields)
    }
}
