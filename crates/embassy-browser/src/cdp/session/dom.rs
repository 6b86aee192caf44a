//! DOM lookup and element operations.

use serde_json::json;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::BoxModel;

use super::core::PageSession;

impl PageSession {
    /// Get the document root node id. Re-fetched per lookup since node ids
    /// are invalidated by navigation.
    async fn get_document_root(&self) -> Result<i64, CdpError> {
        let result = self
            .call("DOM.getDocument", Some(json!({"depth": 0})))
            .await?;

        result["root"]["nodeId"]
            .as_i64()
            .ok_or_else(|| CdpError::InvalidResponse("Missing document root".to_string()))
    }

    /// Query a CSS selector, returning the first matching node id.
    pub async fn query_selector(&self, selector: &str) -> Result<Option<i64>, CdpError> {
        let root = self.get_document_root().await?;

        let result = self
            .call(
                "DOM.querySelector",
                Some(json!({
                    "nodeId": root,
                    "selector": selector,
                })),
            )
            .await?;

        let node_id = result["nodeId"].as_i64().unwrap_or(0);
        if node_id == 0 {
            Ok(None)
        } else {
            Ok(Some(node_id))
        }
    }

    /// Find the first node matching an XPath expression.
    ///
    /// Goes through `DOM.performSearch`, which accepts XPath queries; the
    /// search is discarded once the first result is read.
    pub async fn find_by_xpath(&self, xpath: &str) -> Result<Option<i64>, CdpError> {
        // performSearch requires a known document.
        self.get_document_root().await?;

        let search = self
            .call("DOM.performSearch", Some(json!({"query": xpath})))
            .await?;

        let search_id = search["searchId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing searchId".to_string()))?
            .to_string();
        let count = search["resultCount"].as_i64().unwrap_or(0);

        let found = if count > 0 {
            let results = self
                .call(
                    "DOM.getSearchResults",
                    Some(json!({
                        "searchId": search_id,
                        "fromIndex": 0,
                        "toIndex": 1,
                    })),
                )
                .await?;

            results["nodeIds"]
                .as_array()
                .and_then(|ids| ids.first())
                .and_then(|id| id.as_i64())
        } else {
            None
        };

        let _ = self
            .call(
                "DOM.discardSearchResults",
                Some(json!({"searchId": search_id})),
            )
            .await;

        Ok(found)
    }

    /// Get the box model for a node. `None` when the node has no layout
    /// (hidden or detached).
    pub async fn get_box_model(&self, node_id: i64) -> Result<Option<BoxModel>, CdpError> {
        let result = self
            .call("DOM.getBoxModel", Some(json!({"nodeId": node_id})))
            .await;

        match result {
            Ok(r) => {
                let model: BoxModel = serde_json::from_value(r["model"].clone())?;
                Ok(Some(model))
            }
            Err(CdpError::Protocol { code: -32000, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Focus an element.
    pub async fn focus(&self, node_id: i64) -> Result<(), CdpError> {
        self.call("DOM.focus", Some(json!({"nodeId": node_id})))
            .await?;
        Ok(())
    }

    /// Replace an input element's value: focus, select all, type.
    pub async fn fill_node(&self, node_id: i64, value: &str) -> Result<(), CdpError> {
        self.focus(node_id).await?;
        self.press_key_combo("Control+a").await?;
        self.type_text(value).await?;
        Ok(())
    }

    /// Click the center of a node's content box.
    pub async fn click_node(&self, node_id: i64) -> Result<(), CdpError> {
        let box_model = self
            .get_box_model(node_id)
            .await?
            .ok_or_else(|| CdpError::ElementNotFound(format!("node {} (not visible)", node_id)))?;

        let (x, y) = Self::quad_center(&box_model.content);
        self.click(x, y).await
    }

    /// Calculate the center point of a quad.
    pub(super) fn quad_center(quad: &[f64]) -> (f64, f64) {
        if quad.len() >= 8 {
            let x = (quad[0] + quad[2] + quad[4] + quad[6]) / 4.0;
            let y = (quad[1] + quad[3] + quad[5] + quad[7]) / 4.0;
            (x, y)
        } else {
            (0.0, 0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_center() {
        let quad = [0.0, 0.0, 100.0, 0.0, 100.0, 40.0, 0.0, 40.0];
        assert_eq!(PageSession::quad_center(&quad), (50.0, 20.0));
    }

    #[test]
    fn test_quad_center_short_quad() {
        assert_eq!(PageSession::quad_center(&[1.0, 2.0]), (0.0, 0.0));
    }
}
