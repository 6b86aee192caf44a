//! JavaScript execution.

use serde_json::{json, Value};

use crate::cdp::error::CdpError;

use super::core::PageSession;

impl PageSession {
    /// Evaluate a JavaScript expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let text = Self::exception_text(exception);
            return Err(CdpError::JavaScript(text));
        }

        Ok(result["result"]["value"].clone())
    }

    /// Evaluate a script written as a function body (`return ...;` style),
    /// matching what WebDriver-era callers send.
    pub async fn evaluate_body(&self, body: &str) -> Result<Value, CdpError> {
        let expression = format!("(() => {{\n{}\n}})()", body);
        self.evaluate(&expression).await
    }

    fn exception_text(exception: &Value) -> String {
        // Prefer the thrown value's description over the generic "Uncaught".
        exception["exception"]["description"]
            .as_str()
            .or_else(|| exception["text"].as_str())
            .unwrap_or("Unknown error")
            .to_string()
    }
}
