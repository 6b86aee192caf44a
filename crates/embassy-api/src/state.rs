//! Shared application state.

use std::sync::Arc;

use embassy_browser::{BrowserConfig, SessionHolder};

/// Targets for the scripted console flows.
#[derive(Debug, Clone)]
pub struct FlowTargets {
    /// Cloud-console sign-in page.
    pub signin_url: String,
    /// API-key management console page.
    pub keys_console_url: String,
    /// Host that identifies the key console; skips re-navigation when the
    /// browser is already there.
    pub keys_console_host: String,
}

impl Default for FlowTargets {
    fn default() -> Self {
        Self {
            signin_url:
                "https://idcs-86c9de635d0e4016b64bfef436100f1e.identity.oraclecloud.com/ui/v1/signin"
                    .to_string(),
            keys_console_url: "https://console.anthropic.com/settings/keys".to_string(),
            keys_console_host: "console.anthropic.com".to_string(),
        }
    }
}

/// Application state shared by all handlers.
pub struct AppState {
    /// The process-wide browser session.
    pub sessions: Arc<SessionHolder>,
    /// Scripted-flow targets.
    pub flows: FlowTargets,
}

impl AppState {
    pub fn new(sessions: Arc<SessionHolder>) -> Self {
        Self {
            sessions,
            flows: FlowTargets::default(),
        }
    }

    pub fn with_flows(sessions: Arc<SessionHolder>, flows: FlowTargets) -> Self {
        Self { sessions, flows }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(SessionHolder::new(BrowserConfig::default())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flow_targets() {
        let flows = FlowTargets::default();
        assert!(flows.signin_url.contains("oraclecloud.com"));
        assert!(flows.keys_console_url.contains("console.anthropic.com"));
        assert_eq!(flows.keys_console_host, "console.anthropic.com");
    }

    #[tokio::test]
    async fn test_default_state_has_no_session() {
        let state = AppState::default();
        assert!(!state.sessions.is_started().await);
    }
}
