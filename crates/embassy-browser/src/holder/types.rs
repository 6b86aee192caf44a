//! Session holder type definitions and configuration.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::cdp::CdpError;

/// Browser session errors.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Browser session not started")]
    NotStarted,

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Wait for {what} timed out after {timeout_ms}ms")]
    WaitTimeout { what: String, timeout_ms: u64 },

    #[error("Action failed: {0}")]
    ActionFailed(String),

    #[error("Chromium not found. Install Google Chrome or Chromium.")]
    ChromiumNotFound,

    #[error("Failed to launch Chromium: {0}")]
    LaunchFailed(String),
}

impl From<CdpError> for BrowserError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::ConnectionFailed(msg) => BrowserError::ConnectionFailed(msg),
            CdpError::BrowserNotAvailable(msg) => BrowserError::ConnectionFailed(msg),
            CdpError::NavigationFailed(msg) => BrowserError::NavigationFailed(msg),
            CdpError::ElementNotFound(msg) => BrowserError::ElementNotFound(msg),
            CdpError::JavaScript(msg) => BrowserError::ActionFailed(format!("JS error: {}", msg)),
            CdpError::Timeout(msg) => BrowserError::ActionFailed(format!("Timeout: {}", msg)),
            CdpError::SessionClosed => BrowserError::NotStarted,
            _ => BrowserError::ActionFailed(e.to_string()),
        }
    }
}

/// Browser session configuration. The flag set is fixed: headless, fixed
/// viewport, automation-detection signaling disabled, certificate errors
/// tolerated, fixed user-agent, bounded page-load wait.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Chromium remote-debugging port.
    pub debug_port: u16,
    /// Run headless (`--headless=new`).
    pub headless: bool,
    /// Window/viewport width.
    pub viewport_width: u32,
    /// Window/viewport height.
    pub viewport_height: u32,
    /// User-agent presented to pages.
    pub user_agent: String,
    /// Profile directory; a per-user default is derived when unset.
    pub profile_dir: Option<PathBuf>,
    /// Upper bound for page loads.
    pub page_load_timeout: Duration,
    /// Default upper bound for element waits in scripted flows.
    pub element_timeout: Duration,
}

pub(crate) const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            profile_dir: None,
            page_load_timeout: Duration::from_secs(30),
            element_timeout: Duration::from_secs(10),
        }
    }
}

impl BrowserConfig {
    /// CDP debugging endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }

    /// Profile directory, with a home-relative default.
    pub fn resolved_profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".browser-embassy")
                .join("profile")
        })
    }

    /// Chromium command-line flags for this configuration.
    pub fn chromium_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.debug_port),
            format!("--user-data-dir={}", self.resolved_profile_dir().display()),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-background-networking".to_string(),
            "--disable-sync".to_string(),
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--disable-gpu".to_string(),
            "--disable-blink-features=AutomationControlled".to_string(),
            "--ignore-certificate-errors".to_string(),
            "--allow-insecure-localhost".to_string(),
            format!("--window-size={},{}", self.viewport_width, self.viewport_height),
            format!("--user-agent={}", self.user_agent),
        ];

        if self.headless {
            args.push("--headless=new".to_string());
        }

        args
    }
}
