//! One live browser session: Chromium process, CDP connection, one page.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::process::{Child, Command};
use tracing::{info, warn};

use crate::cdp::{CdpClient, PageSession};

use super::types::{BrowserConfig, BrowserError};

/// A running browser session.
///
/// Owns the Chromium child process when this service launched it, the CDP
/// client connection, and the single page every operation acts on.
pub struct BrowserSession {
    pub(super) config: BrowserConfig,
    pub(super) client: CdpClient,
    pub(super) page: PageSession,
    /// Child handle when we spawned Chromium ourselves.
    child: Mutex<Option<Child>>,
}

impl BrowserSession {
    /// Start a session: launch Chromium if nothing is listening on the debug
    /// port, connect the CDP client, and open the working page.
    pub async fn start(config: BrowserConfig) -> Result<Self, BrowserError> {
        let endpoint = config.endpoint();
        let mut child = None;

        if !Self::debugger_up(&endpoint).await {
            info!(
                "No browser on port {}, launching Chromium",
                config.debug_port
            );
            let spawned = Self::launch(&config)?;
            info!("Chromium launched with PID {:?}", spawned.id());
            child = Some(spawned);

            let mut attempts = 0;
            let max_attempts = 30;
            while attempts < max_attempts {
                tokio::time::sleep(Duration::from_millis(200)).await;
                if Self::debugger_up(&endpoint).await {
                    break;
                }
                attempts += 1;
            }

            if attempts >= max_attempts {
                if let Some(mut c) = child {
                    let _ = c.start_kill();
                }
                return Err(BrowserError::LaunchFailed(
                    "Chromium did not open its debugging port in time".to_string(),
                ));
            }
        } else {
            info!("Browser already running on port {}", config.debug_port);
        }

        let client = CdpClient::connect(&endpoint).await?;
        let page = client.new_page(None).await?;

        info!("Browser session ready at {}", endpoint);

        Ok(Self {
            config,
            client,
            page,
            child: Mutex::new(child),
        })
    }

    /// Find a Chromium executable.
    pub fn find_chromium() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            let paths = [
                "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
                "/Applications/Chromium.app/Contents/MacOS/Chromium",
                "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
            ];
            if let Some(found) = paths.iter().map(PathBuf::from).find(|p| p.exists()) {
                return Some(found);
            }
        }

        #[cfg(target_os = "linux")]
        {
            let paths = [
                "/usr/bin/google-chrome",
                "/usr/bin/google-chrome-stable",
                "/usr/bin/chromium",
                "/usr/bin/chromium-browser",
                "/snap/bin/chromium",
            ];
            if let Some(found) = paths.iter().map(PathBuf::from).find(|p| p.exists()) {
                return Some(found);
            }
        }

        #[cfg(target_os = "windows")]
        {
            let paths = [
                r"C:\Program Files\Google\Chrome\Application\chrome.exe",
                r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            ];
            if let Some(found) = paths.iter().map(PathBuf::from).find(|p| p.exists()) {
                return Some(found);
            }
        }

        None
    }

    /// Spawn Chromium with the fixed flag set.
    fn launch(config: &BrowserConfig) -> Result<Child, BrowserError> {
        let chromium_path = Self::find_chromium().ok_or(BrowserError::ChromiumNotFound)?;

        let profile_dir = config.resolved_profile_dir();
        if let Err(e) = std::fs::create_dir_all(&profile_dir) {
            warn!("Failed to create profile directory: {}", e);
        }

        info!(
            "Launching {} with profile at {}",
            chromium_path.display(),
            profile_dir.display()
        );

        Command::new(&chromium_path)
            .args(config.chromium_args())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))
    }

    /// Check whether a CDP debugger answers on the endpoint.
    async fn debugger_up(endpoint: &str) -> bool {
        reqwest::get(format!("{}/json/version", endpoint))
            .await
            .is_ok()
    }

    /// Health probe: does the browser still answer commands?
    pub async fn is_alive(&self) -> bool {
        self.client.call("Browser.getVersion", None).await.is_ok()
    }

    /// Session configuration.
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Close the working page and kill Chromium if this session spawned it.
    pub async fn shutdown(&self) {
        let _ = self.client.close_page(self.page.target_id()).await;
        if let Some(mut child) = self.child.lock().take() {
            info!("Shutting down Chromium");
            let _ = child.start_kill();
        }
    }
}
