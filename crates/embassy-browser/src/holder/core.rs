//! Process-wide session slot with explicit lifecycle.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::{info, warn};

use super::browser::BrowserSession;
use super::types::{BrowserConfig, BrowserError};

/// Holds the one browser session for this process.
///
/// The session is created on demand, health-checked on reuse, and replaced
/// when the underlying browser stops answering. An operations mutex gives
/// callers single-writer access: every request serializes its whole browser
/// interaction through [`SessionHolder::lock_ops`] so concurrent requests
/// queue instead of interleaving navigation and reads.
pub struct SessionHolder {
    config: BrowserConfig,
    slot: RwLock<Option<Arc<BrowserSession>>>,
    ops: Mutex<()>,
}

impl SessionHolder {
    /// Create an empty holder.
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            slot: RwLock::new(None),
            ops: Mutex::new(()),
        }
    }

    /// Holder configuration.
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Acquire the single-writer operations guard.
    pub async fn lock_ops(&self) -> MutexGuard<'_, ()> {
        self.ops.lock().await
    }

    /// Whether a session currently exists (no health check).
    pub async fn is_started(&self) -> bool {
        self.slot.read().await.is_some()
    }

    /// Get the live session, creating or recreating it as needed.
    ///
    /// An existing session is probed first; one that stopped answering is
    /// shut down and replaced instead of poisoning every later request.
    pub async fn ensure(&self) -> Result<Arc<BrowserSession>, BrowserError> {
        if let Some(session) = self.slot.read().await.clone() {
            if session.is_alive().await {
                return Ok(session);
            }
            warn!("Browser session unresponsive, recreating");
        }

        let mut slot = self.slot.write().await;

        // Another task may have replaced the session while we waited.
        if let Some(session) = slot.clone() {
            if session.is_alive().await {
                return Ok(session);
            }
            session.shutdown().await;
            *slot = None;
        }

        let session = Arc::new(BrowserSession::start(self.config.clone()).await?);
        *slot = Some(session.clone());
        info!("Browser session created");

        Ok(session)
    }

    /// Get the current session without creating one.
    pub async fn current(&self) -> Result<Arc<BrowserSession>, BrowserError> {
        self.slot
            .read()
            .await
            .clone()
            .ok_or(BrowserError::NotStarted)
    }

    /// Shut down and drop the current session, if any.
    pub async fn dispose(&self) {
        if let Some(session) = self.slot.write().await.take() {
            session.shutdown().await;
            info!("Browser session disposed");
        }
    }
}
