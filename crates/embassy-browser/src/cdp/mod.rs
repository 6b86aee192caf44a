//! Chrome DevTools Protocol (CDP) client implementation.
//!
//! Pure Rust CDP client: connects to Chromium over WebSocket and speaks the
//! CDP JSON-RPC protocol. One browser-level connection carries both
//! browser-scoped commands and the page session's commands.

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
