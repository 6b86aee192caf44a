//! Browser session management for the embassy service.
//!
//! Drives a headless Chromium over the Chrome DevTools Protocol (CDP) and
//! owns the process-wide session the HTTP facade operates on.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │  SessionHolder  │ ◄──────────────► │    Chromium      │
//! │  (this crate)   │       CDP        │  (headless)      │
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! One session per process: the holder creates it on demand with a fixed
//! configuration, health-checks it before reuse, and replaces it when the
//! browser stops answering. All page operations go through a single-writer
//! lock so concurrent callers cannot interleave navigation and reads.

pub mod cdp;
pub mod fields;
mod holder;
pub mod locator;

pub use fields::{visible_fields, FormField};
pub use holder::{BrowserConfig, BrowserError, BrowserSession, ResolvedElement, SessionHolder};
pub use locator::{Locator, LocatorMethod};
