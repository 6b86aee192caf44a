//! Browser session ownership.
//!
//! The session is an explicitly managed resource: created on demand (or
//! eagerly at startup), health-checked before reuse, recreated when the
//! browser dies, and serialized behind a single-writer operations lock.

mod browser;
mod core;
mod ops;
mod types;

pub use browser::BrowserSession;
pub use core::SessionHolder;
pub use ops::ResolvedElement;
pub use types::{BrowserConfig, BrowserError};

#[cfg(test)]
#[path = "holder_tests.rs"]
mod tests;
