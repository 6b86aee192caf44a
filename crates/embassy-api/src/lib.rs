//! HTTP facade over the shared browser session.
//!
//! Every endpoint validates its input, performs one or a short fixed
//! sequence of browser operations, and answers with a JSON envelope carrying
//! `success` or `error`. Page-touching handlers serialize through the
//! session holder's single-writer lock; the status and health probes stay
//! lock-free so they remain responsive during long flows.

pub mod error;
pub mod flows;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use server::{Server, ServerConfig};
pub use state::{AppState, FlowTargets};
