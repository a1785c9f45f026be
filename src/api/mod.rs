//! API Module
//!
//! HTTP handler and routing for the proxy.
//!
//! # Endpoints
//! - `GET /:username` - List a user's gists through the response cache

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
