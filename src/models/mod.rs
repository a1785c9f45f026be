//! Request and Response models for the gist proxy
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! parsing query strings and rendering HTTP response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ListQuery, PageParams};
pub use responses::{ErrorResponse, PrettyJson};
