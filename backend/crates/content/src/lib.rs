//! Content Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Collection names, aggregated records, source traits
//! - `application/` - Use cases (common data, dashboards, collections, blog)
//! - `infra/` - Strapi CMS and WordPress blog HTTP clients
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Failure Model
//! - Every outbound call aborts after the configured timeout (30 s)
//! - Concurrent sections wait for each other; a failed section degrades to empty
//! - Single-resource reads surface the upstream failure with a retry action

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ContentConfig;
pub use error::{ContentError, ContentResult};
pub use presentation::router::{content_router, content_router_with_state};

pub mod models {
    pub use crate::domain::records::*;
    pub use crate::presentation::dto::*;
}
