//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::PortalAppState;
pub use middleware::{AdminToken, PortalPrincipal, require_admin_token, require_portal_session};
pub use router::{portal_router, portal_router_with_state};
