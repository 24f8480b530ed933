//! Auth (Portal Session) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Email domain policy, session records, route table, browser effects
//! - `application/` - Session controller, route guards, admin login, per-tab service
//! - `infra/` - In-memory session store, tab registry, identity provider clients
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Google sign-in restricted to university email domains
//! - One automatic redirect to the student or staff landing view per load
//! - Generic route guard (identity or admin token) and an admin guard that
//!   revalidates the admin token with the identity provider every five minutes
//! - Admin credential login with a client-side attempt lockout
//!
//! ## Session Model
//! - Each browser tab owns a server-side session store, named by a signed cookie
//! - Navigations and alerts are returned to the front-end shell as effects
//! - Nothing persists across a restart; closing the tab ends the session

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::PortalConfig;
pub use error::{AuthError, AuthResult};
pub use infra::strapi::StrapiIdentityClient;
pub use presentation::router::{portal_router, portal_router_with_state};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::identity::*;
    pub use crate::domain::user_type::UserType;
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
