//! Application Layer
//!
//! Session controller, route guards, admin login and the per-tab service.

pub mod admin_guard;
pub mod admin_login;
pub mod config;
pub mod portal_tab;
pub mod route_guard;
pub mod session_controller;

// Re-exports
pub use admin_guard::{AdminGuardStatus, AdminRouteGuard};
pub use admin_login::{AdminLoginInput, AdminLoginUseCase, LockoutStatus};
pub use config::PortalConfig;
pub use portal_tab::{PortalTab, RouteResolution};
pub use route_guard::{Authorization, GuardState, RouteGuard};
pub use session_controller::{LoginOutcome, SessionController, SessionPhase};
