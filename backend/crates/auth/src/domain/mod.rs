//! Domain Layer
//!
//! Email classification, session records, route table and the interfaces to
//! the browser and the upstream identity provider.

pub mod browser;
pub mod domain_policy;
pub mod identity;
pub mod repository;
pub mod route;
pub mod session_store;
pub mod user_type;

// Re-exports
pub use browser::{Browser, Navigation, ShellEffects};
pub use domain_policy::{DomainPolicy, DomainRule};
pub use identity::{AdminCredentials, AdminGrant, AdminProfile, IdentityRecord};
pub use repository::{AdminAuthenticator, IdentityVerifier};
pub use route::{Access, RouteEntry, RouteTarget, View, route_table};
pub use session_store::{SessionRepository, SessionStore};
pub use user_type::UserType;
