//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of portal vocabulary:
//! - Common error types and result aliases
//! - Typed ID wrappers (tab sessions)
//!
//! Only things with the same meaning in every portal crate belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
